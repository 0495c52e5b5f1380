//! Domain types for the supporter roster.
//!
//! Members are transient: they exist for one run, built from API records or a
//! local fixture. The classified [`Roster`] is what the renderer consumes.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Name the API reports (and the fetcher substitutes) when a member has no name.
pub const PLACEHOLDER_NAME: &str = "Anonymous";

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Payment relationship of a member to the campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PatronStatus {
    #[serde(rename = "active_patron")]
    Active,
    #[serde(rename = "declined_patron")]
    Declined,
    #[serde(rename = "former_patron")]
    Former,
    /// No patron status at all (free follower).
    #[default]
    #[serde(rename = "none")]
    None,
}

impl PatronStatus {
    /// Map the API's `patron_status` attribute. Absent and unknown values are [`PatronStatus::None`].
    pub fn from_wire(raw: Option<&str>) -> Self {
        match raw {
            Some("active_patron") => PatronStatus::Active,
            Some("declined_patron") => PatronStatus::Declined,
            Some("former_patron") => PatronStatus::Former,
            _ => PatronStatus::None,
        }
    }
}

impl fmt::Display for PatronStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatronStatus::Active => write!(f, "active_patron"),
            PatronStatus::Declined => write!(f, "declined_patron"),
            PatronStatus::Former => write!(f, "former_patron"),
            PatronStatus::None => write!(f, "none"),
        }
    }
}

/// Rendered tier of a roster entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Active and currently paying.
    Gold,
    /// Everyone else with a usable name.
    Silver,
}

impl Tier {
    /// Both tiers in render order.
    pub fn all() -> &'static [Tier] {
        &[Tier::Gold, Tier::Silver]
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Gold => write!(f, "gold"),
            Tier::Silver => write!(f, "silver"),
        }
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A single campaign member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    #[serde(default = "placeholder_name")]
    pub name: String,
    #[serde(default, deserialize_with = "status_or_none")]
    pub status: PatronStatus,
    #[serde(default)]
    pub amount_cents: u64,
}

fn placeholder_name() -> String {
    PLACEHOLDER_NAME.to_string()
}

fn status_or_none<'de, D>(deserializer: D) -> Result<PatronStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(PatronStatus::from_wire(raw.as_deref()))
}

impl Member {
    pub fn new(name: impl Into<String>, status: PatronStatus, amount_cents: u64) -> Self {
        Self {
            name: name.into(),
            status,
            amount_cents,
        }
    }

    /// `false` for empty and placeholder names; such members are never rendered.
    pub fn has_usable_name(&self) -> bool {
        !self.name.is_empty() && self.name != PLACEHOLDER_NAME
    }

    /// Gold iff the member is active and currently entitled to a non-zero amount.
    pub fn tier(&self) -> Tier {
        if self.status == PatronStatus::Active && self.amount_cents > 0 {
            Tier::Gold
        } else {
            Tier::Silver
        }
    }
}

/// Classified supporter names, each tier sorted case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub gold: Vec<String>,
    #[serde(default)]
    pub silver: Vec<String>,
}

impl Roster {
    pub fn names(&self, tier: Tier) -> &[String] {
        match tier {
            Tier::Gold => &self.gold,
            Tier::Silver => &self.silver,
        }
    }

    pub fn len(&self) -> usize {
        self.gold.len() + self.silver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gold.is_empty() && self.silver.is_empty()
    }

    /// All entries in render order: gold first, then silver.
    pub fn entries(&self) -> impl Iterator<Item = (&str, Tier)> + '_ {
        Tier::all()
            .iter()
            .flat_map(move |tier| self.names(*tier).iter().map(move |n| (n.as_str(), *tier)))
    }
}

/// Names the generated Lua file relies on to reach the addon's patron registry.
///
/// The document looks up `_G.<global>.<namespace>` at load time and calls
/// `<clear>()` then `<add_batch>(entries)` on it. The consuming addon must
/// provide an object with both methods under that name before the file loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryContract {
    pub global: String,
    pub namespace: String,
    pub add_batch: String,
    pub clear: String,
}

impl Default for RegistryContract {
    fn default() -> Self {
        Self {
            global: "PeaversCommons".to_string(),
            namespace: "Patrons".to_string(),
            add_batch: "AddPatrons".to_string(),
            clear: "Clear".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
