//! Template context — serializable rendering payload built from a [`Roster`].

use serde::{Deserialize, Serialize};

use patrons_core::{RegistryContract, Roster, Tier};

use crate::error::RenderError;

/// Everything the Lua template sees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterContext {
    /// Lua global/method names the document calls into.
    pub registry: RegistryContract,
    /// Entries in render order: gold first, then silver, each tier pre-sorted.
    pub entries: Vec<EntryCtx>,
    pub gold_count: usize,
    pub silver_count: usize,
}

/// One `{ name = ..., tier = ... }` row. `name` is raw; the template escapes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryCtx {
    pub name: String,
    pub tier: Tier,
}

impl RosterContext {
    /// Build a [`RosterContext`] from a classified [`Roster`].
    pub fn from_roster(roster: &Roster, registry: &RegistryContract) -> Self {
        let entries = roster
            .entries()
            .map(|(name, tier)| EntryCtx {
                name: name.to_string(),
                tier,
            })
            .collect();

        RosterContext {
            registry: registry.clone(),
            entries,
            gold_count: roster.gold.len(),
            silver_count: roster.silver.len(),
        }
    }

    /// Convert to a [`tera::Context`] for rendering.
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        tera::Context::from_serialize(self).map_err(RenderError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_keeps_render_order() {
        let roster = Roster {
            gold: vec!["Zed".into()],
            silver: vec!["Amy".into(), "bo".into()],
        };
        let ctx = RosterContext::from_roster(&roster, &RegistryContract::default());
        assert_eq!(ctx.gold_count, 1);
        assert_eq!(ctx.silver_count, 2);
        let order: Vec<_> = ctx.entries.iter().map(|e| (e.name.as_str(), e.tier)).collect();
        assert_eq!(
            order,
            vec![("Zed", Tier::Gold), ("Amy", Tier::Silver), ("bo", Tier::Silver)]
        );
    }

    #[test]
    fn to_tera_context_succeeds() {
        let ctx = RosterContext::from_roster(&Roster::default(), &RegistryContract::default());
        let tera_ctx = ctx.to_tera_context().expect("context conversion");
        assert!(tera_ctx.contains_key("registry"));
    }
}
