//! Tier classification.
//!
//! [`classify`] is pure: the same members always produce the same [`Roster`].
//! Names are ordered by their lowercase form; names equal ignoring case fall
//! back to plain byte order so the result never depends on input order.

use crate::types::{Member, Roster, Tier};

/// Partition `members` into gold and silver name lists.
///
/// Members without a usable name (empty or the API placeholder) are dropped.
pub fn classify(members: &[Member]) -> Roster {
    let mut roster = Roster::default();
    let mut dropped = 0usize;

    for member in members {
        if !member.has_usable_name() {
            dropped += 1;
            continue;
        }
        match member.tier() {
            Tier::Gold => roster.gold.push(member.name.clone()),
            Tier::Silver => roster.silver.push(member.name.clone()),
        }
    }

    sort_names(&mut roster.gold);
    sort_names(&mut roster.silver);

    tracing::debug!(
        "classified {} members: {} gold, {} silver, {} dropped",
        members.len(),
        roster.gold.len(),
        roster.silver.len(),
        dropped
    );
    roster
}

/// Case-insensitive alphabetical order, ties broken by the original string.
pub fn sort_names(names: &mut [String]) {
    names.sort_by_cached_key(|name| (name.to_lowercase(), name.clone()));
}
