//! New-supporter detection and best-effort announcement.

use std::collections::BTreeSet;

use patrons_api::{Announcement, Notifier};
use patrons_core::{Roster, Tier};

/// Names in `roster` that are not in `previous`, one [`Announcement`] per
/// tier that gained anyone. Names keep roster order.
pub fn new_names(roster: &Roster, previous: &BTreeSet<String>) -> Vec<Announcement> {
    Tier::all()
        .iter()
        .filter_map(|tier| {
            let names: Vec<String> = roster
                .names(*tier)
                .iter()
                .filter(|name| !previous.contains(*name))
                .cloned()
                .collect();
            (!names.is_empty()).then_some(Announcement { tier: *tier, names })
        })
        .collect()
}

/// Deliver each announcement. Failures are logged and skipped.
///
/// Returns how many were delivered.
pub fn announce(notifier: &dyn Notifier, announcements: &[Announcement]) -> usize {
    let mut delivered = 0;
    for announcement in announcements {
        match notifier.notify(announcement) {
            Ok(()) => delivered += 1,
            Err(e) => tracing::warn!("failed to send {} notification: {e}", announcement.tier),
        }
    }
    delivered
}

#[cfg(test)]
mod tests {
    use super::*;
    use patrons_api::ApiError;
    use std::cell::RefCell;

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn roster(gold: &[&str], silver: &[&str]) -> Roster {
        Roster {
            gold: gold.iter().map(|s| s.to_string()).collect(),
            silver: silver.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn one_new_gold_name_yields_one_announcement() {
        let out = new_names(&roster(&["A", "B", "C"], &[]), &set(&["A", "B"]));
        assert_eq!(
            out,
            vec![Announcement {
                tier: Tier::Gold,
                names: vec!["C".to_string()]
            }]
        );
    }

    #[test]
    fn tier_move_is_not_announced() {
        let out = new_names(&roster(&["A"], &[]), &set(&["A"]));
        assert!(out.is_empty());
    }

    #[test]
    fn both_tiers_can_announce() {
        let out = new_names(&roster(&["G"], &["S1", "S2"]), &set(&[]));
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].tier, Tier::Gold);
        assert_eq!(out[1].names, vec!["S1", "S2"]);
    }

    struct Flaky {
        calls: RefCell<usize>,
    }

    impl Notifier for Flaky {
        fn notify(&self, _a: &Announcement) -> Result<(), ApiError> {
            *self.calls.borrow_mut() += 1;
            if *self.calls.borrow() == 1 {
                Err(ApiError::Status {
                    url: "hook".into(),
                    status: 500,
                })
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn failures_are_swallowed_and_remaining_sent() {
        let notifier = Flaky {
            calls: RefCell::new(0),
        };
        let anns = new_names(&roster(&["G"], &["S"]), &set(&[]));
        assert_eq!(announce(&notifier, &anns), 1);
        assert_eq!(*notifier.calls.borrow(), 2);
    }
}
