//! # Acquisition Policy
//!
//! Philosopher `i` sits between fork `(i - 1) mod n` (its left) and fork `i` (its
//! right). If everyone grabbed "left, then right", the last philosopher's pair
//! `(n - 1, 0)` would close a cycle in the wait-for graph. Ordering every pair by
//! ascending fork index removes that cycle: all philosophers agree on one global
//! order, and a global order admits no circular wait.

use serde::{Deserialize, Serialize};

/// Returns the two fork indices philosopher `actor_index` must take, in the order
/// they must be taken.
///
/// The pair is always ascending, including for philosopher 0 whose neighbours are
/// `0` and `n - 1`.
///
/// Callers guarantee `n >= 2` and `actor_index < n`.
pub fn resources_for(actor_index: usize, n: usize) -> (usize, usize) {
    let (left, right) = neighbours(actor_index, n);
    (left.min(right), left.max(right))
}

/// `(left, right)` fork indices for philosopher `actor_index` in a ring of `n`.
pub fn neighbours(actor_index: usize, n: usize) -> (usize, usize) {
    ((actor_index + n - 1) % n, actor_index)
}

/// Which order a philosopher takes its forks in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcquisitionOrder {
    /// Lower fork index first. Deadlock free.
    #[default]
    Ascending,
    /// Left fork first, then right, with no correction for the wrap-around seat.
    ///
    /// Admits circular wait. Only useful to show that deadlock detection works; never
    /// select it for a real table.
    #[doc(hidden)]
    LeftFirst,
}

impl AcquisitionOrder {
    /// `(first, second)` fork indices for philosopher `actor_index`.
    pub fn order(self, actor_index: usize, n: usize) -> (usize, usize) {
        match self {
            AcquisitionOrder::Ascending => resources_for(actor_index, n),
            AcquisitionOrder::LeftFirst => neighbours(actor_index, n),
        }
    }

    /// Whether every philosopher agrees on one global fork order.
    pub fn is_deadlock_free(self) -> bool {
        matches!(self, AcquisitionOrder::Ascending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resources_for_five_seats() {
        assert_eq!(resources_for(0, 5), (0, 4));
        assert_eq!(resources_for(1, 5), (0, 1));
        assert_eq!(resources_for(2, 5), (1, 2));
        assert_eq!(resources_for(4, 5), (3, 4));
    }

    #[test]
    fn test_resources_for_is_ascending_for_every_ring() {
        for n in 2..=64 {
            for i in 0..n {
                let (first, second) = resources_for(i, n);
                assert!(first < second, "n={n} i={i} gave ({first}, {second})");
                assert!(second < n);
            }
        }
    }

    #[test]
    fn test_two_seats_share_both_forks() {
        assert_eq!(resources_for(0, 2), (0, 1));
        assert_eq!(resources_for(1, 2), (0, 1));
    }

    #[test]
    fn test_every_fork_is_used_by_exactly_two_philosophers() {
        let n = 7;
        let mut uses = vec![0; n];
        for i in 0..n {
            let (a, b) = resources_for(i, n);
            uses[a] += 1;
            uses[b] += 1;
        }
        assert!(uses.iter().all(|&u| u == 2));
    }

    #[test]
    fn test_left_first_only_differs_at_the_wrap_around_seat() {
        let n = 5;
        for i in 1..n {
            assert_eq!(
                AcquisitionOrder::LeftFirst.order(i, n),
                AcquisitionOrder::Ascending.order(i, n)
            );
        }
        assert_eq!(AcquisitionOrder::LeftFirst.order(0, n), (4, 0));
        assert_eq!(AcquisitionOrder::Ascending.order(0, n), (0, 4));
    }
}
