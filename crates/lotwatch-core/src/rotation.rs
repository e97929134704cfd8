//! Time-windowed rotation through search term groups.
//!
//! Every `window_secs` the active group advances by one, wrapping around, so
//! the full vocabulary is covered once every `window_secs * group_count`.

use crate::types::TermGroup;

/// Index of the group active at `timestamp_secs`.
///
/// Returns `None` when there are no groups or the window is zero.
#[must_use]
pub fn select_group(timestamp_secs: i64, window_secs: u64, group_count: usize) -> Option<usize> {
    if group_count == 0 || window_secs == 0 {
        return None;
    }
    let window = i128::from(window_secs);
    let slot = i128::from(timestamp_secs).div_euclid(window);
    let count = i128::try_from(group_count).ok()?;
    usize::try_from(slot.rem_euclid(count)).ok()
}

/// The configured term groups together with the rotation window.
#[derive(Debug, Clone)]
pub struct TermRotation {
    window_secs: u64,
    groups: Vec<TermGroup>,
}

impl TermRotation {
    #[must_use]
    pub fn new(window_secs: u64, groups: Vec<TermGroup>) -> Self {
        Self {
            window_secs,
            groups,
        }
    }

    /// The group active at `timestamp_secs` and its index.
    #[must_use]
    pub fn active(&self, timestamp_secs: i64) -> Option<(usize, &TermGroup)> {
        let idx = select_group(timestamp_secs, self.window_secs, self.groups.len())?;
        self.groups.get(idx).map(|group| (idx, group))
    }

    #[must_use]
    pub fn groups(&self) -> &[TermGroup] {
        &self.groups
    }

    #[must_use]
    pub fn window_secs(&self) -> u64 {
        self.window_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_timestamp_same_group() {
        let ts = 1_760_000_123;
        assert_eq!(select_group(ts, 300, 7), select_group(ts, 300, 7));
    }

    #[test]
    fn stable_within_a_window() {
        let start = 300 * 1_000;
        let first = select_group(start, 300, 7);
        for offset in 0..300 {
            assert_eq!(select_group(start + offset, 300, 7), first);
        }
    }

    #[test]
    fn one_window_later_advances_by_one() {
        for ts in [0_i64, 299, 1_760_000_000, 1_760_000_299, 42] {
            let now = select_group(ts, 300, 7).unwrap();
            let next = select_group(ts + 300, 300, 7).unwrap();
            assert_eq!(next, (now + 1) % 7, "timestamp {ts}");
        }
    }

    #[test]
    fn wraps_after_last_group() {
        assert_eq!(select_group(6 * 300, 300, 7), Some(6));
        assert_eq!(select_group(7 * 300, 300, 7), Some(0));
    }

    #[test]
    fn negative_timestamps_stay_in_range() {
        assert_eq!(select_group(-1, 300, 7), Some(6));
        assert_eq!(select_group(-300, 300, 7), Some(6));
        assert_eq!(select_group(-301, 300, 7), Some(5));
    }

    #[test]
    fn no_groups_or_zero_window_selects_nothing() {
        assert_eq!(select_group(1000, 300, 0), None);
        assert_eq!(select_group(1000, 0, 7), None);
    }

    #[test]
    fn rotation_returns_active_group() {
        let groups = vec![
            TermGroup(vec!["a".to_string()]),
            TermGroup(vec!["b".to_string()]),
        ];
        let rotation = TermRotation::new(60, groups);
        let (idx, group) = rotation.active(61).unwrap();
        assert_eq!(idx, 1);
        assert_eq!(group.terms(), ["b".to_string()]);
        assert_eq!(rotation.active(120).map(|(i, _)| i), Some(0));
    }

    #[test]
    fn empty_rotation_has_no_active_group() {
        let rotation = TermRotation::new(60, Vec::new());
        assert!(rotation.active(0).is_none());
    }
}
