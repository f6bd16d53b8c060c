//! Hover highlight bookkeeping shared by the smoke list and the radar.

use crate::models::SmokeId;

/// New highlight after the pointer enters a row or marker.
pub fn on_enter(_current: Option<SmokeId>, entered: SmokeId) -> Option<SmokeId> {
    Some(entered)
}

/// New highlight after the pointer leaves `left`.
///
/// Only clears when `left` is still the highlighted id. Moving quickly from
/// row A to row B can deliver B's enter before A's leave; A's leave must not
/// wipe B's highlight.
pub fn on_leave(current: Option<SmokeId>, left: SmokeId) -> Option<SmokeId> {
    match current {
        Some(id) if id == left => None,
        other => other,
    }
}

pub fn is_highlighted(current: Option<SmokeId>, id: SmokeId) -> bool {
    current == Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leave_clears_matching_id() {
        assert_eq!(on_leave(Some(4), 4), None);
    }

    #[test]
    fn test_late_leave_keeps_newer_highlight() {
        let h = on_enter(Some(1), 2);
        assert_eq!(on_leave(h, 1), Some(2));
    }

    #[test]
    fn test_leave_with_nothing_highlighted() {
        assert_eq!(on_leave(None, 9), None);
    }

    #[test]
    fn test_only_one_highlight() {
        let h = on_enter(on_enter(None, 1), 2);
        assert!(is_highlighted(h, 2));
        assert!(!is_highlighted(h, 1));
    }
}
