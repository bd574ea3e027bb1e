//! Combined sort-order state and the toggle state machine.
//!
//! The UI exposes two independent sort toggles ("by deadline", "by
//! priority"), but only one combined four-state value is ever persisted.
//! Each toggle intent sets one bit of the combined state and recomposes it;
//! the two single-dimension variants never coexist as separate fields.

use serde::{Deserialize, Serialize};

/// Combined sort order for the task list.
///
/// Serialized as the legacy symbols `NONE`, `BY_DEADLINE`, `BY_PRIORITY`,
/// `BY_DEADLINE_AND_PRIORITY` for wire compatibility with the flat store
/// this record was migrated from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortOrder {
    #[default]
    None,
    ByDeadline,
    ByPriority,
    ByDeadlineAndPriority,
}

/// One axis of the combined sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDimension {
    Deadline,
    Priority,
}

impl SortOrder {
    /// All four states, in symbol-table order.
    pub const ALL: [SortOrder; 4] = [
        SortOrder::None,
        SortOrder::ByDeadline,
        SortOrder::ByPriority,
        SortOrder::ByDeadlineAndPriority,
    ];

    /// Parse a persisted or legacy symbol. Unknown symbols are a caller
    /// decision (the store degrades them to `None` with a warning).
    pub fn from_symbol(raw: &str) -> Option<SortOrder> {
        match raw.trim() {
            "NONE" => Some(SortOrder::None),
            "BY_DEADLINE" => Some(SortOrder::ByDeadline),
            "BY_PRIORITY" => Some(SortOrder::ByPriority),
            "BY_DEADLINE_AND_PRIORITY" => Some(SortOrder::ByDeadlineAndPriority),
            _ => None,
        }
    }

    /// The persisted symbol for this state.
    pub fn as_symbol(&self) -> &'static str {
        match self {
            SortOrder::None => "NONE",
            SortOrder::ByDeadline => "BY_DEADLINE",
            SortOrder::ByPriority => "BY_PRIORITY",
            SortOrder::ByDeadlineAndPriority => "BY_DEADLINE_AND_PRIORITY",
        }
    }

    /// Whether the deadline bit is set.
    pub fn by_deadline(&self) -> bool {
        matches!(self, SortOrder::ByDeadline | SortOrder::ByDeadlineAndPriority)
    }

    /// Whether the priority bit is set.
    pub fn by_priority(&self) -> bool {
        matches!(self, SortOrder::ByPriority | SortOrder::ByDeadlineAndPriority)
    }

    /// Recompose a state from its two bits.
    pub fn from_flags(deadline: bool, priority: bool) -> SortOrder {
        match (deadline, priority) {
            (false, false) => SortOrder::None,
            (true, false) => SortOrder::ByDeadline,
            (false, true) => SortOrder::ByPriority,
            (true, true) => SortOrder::ByDeadlineAndPriority,
        }
    }

    /// Apply a toggle intent: set the named bit to `enable` and recompose.
    ///
    /// Total and idempotent; re-applying the same intent is a no-op.
    pub fn toggle(self, dimension: SortDimension, enable: bool) -> SortOrder {
        let (mut deadline, mut priority) = (self.by_deadline(), self.by_priority());
        match dimension {
            SortDimension::Deadline => deadline = enable,
            SortDimension::Priority => priority = enable,
        }
        SortOrder::from_flags(deadline, priority)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SortDimension::{Deadline, Priority};
    use SortOrder::{ByDeadline, ByDeadlineAndPriority, ByPriority, None};

    #[test]
    fn toggle_transition_table() {
        let cases = [
            (None, Deadline, true, ByDeadline),
            (ByPriority, Deadline, true, ByDeadlineAndPriority),
            (ByDeadline, Deadline, false, None),
            (ByDeadlineAndPriority, Deadline, false, ByPriority),
            (None, Priority, true, ByPriority),
            (ByDeadline, Priority, true, ByDeadlineAndPriority),
            (ByPriority, Priority, false, None),
            (ByDeadlineAndPriority, Priority, false, ByDeadline),
        ];
        for (current, dimension, enable, expected) in cases {
            assert_eq!(
                current.toggle(dimension, enable),
                expected,
                "{current:?} toggle {dimension:?}={enable}"
            );
        }
    }

    #[test]
    fn toggle_is_total_and_closed() {
        for current in SortOrder::ALL {
            for dimension in [Deadline, Priority] {
                for enable in [true, false] {
                    let next = current.toggle(dimension, enable);
                    assert!(SortOrder::ALL.contains(&next));
                }
            }
        }
    }

    #[test]
    fn toggle_is_idempotent() {
        for current in SortOrder::ALL {
            for dimension in [Deadline, Priority] {
                for enable in [true, false] {
                    let once = current.toggle(dimension, enable);
                    assert_eq!(once.toggle(dimension, enable), once);
                }
            }
        }
    }

    #[test]
    fn enable_then_disable_restores_remaining_dimension() {
        for current in SortOrder::ALL {
            for dimension in [Deadline, Priority] {
                let other_bit = match dimension {
                    Deadline => current.by_priority(),
                    Priority => current.by_deadline(),
                };
                let round = current.toggle(dimension, true).toggle(dimension, false);
                // Enabling then disabling clears the toggled bit and
                // preserves the other one.
                let expected = match dimension {
                    Deadline => SortOrder::from_flags(false, other_bit),
                    Priority => SortOrder::from_flags(other_bit, false),
                };
                assert_eq!(round, expected);
            }
        }
    }

    #[test]
    fn deadline_then_priority_then_drop_deadline() {
        let order = None.toggle(Deadline, true);
        assert_eq!(order, ByDeadline);
        let order = order.toggle(Priority, true);
        assert_eq!(order, ByDeadlineAndPriority);
        let order = order.toggle(Deadline, false);
        assert_eq!(order, ByPriority);
    }

    #[test]
    fn symbols_round_trip() {
        for order in SortOrder::ALL {
            assert_eq!(SortOrder::from_symbol(order.as_symbol()), Some(order));
        }
        assert_eq!(SortOrder::from_symbol("BY_COLOR"), Option::None);
        assert_eq!(SortOrder::from_symbol(" BY_PRIORITY "), Some(ByPriority));
    }

    #[test]
    fn serde_uses_legacy_symbols() {
        let json = serde_json::to_string(&ByDeadlineAndPriority).unwrap();
        assert_eq!(json, "\"BY_DEADLINE_AND_PRIORITY\"");
        let parsed: SortOrder = serde_json::from_str("\"BY_DEADLINE\"").unwrap();
        assert_eq!(parsed, ByDeadline);
    }
}
