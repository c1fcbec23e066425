//! Step records emitted by the sort service.
//!
//! Each step arrives as a single-key JSON object, e.g. `{"compare": [0, 1]}`
//! or `{"place": [3, 42]}`. That shape is exactly serde's externally tagged
//! enum representation, so the wire format falls out of the derive.

use serde::{Deserialize, Serialize};

/// One recorded micro-operation of a sorting algorithm's execution.
///
/// Indices reference positions in the session's bar sequence. Range steps
/// carry their bounds in wire order: `divide` is `[start, end, mid]` (the
/// midpoint trails), `merge` is `[start, mid, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Step {
    Compare(usize, usize),
    Swap(usize, usize),
    Divide(usize, usize, usize),
    Merge(usize, usize, usize),
    Pivot(usize),
    Partition(usize, usize),
    Place(usize, i64),
    MergeComplete(usize, usize),
}

impl Step {
    /// Whether every index this step touches lies inside `[0, len)`.
    /// Steps that fail this check are applied as no-ops.
    pub fn in_bounds(&self, len: usize) -> bool {
        match *self {
            Step::Compare(i, j) | Step::Swap(i, j) => i < len && j < len,
            Step::Divide(start, end, mid) => start < len && end < len && mid < len,
            Step::Merge(start, mid, end) => start < len && mid < len && end < len,
            Step::Pivot(i) => i < len,
            Step::Partition(start, end) | Step::MergeComplete(start, end) => {
                start < len && end < len
            }
            Step::Place(i, _) => i < len,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> Step {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_decode_pair_steps() {
        assert_eq!(decode(r#"{"compare": [0, 1]}"#), Step::Compare(0, 1));
        assert_eq!(decode(r#"{"swap": [2, 5]}"#), Step::Swap(2, 5));
        assert_eq!(decode(r#"{"partition": [1, 4]}"#), Step::Partition(1, 4));
        assert_eq!(
            decode(r#"{"mergeComplete": [0, 3]}"#),
            Step::MergeComplete(0, 3)
        );
    }

    #[test]
    fn test_decode_range_steps_keep_wire_order() {
        // divide carries [start, end, mid], merge carries [start, mid, end]
        assert_eq!(decode(r#"{"divide": [0, 7, 3]}"#), Step::Divide(0, 7, 3));
        assert_eq!(decode(r#"{"merge": [0, 3, 7]}"#), Step::Merge(0, 3, 7));
    }

    #[test]
    fn test_decode_scalar_and_value_steps() {
        assert_eq!(decode(r#"{"pivot": 4}"#), Step::Pivot(4));
        assert_eq!(decode(r#"{"place": [2, 42]}"#), Step::Place(2, 42));
    }

    #[test]
    fn test_decode_step_sequence() {
        let json = r#"[{"compare": [0, 1]}, {"swap": [0, 1]}, {"place": [0, 9]}]"#;
        let steps: Vec<Step> = serde_json::from_str(json).unwrap();
        assert_eq!(
            steps,
            vec![Step::Compare(0, 1), Step::Swap(0, 1), Step::Place(0, 9)]
        );
    }

    #[test]
    fn test_unknown_step_kind_is_an_error() {
        assert!(serde_json::from_str::<Step>(r#"{"rotate": [0, 1]}"#).is_err());
    }

    #[test]
    fn test_in_bounds() {
        assert!(Step::Swap(0, 3).in_bounds(4));
        assert!(!Step::Swap(0, 4).in_bounds(4));
        assert!(!Step::Compare(9, 1).in_bounds(4));
        assert!(Step::Place(3, 100).in_bounds(4));
        assert!(!Step::Place(4, 100).in_bounds(4));
        assert!(!Step::Merge(0, 2, 5).in_bounds(4));
    }
}
