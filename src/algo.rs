use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Algorithm identifiers understood by the sort service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlgoId {
    Bubble,
    Selection,
    Insertion,
    Quick,
    Merge,
}

/// All algorithms, in the order they appear in the selection list.
pub const ALL_ALGORITHMS: [AlgoId; 5] = [
    AlgoId::Bubble,
    AlgoId::Selection,
    AlgoId::Insertion,
    AlgoId::Quick,
    AlgoId::Merge,
];

impl AlgoId {
    /// Identifier sent to the sort service and used as the response key.
    pub fn id(&self) -> &'static str {
        match self {
            AlgoId::Bubble => "bubble",
            AlgoId::Selection => "selection",
            AlgoId::Insertion => "insertion",
            AlgoId::Quick => "quick",
            AlgoId::Merge => "merge",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AlgoId::Bubble => "Bubble Sort",
            AlgoId::Selection => "Selection Sort",
            AlgoId::Insertion => "Insertion Sort",
            AlgoId::Quick => "Quick Sort",
            AlgoId::Merge => "Merge Sort",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AlgoId::Bubble => {
                "Repeatedly steps through the list, compares adjacent elements \
                 and swaps them if they are in the wrong order."
            }
            AlgoId::Selection => {
                "Repeatedly finds the minimum element of the unsorted part and \
                 moves it to the end of the sorted part."
            }
            AlgoId::Insertion => {
                "Builds the sorted array one item at a time by inserting each \
                 element into its place among the already-sorted elements."
            }
            AlgoId::Quick => {
                "Picks a pivot and partitions the array around it, then sorts \
                 the partitions recursively."
            }
            AlgoId::Merge => {
                "Divides the array into halves, sorts each half recursively and \
                 merges the sorted halves back together."
            }
        }
    }

    pub fn time_complexity(&self) -> &'static str {
        match self {
            AlgoId::Bubble | AlgoId::Selection | AlgoId::Insertion => "O(n²)",
            AlgoId::Quick => "O(n log n) avg, O(n²) worst",
            AlgoId::Merge => "O(n log n)",
        }
    }

    pub fn space_complexity(&self) -> &'static str {
        match self {
            AlgoId::Merge => "O(n)",
            AlgoId::Quick => "O(log n)",
            _ => "O(1)",
        }
    }
}

impl fmt::Display for AlgoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for AlgoId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bubble" => Ok(AlgoId::Bubble),
            "selection" => Ok(AlgoId::Selection),
            "insertion" => Ok(AlgoId::Insertion),
            "quick" => Ok(AlgoId::Quick),
            "merge" => Ok(AlgoId::Merge),
            other => Err(format!("unknown algorithm '{}'", other)),
        }
    }
}
