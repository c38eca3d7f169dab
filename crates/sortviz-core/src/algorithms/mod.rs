//! The five traced algorithms and their fixed catalog.
//!
//! [`AlgorithmId`] is a closed enum, so an unknown algorithm can only appear
//! at a string boundary ([`AlgorithmId::from_str`]); everything past that
//! point dispatches by exhaustive `match`.

mod bubble;
mod insertion;
mod merge;
mod quick;
mod selection;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VizError;
use crate::trace::{SortStep, SortValue};

pub use bubble::bubble_sort_steps;
pub use insertion::insertion_sort_steps;
pub use merge::merge_sort_steps;
pub use quick::quick_sort_steps;
pub use selection::selection_sort_steps;

// ---------------------------------------------------------------------------
// AlgorithmId
// ---------------------------------------------------------------------------

/// Identity of one of the five supported algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlgorithmId {
    BubbleSort,
    InsertionSort,
    SelectionSort,
    MergeSort,
    QuickSort,
}

impl AlgorithmId {
    /// Catalog order.
    pub const ALL: [AlgorithmId; 5] = [
        Self::BubbleSort,
        Self::InsertionSort,
        Self::SelectionSort,
        Self::MergeSort,
        Self::QuickSort,
    ];

    /// Stable external identifier (e.g. `"quick-sort"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BubbleSort => "bubble-sort",
            Self::InsertionSort => "insertion-sort",
            Self::SelectionSort => "selection-sort",
            Self::MergeSort => "merge-sort",
            Self::QuickSort => "quick-sort",
        }
    }

    pub fn display_name(self) -> &'static str {
        self.info().display_name
    }

    /// Catalog entry for this algorithm.
    pub fn info(self) -> &'static AlgorithmInfo {
        match self {
            Self::BubbleSort => &CATALOG[0],
            Self::InsertionSort => &CATALOG[1],
            Self::SelectionSort => &CATALOG[2],
            Self::MergeSort => &CATALOG[3],
            Self::QuickSort => &CATALOG[4],
        }
    }

    /// Next algorithm in catalog order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::BubbleSort => Self::InsertionSort,
            Self::InsertionSort => Self::SelectionSort,
            Self::SelectionSort => Self::MergeSort,
            Self::MergeSort => Self::QuickSort,
            Self::QuickSort => Self::BubbleSort,
        }
    }

    /// Generate this algorithm's full trace for `input`.
    pub fn run<T: SortValue>(self, input: &[T]) -> Vec<SortStep<T>> {
        let steps = match self {
            Self::BubbleSort => bubble_sort_steps(input),
            Self::InsertionSort => insertion_sort_steps(input),
            Self::SelectionSort => selection_sort_steps(input),
            Self::MergeSort => merge_sort_steps(input),
            Self::QuickSort => quick_sort_steps(input),
        };
        log::debug!(
            "{}: traced {} steps for {} values",
            self,
            steps.len(),
            input.len()
        );
        steps
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmId {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| VizError::UnknownAlgorithm { id: s.to_string() })
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Asymptotic cost, as human-readable strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Complexity {
    pub best: &'static str,
    pub average: &'static str,
    pub worst: &'static str,
}

/// Descriptive catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlgorithmInfo {
    pub id: AlgorithmId,
    pub display_name: &'static str,
    pub complexity: Complexity,
    pub description: &'static str,
}

const CATALOG: [AlgorithmInfo; 5] = [
    AlgorithmInfo {
        id: AlgorithmId::BubbleSort,
        display_name: "Bubble Sort",
        complexity: Complexity {
            best: "O(n)",
            average: "O(n^2)",
            worst: "O(n^2)",
        },
        description: "Repeatedly compares neighboring values and swaps out-of-order pairs so larger values bubble toward the end each pass.",
    },
    AlgorithmInfo {
        id: AlgorithmId::InsertionSort,
        display_name: "Insertion Sort",
        complexity: Complexity {
            best: "O(n)",
            average: "O(n^2)",
            worst: "O(n^2)",
        },
        description: "Builds a sorted left side incrementally by shifting larger values right, then inserting the current value in place.",
    },
    AlgorithmInfo {
        id: AlgorithmId::SelectionSort,
        display_name: "Selection Sort",
        complexity: Complexity {
            best: "O(n^2)",
            average: "O(n^2)",
            worst: "O(n^2)",
        },
        description: "Scans the unsorted range to find the minimum value, then swaps it into the next sorted position.",
    },
    AlgorithmInfo {
        id: AlgorithmId::MergeSort,
        display_name: "Merge Sort",
        complexity: Complexity {
            best: "O(n log n)",
            average: "O(n log n)",
            worst: "O(n log n)",
        },
        description: "Recursively splits the array and merges sorted ranges by writing the next smallest value into position.",
    },
    AlgorithmInfo {
        id: AlgorithmId::QuickSort,
        display_name: "Quick Sort",
        complexity: Complexity {
            best: "O(n log n)",
            average: "O(n log n)",
            worst: "O(n^2)",
        },
        description: "Partitions each range around a deterministic pivot so lower values move left and higher values move right.",
    },
];

/// All catalog entries in fixed order: bubble, insertion, selection, merge, quick.
pub fn list_algorithms() -> &'static [AlgorithmInfo] {
    &CATALOG
}

/// Look up an algorithm by its external id.
pub fn algorithm_by_id(id: &str) -> crate::Result<&'static AlgorithmInfo> {
    id.parse::<AlgorithmId>().map(AlgorithmId::info)
}

/// Dispatch to the generator for `id`.
pub fn run<T: SortValue>(id: AlgorithmId, input: &[T]) -> Vec<SortStep<T>> {
    id.run(input)
}

// ---------------------------------------------------------------------------
// Execution record
// ---------------------------------------------------------------------------

/// An algorithm paired with the input it ran on and the resulting trace.
#[derive(Debug, Clone, PartialEq)]
pub struct AlgorithmExecution<T> {
    pub algorithm: AlgorithmId,
    pub input: Vec<T>,
    pub steps: Vec<SortStep<T>>,
}

/// Run `algorithm` on an owned clone of `input`.
pub fn execute_algorithm_with_input<T: SortValue>(
    algorithm: AlgorithmId,
    input: &[T],
) -> AlgorithmExecution<T> {
    AlgorithmExecution {
        algorithm,
        input: input.to_vec(),
        steps: algorithm.run(input),
    }
}
