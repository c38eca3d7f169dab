//! Trace model: the vocabulary every other module speaks.
//!
//! A trace is an ordered `Vec<SortStep<T>>`. Each step owns a full copy of the
//! array at that moment plus the positions it read and wrote, so playback and
//! rendering never need to re-run an algorithm.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SortValue
// ---------------------------------------------------------------------------

/// An ordered numeric element that can be traced and drawn as a bar.
pub trait SortValue: Copy + PartialOrd + fmt::Debug + Send + Sync + 'static {
    /// Bar height source. Lossy for very large integers, which is fine for
    /// drawing.
    fn as_f64(self) -> f64;

    /// Lossless identity: equal values share a key, distinct values never do.
    fn identity(self) -> u128;
}

macro_rules! impl_sort_value_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl SortValue for $ty {
                #[inline]
                fn as_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn identity(self) -> u128 {
                    self as i128 as u128
                }
            }
        )*
    };
}

macro_rules! impl_sort_value_float {
    ($($ty:ty),* $(,)?) => {
        $(
            impl SortValue for $ty {
                #[inline]
                fn as_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn identity(self) -> u128 {
                    // -0.0 and 0.0 compare equal, so they share a key.
                    if self == 0.0 { 0 } else { u128::from(self.to_bits()) }
                }
            }
        )*
    };
}

impl_sort_value_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
impl_sort_value_float!(f32, f64);

// ---------------------------------------------------------------------------
// Operation
// ---------------------------------------------------------------------------

/// What a step did. Closed set; serialized in kebab-case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    Start,
    Compare,
    Swap,
    Shift,
    Write,
    Insert,
    Partition,
    PartitionComplete,
    MergeRange,
    RangeSorted,
    PassComplete,
    Sorted,
}

impl Operation {
    /// Stable kebab-case tag, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Compare => "compare",
            Self::Swap => "swap",
            Self::Shift => "shift",
            Self::Write => "write",
            Self::Insert => "insert",
            Self::Partition => "partition",
            Self::PartitionComplete => "partition-complete",
            Self::MergeRange => "merge-range",
            Self::RangeSorted => "range-sorted",
            Self::PassComplete => "pass-complete",
            Self::Sorted => "sorted",
        }
    }

    /// Whether the step changes stored values.
    pub fn is_mutation(self) -> bool {
        matches!(self, Self::Swap | Self::Shift | Self::Write)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

/// Inclusive bounds of the active sub-range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortRange {
    pub start: usize,
    pub end: usize,
}

impl SortRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of positions covered.
    pub fn span(&self) -> usize {
        self.end.saturating_sub(self.start) + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index <= self.end
    }
}

/// Structural annotation attached to a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepMetadata {
    pub operation: Operation,
    /// 1-based iteration counter (bubble, insertion, selection).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<SortRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pivot_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_index: Option<usize>,
}

impl StepMetadata {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            pass: None,
            range: None,
            pivot_index: None,
            partition_index: None,
        }
    }

    pub fn with_pass(mut self, pass: usize) -> Self {
        self.pass = Some(pass);
        self
    }

    pub fn with_range(mut self, range: SortRange) -> Self {
        self.range = Some(range);
        self
    }

    pub fn with_pivot(mut self, pivot_index: usize) -> Self {
        self.pivot_index = Some(pivot_index);
        self
    }

    pub fn with_partition(mut self, partition_index: usize) -> Self {
        self.partition_index = Some(partition_index);
        self
    }
}

impl From<Operation> for StepMetadata {
    fn from(operation: Operation) -> Self {
        Self::new(operation)
    }
}

// ---------------------------------------------------------------------------
// SortStep
// ---------------------------------------------------------------------------

/// One observable moment of an algorithm's execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortStep<T> {
    /// Full array state at this moment.
    pub snapshot: Vec<T>,
    /// Positions read for comparison.
    pub compared_indices: Vec<usize>,
    /// Positions whose value changed (or that the step marks as settled).
    pub modified_indices: Vec<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<StepMetadata>,
}

impl<T> SortStep<T> {
    /// The reserved stand-in for an empty trace: no values, tagged `start`.
    pub fn empty_start() -> Self {
        Self {
            snapshot: Vec::new(),
            compared_indices: Vec::new(),
            modified_indices: Vec::new(),
            metadata: Some(StepMetadata::new(Operation::Start)),
        }
    }

    pub fn operation(&self) -> Option<Operation> {
        self.metadata.map(|m| m.operation)
    }

    pub fn pass(&self) -> Option<usize> {
        self.metadata.and_then(|m| m.pass)
    }

    pub fn range(&self) -> Option<SortRange> {
        self.metadata.and_then(|m| m.range)
    }

    pub fn pivot_index(&self) -> Option<usize> {
        self.metadata.and_then(|m| m.pivot_index)
    }

    pub fn partition_index(&self) -> Option<usize> {
        self.metadata.and_then(|m| m.partition_index)
    }

    pub fn len(&self) -> usize {
        self.snapshot.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }
}

// ---------------------------------------------------------------------------
// TraceRecorder: step emission shared by the generators
// ---------------------------------------------------------------------------

/// Accumulates steps while a generator mutates its private working copy.
pub(crate) struct TraceRecorder<T> {
    steps: Vec<SortStep<T>>,
}

impl<T: SortValue> TraceRecorder<T> {
    /// Begin a trace with the leading `start` step.
    pub(crate) fn start(values: &[T]) -> Self {
        let mut recorder = Self { steps: Vec::new() };
        recorder.record(values, &[], &[], Operation::Start);
        recorder
    }

    pub(crate) fn record(
        &mut self,
        values: &[T],
        compared: &[usize],
        modified: &[usize],
        metadata: impl Into<StepMetadata>,
    ) {
        self.steps.push(SortStep {
            snapshot: values.to_vec(),
            compared_indices: compared.to_vec(),
            modified_indices: modified.to_vec(),
            metadata: Some(metadata.into()),
        });
    }

    /// Close the trace with the trailing `sorted` step.
    pub(crate) fn finish(mut self, values: &[T]) -> Vec<SortStep<T>> {
        self.record(values, &[], &[], Operation::Sorted);
        self.steps
    }
}
