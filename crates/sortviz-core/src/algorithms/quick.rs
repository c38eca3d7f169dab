//! Quick sort with a Lomuto partition and the last element as pivot.

use crate::trace::{Operation, SortRange, SortStep, SortValue, StepMetadata, TraceRecorder};

pub fn quick_sort_steps<T: SortValue>(input: &[T]) -> Vec<SortStep<T>> {
    let values = input.to_vec();
    let trace = TraceRecorder::start(&values);

    if values.len() < 2 {
        return trace.finish(&values);
    }

    let last = values.len() - 1;
    let mut sorter = Partitioner { values, trace };
    sorter.sort_range(0, last);
    sorter.trace.finish(&sorter.values)
}

struct Partitioner<T> {
    values: Vec<T>,
    trace: TraceRecorder<T>,
}

impl<T: SortValue> Partitioner<T> {
    fn sort_range(&mut self, start: usize, end: usize) {
        if start > end {
            return;
        }

        let range = SortRange::new(start, end);

        if start == end {
            self.trace.record(
                &self.values,
                &[],
                &[start],
                StepMetadata::new(Operation::RangeSorted).with_range(range),
            );
            return;
        }

        let partition_index = self.partition(start, end);
        if partition_index > start {
            self.sort_range(start, partition_index - 1);
        }
        self.sort_range(partition_index + 1, end);

        self.trace.record(
            &self.values,
            &[],
            &[partition_index],
            StepMetadata::new(Operation::RangeSorted)
                .with_range(range)
                .with_partition(partition_index),
        );
    }

    /// Returns the pivot's resting index.
    fn partition(&mut self, start: usize, end: usize) -> usize {
        let range = SortRange::new(start, end);
        let pivot = self.values[end];
        let scanning = StepMetadata::new(Operation::Partition)
            .with_range(range)
            .with_pivot(end);

        self.trace.record(&self.values, &[], &[], scanning);

        let mut smaller = start;
        for scan in start..end {
            self.trace.record(
                &self.values,
                &[scan, end],
                &[],
                StepMetadata {
                    operation: Operation::Compare,
                    ..scanning
                },
            );

            if self.values[scan] <= pivot {
                if smaller != scan {
                    self.values.swap(smaller, scan);
                    let pair = [smaller, scan];
                    self.trace.record(
                        &self.values,
                        &pair,
                        &pair,
                        StepMetadata {
                            operation: Operation::Swap,
                            ..scanning
                        },
                    );
                }
                smaller += 1;
            }
        }

        let settled = StepMetadata::new(Operation::Swap)
            .with_range(range)
            .with_pivot(smaller)
            .with_partition(smaller);

        if smaller != end {
            self.values.swap(smaller, end);
            let pair = [smaller, end];
            self.trace.record(&self.values, &pair, &pair, settled);
        }

        self.trace.record(
            &self.values,
            &[],
            &[smaller],
            StepMetadata {
                operation: Operation::PartitionComplete,
                ..settled
            },
        );

        smaller
    }
}
