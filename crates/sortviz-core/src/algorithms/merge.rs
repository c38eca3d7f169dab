//! Top-down merge sort with an auxiliary buffer.
//!
//! Every merge is bracketed by `merge-range` and `range-sorted` steps tagging
//! the same inclusive range. Inside, a `compare` is emitted only while both
//! runs still hold values; each placed value is one `write` step whose
//! compared pair is `[source, destination]`.

use crate::trace::{Operation, SortRange, SortStep, SortValue, StepMetadata, TraceRecorder};

pub fn merge_sort_steps<T: SortValue>(input: &[T]) -> Vec<SortStep<T>> {
    let values = input.to_vec();
    let trace = TraceRecorder::start(&values);

    if values.len() < 2 {
        return trace.finish(&values);
    }

    let last = values.len() - 1;
    let mut merger = Merger {
        aux: values.clone(),
        values,
        trace,
    };
    merger.sort_range(0, last);
    merger.trace.finish(&merger.values)
}

struct Merger<T> {
    values: Vec<T>,
    aux: Vec<T>,
    trace: TraceRecorder<T>,
}

impl<T: SortValue> Merger<T> {
    fn sort_range(&mut self, start: usize, end: usize) {
        if start >= end {
            return;
        }
        let middle = (start + end) / 2;
        self.sort_range(start, middle);
        self.sort_range(middle + 1, end);
        self.merge_range(start, middle, end);
    }

    fn merge_range(&mut self, start: usize, middle: usize, end: usize) {
        let range = SortRange::new(start, end);
        let tagged = |operation| StepMetadata::new(operation).with_range(range);

        self.aux[start..=end].copy_from_slice(&self.values[start..=end]);
        self.trace
            .record(&self.values, &[], &[], tagged(Operation::MergeRange));

        let mut left = start;
        let mut right = middle + 1;

        for target in start..=end {
            let left_open = left <= middle;
            let right_open = right <= end;

            if left_open && right_open {
                self.trace
                    .record(&self.values, &[left, right], &[], tagged(Operation::Compare));
            }

            let take_left = match (left_open, right_open) {
                (true, true) => self.aux[left] <= self.aux[right],
                (true, false) => true,
                _ => false,
            };

            let source = if take_left {
                left += 1;
                left - 1
            } else {
                right += 1;
                right - 1
            };

            self.values[target] = self.aux[source];
            self.trace.record(
                &self.values,
                &[source, target],
                &[target],
                tagged(Operation::Write),
            );
        }

        self.trace
            .record(&self.values, &[], &[], tagged(Operation::RangeSorted));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_elements_merge_once() {
        let steps = merge_sort_steps(&[2, 1]);
        let ops: Vec<Operation> = steps.iter().filter_map(|s| s.operation()).collect();
        assert_eq!(
            ops,
            vec![
                Operation::Start,
                Operation::MergeRange,
                Operation::Compare,
                Operation::Write,
                Operation::Write,
                Operation::RangeSorted,
                Operation::Sorted,
            ]
        );
        // The second write drains the left run without a compare.
        assert_eq!(steps[3].compared_indices, vec![1, 0]);
        assert_eq!(steps[4].compared_indices, vec![0, 1]);
        assert_eq!(steps[4].snapshot, vec![1, 2]);
    }

    #[test]
    fn merge_range_and_range_sorted_share_bounds() {
        let steps = merge_sort_steps(&[3, 1, 2]);
        let opened: Vec<SortRange> = steps
            .iter()
            .filter(|s| s.operation() == Some(Operation::MergeRange))
            .filter_map(|s| s.range())
            .collect();
        let closed: Vec<SortRange> = steps
            .iter()
            .filter(|s| s.operation() == Some(Operation::RangeSorted))
            .filter_map(|s| s.range())
            .collect();
        assert_eq!(opened, vec![SortRange::new(0, 1), SortRange::new(0, 2)]);
        assert_eq!(opened, closed);
    }

    #[test]
    fn one_write_per_position_in_range() {
        let steps = merge_sort_steps(&[4, 3, 2, 1]);
        let writes = steps
            .iter()
            .filter(|s| s.operation() == Some(Operation::Write))
            .count();
        // Two pairs of two, then one merge of four.
        assert_eq!(writes, 8);
    }

    #[test]
    fn stable_for_equal_keys() {
        let steps = merge_sort_steps(&[1.0, 1.0]);
        let writes: Vec<Vec<usize>> = steps
            .iter()
            .filter(|s| s.operation() == Some(Operation::Write))
            .map(|s| s.compared_indices.clone())
            .collect();
        assert_eq!(writes, vec![vec![0, 0], vec![1, 1]]);
    }
}
