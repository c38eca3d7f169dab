//! Selection sort: scan the unsorted suffix for its minimum, swap it home.

use crate::trace::{Operation, SortStep, SortValue, StepMetadata, TraceRecorder};

pub fn selection_sort_steps<T: SortValue>(input: &[T]) -> Vec<SortStep<T>> {
    let mut values = input.to_vec();
    let mut trace = TraceRecorder::start(&values);
    let len = values.len();

    if len < 2 {
        return trace.finish(&values);
    }

    for pass in 0..len - 1 {
        let pass_number = pass + 1;
        let mut min_index = pass;

        for index in pass + 1..len {
            trace.record(
                &values,
                &[min_index, index],
                &[],
                StepMetadata::new(Operation::Compare).with_pass(pass_number),
            );
            if values[index] < values[min_index] {
                min_index = index;
            }
        }

        if min_index != pass {
            values.swap(pass, min_index);
            let pair = [pass, min_index];
            trace.record(
                &values,
                &pair,
                &pair,
                StepMetadata::new(Operation::Swap).with_pass(pass_number),
            );
        }

        trace.record(
            &values,
            &[],
            &[pass],
            StepMetadata::new(Operation::PassComplete).with_pass(pass_number),
        );
    }

    // The last position settles without a scan of its own.
    trace.record(
        &values,
        &[],
        &[len - 1],
        StepMetadata::new(Operation::PassComplete).with_pass(len),
    );

    trace.finish(&values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_compare_per_candidate() {
        let steps = selection_sort_steps(&[3, 1, 2]);
        let compares = |p: usize| {
            steps
                .iter()
                .filter(|s| s.operation() == Some(Operation::Compare) && s.pass() == Some(p))
                .count()
        };
        assert_eq!(compares(1), 2);
        assert_eq!(compares(2), 1);
    }

    #[test]
    fn no_swap_when_minimum_already_in_place() {
        let steps = selection_sort_steps(&[1, 2, 3]);
        assert!(steps.iter().all(|s| s.operation() != Some(Operation::Swap)));
    }

    #[test]
    fn final_pass_complete_marks_last_position() {
        let steps = selection_sort_steps(&[2, 3, 1]);
        let tail = &steps[steps.len() - 2];
        assert_eq!(tail.operation(), Some(Operation::PassComplete));
        assert_eq!(tail.modified_indices, vec![2]);
        assert_eq!(tail.pass(), Some(3));
        assert_eq!(steps.last().unwrap().snapshot, vec![1, 2, 3]);
    }

    #[test]
    fn compare_tracks_running_minimum() {
        let steps = selection_sort_steps(&[3, 1, 2]);
        let pass_one: Vec<Vec<usize>> = steps
            .iter()
            .filter(|s| s.operation() == Some(Operation::Compare) && s.pass() == Some(1))
            .map(|s| s.compared_indices.clone())
            .collect();
        assert_eq!(pass_one, vec![vec![0, 1], vec![1, 2]]);
    }
}
