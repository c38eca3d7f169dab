//! Insertion sort traced as scan-then-shift.
//!
//! The leftward scan runs first and emits one `compare` per probe against the
//! held value. The element then travels left through adjacent `shift` steps,
//! so every intermediate snapshot is observable.

use crate::trace::{Operation, SortStep, SortValue, StepMetadata, TraceRecorder};

pub fn insertion_sort_steps<T: SortValue>(input: &[T]) -> Vec<SortStep<T>> {
    let mut values = input.to_vec();
    let mut trace = TraceRecorder::start(&values);
    let len = values.len();

    if len < 2 {
        return trace.finish(&values);
    }

    for pass in 1..len {
        let key = values[pass];
        let mut insertion_index = pass;

        // Nothing moves during the scan, so `pass` still holds the key.
        while insertion_index > 0 {
            let left = insertion_index - 1;
            trace.record(
                &values,
                &[left, pass],
                &[],
                StepMetadata::new(Operation::Compare).with_pass(pass),
            );

            if values[left] <= key {
                break;
            }
            insertion_index -= 1;
        }

        for index in (insertion_index + 1..=pass).rev() {
            let pair = [index - 1, index];
            values.swap(index - 1, index);
            trace.record(
                &values,
                &pair,
                &pair,
                StepMetadata::new(Operation::Shift).with_pass(pass),
            );
        }

        trace.record(
            &values,
            &[],
            &[insertion_index],
            StepMetadata::new(Operation::Insert).with_pass(pass),
        );
        trace.record(
            &values,
            &[],
            &[insertion_index],
            StepMetadata::new(Operation::PassComplete).with_pass(pass),
        );
    }

    trace.finish(&values)
}
