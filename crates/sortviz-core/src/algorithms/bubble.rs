//! Bubble sort: adjacent-pair passes with early exit.

use crate::trace::{Operation, SortStep, SortValue, StepMetadata, TraceRecorder};

/// Trace bubble sort over a private copy of `input`.
///
/// Each pass scans one fewer element than the previous one. A pass that swaps
/// nothing ends the run; the trailing `sorted` step is still emitted.
pub fn bubble_sort_steps<T: SortValue>(input: &[T]) -> Vec<SortStep<T>> {
    let mut values = input.to_vec();
    let mut trace = TraceRecorder::start(&values);
    let len = values.len();

    if len < 2 {
        return trace.finish(&values);
    }

    for pass in 0..len - 1 {
        let pass_number = pass + 1;
        let mut swapped = false;

        for index in 0..len - pass - 1 {
            let pair = [index, index + 1];
            trace.record(
                &values,
                &pair,
                &[],
                StepMetadata::new(Operation::Compare).with_pass(pass_number),
            );

            if values[index] > values[index + 1] {
                values.swap(index, index + 1);
                swapped = true;
                trace.record(
                    &values,
                    &pair,
                    &pair,
                    StepMetadata::new(Operation::Swap).with_pass(pass_number),
                );
            }
        }

        trace.record(
            &values,
            &[],
            &[len - pass - 1],
            StepMetadata::new(Operation::PassComplete).with_pass(pass_number),
        );

        if !swapped {
            break;
        }
    }

    trace.finish(&values)
}
