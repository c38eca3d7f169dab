//! Property-based invariant tests for traces, playback and compare sessions.
//!
//! For arbitrary inputs:
//!
//! 1. Traces are deterministic and never mutate their input.
//! 2. Traces start with the input and end with it sorted.
//! 3. Every recorded index is in bounds.
//! 4. Bubble and quick sort swaps strictly reduce inversions.
//! 5. Playback obeys its status laws.
//! 6. Compare panels never alias each other or the shared input.
//! 7. Transitions at full progress land exactly on the target.

use proptest::prelude::*;
use sortviz_core::{
    AlgorithmId, CompareSessionOptions, Operation, PlaybackController, PlaybackStatus,
    RenderTransition, SortStep, create_compare_run_session,
};

// ── Helpers ─────────────────────────────────────────────────────────────

fn any_input(max_len: usize) -> impl Strategy<Value = Vec<i32>> {
    // Narrow value range so duplicates are common.
    proptest::collection::vec(-20i32..=20, 0..=max_len)
}

fn any_algorithm() -> impl Strategy<Value = AlgorithmId> {
    proptest::sample::select(AlgorithmId::ALL.to_vec())
}

fn inversions(values: &[i32]) -> usize {
    let mut count = 0;
    for i in 0..values.len() {
        for j in i + 1..values.len() {
            if values[i] > values[j] {
                count += 1;
            }
        }
    }
    count
}

fn step_indices(step: &SortStep<i32>) -> Vec<usize> {
    let mut indices: Vec<usize> = step
        .compared_indices
        .iter()
        .chain(&step.modified_indices)
        .copied()
        .collect();
    indices.extend(step.pivot_index());
    indices.extend(step.partition_index());
    if let Some(range) = step.range() {
        indices.push(range.start);
        indices.push(range.end);
    }
    indices
}

// ═════════════════════════════════════════════════════════════════════════
// 1-3. Trace shape
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn traces_are_deterministic(id in any_algorithm(), input in any_input(40)) {
        let original = input.clone();
        let first = id.run(&input);
        let second = id.run(&input);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(input, original);
    }

    #[test]
    fn traces_are_bracketed(id in any_algorithm(), input in any_input(40)) {
        let steps = id.run(&input);
        let mut expected = input.clone();
        expected.sort();

        let first = &steps[0];
        let last = &steps[steps.len() - 1];
        prop_assert_eq!(first.operation(), Some(Operation::Start));
        prop_assert_eq!(&first.snapshot, &input);
        prop_assert_eq!(last.operation(), Some(Operation::Sorted));
        prop_assert_eq!(&last.snapshot, &expected);
        for step in &steps {
            prop_assert_eq!(step.snapshot.len(), input.len());
        }
    }

    #[test]
    fn indices_are_in_bounds(id in any_algorithm(), input in any_input(40)) {
        prop_assume!(!input.is_empty());
        for (n, step) in id.run(&input).iter().enumerate() {
            for index in step_indices(step) {
                prop_assert!(
                    index < input.len(),
                    "{} step {} ({:?}) index {} out of bounds for {}",
                    id, n, step.operation(), index, input.len()
                );
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Swaps make progress
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn swaps_reduce_inversions(
        id in proptest::sample::select(vec![AlgorithmId::BubbleSort, AlgorithmId::QuickSort]),
        input in any_input(40),
    ) {
        let swaps: Vec<usize> = id
            .run(&input)
            .iter()
            .filter(|s| s.operation() == Some(Operation::Swap))
            .map(|s| inversions(&s.snapshot))
            .collect();
        for pair in swaps.windows(2) {
            prop_assert!(pair[1] < pair[0], "{} inversions went {} -> {}", id, pair[0], pair[1]);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Playback laws
// ═════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy)]
enum Action {
    Start,
    Tick,
    Pause,
    Resume,
    Complete,
    Reset,
}

fn any_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::Start),
        Just(Action::Tick),
        Just(Action::Tick),
        Just(Action::Tick),
        Just(Action::Pause),
        Just(Action::Resume),
        Just(Action::Complete),
        Just(Action::Reset),
    ]
}

proptest! {
    #[test]
    fn playback_laws_hold(
        id in any_algorithm(),
        input in any_input(12),
        actions in proptest::collection::vec(any_action(), 0..60),
    ) {
        let mut playback = PlaybackController::new(id.run(&input));
        let last = playback.len() - 1;

        for action in actions {
            let before = playback.state();
            let (before_status, before_index) = (before.status, before.step_index);

            match action {
                Action::Start => {
                    let state = playback.start();
                    prop_assert_eq!(state.step_index, 0);
                    let expected = if last == 0 { PlaybackStatus::Finished } else { PlaybackStatus::Running };
                    prop_assert_eq!(state.status, expected);
                }
                Action::Tick => {
                    let state = playback.tick();
                    if before_status == PlaybackStatus::Running {
                        prop_assert_eq!(state.step_index, (before_index + 1).min(last));
                    } else {
                        prop_assert_eq!(state.step_index, before_index);
                        prop_assert_eq!(state.status, before_status);
                    }
                }
                Action::Pause => {
                    playback.pause();
                    let state = playback.tick();
                    if before_status != PlaybackStatus::Running {
                        prop_assert_eq!(state.status, before_status);
                    }
                    if before_status == PlaybackStatus::Running {
                        prop_assert_eq!(state.step_index, before_index);
                        prop_assert_eq!(state.status, PlaybackStatus::Paused);
                    }
                }
                Action::Resume => {
                    let state = playback.resume();
                    prop_assert_eq!(state.step_index, before_index);
                }
                Action::Complete => {
                    let state = playback.complete();
                    prop_assert_eq!(state.step_index, last);
                    prop_assert_eq!(state.status, PlaybackStatus::Finished);
                }
                Action::Reset => {
                    let state = playback.reset();
                    prop_assert_eq!(state.step_index, 0);
                    prop_assert_eq!(state.status, PlaybackStatus::Idle);
                }
            }

            prop_assert!(playback.step_index() <= last);
            if playback.status() == PlaybackStatus::Running {
                prop_assert!(playback.step_index() < last);
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Compare isolation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn compare_panels_are_isolated(
        selected in proptest::collection::vec(any_algorithm(), 1..8),
        input in any_input(20),
        target in 0usize..5,
    ) {
        let mut session =
            create_compare_run_session(&selected, &input, &CompareSessionOptions::default())
                .unwrap();
        let victim = session.selected[target % session.selected.len()];

        if let Some(panel) = session.panels.get_mut(&victim) {
            panel.input.push(i32::MAX);
            panel.input.reverse();
        }

        prop_assert_eq!(&session.shared_input, &input);
        for (id, panel) in &session.panels {
            if *id != victim {
                prop_assert_eq!(&panel.input, &input);
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Transitions settle on the target
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn full_progress_matches_target(id in any_algorithm(), input in any_input(16)) {
        let steps = id.run(&input);
        for pair in steps.windows(2) {
            let frame = RenderTransition::between(&pair[0], &pair[1])
                .at(1.0)
                .interpolate(&pair[1].snapshot);
            let expected: Vec<f64> = pair[1].snapshot.iter().map(|&v| f64::from(v)).collect();
            prop_assert_eq!(frame.values, expected);
            prop_assert!(frame.offsets.iter().all(|&o| o == 0.0));
        }
    }
}
