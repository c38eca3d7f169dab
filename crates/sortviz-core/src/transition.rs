//! In-between frames for the animation from one step to the next.
//!
//! A transition never re-runs a sort. It looks at the previous snapshot, the
//! target snapshot and the target step's tags, then picks the most specific
//! way to animate:
//!
//! 1. operation-specific moves (`swap`, `write`, `shift`),
//! 2. a generic positional move when the snapshots are permutations,
//! 3. a numeric height morph when nothing can be matched.
//!
//! Offsets are in slot units: `1.0` is one bar position to the right.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::labels::value_tokens;
use crate::trace::{Operation, SortStep, SortValue};

/// Cubic ease-in-out on `[0, 1]`.
pub fn ease_in_out_cubic(progress: f64) -> f64 {
    if progress < 0.5 {
        4.0 * progress * progress * progress
    } else {
        1.0 - (-2.0 * progress + 2.0).powi(3) / 2.0
    }
}

/// Clamp to `[0, 1]`; non-finite progress counts as not started.
pub fn clamp_progress(progress: f64) -> f64 {
    if progress.is_finite() {
        progress.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Heights and horizontal offsets for one animation frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransitionFrame {
    pub values: Vec<f64>,
    pub offsets: Vec<f64>,
}

impl TransitionFrame {
    fn settled(values: Vec<f64>) -> Self {
        let offsets = vec![0.0; values.len()];
        Self { values, offsets }
    }
}

/// Which rule produced a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Complete,
    Swap,
    Write,
    Shift,
    Permutation,
    Morph,
}

/// The previous step plus how far we are toward the next one.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderTransition<T> {
    pub from_snapshot: Vec<T>,
    /// Raw linear progress; clamped and eased on use.
    pub progress: f64,
    pub operation: Option<Operation>,
    pub compared_indices: Vec<usize>,
    pub modified_indices: Vec<usize>,
}

impl<T: SortValue> RenderTransition<T> {
    /// Transition from `from` toward `to`, at progress 0.
    pub fn between(from: &SortStep<T>, to: &SortStep<T>) -> Self {
        Self {
            from_snapshot: from.snapshot.clone(),
            progress: 0.0,
            operation: to.operation(),
            compared_indices: to.compared_indices.clone(),
            modified_indices: to.modified_indices.clone(),
        }
    }

    pub fn at(mut self, progress: f64) -> Self {
        self.progress = progress;
        self
    }

    /// Frame at the current progress toward `target`.
    pub fn interpolate(&self, target: &[T]) -> TransitionFrame {
        self.interpolate_with_kind(target).0
    }

    pub fn interpolate_with_kind(&self, target: &[T]) -> (TransitionFrame, TransitionKind) {
        let progress = clamp_progress(self.progress);
        if progress >= 1.0 {
            return (
                TransitionFrame::settled(as_f64s(target)),
                TransitionKind::Complete,
            );
        }
        let eased = ease_in_out_cubic(progress);

        if let Some(result) = self.operation_frame(target, eased) {
            return result;
        }
        if let Some(frame) = self.permutation_frame(target, eased) {
            return (frame, TransitionKind::Permutation);
        }

        log::warn!(
            "no positional match between snapshots ({} -> {} values), morphing heights",
            self.from_snapshot.len(),
            target.len()
        );
        (self.morph_frame(target, eased), TransitionKind::Morph)
    }

    fn operation_frame(&self, target: &[T], eased: f64) -> Option<(TransitionFrame, TransitionKind)> {
        let len = target.len();
        if self.from_snapshot.len() != len {
            return None;
        }
        let valid_pair = |indices: &[usize]| match *indices {
            [a, b] if a < len && b < len => Some((a, b)),
            _ => None,
        };

        let operation = self.operation.filter(|op| op.is_mutation())?;
        match operation {
            Operation::Swap => {
                let (first, second) = valid_pair(&self.modified_indices)?;
                let distance = second as f64 - first as f64;
                let mut frame = TransitionFrame::settled(as_f64s(&self.from_snapshot));
                frame.offsets[first] = distance * eased;
                frame.offsets[second] = -distance * eased;
                Some((frame, TransitionKind::Swap))
            }
            Operation::Write => {
                let (source, destination) = valid_pair(&self.compared_indices)?;
                let mut frame = TransitionFrame::settled(as_f64s(target));
                frame.offsets[destination] =
                    (source as f64 - destination as f64) * (1.0 - eased);
                Some((frame, TransitionKind::Write))
            }
            Operation::Shift => {
                let (left, right) = valid_pair(&self.compared_indices)?;
                let remaining = 1.0 - eased;
                let mut frame = TransitionFrame::settled(as_f64s(target));
                frame.offsets[left] = (right as f64 - left as f64) * remaining;
                frame.offsets[right] = (left as f64 - right as f64) * remaining;
                Some((frame, TransitionKind::Shift))
            }
            _ => None,
        }
    }

    fn permutation_frame(&self, target: &[T], eased: f64) -> Option<TransitionFrame> {
        if self.from_snapshot.len() != target.len() {
            return None;
        }

        let target_index: HashMap<_, _> = value_tokens(target)
            .into_iter()
            .enumerate()
            .map(|(index, token)| (token, index))
            .collect();

        let offsets = value_tokens(&self.from_snapshot)
            .iter()
            .enumerate()
            .map(|(index, token)| {
                target_index
                    .get(token)
                    .map(|&to| (to as f64 - index as f64) * eased)
            })
            .collect::<Option<Vec<f64>>>()?;

        Some(TransitionFrame {
            values: as_f64s(&self.from_snapshot),
            offsets,
        })
    }

    fn morph_frame(&self, target: &[T], eased: f64) -> TransitionFrame {
        let size = self.from_snapshot.len().max(target.len());
        let values = (0..size)
            .map(|index| {
                let to = target.get(index).map(|v| v.as_f64());
                let from = self
                    .from_snapshot
                    .get(index)
                    .map(|v| v.as_f64())
                    .or(to)
                    .unwrap_or(0.0);
                let to = to.unwrap_or(from);
                from + (to - from) * eased
            })
            .collect();
        TransitionFrame::settled(values)
    }
}

fn as_f64s<T: SortValue>(values: &[T]) -> Vec<f64> {
    values.iter().map(|v| v.as_f64()).collect()
}

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// A transition bound to wall-clock time.
#[derive(Debug, Clone)]
pub struct ActiveTransition<T> {
    pub transition: RenderTransition<T>,
    pub started_at: Instant,
    pub duration: Duration,
}

impl<T: SortValue> ActiveTransition<T> {
    pub fn new(transition: RenderTransition<T>, started_at: Instant, duration: Duration) -> Self {
        Self {
            transition,
            started_at,
            duration,
        }
    }

    /// Linear progress at `now`. A zero duration is immediately complete.
    pub fn progress_at(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        clamp_progress(elapsed.as_secs_f64() / self.duration.as_secs_f64())
    }

    pub fn is_complete(&self, now: Instant) -> bool {
        self.progress_at(now) >= 1.0
    }

    /// The underlying transition with its progress set for `now`.
    pub fn snapshot_at(&self, now: Instant) -> RenderTransition<T> {
        self.transition.clone().at(self.progress_at(now))
    }
}
