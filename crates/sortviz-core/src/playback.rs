//! Playback state machine over a precomputed trace.
//!
//! ```text
//!            start (len > 1)          tick → last index
//!   idle ──────────────────▶ running ──────────────────▶ finished
//!    ▲  start (len <= 1)       │  ▲                         │
//!    │  ───────────────────────┼──┼────────────────────────▶│
//!    │                  pause  ▼  │ resume                  │
//!    │                       paused                         │
//!    └──────────────── reset (from anywhere) ◀──────────────┘
//! ```
//!
//! The controller never looks inside steps; it only moves an index.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::trace::SortStep;

/// Lifecycle of one playback (and, aggregated, of a compare session).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackStatus {
    #[default]
    Idle,
    Running,
    Paused,
    Finished,
}

impl PlaybackStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Finished => "finished",
        }
    }
}

impl fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only view of a controller at one moment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackState<'a, T> {
    pub status: PlaybackStatus,
    pub step_index: usize,
    pub step: &'a SortStep<T>,
}

/// Advances an index through a trace under tick-driven control.
#[derive(Debug, Clone)]
pub struct PlaybackController<T> {
    steps: Vec<SortStep<T>>,
    step_index: usize,
    status: PlaybackStatus,
}

impl<T> PlaybackController<T> {
    /// Take ownership of a trace. An empty trace is replaced by the single
    /// [`SortStep::empty_start`] step so a current step always exists.
    pub fn new(steps: Vec<SortStep<T>>) -> Self {
        let steps = if steps.is_empty() {
            vec![SortStep::empty_start()]
        } else {
            steps
        };
        Self {
            steps,
            step_index: 0,
            status: PlaybackStatus::Idle,
        }
    }

    pub fn state(&self) -> PlaybackState<'_, T> {
        PlaybackState {
            status: self.status,
            step_index: self.step_index,
            step: &self.steps[self.step_index],
        }
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    pub fn steps(&self) -> &[SortStep<T>] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Never true: the fallback step keeps at least one entry.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    fn last_index(&self) -> usize {
        self.steps.len() - 1
    }

    /// Rewind to the first step and begin running. Traces of one step have
    /// nothing to play and finish immediately.
    pub fn start(&mut self) -> PlaybackState<'_, T> {
        self.step_index = 0;
        self.status = if self.steps.len() > 1 {
            PlaybackStatus::Running
        } else {
            PlaybackStatus::Finished
        };
        self.state()
    }

    /// Advance one step while running; no-op otherwise.
    pub fn tick(&mut self) -> PlaybackState<'_, T> {
        if self.status != PlaybackStatus::Running {
            return self.state();
        }

        let last = self.last_index();
        if self.step_index < last {
            self.step_index += 1;
        }
        if self.step_index >= last {
            self.status = PlaybackStatus::Finished;
        }
        self.state()
    }

    pub fn pause(&mut self) -> PlaybackState<'_, T> {
        if self.status == PlaybackStatus::Running {
            self.status = PlaybackStatus::Paused;
        }
        self.state()
    }

    pub fn resume(&mut self) -> PlaybackState<'_, T> {
        if self.status == PlaybackStatus::Paused {
            self.status = PlaybackStatus::Running;
        }
        self.state()
    }

    /// Jump straight to the final step.
    pub fn complete(&mut self) -> PlaybackState<'_, T> {
        self.step_index = self.last_index();
        self.status = PlaybackStatus::Finished;
        self.state()
    }

    pub fn reset(&mut self) -> PlaybackState<'_, T> {
        self.step_index = 0;
        self.status = PlaybackStatus::Idle;
        self.state()
    }
}
