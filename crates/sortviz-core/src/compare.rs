//! Side-by-side runs of several algorithms over one shared input.
//!
//! A [`CompareRunSession`] is built once per (selection, input) pair and never
//! patched: any change to either rebuilds it wholesale. Each panel owns its
//! own clone of the shared input, so nothing one panel does can leak into a
//! sibling or into the baseline used for the next reset.
//!
//! [`CompareOrchestrator`] drives one [`PlaybackController`] per panel in
//! lockstep. Panels finish independently; the session only reports
//! `finished` once every panel has.

use std::collections::BTreeMap;

use uuid::Uuid;

use crate::algorithms::{AlgorithmExecution, AlgorithmId, execute_algorithm_with_input};
use crate::error::{Result, VizError};
use crate::playback::{PlaybackController, PlaybackStatus};
use crate::speed::{PlaybackCadence, resolve_playback_cadence};
use crate::trace::{SortStep, SortValue};

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Produces one panel's trace. Swappable so tests can observe or fake runs.
pub type CompareExecutor<T> = fn(AlgorithmId, &[T]) -> AlgorithmExecution<T>;

/// Knobs for session construction.
#[derive(Debug, Clone)]
pub struct CompareSessionOptions<T> {
    /// Fixed id; a fresh `compare-run-<uuid>` is generated when `None`.
    pub session_id: Option<String>,
    pub executor: CompareExecutor<T>,
}

impl<T: SortValue> Default for CompareSessionOptions<T> {
    fn default() -> Self {
        Self {
            session_id: None,
            executor: execute_algorithm_with_input::<T>,
        }
    }
}

/// One algorithm's slice of a compare session.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparePanel<T> {
    pub algorithm: AlgorithmId,
    /// This panel's private copy of the shared input.
    pub input: Vec<T>,
    pub steps: Vec<SortStep<T>>,
}

impl<T: SortValue> ComparePanel<T> {
    /// View this panel as a standalone single-algorithm run.
    pub fn to_execution(&self) -> AlgorithmExecution<T> {
        AlgorithmExecution {
            algorithm: self.algorithm,
            input: self.input.clone(),
            steps: self.steps.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompareRunSession<T> {
    pub id: String,
    /// Ground truth; never handed to a panel by reference.
    pub shared_input: Vec<T>,
    /// Deduplicated, first-occurrence order.
    pub selected: Vec<AlgorithmId>,
    pub panels: BTreeMap<AlgorithmId, ComparePanel<T>>,
}

impl<T> CompareRunSession<T> {
    /// Panels in selection order.
    pub fn panels_in_order(&self) -> impl Iterator<Item = &ComparePanel<T>> {
        self.selected.iter().filter_map(|id| self.panels.get(id))
    }
}

fn dedupe(selected: &[AlgorithmId]) -> Vec<AlgorithmId> {
    let mut unique = Vec::with_capacity(selected.len());
    for &id in selected {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }
    unique
}

/// Build a session with one panel per distinct selected algorithm.
pub fn create_compare_run_session<T: SortValue>(
    selected: &[AlgorithmId],
    shared_input: &[T],
    options: &CompareSessionOptions<T>,
) -> Result<CompareRunSession<T>> {
    let selected = dedupe(selected);
    if selected.is_empty() {
        return Err(VizError::EmptySelection);
    }

    let panels = selected
        .iter()
        .map(|&algorithm| {
            let clone = shared_input.to_vec();
            let execution = (options.executor)(algorithm, &clone);
            let panel = ComparePanel {
                algorithm,
                input: execution.input,
                steps: execution.steps,
            };
            (algorithm, panel)
        })
        .collect();

    let id = options
        .session_id
        .clone()
        .unwrap_or_else(|| format!("compare-run-{}", Uuid::new_v4()));

    log::debug!(
        "created compare session {id}: {} panels over {} values",
        selected.len(),
        shared_input.len()
    );

    Ok(CompareRunSession {
        id,
        shared_input: shared_input.to_vec(),
        selected,
        panels,
    })
}

/// A one-panel session, for reusing the compare machinery in single view.
pub fn create_single_algorithm_session<T: SortValue>(
    algorithm: AlgorithmId,
    input: &[T],
    executor: CompareExecutor<T>,
) -> Result<CompareRunSession<T>> {
    let options = CompareSessionOptions {
        session_id: None,
        executor,
    };
    create_compare_run_session(&[algorithm], input, &options)
}

/// Fold panel statuses into one session status.
///
/// `finished` only when every panel is (and there is at least one), then
/// `running` over `paused` over `idle`.
pub fn aggregate_status(statuses: impl IntoIterator<Item = PlaybackStatus>) -> PlaybackStatus {
    let mut any = false;
    let mut all_finished = true;
    let mut any_running = false;
    let mut any_paused = false;

    for status in statuses {
        any = true;
        all_finished &= status == PlaybackStatus::Finished;
        any_running |= status == PlaybackStatus::Running;
        any_paused |= status == PlaybackStatus::Paused;
    }

    if any && all_finished {
        PlaybackStatus::Finished
    } else if any_running {
        PlaybackStatus::Running
    } else if any_paused {
        PlaybackStatus::Paused
    } else {
        PlaybackStatus::Idle
    }
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Everything needed to stand up an orchestrator.
#[derive(Debug, Clone)]
pub struct CompareOrchestratorConfig<T> {
    pub selected: Vec<AlgorithmId>,
    pub shared_input: Vec<T>,
    pub speed: f64,
    pub array_size: usize,
    pub session: CompareSessionOptions<T>,
}

#[derive(Debug, Clone)]
struct PanelRuntime<T> {
    algorithm: AlgorithmId,
    input: Vec<T>,
    playback: PlaybackController<T>,
}

/// Per-panel view returned from [`CompareOrchestrator::state`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparePanelState<'a, T> {
    pub algorithm: AlgorithmId,
    pub input: &'a [T],
    pub steps: &'a [SortStep<T>],
    pub step_index: usize,
    pub step: &'a SortStep<T>,
    pub status: PlaybackStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompareOrchestratorState<'a, T> {
    pub session_id: &'a str,
    pub shared_input: &'a [T],
    pub selected: &'a [AlgorithmId],
    pub status: PlaybackStatus,
    pub speed: f64,
    pub array_size: usize,
    /// Selection order.
    pub panels: Vec<ComparePanelState<'a, T>>,
}

/// Lockstep playback over every panel of a session.
#[derive(Debug, Clone)]
pub struct CompareOrchestrator<T> {
    session_id: String,
    shared_input: Vec<T>,
    selected: Vec<AlgorithmId>,
    panels: BTreeMap<AlgorithmId, PanelRuntime<T>>,
    speed: f64,
    array_size: usize,
    options: CompareSessionOptions<T>,
}

impl<T: SortValue> CompareOrchestrator<T> {
    pub fn new(config: CompareOrchestratorConfig<T>) -> Result<Self> {
        let session =
            create_compare_run_session(&config.selected, &config.shared_input, &config.session)?;
        let mut orchestrator = Self {
            session_id: String::new(),
            shared_input: Vec::new(),
            selected: Vec::new(),
            panels: BTreeMap::new(),
            speed: config.speed,
            array_size: config.array_size,
            options: config.session,
        };
        orchestrator.install(session);
        Ok(orchestrator)
    }

    fn install(&mut self, session: CompareRunSession<T>) {
        self.panels = session
            .panels
            .into_iter()
            .map(|(algorithm, panel)| {
                let runtime = PanelRuntime {
                    algorithm,
                    input: panel.input,
                    playback: PlaybackController::new(panel.steps),
                };
                (algorithm, runtime)
            })
            .collect();
        self.session_id = session.id;
        self.shared_input = session.shared_input;
        self.selected = session.selected;
    }

    pub fn status(&self) -> PlaybackStatus {
        aggregate_status(self.panels.values().map(|panel| panel.playback.status()))
    }

    pub fn state(&self) -> CompareOrchestratorState<'_, T> {
        let panels = self
            .selected
            .iter()
            .filter_map(|id| self.panels.get(id))
            .map(|panel| {
                let playback = panel.playback.state();
                ComparePanelState {
                    algorithm: panel.algorithm,
                    input: &panel.input,
                    steps: panel.playback.steps(),
                    step_index: playback.step_index,
                    step: playback.step,
                    status: playback.status,
                }
            })
            .collect();

        CompareOrchestratorState {
            session_id: &self.session_id,
            shared_input: &self.shared_input,
            selected: &self.selected,
            status: self.status(),
            speed: self.speed,
            array_size: self.array_size,
            panels,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn selected(&self) -> &[AlgorithmId] {
        &self.selected
    }

    pub fn shared_input(&self) -> &[T] {
        &self.shared_input
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Cadence the caller's timer should follow.
    pub fn cadence(&self) -> PlaybackCadence {
        resolve_playback_cadence(self.speed, self.array_size)
    }

    fn for_each_playback(&mut self, f: impl Fn(&mut PlaybackController<T>)) {
        for panel in self.panels.values_mut() {
            f(&mut panel.playback);
        }
    }

    pub fn start(&mut self) -> CompareOrchestratorState<'_, T> {
        self.for_each_playback(|playback| {
            playback.start();
        });
        self.state()
    }

    /// Advance every still-running panel by up to `steps_per_tick` steps.
    pub fn tick(&mut self) -> CompareOrchestratorState<'_, T> {
        if self.status() != PlaybackStatus::Running {
            return self.state();
        }

        let steps_per_tick = self.cadence().steps_per_tick;
        self.for_each_playback(|playback| {
            for _ in 0..steps_per_tick {
                if playback.status() != PlaybackStatus::Running {
                    break;
                }
                playback.tick();
            }
        });
        self.state()
    }

    pub fn pause(&mut self) -> CompareOrchestratorState<'_, T> {
        self.for_each_playback(|playback| {
            playback.pause();
        });
        self.state()
    }

    pub fn resume(&mut self) -> CompareOrchestratorState<'_, T> {
        self.for_each_playback(|playback| {
            playback.resume();
        });
        self.state()
    }

    /// Skip every panel to its final step.
    pub fn complete(&mut self) -> CompareOrchestratorState<'_, T> {
        self.for_each_playback(|playback| {
            playback.complete();
        });
        self.state()
    }

    /// Rebuild the session from scratch, optionally over a new shared input.
    pub fn reset(
        &mut self,
        next_shared_input: Option<&[T]>,
    ) -> Result<CompareOrchestratorState<'_, T>> {
        log::debug!("resetting compare session {}", self.session_id);
        let shared_input = next_shared_input.unwrap_or(&self.shared_input);
        let session = create_compare_run_session(&self.selected, shared_input, &self.options)?;
        self.install(session);
        Ok(self.state())
    }

    /// Replace the selection, rebuilding the session.
    pub fn reselect(&mut self, selected: &[AlgorithmId]) -> Result<CompareOrchestratorState<'_, T>> {
        let session = create_compare_run_session(selected, &self.shared_input, &self.options)?;
        self.install(session);
        Ok(self.state())
    }

    /// Only changes the cadence consulted by the caller's timer.
    pub fn update_speed(&mut self, speed: f64) -> CompareOrchestratorState<'_, T> {
        self.speed = speed;
        self.state()
    }

    /// Array size used for cadence banding.
    pub fn set_array_size(&mut self, array_size: usize) {
        self.array_size = array_size;
    }
}
