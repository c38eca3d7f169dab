//! # sortviz-core
//!
//! **Sorting algorithms, one observable step at a time.**
//!
//! `sortviz-core` turns an input array into a complete, deterministic trace of
//! what a sorting algorithm did to it: every comparison, swap, shift, write and
//! structural milestone, each with a full snapshot of the array. Everything
//! else in the crate consumes those traces without ever sorting again.
//!
//! ## Quick Start
//!
//! ```
//! use sortviz_core::{AlgorithmId, PlaybackController, PlaybackStatus};
//!
//! let steps = AlgorithmId::QuickSort.run(&[4, 1, 3, 2]);
//! assert_eq!(steps.last().unwrap().snapshot, vec![1, 2, 3, 4]);
//!
//! let mut playback = PlaybackController::new(steps);
//! playback.start();
//! while playback.status() == PlaybackStatus::Running {
//!     playback.tick();
//! }
//! assert_eq!(playback.status(), PlaybackStatus::Finished);
//! ```
//!
//! ## Architecture
//!
//! Input → Generator → Trace → Playback → Bar states → Transition → Surface
//!
//! - [`algorithms`]: five generators behind the closed [`AlgorithmId`] enum.
//! - [`playback`]: idle/running/paused/finished over a trace.
//! - [`compare`]: several algorithms in lockstep over one shared input.
//! - [`render`] and [`transition`]: per-bar semantics, layout and animation.
//! - [`speed`] and [`control`]: timer cadence and which controls are live.

pub mod algorithms;
pub mod compare;
pub mod control;
pub mod error;
pub mod input;
pub mod labels;
pub mod playback;
pub mod render;
pub mod speed;
pub mod trace;
pub mod transition;

pub use algorithms::{
    AlgorithmExecution, AlgorithmId, AlgorithmInfo, Complexity, algorithm_by_id,
    execute_algorithm_with_input, list_algorithms, run,
};
pub use compare::{
    CompareExecutor, CompareOrchestrator, CompareOrchestratorConfig, CompareOrchestratorState,
    ComparePanel, ComparePanelState, CompareRunSession, CompareSessionOptions, aggregate_status,
    create_compare_run_session, create_single_algorithm_session,
};
pub use control::{
    ControlAvailability, PlaybackAction, allowed_playback_actions, control_availability,
    is_playback_action_allowed, transition_playback_status,
};
pub use error::{Result, VizError};
pub use input::{RandomArrayOptions, generate_random_array};
pub use labels::InitialIndexLookup;
pub use playback::{PlaybackController, PlaybackState, PlaybackStatus};
pub use render::{
    BarDescriptor, BarVisualState, ConfiguredSurface, RenderFrame, Rgb, Surface,
    SurfaceDimensions, VisualSemantics, configure_surface, create_bar_descriptors,
    map_step_to_bar_states, render_bars_frame, resolve_visual_state,
};
pub use speed::{
    PlaybackCadence, PlaybackIntervalRange, SpeedRange, map_speed_to_interval_ms,
    resolve_playback_cadence, transition_duration_ms,
};
pub use trace::{Operation, SortRange, SortStep, SortValue, StepMetadata};
pub use transition::{
    ActiveTransition, RenderTransition, TransitionFrame, TransitionKind, ease_in_out_cubic,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
