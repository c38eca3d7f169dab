//! UI-level playback actions and which controls each status enables.
//!
//! This is the status machine the controls follow, separate from the
//! index-moving [`PlaybackController`](crate::playback::PlaybackController):
//! a view asks here whether a button is live and what status an action leads
//! to.

use crate::playback::PlaybackStatus;

/// An action a user can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaybackAction {
    Start,
    Pause,
    Resume,
    Reset,
    Finish,
}

impl PlaybackAction {
    pub const ALL: [PlaybackAction; 5] = [
        Self::Start,
        Self::Pause,
        Self::Resume,
        Self::Reset,
        Self::Finish,
    ];
}

/// Target status for `action` from `status`, or `None` if not allowed.
fn target(status: PlaybackStatus, action: PlaybackAction) -> Option<PlaybackStatus> {
    use PlaybackAction as A;
    use PlaybackStatus as S;

    match (status, action) {
        (_, A::Reset) => Some(S::Idle),
        (S::Idle | S::Finished, A::Start) => Some(S::Running),
        (S::Running, A::Pause) => Some(S::Paused),
        (S::Paused, A::Resume) => Some(S::Running),
        (S::Running | S::Paused, A::Finish) => Some(S::Finished),
        _ => None,
    }
}

pub fn allowed_playback_actions(status: PlaybackStatus) -> Vec<PlaybackAction> {
    PlaybackAction::ALL
        .into_iter()
        .filter(|&action| target(status, action).is_some())
        .collect()
}

pub fn is_playback_action_allowed(status: PlaybackStatus, action: PlaybackAction) -> bool {
    target(status, action).is_some()
}

/// Apply `action`; disallowed actions leave the status unchanged.
pub fn transition_playback_status(status: PlaybackStatus, action: PlaybackAction) -> PlaybackStatus {
    target(status, action).unwrap_or(status)
}

/// Which interactive controls are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlAvailability {
    pub algorithm_select: bool,
    pub array_size: bool,
    pub speed: bool,
    pub randomize: bool,
    pub start: bool,
    pub pause: bool,
    pub resume: bool,
    pub reset: bool,
}

pub fn control_availability(status: PlaybackStatus) -> ControlAvailability {
    // Input-shaping controls are locked while a run is in flight.
    let configurable = matches!(status, PlaybackStatus::Idle | PlaybackStatus::Finished);

    ControlAvailability {
        algorithm_select: configurable,
        array_size: configurable,
        speed: true,
        randomize: configurable,
        start: configurable,
        pause: status == PlaybackStatus::Running,
        resume: status == PlaybackStatus::Paused,
        reset: status != PlaybackStatus::Idle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PlaybackAction as A;
    use PlaybackStatus as S;

    #[test]
    fn allowed_actions_per_status() {
        assert_eq!(allowed_playback_actions(S::Idle), vec![A::Start, A::Reset]);
        assert_eq!(
            allowed_playback_actions(S::Running),
            vec![A::Pause, A::Reset, A::Finish]
        );
        assert_eq!(
            allowed_playback_actions(S::Paused),
            vec![A::Resume, A::Reset, A::Finish]
        );
        assert_eq!(allowed_playback_actions(S::Finished), vec![A::Start, A::Reset]);
    }

    #[test]
    fn disallowed_action_keeps_status() {
        assert_eq!(transition_playback_status(S::Idle, A::Pause), S::Idle);
        assert_eq!(transition_playback_status(S::Finished, A::Resume), S::Finished);
        assert!(!is_playback_action_allowed(S::Idle, A::Finish));
    }

    #[test]
    fn full_cycle() {
        let mut status = S::Idle;
        for (action, expected) in [
            (A::Start, S::Running),
            (A::Pause, S::Paused),
            (A::Resume, S::Running),
            (A::Finish, S::Finished),
            (A::Start, S::Running),
            (A::Reset, S::Idle),
        ] {
            status = transition_playback_status(status, action);
            assert_eq!(status, expected, "after {action:?}");
        }
    }

    #[test]
    fn availability_table() {
        let idle = control_availability(S::Idle);
        assert!(idle.start && idle.randomize && idle.algorithm_select && idle.speed);
        assert!(!idle.pause && !idle.resume && !idle.reset);

        let running = control_availability(S::Running);
        assert!(running.pause && running.reset && running.speed);
        assert!(!running.start && !running.resume && !running.array_size);

        let paused = control_availability(S::Paused);
        assert!(paused.resume && paused.reset);
        assert!(!paused.pause && !paused.randomize);

        let finished = control_availability(S::Finished);
        assert!(finished.start && finished.reset && finished.array_size);
        assert!(!finished.pause && !finished.resume);
    }
}
