//! Single-algorithm player: state and event loop.
//!
//! The whole trace is generated up front when the algorithm, size or input
//! changes. Ticks only move the playback index; when exactly one step is
//! taken per tick the move is animated with a short bar transition.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};

use sortviz_core::{
    ActiveTransition, AlgorithmId, ControlAvailability, InitialIndexLookup, PlaybackAction,
    PlaybackCadence, PlaybackController, PlaybackStatus, RandomArrayOptions, RenderTransition,
    SortStep, control_availability, generate_random_array, is_playback_action_allowed,
    resolve_playback_cadence, transition_duration_ms,
};

use super::Term;

pub const MIN_ARRAY_SIZE: usize = 5;
pub const MAX_ARRAY_SIZE: usize = 1000;
const SIZE_STEP: usize = 5;
const SPEED_STEP: u8 = 5;

/// Poll timeout while idle or paused.
const IDLE_POLL: Duration = Duration::from_millis(50);
/// Poll timeout while a transition is animating (~60 fps).
const FRAME_POLL: Duration = Duration::from_millis(16);

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    running: bool,
    algorithm: AlgorithmId,
    array_size: usize,
    speed: u8,
    input: Vec<i64>,
    playback: PlaybackController<i64>,
    lookup: InitialIndexLookup,
    last_tick: Instant,
    transition: Option<ActiveTransition<i64>>,
    message: Option<String>,
}

impl App {
    pub fn new(algorithm: AlgorithmId, input: Vec<i64>, speed: u8) -> Self {
        let array_size = input.len();
        let steps = algorithm.run(&input);
        let lookup = InitialIndexLookup::new(&input);
        Self {
            running: true,
            algorithm,
            array_size,
            speed: speed.min(100),
            input,
            playback: PlaybackController::new(steps),
            lookup,
            last_tick: Instant::now(),
            transition: None,
            message: None,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        super::with_terminal(|terminal| self.run_loop(terminal))
    }

    fn run_loop(&mut self, terminal: &mut Term) -> io::Result<()> {
        while self.running {
            terminal.draw(|f| super::ui::draw(f, self))?;

            if event::poll(self.poll_timeout(Instant::now()))?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                self.handle_key(key.code);
            }

            self.on_tick(Instant::now());
        }

        Ok(())
    }

    fn poll_timeout(&self, now: Instant) -> Duration {
        if self.transition.is_some() {
            return FRAME_POLL;
        }
        if self.playback.status() != PlaybackStatus::Running {
            return IDLE_POLL;
        }
        let interval = Duration::from_millis(self.cadence().interval_ms);
        interval
            .saturating_sub(now.duration_since(self.last_tick))
            .clamp(Duration::from_millis(1), IDLE_POLL)
    }

    /// Advance playback when an interval has elapsed and retire a finished
    /// transition.
    pub(crate) fn on_tick(&mut self, now: Instant) {
        if self.playback.status() == PlaybackStatus::Running {
            let cadence = self.cadence();
            if now.duration_since(self.last_tick) >= Duration::from_millis(cadence.interval_ms) {
                self.last_tick = now;
                self.advance(cadence, now);
            }
        }

        if let Some(active) = &self.transition
            && active.is_complete(now)
        {
            self.transition = None;
        }
    }

    fn advance(&mut self, cadence: PlaybackCadence, now: Instant) {
        let before = self.playback.step_index();
        let from = (cadence.steps_per_tick == 1).then(|| self.playback.state().step.clone());

        for _ in 0..cadence.steps_per_tick {
            if self.playback.status() != PlaybackStatus::Running {
                break;
            }
            self.playback.tick();
        }

        self.transition = match from {
            Some(from) if self.playback.step_index() != before => {
                let transition = RenderTransition::between(&from, self.playback.state().step);
                let duration = Duration::from_millis(transition_duration_ms(cadence.interval_ms));
                Some(ActiveTransition::new(transition, now, duration))
            }
            _ => None,
        };
    }

    pub(crate) fn handle_key(&mut self, key: KeyCode) {
        self.message = None;
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_playback(),
            KeyCode::Char('r') => self.apply(PlaybackAction::Reset),
            KeyCode::Char('e') => self.apply(PlaybackAction::Finish),
            KeyCode::Char('n') => {
                if self.availability().randomize {
                    self.randomize();
                }
            }
            KeyCode::Char('a') | KeyCode::Tab => {
                if self.availability().algorithm_select {
                    self.algorithm = self.algorithm.next();
                    let input = std::mem::take(&mut self.input);
                    self.load(input);
                }
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.speed = self.speed.saturating_add(SPEED_STEP).min(100);
            }
            KeyCode::Char('-') => self.speed = self.speed.saturating_sub(SPEED_STEP),
            KeyCode::Char(']') => self.resize(super::step_size(self.array_size, SIZE_STEP, true)),
            KeyCode::Char('[') => self.resize(super::step_size(self.array_size, SIZE_STEP, false)),
            _ => {}
        }
    }

    fn toggle_playback(&mut self) {
        let action = match self.playback.status() {
            PlaybackStatus::Idle | PlaybackStatus::Finished => PlaybackAction::Start,
            PlaybackStatus::Running => PlaybackAction::Pause,
            PlaybackStatus::Paused => PlaybackAction::Resume,
        };
        self.apply(action);
    }

    fn apply(&mut self, action: PlaybackAction) {
        if !is_playback_action_allowed(self.playback.status(), action) {
            return;
        }
        match action {
            PlaybackAction::Start => {
                self.playback.start();
                self.last_tick = Instant::now();
            }
            PlaybackAction::Pause => {
                self.playback.pause();
            }
            PlaybackAction::Resume => {
                self.playback.resume();
                self.last_tick = Instant::now();
            }
            PlaybackAction::Reset => {
                self.playback.reset();
            }
            PlaybackAction::Finish => {
                self.playback.complete();
            }
        }
        self.transition = None;
        log::debug!("{}: {:?} -> {}", self.algorithm, action, self.playback.status());
    }

    fn resize(&mut self, size: usize) {
        let size = size.clamp(MIN_ARRAY_SIZE, MAX_ARRAY_SIZE);
        if size == self.array_size || !self.availability().array_size {
            return;
        }
        self.array_size = size;
        self.randomize();
    }

    fn randomize(&mut self) {
        match generate_random_array(&RandomArrayOptions::with_size(self.array_size)) {
            Ok(input) => self.load(input),
            Err(e) => self.message = Some(e.to_string()),
        }
    }

    /// Regenerate the trace for the current algorithm and rewind.
    fn load(&mut self, input: Vec<i64>) {
        self.array_size = input.len();
        self.playback = PlaybackController::new(self.algorithm.run(&input));
        self.lookup = InitialIndexLookup::new(&input);
        self.input = input;
        self.transition = None;
    }

    // -- accessors for the UI --

    pub fn algorithm(&self) -> AlgorithmId {
        self.algorithm
    }

    pub fn status(&self) -> PlaybackStatus {
        self.playback.status()
    }

    pub fn step(&self) -> &SortStep<i64> {
        self.playback.state().step
    }

    pub fn step_index(&self) -> usize {
        self.playback.step_index()
    }

    pub fn step_count(&self) -> usize {
        self.playback.len()
    }

    pub fn speed(&self) -> u8 {
        self.speed
    }

    pub fn array_size(&self) -> usize {
        self.array_size
    }

    pub fn input(&self) -> &[i64] {
        &self.input
    }

    pub fn cadence(&self) -> PlaybackCadence {
        resolve_playback_cadence(f64::from(self.speed), self.array_size)
    }

    pub fn availability(&self) -> ControlAvailability {
        control_availability(self.playback.status())
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Original position of every bar in the current step.
    pub fn labels(&self) -> Vec<usize> {
        self.lookup.labels_for(&self.step().snapshot)
    }

    /// The in-flight transition frozen at `now`, if any.
    pub fn transition_at(&self, now: Instant) -> Option<RenderTransition<i64>> {
        self.transition.as_ref().map(|active| active.snapshot_at(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortviz_core::Operation;

    fn player(speed: u8) -> App {
        App::new(AlgorithmId::BubbleSort, vec![5, 4, 3, 2, 1], speed)
    }

    #[test]
    fn space_cycles_start_pause_resume() {
        let mut app = player(50);
        assert_eq!(app.status(), PlaybackStatus::Idle);
        app.handle_key(KeyCode::Char(' '));
        assert_eq!(app.status(), PlaybackStatus::Running);
        app.handle_key(KeyCode::Char(' '));
        assert_eq!(app.status(), PlaybackStatus::Paused);
        app.handle_key(KeyCode::Char(' '));
        assert_eq!(app.status(), PlaybackStatus::Running);
    }

    #[test]
    fn quit_stops_loop() {
        let mut app = player(50);
        app.handle_key(KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn tick_waits_for_interval() {
        let mut app = player(0);
        app.handle_key(KeyCode::Char(' '));
        // 700 ms at speed 0.
        app.on_tick(app.last_tick + Duration::from_millis(10));
        assert_eq!(app.step_index(), 0);
        app.on_tick(app.last_tick + Duration::from_millis(700));
        assert_eq!(app.step_index(), 1);
    }

    #[test]
    fn single_step_ticks_animate() {
        let mut app = player(0);
        app.handle_key(KeyCode::Char(' '));
        let now = app.last_tick + Duration::from_millis(700);
        app.on_tick(now);
        let transition = app.transition_at(now).expect("transition after one step");
        assert_eq!(transition.operation, app.step().operation());
        assert_eq!(transition.from_snapshot, vec![5, 4, 3, 2, 1]);

        // Transitions cap at 260 ms, well inside the 700 ms interval.
        let later = now + Duration::from_millis(300);
        app.on_tick(later);
        assert_eq!(app.step_index(), 1);
        assert!(app.transition_at(later).is_none());
    }

    #[test]
    fn multi_step_ticks_skip_animation() {
        let mut app = App::new(AlgorithmId::BubbleSort, (0..400).rev().collect(), 100);
        assert!(app.cadence().steps_per_tick > 1);
        app.handle_key(KeyCode::Char(' '));
        let now = app.last_tick + Duration::from_millis(app.cadence().interval_ms);
        app.on_tick(now);
        assert_eq!(app.step_index(), app.cadence().steps_per_tick);
        assert!(app.transition_at(now).is_none());
    }

    #[test]
    fn finish_and_reset() {
        let mut app = player(50);
        app.handle_key(KeyCode::Char('e'));
        assert_eq!(app.status(), PlaybackStatus::Idle, "finish needs a started run");

        app.handle_key(KeyCode::Char(' '));
        app.handle_key(KeyCode::Char('e'));
        assert_eq!(app.status(), PlaybackStatus::Finished);
        assert_eq!(app.step().operation(), Some(Operation::Sorted));

        app.handle_key(KeyCode::Char('r'));
        assert_eq!(app.status(), PlaybackStatus::Idle);
        assert_eq!(app.step_index(), 0);
    }

    #[test]
    fn algorithm_locked_while_running() {
        let mut app = player(50);
        app.handle_key(KeyCode::Char('a'));
        assert_eq!(app.algorithm(), AlgorithmId::InsertionSort);
        assert_eq!(app.input(), &[5, 4, 3, 2, 1]);

        app.handle_key(KeyCode::Char(' '));
        app.handle_key(KeyCode::Char('a'));
        assert_eq!(app.algorithm(), AlgorithmId::InsertionSort);
    }

    #[test]
    fn resize_regenerates_input_within_bounds() {
        let mut app = player(50);
        app.handle_key(KeyCode::Char('['));
        assert_eq!(app.array_size(), MIN_ARRAY_SIZE);
        app.handle_key(KeyCode::Char(']'));
        assert_eq!(app.array_size(), 10);
        assert_eq!(app.input().len(), 10);
        assert_eq!(app.step().snapshot.len(), 10);
    }

    #[test]
    fn speed_clamps_to_range() {
        let mut app = player(98);
        app.handle_key(KeyCode::Char('+'));
        assert_eq!(app.speed(), 100);
        let mut app = player(3);
        app.handle_key(KeyCode::Char('-'));
        assert_eq!(app.speed(), 0);
    }

    #[test]
    fn speed_stays_adjustable_while_running() {
        let mut app = player(50);
        app.handle_key(KeyCode::Char(' '));
        app.handle_key(KeyCode::Char('+'));
        assert_eq!(app.speed(), 55);
    }

    #[test]
    fn labels_follow_moved_values() {
        let mut app = App::new(AlgorithmId::BubbleSort, vec![2, 1], 50);
        app.handle_key(KeyCode::Char(' '));
        app.handle_key(KeyCode::Char('e'));
        assert_eq!(app.labels(), vec![1, 0]);
    }

    #[test]
    fn short_input_reports_its_own_size() {
        let app = App::new(AlgorithmId::BubbleSort, vec![2, 1], 50);
        assert_eq!(app.array_size(), 2);
        assert_eq!(app.cadence(), resolve_playback_cadence(50.0, 2));
    }

    #[test]
    fn resize_snaps_to_size_grid() {
        let mut app = App::new(AlgorithmId::InsertionSort, vec![6, 2, 9, 1, 5, 3], 50);
        assert_eq!(app.array_size(), 6);
        app.handle_key(KeyCode::Char(']'));
        assert_eq!(app.array_size(), 10);
        assert_eq!(app.input().len(), 10);

        let mut app = App::new(AlgorithmId::InsertionSort, vec![6, 2, 9, 1, 5, 3], 50);
        app.handle_key(KeyCode::Char('['));
        assert_eq!(app.array_size(), MIN_ARRAY_SIZE);

        let mut app = App::new(AlgorithmId::InsertionSort, vec![2, 1], 50);
        app.handle_key(KeyCode::Char('['));
        assert_eq!(app.array_size(), MIN_ARRAY_SIZE);
        assert_eq!(app.step().snapshot.len(), MIN_ARRAY_SIZE);
    }
}
