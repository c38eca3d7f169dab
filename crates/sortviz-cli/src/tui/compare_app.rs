//! Side-by-side compare view: several algorithms over one shared input,
//! stepped in lockstep by a [`CompareOrchestrator`].

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};

use sortviz_core::{
    AlgorithmId, CompareOrchestrator, CompareOrchestratorConfig, CompareOrchestratorState,
    ControlAvailability, PlaybackAction, PlaybackStatus, RandomArrayOptions,
    control_availability, generate_random_array, is_playback_action_allowed,
};

use super::Term;

pub const MIN_COMPARE_SIZE: usize = 5;
pub const MAX_COMPARE_SIZE: usize = 300;
const SIZE_STEP: usize = 5;
const SPEED_STEP: u8 = 5;
const IDLE_POLL: Duration = Duration::from_millis(50);

pub struct CompareApp {
    running: bool,
    orchestrator: CompareOrchestrator<i64>,
    array_size: usize,
    speed: u8,
    last_tick: Instant,
    message: Option<String>,
}

impl CompareApp {
    pub fn new(selected: &[AlgorithmId], input: Vec<i64>, speed: u8) -> sortviz_core::Result<Self> {
        let array_size = input.len();
        let speed = speed.min(100);
        let orchestrator = CompareOrchestrator::new(CompareOrchestratorConfig {
            selected: selected.to_vec(),
            shared_input: input,
            speed: f64::from(speed),
            array_size,
            session: Default::default(),
        })?;
        log::info!(
            "compare session {} with {} panels",
            orchestrator.session_id(),
            orchestrator.selected().len()
        );
        Ok(Self {
            running: true,
            orchestrator,
            array_size,
            speed,
            last_tick: Instant::now(),
            message: None,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        super::with_terminal(|terminal| self.run_loop(terminal))
    }

    fn run_loop(&mut self, terminal: &mut Term) -> io::Result<()> {
        while self.running {
            terminal.draw(|f| super::ui::draw_compare(f, self))?;

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
        if self.orchestrator.status() != PlaybackStatus::Running {
            return IDLE_POLL;
        }
        Duration::from_millis(self.orchestrator.cadence().interval_ms)
            .saturating_sub(now.duration_since(self.last_tick))
            .clamp(Duration::from_millis(1), IDLE_POLL)
    }

    pub(crate) fn on_tick(&mut self, now: Instant) {
        if self.orchestrator.status() != PlaybackStatus::Running {
            return;
        }
        let interval = Duration::from_millis(self.orchestrator.cadence().interval_ms);
        if now.duration_since(self.last_tick) >= interval {
            self.last_tick = now;
            self.orchestrator.tick();
        }
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
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.set_speed(self.speed.saturating_add(SPEED_STEP).min(100));
            }
            KeyCode::Char('-') => self.set_speed(self.speed.saturating_sub(SPEED_STEP)),
            KeyCode::Char(']') => self.resize(super::step_size(self.array_size, SIZE_STEP, true)),
            KeyCode::Char('[') => self.resize(super::step_size(self.array_size, SIZE_STEP, false)),
            KeyCode::Char(c @ '1'..='5') => {
                let slot = c as usize - '1' as usize;
                self.toggle_algorithm(AlgorithmId::ALL[slot]);
            }
            _ => {}
        }
    }

    fn toggle_playback(&mut self) {
        let action = match self.orchestrator.status() {
            PlaybackStatus::Idle | PlaybackStatus::Finished => PlaybackAction::Start,
            PlaybackStatus::Running => PlaybackAction::Pause,
            PlaybackStatus::Paused => PlaybackAction::Resume,
        };
        self.apply(action);
    }

    fn apply(&mut self, action: PlaybackAction) {
        if !is_playback_action_allowed(self.orchestrator.status(), action) {
            return;
        }
        match action {
            PlaybackAction::Start => {
                self.orchestrator.start();
                self.last_tick = Instant::now();
            }
            PlaybackAction::Pause => {
                self.orchestrator.pause();
            }
            PlaybackAction::Resume => {
                self.orchestrator.resume();
                self.last_tick = Instant::now();
            }
            PlaybackAction::Reset => {
                if let Err(e) = self.orchestrator.reset(None) {
                    self.message = Some(e.to_string());
                }
            }
            PlaybackAction::Finish => {
                self.orchestrator.complete();
            }
        }
        log::debug!("compare: {:?} -> {}", action, self.orchestrator.status());
    }

    fn set_speed(&mut self, speed: u8) {
        self.speed = speed;
        self.orchestrator.update_speed(f64::from(speed));
    }

    fn resize(&mut self, size: usize) {
        let size = size.clamp(MIN_COMPARE_SIZE, MAX_COMPARE_SIZE);
        if size == self.array_size || !self.availability().array_size {
            return;
        }
        self.array_size = size;
        self.orchestrator.set_array_size(size);
        self.randomize();
    }

    fn randomize(&mut self) {
        let reset = generate_random_array(&RandomArrayOptions::with_size(self.array_size))
            .and_then(|input| self.orchestrator.reset(Some(input.as_slice())).map(|_| ()));
        if let Err(e) = reset {
            self.message = Some(e.to_string());
        }
    }

    fn toggle_algorithm(&mut self, algorithm: AlgorithmId) {
        if !self.availability().algorithm_select {
            return;
        }
        let mut selected = self.orchestrator.selected().to_vec();
        if let Some(pos) = selected.iter().position(|id| *id == algorithm) {
            selected.remove(pos);
        } else {
            selected.push(algorithm);
        }
        if let Err(e) = self.orchestrator.reselect(&selected) {
            self.message = Some(format!("{e}: keep at least one algorithm selected"));
        }
    }

    // -- accessors for the UI --

    pub fn state(&self) -> CompareOrchestratorState<'_, i64> {
        self.orchestrator.state()
    }

    pub fn status(&self) -> PlaybackStatus {
        self.orchestrator.status()
    }

    pub fn speed(&self) -> u8 {
        self.speed
    }

    pub fn array_size(&self) -> usize {
        self.array_size
    }

    pub fn steps_per_tick(&self) -> usize {
        self.orchestrator.cadence().steps_per_tick
    }

    pub fn interval_ms(&self) -> u64 {
        self.orchestrator.cadence().interval_ms
    }

    pub fn availability(&self) -> ControlAvailability {
        control_availability(self.orchestrator.status())
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
