//! Loop driver
//!
//! Owns the session and feeds it ticks, one at a time, in order. Host input
//! is latched and applied at the start of the next tick so nothing touches
//! the session mid-tick. The driver also owns the best-score store and talks
//! to presenters.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::persistence::ScoreStore;
use crate::renderer::{Presenter, Snapshot};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, Session, StepResult, TickInput, tick};

/// What one driver frame did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// The simulation advanced by one tick
    pub ticked: bool,
    pub step: Option<StepResult>,
    pub events: Vec<GameEvent>,
}

/// Game instance holding all state
pub struct Game<S: ScoreStore> {
    session: Session,
    store: S,
    /// One-shot triggers waiting for the next tick
    input: TickInput,
    running: bool,
    accumulator: f32,
}

impl<S: ScoreStore> Game<S> {
    /// Create an idle game. The best score is read once, here.
    pub fn new(seed: u64, mut store: S) -> Self {
        let best = match store.load_best_score() {
            Ok(best) => best,
            Err(e) => {
                log::warn!("Could not load best score, starting from 0: {}", e);
                0
            }
        };
        Self {
            session: Session::new(seed, best),
            store,
            input: TickInput::default(),
            running: true,
            accumulator: 0.0,
        }
    }

    pub fn with_settings(mut self, settings: &Settings) -> Self {
        self.apply_settings(settings);
        self
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.session.set_particle_cap(settings.max_particles());
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase
    }

    /// Request a jump on the next tick
    pub fn jump(&mut self) {
        self.input.jump = true;
    }

    /// Request a begin/restart on the next tick
    pub fn begin_or_restart(&mut self) {
        self.input.begin_or_restart = true;
    }

    /// Merge triggers gathered by an input latch
    pub fn queue(&mut self, input: TickInput) {
        self.input.jump |= input.jump;
        self.input.begin_or_restart |= input.begin_or_restart;
    }

    /// Stop ticking immediately. Pending triggers and banked time are dropped.
    pub fn pause(&mut self) {
        if self.running {
            log::info!("Paused at tick {}", self.session.time_ticks);
        }
        self.running = false;
        self.accumulator = 0.0;
        self.input = TickInput::default();
    }

    pub fn resume(&mut self) {
        if !self.running {
            log::info!("Resumed");
        }
        self.running = true;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Process exactly one tick: apply latched triggers, then advance if
    /// playing. Call once per display refresh.
    pub fn frame(&mut self) -> FrameReport {
        if !self.running {
            return FrameReport::default();
        }

        let input = std::mem::take(&mut self.input);
        let outcome = tick(&mut self.session, &input);
        self.handle_events(&outcome.events);

        FrameReport {
            ticked: outcome.step.is_some(),
            step: outcome.step,
            events: outcome.events,
        }
    }

    /// Wall-clock driver: bank `dt` seconds and run as many fixed ticks as
    /// fit (bounded). Returns how many ticks advanced the simulation.
    pub fn update(&mut self, dt: f32) -> u32 {
        if !self.running {
            return 0;
        }
        // `max` maps NaN to 0, so a bad timestamp cannot poison the accumulator
        self.accumulator += dt.max(0.0).min(MAX_FRAME_DT);

        let mut substeps = 0;
        let mut advanced = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
            if self.frame().ticked {
                advanced += 1;
            }

            // Nothing banked may run against a frozen or idle session
            if self.session.phase != GamePhase::Playing {
                self.accumulator = 0.0;
                break;
            }
        }
        advanced
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.session)
    }

    /// Draw the current state. A failed draw is logged and skipped; the
    /// simulation is untouched either way.
    pub fn present<P: Presenter + ?Sized>(&self, presenter: &mut P) -> bool {
        match presenter.present(&self.snapshot()) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Skipped frame at tick {}: {}", self.session.time_ticks, e);
                false
            }
        }
    }

    fn handle_events(&mut self, events: &[GameEvent]) {
        for event in events {
            if let GameEvent::NewBest { score } = *event {
                if let Err(e) = self.store.save_best_score(score) {
                    log::warn!("Could not save best score {}: {}", score, e);
                }
            }
        }
    }
}
