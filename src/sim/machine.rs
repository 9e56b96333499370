//! Session state machine
//!
//! Start --begin--> Playing --collision--> GameOver --restart--> Playing
//!
//! Triggers that arrive in a phase where they mean nothing are dropped
//! silently. Only [`advance`] moves the simulation, and only while playing.

use super::state::{GameEvent, GamePhase, Session};
use super::tick::{StepResult, step};

/// Logical triggers for a single tick (already edge-triggered by the host)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump (space/up/tap while playing)
    pub jump: bool,
    /// Begin from the title screen or restart after a crash
    pub begin_or_restart: bool,
}

/// Everything a tick produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    /// Present if the simulation actually advanced
    pub step: Option<StepResult>,
    pub events: Vec<GameEvent>,
}

/// Full reset into a fresh playing session. No-op while already playing.
pub fn begin_or_restart(state: &mut Session) -> Option<GameEvent> {
    match state.phase {
        GamePhase::Start | GamePhase::GameOver => {
            state.reset();
            state.phase = GamePhase::Playing;
            log::info!("Session started (seed {}, best {})", state.seed, state.best_score);
            Some(GameEvent::Started)
        }
        GamePhase::Playing => None,
    }
}

/// Single-stage jump. Only while playing and grounded.
pub fn jump(state: &mut Session) -> Option<GameEvent> {
    if state.phase != GamePhase::Playing {
        return None;
    }
    if !state.runner.jump() {
        return None;
    }
    state.emit_jump_dust();
    Some(GameEvent::Jumped)
}

/// Run one simulation tick if playing; a collision ends the session on the
/// same tick.
pub fn advance(state: &mut Session) -> TickOutcome {
    let mut outcome = TickOutcome::default();
    if state.phase != GamePhase::Playing {
        return outcome;
    }

    let result = step(state);
    if result.collided {
        finish(state, &mut outcome.events);
    }
    outcome.step = Some(result);
    outcome
}

/// Apply this tick's triggers, then advance
pub fn tick(state: &mut Session, input: &TickInput) -> TickOutcome {
    let mut events = Vec::new();
    if input.begin_or_restart {
        events.extend(begin_or_restart(state));
    }
    if input.jump {
        events.extend(jump(state));
    }

    let mut outcome = advance(state);
    events.append(&mut outcome.events);
    outcome.events = events;
    outcome
}

fn finish(state: &mut Session, events: &mut Vec<GameEvent>) {
    state.phase = GamePhase::GameOver;
    let score = state.score();
    log::info!("Game over at tick {} with score {}", state.time_ticks, score);
    events.push(GameEvent::Crashed { score });

    if score > state.best_score {
        log::info!("New best score: {} (was {})", score, state.best_score);
        state.best_score = score;
        events.push(GameEvent::NewBest { score });
    }
}
