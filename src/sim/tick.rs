//! Fixed timestep simulation tick
//!
//! One call to [`step`] advances a playing session by exactly one frame.
//! Stage order is fixed: counters, speed ramp, runner, clouds, spawner,
//! obstacles (move, collide, cull), particles.

use super::collision::runner_hits;
use super::spawner::maybe_spawn;
use super::state::{Particle, Session};
use crate::consts::*;

/// What one tick produced
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepResult {
    /// Score accrued this tick
    pub score_delta: f32,
    /// The runner overlapped an obstacle
    pub collided: bool,
}

/// Advance the session by one tick. Does not look at the phase; gating is
/// the state machine's job.
pub fn step(state: &mut Session) -> StepResult {
    state.time_ticks += 1;
    state.score_tenths += SCORE_TENTHS_PER_TICK;

    // Ramp until capped; never decreases
    state.speed = (state.speed + SPEED_INCREMENT).min(MAX_SPEED);

    state.runner.integrate();

    for cloud in &mut state.clouds {
        cloud.advance(&mut state.fx_rng);
    }

    // Spawn before the obstacle pass so the new obstacle moves and is
    // tested on the same tick it appears
    if let Some(obstacle) = maybe_spawn(state) {
        state.obstacles.push(obstacle);
    }

    let speed = state.speed;
    let runner = &state.runner;
    let mut hit = None;
    state.obstacles.retain_mut(|obstacle| {
        obstacle.advance(speed);
        if hit.is_none() && runner_hits(runner, obstacle) {
            hit = Some(obstacle.id);
        }
        !obstacle.is_past_left_boundary()
    });

    if let Some(id) = hit {
        log::debug!("tick {}: runner hit obstacle #{}", state.time_ticks, id);
        state.emit_crash_burst();
    }

    for particle in state.particles.iter_mut() {
        particle.advance();
    }
    state.particles.retain(Particle::is_alive);

    StepResult {
        score_delta: SCORE_TENTHS_PER_TICK as f32 / 10.0,
        collided: hit.is_some(),
    }
}
