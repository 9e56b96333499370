//! Procedural obstacle spawning
//!
//! A countdown measured in ticks decides *when*; a single uniform roll
//! decides *what*. The countdown is reset to a random base gap scaled by
//! `INITIAL_SPEED / speed`, so the gap in frames shrinks as the field speeds
//! up while the gap in world units grows more slowly than raw speed.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Obstacle, ObstacleKind, Session};
use crate::consts::*;

/// Spawn countdown
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Spawner {
    /// Ticks until the next spawn decision. Starts at 0 so the first tick spawns.
    timer: f32,
}

impl Spawner {
    pub fn new() -> Self {
        Self { timer: 0.0 }
    }

    pub fn timer(&self) -> f32 {
        self.timer
    }

    /// Count down one tick and, when the timer runs out, produce exactly one
    /// obstacle and rearm the timer.
    pub fn maybe_spawn<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        score_tenths: u64,
        speed: f32,
        id: u32,
    ) -> Option<Obstacle> {
        self.timer -= 1.0;
        if self.timer > 0.0 {
            return None;
        }

        let obstacle = choose_obstacle(rng, score_tenths, id);
        let base_rate = rng.random_range(SPAWN_RATE_MIN..=SPAWN_RATE_MAX);
        self.timer = base_rate * (INITIAL_SPEED / speed);
        Some(obstacle)
    }
}

/// Pick a variant with sequential threshold checks on one roll.
///
/// A roll in the top 5% only yields an airborne hazard once the score is
/// past the unlock threshold; otherwise it falls through to the large
/// ground hazard like the rest of the top 20%.
pub fn choose_obstacle<R: Rng + ?Sized>(rng: &mut R, score_tenths: u64, id: u32) -> Obstacle {
    let roll: f32 = rng.random();
    if roll > 0.95 && score_tenths > AIRBORNE_SCORE_THRESHOLD * 10 {
        let jitter = rng.random_range(0.0..AIRBORNE_JITTER);
        Obstacle::airborne(id, jitter)
    } else if roll > 0.8 {
        Obstacle::ground(id, ObstacleKind::LargeGround)
    } else {
        Obstacle::ground(id, ObstacleKind::SmallGround)
    }
}

/// Run the session's spawner for this tick. The produced obstacle (if any)
/// has been assigned a fresh id but is not yet in the active set.
pub fn maybe_spawn(state: &mut Session) -> Option<Obstacle> {
    let id = state.next_id;
    let obstacle =
        state
            .spawner
            .maybe_spawn(&mut state.rng, state.score_tenths, state.speed, id)?;
    state.next_id += 1;
    log::debug!(
        "tick {}: spawned {:?} #{} (next in {:.1} ticks)",
        state.time_ticks,
        obstacle.kind,
        obstacle.id,
        state.spawner.timer()
    );
    Some(obstacle)
}
