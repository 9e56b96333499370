//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed tick per call
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod machine;
pub mod rect;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{padded_overlap, runner_hits};
pub use machine::{TickInput, TickOutcome, advance, begin_or_restart, jump, tick};
pub use rect::Rect;
pub use spawner::{Spawner, choose_obstacle, maybe_spawn};
pub use state::{
    Cloud, GameEvent, GamePhase, Obstacle, ObstacleKind, Particle, ParticleTint, Runner, Session,
};
pub use tick::{StepResult, step};
