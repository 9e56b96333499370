//! Dino Dash - A side-scrolling obstacle-dodge runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, phases)
//! - `game`: Loop driver that feeds ticks into the simulation
//! - `renderer`: Presentation snapshot and presenters
//! - `platform`: Input latching and host abstractions
//! - `persistence`: Best-score storage
//! - `settings`: Host preferences

pub mod game;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use game::{FrameReport, Game};
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
///
/// World units are pixels of the logical playfield; velocities are per tick.
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz display refresh)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest wall-clock delta the driver will accept in one update
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 400.0;
    pub const FLOOR_THICKNESS: f32 = 20.0;
    /// Top edge of the floor band; everything rests on this line
    pub const FLOOR_Y: f32 = FIELD_HEIGHT - FLOOR_THICKNESS;

    /// Downward acceleration added to vertical velocity each airborne tick
    pub const GRAVITY: f32 = 0.6;
    /// Scroll speed ramp
    pub const INITIAL_SPEED: f32 = 6.0;
    pub const MAX_SPEED: f32 = 20.0;
    pub const SPEED_INCREMENT: f32 = 0.001;

    /// Runner defaults
    pub const RUNNER_WIDTH: f32 = 40.0;
    pub const RUNNER_HEIGHT: f32 = 40.0;
    pub const RUNNER_START_X: f32 = 50.0;
    pub const JUMP_IMPULSE: f32 = 12.0;

    /// Frames between obstacles before speed scaling
    pub const SPAWN_RATE_MIN: f32 = 60.0;
    pub const SPAWN_RATE_MAX: f32 = 120.0;

    /// Score (not tenths) that must be exceeded before airborne hazards appear
    pub const AIRBORNE_SCORE_THRESHOLD: u64 = 500;
    /// Airborne hazards float at FLOOR_Y - AIRBORNE_LIFT - random(0, AIRBORNE_JITTER)
    pub const AIRBORNE_LIFT: f32 = 80.0;
    pub const AIRBORNE_JITTER: f32 = 50.0;

    /// Obstacle geometry (width, height)
    pub const SMALL_HAZARD_SIZE: (f32, f32) = (30.0, 50.0);
    pub const LARGE_HAZARD_SIZE: (f32, f32) = (40.0, 70.0);
    pub const AIRBORNE_HAZARD_SIZE: (f32, f32) = (40.0, 30.0);

    /// Distance accrued per tick, in tenths of a score point (0.1 per tick)
    pub const SCORE_TENTHS_PER_TICK: u64 = 1;

    /// Inward shrink applied to all four sides of both boxes before the
    /// overlap test. Tunable fairness margin for edge grazes.
    pub const COLLISION_PADDING: f32 = 5.0;

    /// Particles
    pub const PARTICLE_DECAY: f32 = 0.05;
    pub const JUMP_PARTICLES: usize = 3;
    pub const CRASH_PARTICLES: usize = 20;
    pub const MAX_PARTICLES: usize = 256;
    /// Emitted particles get a uniform velocity in [-SPREAD, SPREAD) per axis
    pub const PARTICLE_SPREAD: f32 = 2.0;

    /// Decorative clouds
    pub const CLOUD_COUNT: usize = 5;
    /// Clouds live in the upper half of the field
    pub const CLOUD_BAND: (f32, f32) = (0.0, FIELD_HEIGHT / 2.0);
    pub const CLOUD_WIDTH: (f32, f32) = (60.0, 100.0);
    pub const CLOUD_SPEED: (f32, f32) = (0.5, 1.0);
}

/// RGBA colour in linear 0-1 components
pub type Color = [f32; 4];

/// Fixed palette shared by every presenter
pub mod palette {
    use super::Color;

    pub const BACKGROUND: Color = rgb(0x0f, 0x17, 0x2a);
    pub const GROUND: Color = rgb(0x33, 0x41, 0x55);
    pub const RUNNER: Color = rgb(0x22, 0xd3, 0xee);
    pub const OBSTACLE: Color = rgb(0xf4, 0x72, 0xb6);
    pub const TEXT: Color = rgb(0xf8, 0xfa, 0xfc);
    pub const ACCENT: Color = rgb(0xa8, 0x55, 0xf7);

    const fn rgb(r: u8, g: u8, b: u8) -> Color {
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
    }
}
