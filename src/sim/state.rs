//! Session state and entity records
//!
//! Everything a single playthrough owns lives in [`Session`]. Entities are
//! plain data; the tick pipeline in `tick.rs` is the only thing that moves them.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::spawner::Spawner;
use crate::consts::*;
use crate::{Color, palette};

/// Current phase of the session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Idle, waiting for the first begin trigger
    #[default]
    Start,
    /// Simulation advancing
    Playing,
    /// Simulation frozen on the frame that collided
    GameOver,
}

/// The player-controlled entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Runner {
    /// Top-left corner; x never changes
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity, positive is downward
    pub vel_y: f32,
    pub jump_impulse: f32,
    pub grounded: bool,
}

impl Default for Runner {
    fn default() -> Self {
        Self {
            pos: Vec2::new(RUNNER_START_X, FLOOR_Y - RUNNER_HEIGHT),
            size: Vec2::new(RUNNER_WIDTH, RUNNER_HEIGHT),
            vel_y: 0.0,
            jump_impulse: JUMP_IMPULSE,
            grounded: true,
        }
    }
}

impl Runner {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// y of the top edge when resting on the floor
    #[inline]
    pub fn rest_y(&self) -> f32 {
        FLOOR_Y - self.size.y
    }

    /// Start a jump. Only legal from the ground; returns whether it happened.
    pub fn jump(&mut self) -> bool {
        if !self.grounded {
            return false;
        }
        self.vel_y = -self.jump_impulse;
        self.grounded = false;
        true
    }

    /// Semi-implicit Euler: velocity first, then position with the new velocity
    pub fn integrate(&mut self) {
        if !self.grounded {
            self.vel_y += GRAVITY;
            self.pos.y += self.vel_y;
        }
        self.resolve_floor();
    }

    /// Clamp onto the floor line if the bottom edge reached or passed it
    pub fn resolve_floor(&mut self) {
        if self.pos.y + self.size.y >= FLOOR_Y {
            self.pos.y = self.rest_y();
            self.vel_y = 0.0;
            self.grounded = true;
        }
    }
}

/// Obstacle variants. Only the initial geometry differs between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    SmallGround,
    LargeGround,
    Airborne,
}

impl ObstacleKind {
    pub fn size(self) -> Vec2 {
        let (w, h) = match self {
            ObstacleKind::SmallGround => SMALL_HAZARD_SIZE,
            ObstacleKind::LargeGround => LARGE_HAZARD_SIZE,
            ObstacleKind::Airborne => AIRBORNE_HAZARD_SIZE,
        };
        Vec2::new(w, h)
    }

    pub fn is_airborne(self) -> bool {
        self == ObstacleKind::Airborne
    }
}

/// A hazard scrolling in from the right
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub rect: Rect,
    /// Extra per-instance scroll speed. Reserved for variety, always 0.
    pub speed_offset: f32,
}

impl Obstacle {
    /// A ground hazard at the right edge, sitting on the floor
    pub fn ground(id: u32, kind: ObstacleKind) -> Self {
        let size = kind.size();
        Self {
            id,
            kind,
            rect: Rect {
                pos: Vec2::new(FIELD_WIDTH, FLOOR_Y - size.y),
                size,
            },
            speed_offset: 0.0,
        }
    }

    /// An airborne hazard at the right edge, `jitter` units above the base band
    pub fn airborne(id: u32, jitter: f32) -> Self {
        let kind = ObstacleKind::Airborne;
        Self {
            id,
            kind,
            rect: Rect {
                pos: Vec2::new(FIELD_WIDTH, FLOOR_Y - AIRBORNE_LIFT - jitter),
                size: kind.size(),
            },
            speed_offset: 0.0,
        }
    }

    pub fn advance(&mut self, speed: f32) {
        self.rect.pos.x -= speed + self.speed_offset;
    }

    /// Right edge has crossed the playfield's left boundary
    #[inline]
    pub fn is_past_left_boundary(&self) -> bool {
        self.rect.right() < 0.0
    }
}

/// Cosmetic background cloud
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cloud {
    pub pos: Vec2,
    pub width: f32,
    pub speed: f32,
}

impl Cloud {
    pub fn random<R: Rng + ?Sized>(rng: &mut R, x: f32) -> Self {
        Self {
            pos: Vec2::new(x, rng.random_range(CLOUD_BAND.0..CLOUD_BAND.1)),
            width: rng.random_range(CLOUD_WIDTH.0..CLOUD_WIDTH.1),
            speed: rng.random_range(CLOUD_SPEED.0..CLOUD_SPEED.1),
        }
    }

    /// Drift left; wrap to the right edge at a new height once fully off-screen
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.pos.x -= self.speed;
        if self.pos.x + self.width < 0.0 {
            self.pos.x = FIELD_WIDTH;
            self.pos.y = rng.random_range(CLOUD_BAND.0..CLOUD_BAND.1);
        }
    }
}

/// Particle colour tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleTint {
    /// Kicked up by a jump
    Dust,
    /// Crash debris
    Debris,
}

impl ParticleTint {
    pub fn color(self) -> Color {
        match self {
            ParticleTint::Dust => palette::TEXT,
            ParticleTint::Debris => palette::RUNNER,
        }
    }
}

/// A particle for visual feedback (never affects gameplay)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1 when emitted, decays linearly; dropped at 0 or below
    pub life: f32,
    pub tint: ParticleTint,
}

impl Particle {
    pub fn advance(&mut self) {
        self.pos += self.vel;
        self.life -= PARTICLE_DECAY;
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    pub fn opacity(&self) -> f32 {
        self.life.clamp(0.0, 1.0)
    }
}

/// Something the host may want to react to (sound, persistence, logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A fresh session entered Playing
    Started,
    Jumped,
    /// The session ended with this displayed score
    Crashed { score: u64 },
    /// The final score beat the previous best
    NewBest { score: u64 },
}

/// Stream offset for the cosmetic RNG so visuals never shift spawn rolls
const FX_STREAM: u64 = 0x5eed_f00d_cafe_d00d;

/// One playthrough, plus the cross-session best score
#[derive(Debug, Clone)]
pub struct Session {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Gameplay RNG (spawn timing and variant rolls)
    pub(crate) rng: Pcg32,
    /// Cosmetic RNG (clouds, particles)
    pub(crate) fx_rng: Pcg32,
    pub phase: GamePhase,
    pub runner: Runner,
    /// Active obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    pub clouds: Vec<Cloud>,
    pub particles: Vec<Particle>,
    /// Distance travelled in tenths of a score point
    pub score_tenths: u64,
    /// Current scroll speed (world units per tick)
    pub speed: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub spawner: Spawner,
    /// Best displayed score across sessions
    pub best_score: u64,
    /// Particle cap from host settings; 0 disables particles
    pub particle_cap: usize,
    pub(crate) next_id: u32,
}

impl Session {
    /// Create an idle session (phase Start) with the given seed
    pub fn new(seed: u64, best_score: u64) -> Self {
        Self::with_rngs(
            seed,
            Pcg32::seed_from_u64(seed),
            Pcg32::seed_from_u64(seed ^ FX_STREAM),
            best_score,
        )
    }

    /// Create a session around an explicit gameplay RNG
    pub fn with_rngs(seed: u64, rng: Pcg32, fx_rng: Pcg32, best_score: u64) -> Self {
        let mut state = Self {
            seed,
            rng,
            fx_rng,
            phase: GamePhase::Start,
            runner: Runner::default(),
            obstacles: Vec::new(),
            clouds: Vec::with_capacity(CLOUD_COUNT),
            particles: Vec::new(),
            score_tenths: 0,
            speed: INITIAL_SPEED,
            time_ticks: 0,
            spawner: Spawner::new(),
            best_score,
            particle_cap: MAX_PARTICLES,
            next_id: 1,
        };
        state.populate_clouds();
        state
    }

    /// Throw away every per-session value. Best score, RNG streams and
    /// host settings carry over; the phase is left to the caller.
    pub fn reset(&mut self) {
        self.runner = Runner::default();
        self.obstacles.clear();
        self.particles.clear();
        self.score_tenths = 0;
        self.speed = INITIAL_SPEED;
        self.time_ticks = 0;
        self.spawner = Spawner::new();
        self.next_id = 1;
        self.populate_clouds();
    }

    fn populate_clouds(&mut self) {
        self.clouds.clear();
        for _ in 0..CLOUD_COUNT {
            let x = self.fx_rng.random_range(0.0..FIELD_WIDTH);
            self.clouds.push(Cloud::random(&mut self.fx_rng, x));
        }
    }

    /// Displayed score (integer floor of the accrued distance)
    #[inline]
    pub fn score(&self) -> u64 {
        self.score_tenths / 10
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Dust kicked up from the runner's feet
    pub fn emit_jump_dust(&mut self) {
        let rect = self.runner.rect();
        let origin = Vec2::new(rect.center().x, rect.bottom());
        self.burst(origin, JUMP_PARTICLES, ParticleTint::Dust);
    }

    /// Debris burst centred on the runner
    pub fn emit_crash_burst(&mut self) {
        let origin = self.runner.rect().center();
        self.burst(origin, CRASH_PARTICLES, ParticleTint::Debris);
    }

    /// Apply a new particle cap, dropping the oldest particles first
    pub fn set_particle_cap(&mut self, cap: usize) {
        self.particle_cap = cap;
        let excess = self.particles.len().saturating_sub(cap);
        self.particles.drain(..excess);
    }

    fn burst(&mut self, origin: Vec2, count: usize, tint: ParticleTint) {
        for _ in 0..count {
            let vel = Vec2::new(
                self.fx_rng.random_range(-PARTICLE_SPREAD..PARTICLE_SPREAD),
                self.fx_rng.random_range(-PARTICLE_SPREAD..PARTICLE_SPREAD),
            );
            self.push_particle(origin, vel, tint);
        }
    }

    fn push_particle(&mut self, pos: Vec2, vel: Vec2, tint: ParticleTint) {
        if self.particle_cap == 0 {
            return;
        }
        if self.particles.len() >= self.particle_cap {
            // Remove oldest particles to make room
            self.particles.remove(0);
        }
        self.particles.push(Particle {
            pos,
            vel,
            life: 1.0,
            tint,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_idle_and_grounded() {
        let state = Session::new(7, 42);
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.best_score, 42);
        assert!(state.runner.grounded);
        assert_eq!(state.runner.rect().bottom(), FLOOR_Y);
        assert_eq!(state.clouds.len(), CLOUD_COUNT);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_runner_jump_only_from_ground() {
        let mut runner = Runner::default();
        assert!(runner.jump());
        assert!(!runner.grounded);
        assert_eq!(runner.vel_y, -JUMP_IMPULSE);

        // Second press mid-air is ignored
        runner.integrate();
        let vel = runner.vel_y;
        assert!(!runner.jump());
        assert_eq!(runner.vel_y, vel);
    }

    #[test]
    fn test_runner_floor_clamp() {
        let mut runner = Runner::default();
        runner.grounded = false;
        runner.pos.y = FLOOR_Y - RUNNER_HEIGHT - 1.0;
        runner.vel_y = 9.0;
        runner.integrate();
        assert!(runner.grounded);
        assert_eq!(runner.vel_y, 0.0);
        assert_eq!(runner.pos.y, runner.rest_y());
    }

    #[test]
    fn test_ground_obstacle_sits_on_floor() {
        for kind in [ObstacleKind::SmallGround, ObstacleKind::LargeGround] {
            let obstacle = Obstacle::ground(1, kind);
            assert_eq!(obstacle.rect.bottom(), FLOOR_Y);
            assert_eq!(obstacle.rect.left(), FIELD_WIDTH);
            assert_eq!(obstacle.speed_offset, 0.0);
        }
    }

    #[test]
    fn test_obstacle_geometry() {
        assert_eq!(ObstacleKind::SmallGround.size(), Vec2::new(30.0, 50.0));
        assert_eq!(ObstacleKind::LargeGround.size(), Vec2::new(40.0, 70.0));
        assert_eq!(ObstacleKind::Airborne.size(), Vec2::new(40.0, 30.0));

        let large = Obstacle::ground(1, ObstacleKind::LargeGround);
        assert_eq!(large.rect.top(), 310.0);
    }

    #[test]
    fn test_airborne_obstacle_band() {
        let low = Obstacle::airborne(1, 0.0);
        let high = Obstacle::airborne(2, AIRBORNE_JITTER);
        assert_eq!(low.rect.top(), FLOOR_Y - AIRBORNE_LIFT);
        assert_eq!(high.rect.top(), FLOOR_Y - AIRBORNE_LIFT - AIRBORNE_JITTER);
    }

    #[test]
    fn test_cloud_wraps() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut cloud = Cloud {
            pos: Vec2::new(-99.5, 50.0),
            width: 100.0,
            speed: 1.0,
        };
        cloud.advance(&mut rng);
        assert_eq!(cloud.pos.x, FIELD_WIDTH);
        assert!(cloud.pos.y >= CLOUD_BAND.0 && cloud.pos.y < CLOUD_BAND.1);
    }

    #[test]
    fn test_particle_decay() {
        let mut p = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, -1.0),
            life: 0.1,
            tint: ParticleTint::Dust,
        };
        p.advance();
        assert_eq!(p.pos, Vec2::new(1.0, -1.0));
        assert!(p.is_alive());
        p.advance();
        assert!(!p.is_alive());
        assert_eq!(p.opacity(), 0.0);
    }

    #[test]
    fn test_particle_cap_drops_oldest() {
        let mut state = Session::new(1, 0);
        state.particle_cap = 4;
        state.emit_jump_dust();
        state.emit_jump_dust();
        assert_eq!(state.particles.len(), 4);

        state.particle_cap = 0;
        state.particles.clear();
        state.emit_crash_burst();
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_lowering_cap_keeps_newest() {
        let mut state = Session::new(1, 0);
        state.emit_jump_dust();
        state.emit_crash_burst();
        let newest: Vec<Vec2> = state.particles[state.particles.len() - 5..]
            .iter()
            .map(|p| p.vel)
            .collect();

        state.set_particle_cap(5);
        assert_eq!(state.particle_cap, 5);
        assert!(state.particles.iter().all(|p| p.tint == ParticleTint::Debris));
        let kept: Vec<Vec2> = state.particles.iter().map(|p| p.vel).collect();
        assert_eq!(kept, newest);

        // Raising the cap never invents particles
        state.set_particle_cap(MAX_PARTICLES);
        assert_eq!(state.particles.len(), 5);
    }

    #[test]
    fn test_emitted_particles_spread_evenly() {
        let mut state = Session::new(11, 0);
        state.emit_jump_dust();
        state.emit_crash_burst();
        assert_eq!(state.particles.len(), JUMP_PARTICLES + CRASH_PARTICLES);
        for p in &state.particles {
            assert!(p.vel.x >= -PARTICLE_SPREAD && p.vel.x < PARTICLE_SPREAD);
            assert!(p.vel.y >= -PARTICLE_SPREAD && p.vel.y < PARTICLE_SPREAD);
        }
        assert_eq!(ParticleTint::Dust.color(), palette::TEXT);
        assert_eq!(ParticleTint::Debris.color(), palette::RUNNER);
    }

    #[test]
    fn test_clouds_in_upper_half() {
        let state = Session::new(21, 0);
        for cloud in &state.clouds {
            assert!(cloud.pos.x >= 0.0 && cloud.pos.x < FIELD_WIDTH);
            assert!(cloud.pos.y >= 0.0 && cloud.pos.y < FIELD_HEIGHT / 2.0);
            assert!(cloud.width >= 60.0 && cloud.width < 100.0);
            assert!(cloud.speed >= 0.5 && cloud.speed < 1.0);
        }
    }

    #[test]
    fn test_reset_keeps_best_score() {
        let mut state = Session::new(1, 10);
        state.score_tenths = 1234;
        state.speed = 9.0;
        state.time_ticks = 99;
        state.obstacles.push(Obstacle::ground(5, ObstacleKind::SmallGround));
        state.next_id = 6;
        state.reset();
        assert_eq!(state.score_tenths, 0);
        assert_eq!(state.speed, INITIAL_SPEED);
        assert_eq!(state.time_ticks, 0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.best_score, 10);
        assert_eq!(state.next_entity_id(), 1);
    }
}
