//! Presentation boundary
//!
//! The simulation hands presenters a read-only [`Snapshot`] once per tick.
//! Nothing flows back: a presenter that fails just misses a frame.

pub mod ascii;

pub use ascii::AsciiPresenter;

use glam::Vec2;
use serde::Serialize;
use thiserror::Error;

use crate::sim::{GamePhase, ObstacleKind, Rect, Session};
use crate::{Color, palette};

/// Why a frame could not be drawn
#[derive(Error, Debug)]
pub enum PresentError {
    #[error("drawing surface not ready")]
    SurfaceUnavailable,

    #[error("failed to write frame: {0}")]
    Io(#[from] std::io::Error),
}

/// Anything that can draw a snapshot
pub trait Presenter {
    fn present(&mut self, frame: &Snapshot) -> Result<(), PresentError>;
}

#[derive(Debug, Clone, Serialize)]
pub struct RunnerView {
    pub rect: Rect,
    pub color: Color,
    pub grounded: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ObstacleView {
    pub id: u32,
    pub kind: ObstacleKind,
    pub rect: Rect,
    pub color: Color,
}

#[derive(Debug, Clone, Serialize)]
pub struct CloudView {
    pub pos: Vec2,
    pub width: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub color: Color,
    /// Remaining life clamped to [0, 1]
    pub opacity: f32,
}

/// Scene colours that do not belong to any entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThemeView {
    pub background: Color,
    pub ground: Color,
    /// Floor line and highlights
    pub accent: Color,
    /// HUD text
    pub text: Color,
}

impl Default for ThemeView {
    fn default() -> Self {
        Self {
            background: palette::BACKGROUND,
            ground: palette::GROUND,
            accent: palette::ACCENT,
            text: palette::TEXT,
        }
    }
}

/// Everything a presenter needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    /// Tick counter, for cosmetic animation phase
    pub tick: u64,
    pub score: u64,
    pub best_score: u64,
    pub speed: f32,
    pub runner: RunnerView,
    pub obstacles: Vec<ObstacleView>,
    pub clouds: Vec<CloudView>,
    pub particles: Vec<ParticleView>,
    pub theme: ThemeView,
}

impl Snapshot {
    pub fn capture(state: &Session) -> Self {
        Self {
            phase: state.phase,
            tick: state.time_ticks,
            score: state.score(),
            best_score: state.best_score,
            speed: state.speed,
            runner: RunnerView {
                rect: state.runner.rect(),
                color: palette::RUNNER,
                grounded: state.runner.grounded,
            },
            obstacles: state
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    id: o.id,
                    kind: o.kind,
                    rect: o.rect,
                    color: palette::OBSTACLE,
                })
                .collect(),
            clouds: state
                .clouds
                .iter()
                .map(|c| CloudView {
                    pos: c.pos,
                    width: c.width,
                })
                .collect(),
            particles: state
                .particles
                .iter()
                .map(|p| ParticleView {
                    pos: p.pos,
                    color: p.tint.color(),
                    opacity: p.opacity(),
                })
                .collect(),
            theme: ThemeView::default(),
        }
    }
}
