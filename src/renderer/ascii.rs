//! Character-grid presenter for terminals and headless runs

use std::io::Write;

use super::{PresentError, Presenter, Snapshot};
use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH, FLOOR_Y};
use crate::sim::{GamePhase, ObstacleKind, Rect};

/// Rasterises the playfield into `cols x rows` characters plus a status line
pub struct AsciiPresenter<W: Write> {
    out: W,
    cols: usize,
    rows: usize,
}

impl<W: Write> AsciiPresenter<W> {
    pub fn new(out: W) -> Self {
        Self::with_size(out, 80, 20)
    }

    pub fn with_size(out: W, cols: usize, rows: usize) -> Self {
        Self {
            out,
            cols: cols.max(1),
            rows: rows.max(1),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Draw a frame into a string (status line first, then the grid)
    pub fn rasterize(&self, frame: &Snapshot) -> String {
        let mut grid = vec![vec![' '; self.cols]; self.rows];
        let cell_w = FIELD_WIDTH / self.cols as f32;
        let cell_h = FIELD_HEIGHT / self.rows as f32;

        let mut fill = |rect: &Rect, ch: char| {
            let c0 = (rect.left() / cell_w).floor().max(0.0) as usize;
            let c1 = ((rect.right() / cell_w).ceil().max(0.0) as usize).min(self.cols);
            let r0 = (rect.top() / cell_h).floor().max(0.0) as usize;
            let r1 = ((rect.bottom() / cell_h).ceil().max(0.0) as usize).min(self.rows);
            for row in grid.iter_mut().take(r1).skip(r0) {
                for cell in row.iter_mut().take(c1).skip(c0) {
                    *cell = ch;
                }
            }
        };

        fill(
            &Rect::new(0.0, FLOOR_Y, FIELD_WIDTH, FIELD_HEIGHT - FLOOR_Y),
            '=',
        );
        for cloud in &frame.clouds {
            fill(&Rect::new(cloud.pos.x, cloud.pos.y, cloud.width, cell_h), '~');
        }
        for obstacle in &frame.obstacles {
            let ch = match obstacle.kind {
                ObstacleKind::SmallGround => '|',
                ObstacleKind::LargeGround => '#',
                ObstacleKind::Airborne => 'v',
            };
            fill(&obstacle.rect, ch);
        }
        let runner = if frame.phase == GamePhase::GameOver {
            'X'
        } else {
            '@'
        };
        fill(&frame.runner.rect, runner);

        for particle in frame.particles.iter().filter(|p| p.opacity > 0.0) {
            let col = (particle.pos.x / cell_w).floor();
            let row = (particle.pos.y / cell_h).floor();
            if col >= 0.0 && row >= 0.0 && (col as usize) < self.cols && (row as usize) < self.rows {
                let cell = &mut grid[row as usize][col as usize];
                if *cell == ' ' {
                    *cell = if particle.opacity > 0.5 { '*' } else { '.' };
                }
            }
        }

        let status = match frame.phase {
            GamePhase::Start => "PRESS SPACE",
            GamePhase::Playing => "RUNNING",
            GamePhase::GameOver => "GAME OVER",
        };
        let mut text = format!(
            "SCORE {:05}  BEST {:05}  {}\n",
            frame.score, frame.best_score, status
        );
        for row in grid {
            text.extend(row);
            text.push('\n');
        }
        text
    }
}

impl<W: Write> Presenter for AsciiPresenter<W> {
    fn present(&mut self, frame: &Snapshot) -> Result<(), PresentError> {
        let text = self.rasterize(frame);
        self.out.write_all(text.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}
