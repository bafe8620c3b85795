//! BackdropView: maps the simulation into a terminal framebuffer.
//!
//! Pure (no I/O), so the renderer contract can be unit-tested: every occupied
//! grid cell and every live piece unit becomes a block of
//! `cell_w x cell_h` characters minus the configured gap, clipped to the
//! visible surface.

use crate::core::grid::Grid;
use crate::core::sim::Simulation;
use crate::term::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Config, PieceKind};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Stateless draw pass over the simulation.
pub struct BackdropView {
    cell_w: u16,
    cell_h: u16,
    /// Trailing characters left blank per block on each axis, where the cell
    /// spans more than one character.
    gap: u16,
}

impl BackdropView {
    pub fn new(config: &Config) -> Self {
        Self {
            cell_w: config.cell_w.max(1),
            cell_h: config.cell_h.max(1),
            gap: config.gap,
        }
    }

    /// Render settled blocks and live pieces into a fresh framebuffer.
    pub fn render(&self, sim: &Simulation, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(sim, &mut fb);
        fb
    }

    /// Render into an existing framebuffer (reused across frames).
    pub fn render_into(&self, sim: &Simulation, fb: &mut FrameBuffer) {
        fb.clear(Default::default());

        self.draw_grid(sim.grid(), fb);

        for piece in sim.pieces() {
            let style = piece_style(piece.kind, false);
            for (col, row) in piece.cells() {
                // Clip units above the surface or outside the grid.
                if col >= 0 && col < sim.grid().width() && row >= 0 && row < sim.grid().height() {
                    self.draw_block(fb, col, row, style);
                }
            }
        }
    }

    fn draw_grid(&self, grid: &Grid, fb: &mut FrameBuffer) {
        for row in 0..grid.height() {
            for col in 0..grid.width() {
                if let Some(Some(kind)) = grid.get(col, row) {
                    self.draw_block(fb, col, row, piece_style(kind, true));
                }
            }
        }
    }

    fn draw_block(&self, fb: &mut FrameBuffer, col: i16, row: i16, style: CellStyle) {
        let x = (col as u16).saturating_mul(self.cell_w);
        let y = (row as u16).saturating_mul(self.cell_h);
        let w = self.cell_w.saturating_sub(self.gap).max(1);
        let h = self.cell_h.saturating_sub(self.gap).max(1);
        fb.fill_rect(x, y, w, h, '█', style);
    }
}

/// Per-kind palette; settled blocks render dim so live pieces read on top.
fn piece_style(kind: PieceKind, settled: bool) -> CellStyle {
    let fg = match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    };
    CellStyle {
        fg,
        bg: Rgb::new(0, 0, 0),
        dim: settled,
    }
}
