//! Simulation module - the falling-blocks backdrop state machine.
//!
//! Owns the grid, the active piece set, the RNG, the timers, and the pointer
//! cell. Everything mutates synchronously inside [`Simulation::frame`], which
//! the driver calls once per rendered frame.
//!
//! The simulation is deliberately unfailable: a blocked spawn point forces a
//! bottom-row discard instead of an error, units frozen above the visible top
//! edge are dropped silently, and the stack is relieved before it can fill
//! the surface. There is no terminal state.

use arrayvec::ArrayVec;

use crate::core::collision::collides;
use crate::core::grid::Grid;
use crate::core::piece::FallingPiece;
use crate::core::rng::SimpleRng;
use crate::types::{Config, PieceKind, SpawnPolicy};

/// Complete backdrop state.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: Config,
    grid: Grid,
    pieces: Vec<FallingPiece>,
    rng: SimpleRng,
    /// Last known pointer position in grid cells, if any.
    pointer: Option<(i16, i16)>,
    /// Deadline for the next gravity tick (ms).
    next_gravity_ms: u64,
    /// Deadline for the next timed spawn (ms, interval policy only).
    next_spawn_ms: u64,
}

impl Simulation {
    /// Create a simulation with a zero-area grid; call [`resize`](Self::resize)
    /// before the first frame.
    pub fn new(config: Config, seed: u32) -> Self {
        Self {
            config,
            grid: Grid::new(0, 0),
            pieces: Vec::new(),
            rng: SimpleRng::new(seed),
            pointer: None,
            next_gravity_ms: 0,
            next_spawn_ms: 0,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable grid access, for tests and embedders that pre-seed the stack.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn pieces(&self) -> &[FallingPiece] {
        &self.pieces
    }

    /// Rebuild the grid for a new viewport, keeping the pieces in flight.
    ///
    /// Pieces stranded outside the new bounds self-heal: the next gravity
    /// probe reports a collision, and freezing drops out-of-bounds units.
    pub fn resize(&mut self, cols: i16, rows: i16) {
        self.grid.reset(cols, rows);
    }

    /// Record the pointer position in grid cells.
    pub fn pointer_moved(&mut self, col: i16, row: i16) {
        self.pointer = Some((col, row));
    }

    /// Drive one frame at `now_ms` (milliseconds from an arbitrary epoch).
    ///
    /// Gravity and timed spawns are deadline-gated; at most one gravity step
    /// runs per frame, and deadlines re-arm from `now_ms`, so a long
    /// suspension causes a visual skip rather than a catch-up burst.
    pub fn frame(&mut self, now_ms: u64) {
        if !self.grid.has_area() {
            return;
        }

        if now_ms >= self.next_gravity_ms {
            self.gravity_step();
            self.next_gravity_ms = now_ms + self.config.gravity_tick_ms;
        }

        if let SpawnPolicy::Interval { every_ms } = self.config.spawn_policy {
            if now_ms >= self.next_spawn_ms {
                self.spawn_piece();
                self.next_spawn_ms = now_ms + every_ms;
            }
        }

        // Self-sustaining under every policy: never end a frame empty.
        if self.pieces.is_empty() {
            self.spawn_piece();
        }

        self.steer(now_ms);
    }

    /// Spawn a random piece at a random column.
    pub fn spawn_piece(&mut self) {
        if !self.grid.has_area() {
            return;
        }
        let kind = self.rng.next_kind();
        let col = self.rng.next_range(self.grid.width() as u32) as i16;
        self.spawn_kind_at(kind, col);
    }

    /// Spawn a specific piece at a specific column.
    ///
    /// A blocked spawn point triggers one bottom-row discard and the piece is
    /// admitted anyway; spawning never fails.
    pub fn spawn_kind_at(&mut self, kind: PieceKind, col: i16) {
        let piece = FallingPiece::new(kind, col, self.config.spawn_row);
        if collides(&self.grid, &piece, 0, 0) {
            self.grid.shift_down_discard_bottom();
        }
        self.pieces.push(piece);
    }

    /// Advance every piece one row, freezing the ones that landed.
    ///
    /// Reverse iteration so landed pieces can be removed in place.
    fn gravity_step(&mut self) {
        let mut deferred_spawns = 0usize;
        let height = self.grid.height();
        let spawn_row = self.config.spawn_row;

        for i in (0..self.pieces.len()).rev() {
            if collides(&self.grid, &self.pieces[i], 0, 1) {
                let piece = self.pieces.remove(i);
                self.freeze(&piece);
            } else {
                let piece = &mut self.pieces[i];
                piece.y += 1;

                if let SpawnPolicy::Progress { trigger } = self.config.spawn_policy {
                    let journey = (piece.y - spawn_row) as f32 / (height - spawn_row) as f32;
                    if journey >= trigger && !piece.triggered_next {
                        piece.triggered_next = true;
                        deferred_spawns += 1;
                    }
                }
            }
        }

        for _ in 0..deferred_spawns {
            self.spawn_piece();
        }
    }

    /// Write a landed piece into the grid, then clear any rows it completed
    /// and relieve the stack if it grew too tall.
    ///
    /// Units above the visible top edge are dropped silently.
    fn freeze(&mut self, piece: &FallingPiece) {
        let mut affected: ArrayVec<i16, 4> = ArrayVec::new();
        for (col, row) in piece.cells() {
            if self.grid.set(col, row, Some(piece.kind)) && !affected.contains(&row) {
                affected.push(row);
            }
        }
        affected.sort_unstable();

        self.clear_complete_rows(&affected);
        self.relieve_stack();
    }

    /// Remove every affected row that is fully occupied.
    ///
    /// Completeness is decided for all rows before any removal. Removing a
    /// row only shifts the rows above it, so clearing ascending indices
    /// leaves the later (lower) indices valid.
    fn clear_complete_rows(&mut self, affected: &[i16]) {
        let complete: ArrayVec<i16, 4> = affected
            .iter()
            .copied()
            .filter(|&row| self.grid.is_row_complete(row))
            .collect();

        for row in complete {
            self.grid.remove_row(row);
        }
    }

    /// Discard the bottom row once when the stack covers too much of the
    /// surface, keeping the effect ambient rather than terminal.
    fn relieve_stack(&mut self) {
        let height = self.grid.height();
        if height <= 0 {
            return;
        }
        let Some(top) = self.grid.highest_occupied_row() else {
            return;
        };
        let fill = (height - top) as f32 / height as f32;
        if fill >= self.config.relief_threshold {
            self.grid.shift_down_discard_bottom();
        }
    }

    /// Nudge pieces away from the pointer.
    ///
    /// Runs every frame. A piece moves at most once per throttle interval,
    /// and a rejected move does not refresh its timestamp, so it retries
    /// every frame until the way is clear.
    fn steer(&mut self, now_ms: u64) {
        let Some((pointer_col, pointer_row)) = self.pointer else {
            return;
        };
        let radius = self.config.steer_radius;
        let throttle = self.config.steer_throttle_ms;

        for i in 0..self.pieces.len() {
            let piece = &self.pieces[i];
            if now_ms.saturating_sub(piece.last_steer_ms) < throttle {
                continue;
            }
            if !piece.is_near(pointer_col, pointer_row, radius) {
                continue;
            }

            let center = piece.center_col();
            let pointer = pointer_col as f32;
            let dir: i16 = if pointer > center {
                -1
            } else if pointer < center {
                1
            } else {
                0
            };

            if dir != 0 && !collides(&self.grid, &self.pieces[i], dir, 0) {
                let piece = &mut self.pieces[i];
                piece.x += dir;
                piece.last_steer_ms = now_ms;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            spawn_row: 0,
            ..Config::default()
        }
    }

    fn sim_10x20() -> Simulation {
        let mut sim = Simulation::new(test_config(), 1);
        sim.resize(10, 20);
        sim
    }

    #[test]
    fn frame_on_zero_area_grid_is_noop() {
        let mut sim = Simulation::new(Config::default(), 1);
        sim.frame(0);
        sim.frame(1000);
        assert!(sim.pieces().is_empty());
        assert_eq!(sim.grid().occupied_count(), 0);
    }

    #[test]
    fn spawn_on_zero_area_grid_is_noop() {
        let mut sim = Simulation::new(Config::default(), 1);
        sim.spawn_piece();
        assert!(sim.pieces().is_empty());
    }

    #[test]
    fn first_frame_spawns_something() {
        let mut sim = sim_10x20();
        sim.frame(0);
        assert!(!sim.pieces().is_empty());
    }

    #[test]
    fn empty_set_respawns_even_between_spawn_deadlines() {
        let mut sim = sim_10x20();
        sim.frame(0);
        sim.pieces.clear();
        // Well before the next 200 ms spawn deadline.
        sim.frame(50);
        assert!(!sim.pieces().is_empty());
    }

    #[test]
    fn gravity_is_deadline_gated() {
        let mut sim = sim_10x20();
        sim.spawn_kind_at(PieceKind::O, 4);
        let y0 = sim.pieces()[0].y;

        sim.frame(0); // gravity fires (deadline 0)
        assert_eq!(sim.pieces()[0].y, y0 + 1);

        sim.frame(50); // before the next 100 ms deadline
        assert_eq!(sim.pieces()[0].y, y0 + 1);

        sim.frame(100);
        assert_eq!(sim.pieces()[0].y, y0 + 2);
    }

    #[test]
    fn long_suspension_runs_a_single_gravity_step() {
        let mut sim = sim_10x20();
        sim.spawn_kind_at(PieceKind::O, 4);
        let y0 = sim.pieces()[0].y;

        sim.frame(0);
        // Tab was backgrounded for a minute: one step, not six hundred.
        sim.frame(60_000);
        assert_eq!(sim.pieces()[0].y, y0 + 2);
    }

    #[test]
    fn blocked_spawn_relieves_the_stack_and_still_admits_the_piece() {
        let mut config = test_config();
        config.spawn_row = 1;
        let mut sim = Simulation::new(config, 1);
        sim.resize(10, 20);
        for row in 0..20 {
            for col in 0..10 {
                sim.grid_mut().set(col, row, Some(PieceKind::I));
            }
        }

        sim.spawn_kind_at(PieceKind::O, 5);

        // One bottom-row discard, and the piece is in flight regardless.
        assert_eq!(sim.grid().occupied_count(), 200 - 10);
        assert_eq!(sim.pieces().len(), 1);
    }

    #[test]
    fn progress_policy_triggers_successor_once() {
        let config = Config {
            spawn_row: 0,
            spawn_policy: SpawnPolicy::Progress { trigger: 0.15 },
            ..Config::default()
        };
        let mut sim = Simulation::new(config, 1);
        sim.resize(10, 20);
        sim.spawn_kind_at(PieceKind::O, 4);

        // 0.15 of a 20-row journey is reached at y = 3.
        let mut now = 0;
        while sim.pieces().len() == 1 && now < 1_000 {
            sim.frame(now);
            now += 100;
        }
        assert_eq!(sim.pieces().len(), 2);
        assert!(sim.pieces()[0].triggered_next);
        assert!(sim.pieces()[0].y <= 4);
    }
}
