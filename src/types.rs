//! Shared types and tunable configuration.
//!
//! Everything here is pure data with no external dependencies.

/// Default gravity tick interval (milliseconds between downward steps).
pub const TICK_MS: u64 = 100;

/// Default fixed-interval spawn period (milliseconds).
pub const SPAWN_INTERVAL_MS: u64 = 200;

/// Default journey-progress fraction at which a piece triggers its successor
/// (used by [`SpawnPolicy::Progress`]).
pub const PROGRESS_TRIGGER: f32 = 0.15;

/// Default minimum interval between steering moves of one piece (milliseconds).
pub const STEER_THROTTLE_MS: u64 = 150;

/// Default pointer proximity radius, in grid cells.
pub const STEER_RADIUS: f32 = 2.5;

/// Default stack-height fraction that forces a bottom-row discard.
pub const RELIEF_THRESHOLD: f32 = 0.35;

/// Default spawn row (above the visible area).
pub const SPAWN_ROW: i16 = -3;

/// Driver frame period (milliseconds between render passes).
pub const FRAME_MS: u64 = 16;

/// The seven block kinds in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    O,
    I,
    S,
    Z,
    L,
    J,
    T,
}

impl PieceKind {
    /// All kinds, in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::O,
        PieceKind::I,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::L,
        PieceKind::J,
        PieceKind::T,
    ];
}

/// One grid cell: empty, or settled with the kind of the block that froze there.
pub type Cell = Option<PieceKind>;

/// How new pieces are introduced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnPolicy {
    /// Spawn on a fixed timer.
    Interval { every_ms: u64 },
    /// Each piece spawns its successor once its descent progress crosses
    /// `trigger` (fraction of the full journey from spawn row to the floor).
    Progress { trigger: f32 },
}

/// Tunable knobs for the backdrop.
///
/// Every value has a sensible default; embedders override per field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Terminal columns per grid cell.
    pub cell_w: u16,
    /// Terminal rows per grid cell.
    pub cell_h: u16,
    /// Characters left blank at a block's trailing edge (visual gap).
    pub gap: u16,
    /// Milliseconds between gravity ticks.
    pub gravity_tick_ms: u64,
    /// Spawn policy.
    pub spawn_policy: SpawnPolicy,
    /// Minimum milliseconds between steering moves of one piece.
    pub steer_throttle_ms: u64,
    /// Pointer proximity radius in grid cells.
    pub steer_radius: f32,
    /// Stack-height fraction that triggers a bottom-row discard.
    pub relief_threshold: f32,
    /// Row new pieces are anchored at (negative = above the visible area).
    pub spawn_row: i16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // 2x1 compensates for typical terminal glyph aspect ratio.
            cell_w: 2,
            cell_h: 1,
            gap: 1,
            gravity_tick_ms: TICK_MS,
            spawn_policy: SpawnPolicy::Interval {
                every_ms: SPAWN_INTERVAL_MS,
            },
            steer_throttle_ms: STEER_THROTTLE_MS,
            steer_radius: STEER_RADIUS,
            relief_threshold: RELIEF_THRESHOLD,
            spawn_row: SPAWN_ROW,
        }
    }
}
