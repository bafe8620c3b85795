//! Core module - pure simulation with no I/O dependencies.

pub mod collision;
pub mod grid;
pub mod piece;
pub mod pieces;
pub mod rng;
pub mod sim;

pub use collision::collides;
pub use grid::Grid;
pub use piece::FallingPiece;
pub use pieces::get_shape;
pub use rng::SimpleRng;
pub use sim::Simulation;
