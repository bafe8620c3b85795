//! tui-blockfall: an ambient falling-blocks backdrop for the terminal.
//!
//! Pieces descend forever, settle into a grid, clear completed rows, and
//! passively dodge the mouse pointer. There is no score and no game over:
//! the stack relieves itself before it can fill the screen.
//!
//! `core` is the pure simulation; `term` maps it onto a terminal surface.

pub mod core;
pub mod term;
pub mod types;
