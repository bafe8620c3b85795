//! Terminal rendering layer.
//!
//! Renders into a simple framebuffer that is flushed to the terminal with
//! diff redraws. The view is pure; only the renderer touches I/O.

pub mod fb;
pub mod renderer;
pub mod view;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::TerminalRenderer;
pub use view::{BackdropView, Viewport};
