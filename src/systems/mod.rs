//! Application systems
//!
//! Window, rendering and frame pacing, kept out of main.rs so they can be
//! tested on their own.

mod frame;
mod render;
mod window;

pub use frame::FramePacer;
pub use render::{RenderError, RenderSystem};
pub use window::{WindowError, WindowSystem};
