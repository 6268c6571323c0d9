//! px engine crate.
//!
//! A CPU-side pixel buffer shown in a window every frame. Pixels are written into
//! a `FrameBuffer`, uploaded to a GPU texture, and drawn as a full-screen quad.

pub mod core;
pub mod coords;
pub mod device;
pub mod graphics;
pub mod logging;
pub mod paint;
pub mod surface;
pub mod time;
pub mod window;

pub use graphics::Graphics;
pub use paint::Color;
