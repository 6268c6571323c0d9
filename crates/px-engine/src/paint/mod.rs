//! Pixel color model.
//!
//! A single packed 32-bit ARGB type shared by the CPU framebuffer and the
//! GPU upload path. No color management: channels are stored as given.

pub mod color;

pub use color::Color;
