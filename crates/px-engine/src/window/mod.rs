//! Host window, lifecycle messages and the runtime loop.
//!
//! `Window` owns a native window and its registered class name. The runtime owns
//! the winit `EventLoop`, routes events to windows by id, and drives frames.

mod class;
mod headless;
mod host;
mod message;
mod runtime;
mod toplevel;

use thiserror::Error;

use crate::device::GraphicsError;

pub use class::{WindowClass, is_registered};
pub use headless::{HeadlessHost, HeadlessLoop, HeadlessWindow};
pub use host::{NativeWindow, WindowHost};
pub use message::{Dispatch, LoopControl, WindowMessage};
pub use runtime::{Runtime, RuntimeConfig};
pub use toplevel::Window;

/// Failure from window creation or graphics loading.
#[derive(Debug, Error)]
pub enum WindowError {
    #[error("window class \"{name}\" is already registered")]
    ClassRegistration { name: String },

    #[error("could not create native window: {0}")]
    Creation(String),

    #[error("window has no live native handle")]
    Inert,

    #[error(transparent)]
    Graphics(#[from] GraphicsError),
}
