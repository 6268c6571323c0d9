use winit::event::WindowEvent;
use winit::window::WindowId;

use crate::device::{Backend, WgpuBackend};
use crate::graphics::Graphics;
use crate::time::FrameTime;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application driven by the runtime.
///
/// `B` is the backend behind the window's `Graphics`; applications run by
/// [`Runtime`](crate::window::Runtime) use the default.
pub trait App<B: Backend = WgpuBackend> {
    /// Called for every window event before the runtime handles it.
    fn on_window_event(&mut self, window_id: WindowId, event: &WindowEvent) -> AppControl {
        let _ = (window_id, event);
        AppControl::Continue
    }

    /// Called once per frame. Plot pixels here; the runtime renders afterwards.
    fn on_frame(&mut self, graphics: &mut Graphics<B>, time: FrameTime) -> AppControl;
}
