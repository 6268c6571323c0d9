use std::sync::Arc;

use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event_loop::ActiveEventLoop;

use crate::coords::ClientRect;
use crate::device::{Backend, GpuInit, GraphicsError, WgpuBackend};

use super::WindowError;

/// Platform window owned by a [`Window`](super::Window).
///
/// Dropping the value destroys the native window.
pub trait NativeWindow {
    type Backend: Backend;

    /// Makes the window visible. Repeated calls have no further effect.
    fn show(&self);

    /// Builds GPU resources presenting into this window's client area.
    fn create_backend(
        &self,
        client: ClientRect,
        init: &GpuInit,
    ) -> Result<Self::Backend, GraphicsError>;
}

/// Something that can create native windows.
pub trait WindowHost {
    type Window: NativeWindow;

    /// Creates a hidden window whose client area is exactly `client`.
    fn open_window(&self, title: &str, client: ClientRect) -> Result<Self::Window, WindowError>;
}

impl NativeWindow for Arc<winit::window::Window> {
    type Backend = WgpuBackend;

    fn show(&self) {
        self.set_visible(true);
    }

    fn create_backend(
        &self,
        client: ClientRect,
        init: &GpuInit,
    ) -> Result<WgpuBackend, GraphicsError> {
        let (width, height) = client.size();
        pollster::block_on(WgpuBackend::new(Arc::clone(self), width, height, init))
    }
}

impl WindowHost for ActiveEventLoop {
    type Window = Arc<winit::window::Window>;

    fn open_window(&self, title: &str, client: ClientRect) -> Result<Self::Window, WindowError> {
        let (width, height) = client.size();

        // winit sizes the outer frame from the requested inner (client) size.
        let attrs = winit::window::Window::default_attributes()
            .with_title(title)
            .with_visible(false)
            .with_resizable(false)
            .with_inner_size(PhysicalSize::new(width, height))
            .with_position(PhysicalPosition::new(client.left, client.top));

        let window = self
            .create_window(attrs)
            .map_err(|e| WindowError::Creation(e.to_string()))?;

        Ok(Arc::new(window))
    }
}
