use std::sync::Arc;

use crate::coords::ClientRect;
use crate::device::GpuInit;
use crate::graphics::Graphics;

use super::class::WindowClass;
use super::{Dispatch, LoopControl, NativeWindow, WindowError, WindowHost, WindowMessage};

struct LiveWindow<H> {
    /// Native window; `None` once destroyed.
    handle: Option<H>,
    class: Option<WindowClass>,
    title: String,
    client: ClientRect,
}

/// Top-level window with a fixed client area.
///
/// Either inert (default, or after being taken from) or live. A live window owns
/// its native handle and a registered class name; both are released exactly once,
/// handle first.
pub struct Window<H: NativeWindow = Arc<winit::window::Window>> {
    live: Option<LiveWindow<H>>,
}

impl<H: NativeWindow> Default for Window<H> {
    fn default() -> Self {
        Self { live: None }
    }
}

impl<H: NativeWindow> Window<H> {
    /// Registers `class_name` and creates a hidden window sized to `client`.
    pub fn new<T>(
        host: &T,
        class_name: &str,
        title: &str,
        client: ClientRect,
    ) -> Result<Self, WindowError>
    where
        T: WindowHost<Window = H> + ?Sized,
    {
        let class = WindowClass::register(class_name)?;
        // On failure `class` drops here and the name is released.
        let handle = host.open_window(title, client)?;

        let mut window = Self {
            live: Some(LiveWindow {
                handle: Some(handle),
                class: Some(class),
                title: title.to_owned(),
                client,
            }),
        };
        window.dispatch(WindowMessage::Create, None);
        Ok(window)
    }

    /// Moves the live state out, leaving `self` inert.
    pub fn take(&mut self) -> Self {
        Self {
            live: self.live.take(),
        }
    }

    #[inline]
    pub fn is_inert(&self) -> bool {
        self.live.is_none()
    }

    /// Native window, if live and not yet destroyed.
    pub fn handle(&self) -> Option<&H> {
        self.live.as_ref().and_then(|l| l.handle.as_ref())
    }

    pub fn title(&self) -> Option<&str> {
        self.live.as_ref().map(|l| l.title.as_str())
    }

    pub fn client_rect(&self) -> Option<ClientRect> {
        self.live.as_ref().map(|l| l.client)
    }

    pub fn class_name(&self) -> Option<&str> {
        self.live
            .as_ref()
            .and_then(|l| l.class.as_ref())
            .map(WindowClass::name)
    }

    pub fn show(&self) {
        if let Some(handle) = self.handle() {
            handle.show();
        }
    }

    /// Builds a `Graphics` presenting into this window's client area.
    pub fn load_graphics(&self, init: &GpuInit) -> Result<Graphics<H::Backend>, WindowError> {
        let live = self.live.as_ref().ok_or(WindowError::Inert)?;
        let handle = live.handle.as_ref().ok_or(WindowError::Inert)?;

        let backend = handle.create_backend(live.client, init)?;
        Ok(Graphics::from_backend(backend)?)
    }

    pub fn handle_message(&mut self, message: WindowMessage, control: &dyn LoopControl) -> Dispatch {
        self.dispatch(message, Some(control))
    }

    fn dispatch(&mut self, message: WindowMessage, control: Option<&dyn LoopControl>) -> Dispatch {
        match message {
            WindowMessage::Close => {
                self.destroy_handle();
                // Destruction is delivered synchronously.
                self.dispatch(WindowMessage::Destroy, control);
                Dispatch::Handled
            }
            WindowMessage::Destroy => {
                match control {
                    Some(control) => control.post_quit(),
                    None => log::warn!("window destroyed outside a message loop"),
                }
                Dispatch::Handled
            }
            WindowMessage::Create => {
                if let Some(live) = &self.live {
                    log::debug!("window \"{}\" created", live.title);
                }
                Dispatch::Default
            }
            WindowMessage::Other => Dispatch::Default,
        }
    }

    fn destroy_handle(&mut self) {
        if let Some(handle) = self.live.as_mut().and_then(|l| l.handle.take()) {
            drop(handle);
            log::debug!("native window destroyed");
        }
    }

    /// Destroys the native window, then releases the class name. Idempotent.
    pub fn destroy(&mut self) {
        self.destroy_handle();
        if let Some(live) = self.live.as_mut() {
            live.class = None;
        }
    }
}

impl<H: NativeWindow> std::fmt::Debug for Window<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.live {
            None => f.write_str("Window(inert)"),
            Some(live) => f
                .debug_struct("Window")
                .field("title", &live.title)
                .field("client", &live.client)
                .field("destroyed", &live.handle.is_none())
                .finish_non_exhaustive(),
        }
    }
}

impl<H: NativeWindow> Drop for Window<H> {
    fn drop(&mut self) {
        self.destroy();
    }
}
