use anyhow::{Context, Result, anyhow};
use std::collections::HashMap;
use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

use crate::coords::ClientRect;
use crate::core::{App, AppControl};
use crate::device::{GpuInit, RenderError};
use crate::graphics::Graphics;
use crate::time::FrameClock;

use super::{NativeWindow, Window, WindowMessage};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Process-unique window class name.
    pub class_name: String,
    pub title: String,
    /// Client area on the desktop, in physical pixels. Fixed for the window's life.
    pub client: ClientRect,
    pub gpu: GpuInit,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            class_name: "px-window".to_string(),
            title: "px".to_string(),
            client: ClientRect::from_origin_size(100, 100, 640, 480),
            gpu: GpuInit::default(),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the configured window and drives `app` until the window closes.
    pub fn run<A>(config: RuntimeConfig, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Per-window state. Graphics is declared first so it drops before the window.
struct WindowEntry<H: NativeWindow = Arc<winit::window::Window>> {
    graphics: Option<Graphics<H::Backend>>,
    window: Window<H>,
    clock: FrameClock,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum FrameOutcome {
    Presented,
    Skipped,
    Exit,
}

impl<H: NativeWindow> WindowEntry<H> {
    fn new(window: Window<H>, gpu: &GpuInit) -> Result<Self> {
        window.show();
        let graphics = window
            .load_graphics(gpu)
            .context("failed to initialize graphics for window")?;

        Ok(Self {
            graphics: Some(graphics),
            window,
            clock: FrameClock::default(),
        })
    }

    /// Runs one frame: app callback, then render with the recovery policy.
    ///
    /// Returns `Err` only when lost graphics cannot be rebuilt.
    fn frame<A>(&mut self, app: &mut A, gpu: &GpuInit) -> Result<FrameOutcome>
    where
        A: App<H::Backend>,
    {
        if self.graphics.is_none() {
            self.rebuild_graphics(gpu)?;
        }
        let Some(graphics) = self.graphics.as_mut() else {
            return Ok(FrameOutcome::Skipped);
        };

        let time = self.clock.tick();
        if app.on_frame(graphics, time) == AppControl::Exit {
            return Ok(FrameOutcome::Exit);
        }

        match graphics.render() {
            Ok(()) => Ok(FrameOutcome::Presented),
            Err(RenderError::DeviceLost { reason }) => {
                log::warn!("device lost ({reason}); rebuilding graphics");
                self.graphics = None;
                self.rebuild_graphics(gpu)?;
                Ok(FrameOutcome::Skipped)
            }
            Err(err) => {
                log::warn!("frame skipped: {err}");
                Ok(FrameOutcome::Skipped)
            }
        }
    }

    fn rebuild_graphics(&mut self, gpu: &GpuInit) -> Result<()> {
        let graphics = self
            .window
            .load_graphics(gpu)
            .context("failed to rebuild graphics after device loss")?;
        self.graphics = Some(graphics);
        self.clock.reset();
        Ok(())
    }
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    app: A,

    windows: HashMap<WindowId, WindowEntry>,
    fatal: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, app: A) -> Self {
        Self {
            config,
            app,
            windows: HashMap::new(),
            fatal: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        if self.fatal.is_none() {
            self.fatal = Some(err);
        }
        event_loop.exit();
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<WindowId> {
        let cfg = &self.config;
        let window = Window::new(event_loop, &cfg.class_name, &cfg.title, cfg.client)
            .context("failed to create window")?;

        let id = window
            .handle()
            .map(|w| w.id())
            .ok_or_else(|| anyhow!("window has no native handle"))?;

        let entry = WindowEntry::new(window, &cfg.gpu)?;
        self.windows.insert(id, entry);
        Ok(id)
    }

    fn close_window_entry(&mut self, event_loop: &ActiveEventLoop, id: WindowId, message: WindowMessage) {
        let Some(mut entry) = self.windows.remove(&id) else {
            return;
        };

        // Release the surface before the native window goes away.
        entry.graphics = None;
        entry.window.handle_message(message, event_loop);

        if self.windows.is_empty() {
            event_loop.exit();
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop, id: WindowId) {
        let (app, windows, gpu) = (&mut self.app, &mut self.windows, &self.config.gpu);
        let Some(entry) = windows.get_mut(&id) else {
            return;
        };

        if let Some(handle) = entry.window.handle() {
            handle.pre_present_notify();
        }

        match entry.frame(app, gpu) {
            Ok(FrameOutcome::Exit) => event_loop.exit(),
            Ok(FrameOutcome::Presented | FrameOutcome::Skipped) => {}
            Err(err) => self.fail(event_loop, err),
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if !self.windows.is_empty() {
            return;
        }

        match self.create_window_entry(event_loop) {
            Ok(id) => {
                if let Some(handle) = self.windows.get(&id).and_then(|e| e.window.handle()) {
                    handle.request_redraw();
                }
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; every frame re-uploads the whole buffer anyway.
        for entry in self.windows.values() {
            if let Some(handle) = entry.window.handle() {
                handle.request_redraw();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.app.on_window_event(window_id, &event) == AppControl::Exit {
            event_loop.exit();
            return;
        }

        match WindowMessage::from(&event) {
            message @ (WindowMessage::Close | WindowMessage::Destroy) => {
                self.close_window_entry(event_loop, window_id, message);
            }
            WindowMessage::Create | WindowMessage::Other => {
                if let WindowEvent::RedrawRequested = event {
                    self.redraw(event_loop, window_id);
                }
            }
        }
    }
}
