use std::cell::Cell;
use std::rc::Rc;

use crate::coords::ClientRect;
use crate::device::{GpuInit, GraphicsError, SoftwareBackend};

use super::{LoopControl, NativeWindow, WindowError, WindowHost};

#[derive(Debug, Default)]
struct Counters {
    created: Cell<usize>,
    destroyed: Cell<usize>,
}

/// Window host without a display. Windows present into [`SoftwareBackend`]s.
#[derive(Debug, Clone)]
pub struct HeadlessHost {
    counters: Rc<Counters>,
    row_alignment: usize,
    fail_creation: bool,
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self {
            counters: Rc::default(),
            row_alignment: wgpu::COPY_BYTES_PER_ROW_ALIGNMENT as usize,
            fail_creation: false,
        }
    }
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Row alignment of the software backends created for this host's windows.
    pub fn with_row_alignment(mut self, align: usize) -> Self {
        self.row_alignment = align;
        self
    }

    /// Makes every `open_window` call fail.
    pub fn failing(mut self) -> Self {
        self.fail_creation = true;
        self
    }

    pub fn windows_created(&self) -> usize {
        self.counters.created.get()
    }

    pub fn windows_destroyed(&self) -> usize {
        self.counters.destroyed.get()
    }
}

impl WindowHost for HeadlessHost {
    type Window = HeadlessWindow;

    fn open_window(&self, title: &str, client: ClientRect) -> Result<HeadlessWindow, WindowError> {
        if self.fail_creation {
            return Err(WindowError::Creation(format!("headless host refused \"{title}\"")));
        }
        self.counters.created.set(self.counters.created.get() + 1);
        Ok(HeadlessWindow {
            client,
            visible: Cell::new(false),
            counters: Rc::clone(&self.counters),
            row_alignment: self.row_alignment,
        })
    }
}

/// In-memory native window.
#[derive(Debug)]
pub struct HeadlessWindow {
    client: ClientRect,
    visible: Cell<bool>,
    counters: Rc<Counters>,
    row_alignment: usize,
}

impl HeadlessWindow {
    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    pub fn client_rect(&self) -> ClientRect {
        self.client
    }
}

impl NativeWindow for HeadlessWindow {
    type Backend = SoftwareBackend;

    fn show(&self) {
        self.visible.set(true);
    }

    fn create_backend(
        &self,
        client: ClientRect,
        _init: &GpuInit,
    ) -> Result<SoftwareBackend, GraphicsError> {
        SoftwareBackend::builder(client.width(), client.height())
            .row_alignment(self.row_alignment)
            .build()
    }
}

impl Drop for HeadlessWindow {
    fn drop(&mut self) {
        self.counters.destroyed.set(self.counters.destroyed.get() + 1);
    }
}

/// Loop control that records quit requests.
#[derive(Debug, Default)]
pub struct HeadlessLoop {
    quit: Cell<bool>,
}

impl HeadlessLoop {
    pub fn quit_posted(&self) -> bool {
        self.quit.get()
    }
}

impl LoopControl for HeadlessLoop {
    fn post_quit(&self) {
        self.quit.set(true);
    }
}
