//! CPU framebuffer bound to a GPU backend.

use std::sync::Arc;

use raw_window_handle::{HasDisplayHandle, HasWindowHandle};

use crate::coords::ClientRect;
use crate::device::{Backend, GpuInit, GraphicsError, RenderError, WgpuBackend};
use crate::paint::Color;
use crate::surface::{FrameBuffer, PixelOutOfBounds};

/// Pixel buffer plus the GPU objects that put it on screen.
///
/// Pixel writes only touch the CPU buffer. [`Graphics::render`] copies the whole
/// buffer into the backend texture, draws the full-screen quad, and presents.
pub struct Graphics<B: Backend = WgpuBackend> {
    backend: B,
    buffer: FrameBuffer,
}

impl Graphics<WgpuBackend> {
    /// Builds the wgpu backend for `window` sized to `client`, then the CPU buffer.
    ///
    /// Blocks on adapter/device acquisition.
    pub fn new<W>(window: Arc<W>, client: ClientRect, init: &GpuInit) -> Result<Self, GraphicsError>
    where
        W: HasWindowHandle + HasDisplayHandle + Send + Sync + 'static,
    {
        let (width, height) = client.size();
        if client.is_empty() {
            return Err(GraphicsError::EmptySurface { width, height });
        }

        let backend = pollster::block_on(WgpuBackend::new(window, width, height, init))?;
        Self::from_backend(backend)
    }
}

impl<B: Backend> Graphics<B> {
    /// Wraps an already built backend. The CPU buffer is allocated last.
    pub fn from_backend(backend: B) -> Result<Self, GraphicsError> {
        let (width, height) = backend.size();
        if width == 0 || height == 0 {
            return Err(GraphicsError::EmptySurface { width, height });
        }

        log::debug!("graphics ready: {width}x{height}");
        Ok(Self {
            backend,
            buffer: FrameBuffer::new(width, height),
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// Sets every pixel to transparent black.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Writes one pixel; visible after the next `render`.
    ///
    /// `x < width` and `y < height` is a precondition. See [`FrameBuffer::put`].
    #[inline]
    pub fn put_pixel(&mut self, x: u32, y: u32, color: Color) {
        self.buffer.put(x, y, color);
    }

    /// Writes one opaque pixel.
    #[inline]
    pub fn put_rgb(&mut self, x: u32, y: u32, red: u8, green: u8, blue: u8) {
        self.buffer.put(x, y, Color::rgb(red, green, blue));
    }

    pub fn try_put_pixel(&mut self, x: u32, y: u32, color: Color) -> Result<(), PixelOutOfBounds> {
        self.buffer.try_put(x, y, color)
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.buffer.get(x, y)
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    pub fn framebuffer_mut(&mut self) -> &mut FrameBuffer {
        &mut self.buffer
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Uploads the buffer, draws the quad and presents it.
    pub fn render(&mut self) -> Result<(), RenderError> {
        // Mapping must be released before the draw is issued.
        {
            let mut mapped = self.backend.map()?;
            let row_pitch = mapped.row_pitch();
            self.buffer
                .copy_rows_to(mapped.bytes_mut(), row_pitch)
                .map_err(|e| RenderError::Map(e.to_string()))?;
        }

        self.backend.draw()?;
        self.backend.present()
    }
}

impl<B: Backend> std::fmt::Debug for Graphics<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graphics")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{ResourceKind, SoftwareBackend};

    fn software(width: u32, height: u32) -> Graphics<SoftwareBackend> {
        Graphics::from_backend(SoftwareBackend::new(width, height).unwrap()).unwrap()
    }

    // ── pixel ops ─────────────────────────────────────────────────────────

    #[test]
    fn put_rgb_is_opaque() {
        let mut g = software(2, 2);
        g.put_rgb(1, 0, 10, 20, 30);
        let c = g.pixel(1, 0).unwrap();
        assert_eq!((c.alpha(), c.red(), c.green(), c.blue()), (255, 10, 20, 30));
    }

    #[test]
    fn try_put_pixel_reports_bounds() {
        let mut g = software(3, 3);
        assert!(g.try_put_pixel(2, 2, Color::WHITE).is_ok());
        let err = g.try_put_pixel(3, 0, Color::WHITE).unwrap_err();
        assert_eq!((err.width, err.height), (3, 3));
    }

    #[test]
    fn writes_accumulate_until_render() {
        let mut g = software(2, 1);
        g.put_pixel(0, 0, Color::WHITE);
        g.put_pixel(1, 0, Color::WHITE);
        assert_eq!(g.backend().frames_presented(), 0);

        g.render().unwrap();
        assert_eq!(g.backend().presented_pixel(0, 0), Some(Color::WHITE));
        assert_eq!(g.backend().presented_pixel(1, 0), Some(Color::WHITE));
    }

    // ── render ────────────────────────────────────────────────────────────

    #[test]
    fn end_to_end_4x4() {
        let red = Color::rgba(255, 0, 0, 255);
        let green = Color::rgba(0, 255, 0, 255);

        let mut g = software(4, 4);
        g.clear();
        g.put_pixel(0, 0, red);
        g.put_pixel(3, 3, green);
        g.render().unwrap();

        let b = g.backend();
        assert_eq!(b.frames_presented(), 1);
        for y in 0..4 {
            for x in 0..4 {
                let expected = match (x, y) {
                    (0, 0) => red,
                    (3, 3) => green,
                    _ => Color::default(),
                };
                assert_eq!(b.presented_pixel(x, y), Some(expected), "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn padded_rows_land_at_pitch_offsets() {
        let backend = SoftwareBackend::builder(3, 2)
            .row_alignment(32)
            .sentinel(0xEE)
            .build()
            .unwrap();
        let mut g = Graphics::from_backend(backend).unwrap();
        for y in 0..2 {
            for x in 0..3 {
                g.put_pixel(x, y, Color::rgba(x as u8, y as u8, 0x40, 0xFF));
            }
        }
        g.render().unwrap();

        let b = g.backend();
        let pitch = b.row_pitch();
        assert_eq!(pitch, 32);
        let bytes = b.upload_bytes();
        for y in 0..2usize {
            let row = &bytes[y * pitch..(y + 1) * pitch];
            for x in 0..3usize {
                let px = Color::from_bgra_bytes([row[x * 4], row[x * 4 + 1], row[x * 4 + 2], row[x * 4 + 3]]);
                assert_eq!(Some(px), g.pixel(x as u32, y as u32));
            }
            assert!(row[12..].iter().all(|&b| b == 0xEE), "padding written in row {y}");
        }
        assert_eq!(b.presented_pixel(2, 1), g.pixel(2, 1));
    }

    #[test]
    fn render_reflects_buffer_at_call_time() {
        let mut g = software(1, 1);
        g.put_pixel(0, 0, Color::WHITE);
        g.render().unwrap();
        g.clear();
        g.render().unwrap();
        assert_eq!(g.backend().presented_pixel(0, 0), Some(Color::default()));
        assert_eq!(g.backend().frames_presented(), 2);
    }

    // ── failures ──────────────────────────────────────────────────────────

    #[test]
    fn forced_swapchain_failure_builds_nothing() {
        let result = SoftwareBackend::builder(4, 4)
            .fail_on(ResourceKind::Swapchain)
            .build()
            .and_then(Graphics::from_backend);
        let err = result.unwrap_err();
        assert!(matches!(err, GraphicsError::Swapchain(_)));
    }

    #[test]
    fn map_failure_skips_draw() {
        let mut g = software(2, 2);
        g.backend_mut().set_fail_map(true);
        assert!(matches!(g.render(), Err(RenderError::Map(_))));
        assert_eq!(g.backend().frames_presented(), 0);
    }

    #[test]
    fn present_failure_is_not_device_loss() {
        let mut g = software(2, 2);
        g.backend_mut().set_fail_present(Some(wgpu::SurfaceError::Timeout));
        let err = g.render().unwrap_err();
        assert!(!err.is_device_lost());

        g.backend_mut().set_fail_present(None);
        g.render().unwrap();
        assert_eq!(g.backend().frames_presented(), 1);
    }

    #[test]
    fn device_loss_is_reported() {
        let mut g = software(2, 2);
        g.backend_mut().lose_device("removed");
        let err = g.render().unwrap_err();
        assert_eq!(err, RenderError::DeviceLost { reason: "removed".into() });
    }
}
