use thiserror::Error;

use crate::paint::Color;

/// Bytes per pixel of the packed color format.
pub const BYTES_PER_PIXEL: usize = std::mem::size_of::<Color>();

/// Write outside the framebuffer bounds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
#[error("pixel ({x}, {y}) is outside the {width}x{height} framebuffer")]
pub struct PixelOutOfBounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Mapped destination too small for the framebuffer at the reported pitch.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
#[error("mapped region of {len} bytes with row pitch {row_pitch} cannot hold {height} rows of {row_bytes} bytes")]
pub struct RowCopyError {
    pub len: usize,
    pub row_pitch: usize,
    pub row_bytes: usize,
    pub height: usize,
}

/// CPU-side pixel buffer.
///
/// Invariants:
/// - `pixels.len() == width * height`
/// - row-major, row stride equals `width` (no padding)
/// - dimensions never change after construction
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Box<[Color]>,
}

impl FrameBuffer {
    /// Allocates a zeroed (transparent black) buffer.
    ///
    /// Both dimensions must be non-zero; callers validate the surface size first.
    pub fn new(width: u32, height: u32) -> Self {
        debug_assert!(width > 0 && height > 0, "framebuffer must not be empty");
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: vec![Color::default(); len].into_boxed_slice(),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Size of one unpadded row in bytes.
    #[inline]
    pub fn row_bytes(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Resets every pixel to transparent black.
    pub fn clear(&mut self) {
        self.pixels.fill(Color::default());
    }

    /// Writes one pixel.
    ///
    /// Out-of-range coordinates are a caller bug: they trip a debug assertion and
    /// are dropped in release builds rather than wrapping into a neighbouring row.
    #[inline]
    pub fn put(&mut self, x: u32, y: u32, color: Color) {
        debug_assert!(
            self.contains(x, y),
            "FrameBuffer::put: ({x}, {y}) outside {}x{}",
            self.width,
            self.height
        );
        if self.contains(x, y) {
            let i = self.index(x, y);
            self.pixels[i] = color;
        }
    }

    /// Bounds-checked write, in every build profile.
    pub fn try_put(&mut self, x: u32, y: u32, color: Color) -> Result<(), PixelOutOfBounds> {
        if !self.contains(x, y) {
            return Err(PixelOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let i = self.index(x, y);
        self.pixels[i] = color;
        Ok(())
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        self.contains(x, y).then(|| self.pixels[self.index(x, y)])
    }

    #[inline]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    /// Rows in top-to-bottom order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[Color]> {
        self.pixels.chunks_exact(self.width as usize)
    }

    /// Copies every row into `dst`, starting row `y` at `y * row_pitch`.
    ///
    /// Only the first `row_bytes()` bytes of each destination row are written;
    /// padding between rows is left untouched.
    pub fn copy_rows_to(&self, dst: &mut [u8], row_pitch: usize) -> Result<(), RowCopyError> {
        let row_bytes = self.row_bytes();
        let height = self.height as usize;
        let required = row_pitch * (height - 1) + row_bytes;

        if row_pitch < row_bytes || dst.len() < required {
            return Err(RowCopyError {
                len: dst.len(),
                row_pitch,
                row_bytes,
                height,
            });
        }

        for (y, row) in self.rows().enumerate() {
            let start = y * row_pitch;
            dst[start..start + row_bytes].copy_from_slice(bytemuck::cast_slice(row));
        }
        Ok(())
    }
}

impl std::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}
