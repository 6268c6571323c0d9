use std::ops::DerefMut;

use super::RenderError;

/// CPU-writable view of the texture upload region.
///
/// Holding the value is the "mapped" state; dropping it unmaps. Row `y` of the
/// image starts at byte `y * row_pitch()`, which may exceed the unpadded row size.
pub struct MappedTexture<'a> {
    bytes: Box<dyn DerefMut<Target = [u8]> + 'a>,
    row_pitch: usize,
}

impl<'a> MappedTexture<'a> {
    pub fn new(bytes: impl DerefMut<Target = [u8]> + 'a, row_pitch: usize) -> Self {
        Self {
            bytes: Box::new(bytes),
            row_pitch,
        }
    }

    #[inline]
    pub fn row_pitch(&self) -> usize {
        self.row_pitch
    }

    #[inline]
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes[..]
    }
}

/// GPU side of a `Graphics`: a texture mirrored from the CPU buffer and the
/// fixed quad that displays it.
///
/// Per frame, `Graphics::render` calls `map`, writes every row, drops the
/// mapping, then calls `draw` and `present` in that order.
pub trait Backend {
    /// Surface and texture size in pixels.
    fn size(&self) -> (u32, u32);

    /// Grants exclusive write access to the upload region. Prior contents are
    /// discarded.
    fn map(&mut self) -> Result<MappedTexture<'_>, RenderError>;

    /// Makes the last unmapped upload visible to the GPU and draws the quad.
    fn draw(&mut self) -> Result<(), RenderError>;

    /// Presents the drawn frame, blocking for vertical sync when configured.
    fn present(&mut self) -> Result<(), RenderError>;
}
