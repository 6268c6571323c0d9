//! CPU-side pixel storage.

mod framebuffer;

pub use framebuffer::{BYTES_PER_PIXEL, FrameBuffer, PixelOutOfBounds, RowCopyError};
