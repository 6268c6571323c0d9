//! GPU side of the pixel pipeline.
//!
//! This module is responsible for:
//! - the `Backend` seam used by `Graphics` (map, draw, present)
//! - creating the wgpu device, surface, texture, quad and pipeline
//! - an in-memory backend for headless use and fault injection
//! - the typed errors produced while building or rendering

mod backend;
mod error;
mod gpu;
mod init;
mod quad;
mod software;
mod surface;

pub use backend::{Backend, MappedTexture};
pub use error::{GraphicsError, RenderError, ResourceKind};
pub use gpu::{FRAME_TEXTURE_FORMAT, WgpuBackend};
pub use init::GpuInit;
pub use quad::{QUAD_DEPTH, QUAD_VERTEX_COUNT, QUAD_VERTICES, QuadVertex};
pub use software::{DEFAULT_SENTINEL, SoftwareBackend, SoftwareBackendBuilder};
