//! Integer pixel geometry shared by the window and graphics layers.
//!
//! Canonical space:
//! - Physical pixels
//! - Origin top-left
//! - +X right, +Y down

mod rect;

pub use rect::ClientRect;
