//! Contract between the runtime loop and the application.

mod app;

pub use app::{App, AppControl};
