//! Core engine-facing contracts.
//!
//! This module defines the interface between the platform loop (windowed or
//! headless) and higher layers. It keeps winit types out of user code and
//! provides a consistent per-frame context.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::FrameCtx;
