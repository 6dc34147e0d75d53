//! Stagehand engine crate.
//!
//! This crate owns the platform loop and the render-facing primitives used by
//! the scene layer. It knows nothing about sprites or script objects.

pub mod core;
pub mod input;
pub mod time;
pub mod window;

pub mod coords;
pub mod logging;
pub mod render;
pub mod scene;
