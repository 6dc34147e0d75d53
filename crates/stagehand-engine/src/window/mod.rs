//! Frame loops.
//!
//! [`Runtime`] owns the winit event loop and a single window; [`Headless`]
//! drives the same [`crate::core::App`] contract with a fixed clock and no
//! window. Presentation of the recorded draw list is delegated to a
//! [`Presenter`] supplied by the render backend.

mod headless;
mod runtime;

pub use headless::{Headless, HeadlessReport};
pub use runtime::{LogPresenter, Presenter, Runtime, RuntimeConfig};
