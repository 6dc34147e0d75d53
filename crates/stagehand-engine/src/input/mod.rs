//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The window runtime translates platform events into `PlatformEvent`s and
//! queues them on an `InputFrame`; the scene layer forwards each one to the
//! stage as a named event with a primitive argument list.

mod frame;
mod tracker;
mod types;

pub mod platform;

pub use frame::InputFrame;
pub use tracker::PointerTracker;
pub use types::{Key, MouseButton, PlatformEvent};
