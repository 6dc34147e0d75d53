//! Time subsystem.
//!
//! Intended usage:
//! - one `FrameClock` per loop
//! - call `tick()` once per frame to obtain the `dt` fed to `enter_frame`

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
