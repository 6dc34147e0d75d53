//! Logging utilities.
//!
//! This module centralizes logger initialization. Library code only talks to
//! the `log` facade; the `env_logger` backend is installed by binaries.

mod init;

pub use init::{init_logging, LoggingConfig};
