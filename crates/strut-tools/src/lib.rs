//! Development tools for strut.
//!
//! This crate wires up structured logging for binaries and tests that
//! exercise the constraint model.

pub mod logging;

pub use logging::{init_logging, LogConfig, LogFormat, LoggingError};
