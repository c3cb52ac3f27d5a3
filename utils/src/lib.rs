//! Shared utilities for commit-reveal voting.

pub mod logging;

pub use logging::{init_logging, init_tracing, LogFormat, LoggingError};
