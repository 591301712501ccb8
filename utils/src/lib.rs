//! Shared utilities for fungible-token hosts.

pub mod logging;

pub use logging::{init_logging, LogFormat, LoggingError};
