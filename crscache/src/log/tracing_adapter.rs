//! Tracing library adapter implementation.

use crate::log::{LogLevel, Logger};
use std::fmt::Arguments;

/// Logger implementation that delegates to the `tracing` crate.
///
/// Messages are emitted under the `crscache` target so they can be filtered
/// with `RUST_LOG=crscache=debug`. Output only appears once a subscriber is
/// installed, e.g. with [`crate::logging::init_console_logging`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, args: Arguments<'_>) {
        match level {
            LogLevel::Trace => tracing::trace!(target: "crscache", "{}", args),
            LogLevel::Debug => tracing::debug!(target: "crscache", "{}", args),
            LogLevel::Info => tracing::info!(target: "crscache", "{}", args),
            LogLevel::Warn => tracing::warn!(target: "crscache", "{}", args),
            LogLevel::Error => tracing::error!(target: "crscache", "{}", args),
        }
    }
}
