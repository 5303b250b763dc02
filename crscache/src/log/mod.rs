//! Injected logging for the registries.
//!
//! The registries never talk to a logging backend directly. They hold an
//! `Arc<dyn Logger>` handed to them at construction and emit through the
//! `log_*!` macros, so the same cache code runs silently under test and
//! through `tracing` in an application.
//!
//! - `Logger` trait: the interface the registries log through
//! - `TracingLogger`: production adapter that delegates to the `tracing` crate
//! - `NoOpLogger`: discards everything
//!
//! ```
//! use crscache::log::{Logger, NoOpLogger};
//! use crscache::log_debug;
//! use std::sync::Arc;
//!
//! let logger: Arc<dyn Logger> = Arc::new(NoOpLogger);
//! log_debug!(logger, "resolved {} from cache", "EPSG:4326");
//! ```

mod noop;
mod tracing_adapter;
mod r#trait;

pub use noop::NoOpLogger;
pub use r#trait::{LogLevel, Logger};
pub use tracing_adapter::TracingLogger;
