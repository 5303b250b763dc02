//! Installs the global `tracing` subscriber.
//!
//! Kept in its own test binary because a subscriber can be installed only
//! once per process.

use std::sync::Arc;

use crscache::log::{Logger, TracingLogger};
use crscache::log_info;
use crscache::logging::{init_console_logging, init_logging};

#[test]
fn test_console_logging_installs_once() {
    assert!(init_console_logging().is_ok());

    let logger: Arc<dyn Logger> = Arc::new(TracingLogger::new());
    log_info!(logger, "console subscriber installed");

    // A second global subscriber is refused instead of panicking
    assert!(init_console_logging().is_err());

    let temp = tempfile::tempdir().unwrap();
    let log_dir = temp.path().join("logs");
    let result = init_logging(log_dir.to_str().unwrap(), "crscache.log");
    assert!(result.is_err());
    // The file is still prepared before installation is attempted
    assert!(log_dir.join("crscache.log").exists());
}
