//! Progress sink that writes severity-tagged lines to stderr, keeping stdout
//! free for the report itself.

use crate::ports::progress_port::{ProgressPort, Severity};

pub struct ConsoleProgress;

impl ProgressPort for ConsoleProgress {
    fn log(&self, severity: Severity, message: &str) {
        eprintln!("[{severity}] {message}");
    }
}
