//! Progress/log sink port trait.
//!
//! The core pushes human-readable status lines here and never blocks on the
//! consumer. The sink is how a boundary wrapper (a queue, a worker thread)
//! keeps a user informed while the synchronous core runs.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

pub trait ProgressPort {
    fn log(&self, severity: Severity, message: &str);

    fn info(&self, message: &str) {
        self.log(Severity::Info, message);
    }

    fn warning(&self, message: &str) {
        self.log(Severity::Warning, message);
    }

    fn error(&self, message: &str) {
        self.log(Severity::Error, message);
    }
}

/// Discards everything. Default sink for tests and embedding.
pub struct NullProgress;

impl ProgressPort for NullProgress {
    fn log(&self, _severity: Severity, _message: &str) {}
}
