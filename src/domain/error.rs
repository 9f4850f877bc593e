//! Domain error types.
//!
//! Three families: data errors (bad or missing input series), config errors
//! (rejected before any computation starts), and computation errors (a
//! malformed intermediate reaching a later stage, which indicates a defect
//! in the producing stage).

/// Top-level error type for macdvol.
#[derive(Debug, thiserror::Error)]
pub enum MacdvolError {
    #[error("no data for {symbol} in the requested range")]
    NoData { symbol: String },

    #[error("insufficient history: have {bars} bars, need {minimum}")]
    InsufficientData { bars: usize, minimum: usize },

    #[error("malformed price series: {reason}")]
    MalformedSeries { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("malformed signal sequence: {reason}")]
    MalformedSignals { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl MacdvolError {
    /// Process exit code for this error family: 1 I/O, 2 config, 3 data,
    /// 4 internal signal defect.
    pub fn exit_code(&self) -> u8 {
        match self {
            MacdvolError::Io(_) => 1,
            MacdvolError::ConfigParse { .. }
            | MacdvolError::ConfigMissing { .. }
            | MacdvolError::ConfigInvalid { .. } => 2,
            MacdvolError::NoData { .. }
            | MacdvolError::InsufficientData { .. }
            | MacdvolError::MalformedSeries { .. } => 3,
            MacdvolError::MalformedSignals { .. } => 4,
        }
    }
}

impl From<&MacdvolError> for std::process::ExitCode {
    fn from(err: &MacdvolError) -> Self {
        std::process::ExitCode::from(err.exit_code())
    }
}
