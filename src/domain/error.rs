//! Domain error types.

/// Top-level error type for algotrader.
///
/// Only run-wide conditions surface through this type. Per-symbol problems
/// (empty series, warm-up shortfall, untrained model, incomplete latest row)
/// are recovered where they occur and never become an `AppError`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("no historical data available for any symbol")]
    DataUnavailable,

    #[error("market data error: {reason}")]
    Data { reason: String },

    #[error("results sink error: {reason}")]
    Sink { reason: String },

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

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        AppError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<&AppError> for std::process::ExitCode {
    fn from(err: &AppError) -> Self {
        let code: u8 = match err {
            AppError::Io(_) => 1,
            AppError::ConfigParse { .. }
            | AppError::ConfigMissing { .. }
            | AppError::ConfigInvalid { .. } => 2,
            AppError::Data { .. } | AppError::Sink { .. } => 3,
            AppError::DataUnavailable => 5,
        };
        std::process::ExitCode::from(code)
    }
}
