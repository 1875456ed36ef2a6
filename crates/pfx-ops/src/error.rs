//! Error types for operation resolution and request parsing.

use thiserror::Error;

/// Error type for pixel operations.
///
/// Resolution errors never abort a pass: [`apply_request`](crate::apply_request)
/// turns them into [`Outcome::Skipped`](crate::Outcome::Skipped) and leaves the
/// buffer untouched.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Operation name not recognized.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// Operation recognized but `mode` is not one of its modes.
    #[error("unknown mode '{mode}' for {operation}")]
    UnknownMode {
        /// Operation name
        operation: String,
        /// Rejected mode value
        mode: String,
    },

    /// Operation needs a `mode` to select its variant and none was given.
    #[error("{0} requires a mode")]
    MissingMode(String),

    /// A named option (operator, estimator) has an unrecognized value.
    #[error("unknown {key} '{value}' for {operation}")]
    UnknownOption {
        /// Operation name
        operation: String,
        /// Option key
        key: &'static str,
        /// Rejected value
        value: String,
    },

    /// `custom` requested without a pixel function.
    #[error("custom operation has no pixel function")]
    MissingCustomFunction,

    /// Numeric option is not a finite number.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// YAML request list could not be parsed.
    #[error("yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON request list could not be parsed.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for pixel operations.
pub type OpsResult<T> = Result<T, OpsError>;
