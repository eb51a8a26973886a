//! CLI-level errors (wraps domain errors)

use thiserror::Error;

use crate::errors::VarmapError;
use crate::exitcode;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Domain(#[from] VarmapError),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => exitcode::USAGE,
            CliError::Config(_) => exitcode::CONFIG,
            CliError::Domain(e) => match e {
                VarmapError::InvalidInput { .. } => exitcode::NOINPUT,
                VarmapError::MalformedDocument(_) | VarmapError::Xml(_) => exitcode::DATAERR,
                VarmapError::Io(_) => exitcode::IOERR,
            },
        }
    }
}
