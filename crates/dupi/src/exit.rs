use std::fmt;
use std::io;

use dupi_export::{ConfigError, ExportError};

// Exit codes follow sysexits(3) where one fits.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const TRANSPORT_ERROR: i32 = 3;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const CONFIG: i32 = 78;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound => USAGE,
        _ => FAILURE,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn config_error(err: ConfigError) -> CliError {
    CliError::new(CONFIG, format!("invalid configuration: {err}"))
}

/// Exit code for a failed export. The status body carries the message.
pub fn export_exit_code(err: &ExportError) -> i32 {
    match err {
        ExportError::Config(_) | ExportError::Destination { .. } => CONFIG,
        ExportError::Envelope(_) | ExportError::Record { .. } => DATA_INVALID,
        ExportError::Transport { .. } => TRANSPORT_ERROR,
        ExportError::Pdu { .. } => INTERNAL,
    }
}

#[cfg(test)]
mod tests {
    use dupi_export::EnvelopeError;

    use super::*;

    #[test]
    fn export_errors_map_to_exit_codes() {
        let envelope = ExportError::from(EnvelopeError::UnsupportedKind("X".to_string()));
        assert_eq!(export_exit_code(&envelope), DATA_INVALID);

        let config = ExportError::from(ConfigError::ZeroSampling);
        assert_eq!(export_exit_code(&config), CONFIG);
    }

    #[test]
    fn missing_input_file_is_usage() {
        let err = io_error("read", io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(err.code, USAGE);
        assert_eq!(config_error(ConfigError::EmptyHost).code, CONFIG);
    }
}
