// Fixture error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;
use std::io;
use std::path::Path;

/// Fixture error code constants.
///
/// Error code range: 2001-2005
pub struct FixtureErrorCodes {}

impl FixtureErrorCodes {
    /// Opening, writing, or reading the fixture file failed
    pub const IO_FAILED: i32 = 2001;

    /// The pickle encoder rejected the value
    pub const SERIALIZE_FAILED: i32 = 2002;

    /// The pickle decoder could not parse the file
    pub const DESERIALIZE_FAILED: i32 = 2003;

    /// A decoded value falls outside the fixture value model
    pub const UNSUPPORTED_VALUE: i32 = 2004;

    /// Configuration file could not be parsed
    pub const CONFIG_INVALID: i32 = 2005;
}

/// Log a fixture error with structured context
///
/// Fields: error code, the failing component, and the message.
pub fn log_fixture_error(err: &FixtureError, context: &str) {
    error!(
        "Fixture error in {}: code={}, component=FixtureGenerator, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Fixture generation and loading errors
///
/// Error code range: 2001-2005
#[derive(Debug, Clone, PartialEq)]
pub enum FixtureError {
    /// I/O failure on the fixture path
    Io {
        path: String,
        kind: io::ErrorKind,
        details: String,
    },

    /// Pickle encoding failed
    Serialize { details: String },

    /// Pickle decoding failed
    Deserialize { details: String },

    /// Decoded value has no fixture representation
    UnsupportedValue { path: String, found: String },

    /// Configuration file is malformed
    Config { details: String },
}

impl FixtureError {
    /// Wrap an `io::Error` raised while touching `path`.
    pub fn io(path: &Path, err: &io::Error) -> Self {
        FixtureError::Io {
            path: path.display().to_string(),
            kind: err.kind(),
            details: err.to_string(),
        }
    }

    /// Map a `serde_pickle` encoder error, keeping I/O failures as `Io`.
    pub fn from_pickle_write(path: &Path, err: serde_pickle::Error) -> Self {
        match err {
            serde_pickle::Error::Io(io_err) => Self::io(path, &io_err),
            other => FixtureError::Serialize {
                details: other.to_string(),
            },
        }
    }

    /// Map a `serde_pickle` decoder error, keeping I/O failures as `Io`.
    pub fn from_pickle_read(path: &Path, err: serde_pickle::Error) -> Self {
        match err {
            serde_pickle::Error::Io(io_err) => Self::io(path, &io_err),
            other => FixtureError::Deserialize {
                details: other.to_string(),
            },
        }
    }
}

impl ErrorCode for FixtureError {
    fn code(&self) -> i32 {
        match self {
            FixtureError::Io { .. } => FixtureErrorCodes::IO_FAILED,
            FixtureError::Serialize { .. } => FixtureErrorCodes::SERIALIZE_FAILED,
            FixtureError::Deserialize { .. } => FixtureErrorCodes::DESERIALIZE_FAILED,
            FixtureError::UnsupportedValue { .. } => FixtureErrorCodes::UNSUPPORTED_VALUE,
            FixtureError::Config { .. } => FixtureErrorCodes::CONFIG_INVALID,
        }
    }

    fn message(&self) -> String {
        match self {
            FixtureError::Io { path, details, .. } => {
                format!("I/O error on {}: {}", path, details)
            }
            FixtureError::Serialize { details } => {
                format!("Failed to serialize fixture: {}", details)
            }
            FixtureError::Deserialize { details } => {
                format!("Failed to deserialize fixture: {}", details)
            }
            FixtureError::UnsupportedValue { path, found } => {
                format!("Unsupported value at {}: {}", path, found)
            }
            FixtureError::Config { details } => {
                format!("Invalid configuration: {}", details)
            }
        }
    }
}

impl fmt::Display for FixtureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message(), self.code())
    }
}

impl std::error::Error for FixtureError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_error_codes() {
        let io_err = FixtureError::io(
            Path::new("out.pkl"),
            &io::Error::new(io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(io_err.code(), FixtureErrorCodes::IO_FAILED);
        assert_eq!(
            FixtureError::Serialize {
                details: "x".to_string()
            }
            .code(),
            FixtureErrorCodes::SERIALIZE_FAILED
        );
        assert_eq!(
            FixtureError::Deserialize {
                details: "x".to_string()
            }
            .code(),
            FixtureErrorCodes::DESERIALIZE_FAILED
        );
        assert_eq!(
            FixtureError::UnsupportedValue {
                path: "$".to_string(),
                found: "float".to_string()
            }
            .code(),
            FixtureErrorCodes::UNSUPPORTED_VALUE
        );
        assert_eq!(
            FixtureError::Config {
                details: "x".to_string()
            }
            .code(),
            FixtureErrorCodes::CONFIG_INVALID
        );
    }

    #[test]
    fn test_io_error_keeps_kind_and_path() {
        let err = FixtureError::io(
            Path::new("/nowhere/ragged_data.pkl"),
            &io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        match &err {
            FixtureError::Io { path, kind, .. } => {
                assert_eq!(path, "/nowhere/ragged_data.pkl");
                assert_eq!(*kind, io::ErrorKind::PermissionDenied);
            }
            other => panic!("Expected Io, got {other:?}"),
        }
        assert!(err.message().contains("denied"));
    }

    #[test]
    fn test_pickle_io_error_maps_to_io() {
        let err = FixtureError::from_pickle_read(
            Path::new("in.pkl"),
            serde_pickle::Error::Io(io::Error::new(io::ErrorKind::UnexpectedEof, "eof")),
        );
        assert_eq!(err.code(), FixtureErrorCodes::IO_FAILED);
    }

    #[test]
    fn test_fixture_error_display() {
        let err = FixtureError::Config {
            details: "bad protocol".to_string(),
        };
        let display = format!("{}", err);
        assert!(display.contains("bad protocol"));
        assert!(display.contains(&err.code().to_string()));
    }
}
