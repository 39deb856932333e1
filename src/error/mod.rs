// Error types for the ragged fixture generator
//
// Structured errors with numeric codes so the CLI and any caller can
// distinguish I/O failures from codec and configuration problems.

mod fixture;

pub use fixture::{log_fixture_error, FixtureError, FixtureErrorCodes};

/// Error codes for structured error reporting
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
