//! Error types for the matrix client.

use std::io;
use thiserror::Error;

/// Result type alias for matrix operations.
pub type Result<T> = std::result::Result<T, MatrixError>;

/// Errors that can occur while talking to the matrix.
///
/// A route confirmation that disagrees with the request is *not* an error:
/// [`Session::map_io`](crate::Session::map_io) reports it as `Ok(false)`.
#[derive(Debug, Error)]
pub enum MatrixError {
    /// An index argument could not be interpreted as an integer.
    #[error("Invalid argument '{parameter}': {reason}")]
    InvalidArgument {
        /// Name of the offending argument.
        parameter: &'static str,
        /// Description of why the argument is invalid.
        reason: String,
    },

    /// An index argument is outside the bounds of the active indexing mode.
    #[error("{parameter} index {value} out of range: must be within {min}..={max}")]
    OutOfRange {
        /// Name of the offending argument.
        parameter: &'static str,
        /// Value that was supplied.
        value: i64,
        /// Smallest accepted value.
        min: i64,
        /// Largest accepted value.
        max: i64,
    },

    /// An operation that needs an open session was called while disconnected.
    #[error("Not connected: call connect() before using non-simple operations")]
    NotConnected,

    /// A self-managing operation was called while a session was opened manually.
    #[error("Session misuse: {operation} cannot be used while connected manually")]
    SessionMisuse {
        /// Name of the rejected operation.
        operation: &'static str,
    },

    /// The device sent a reply that cannot be decoded.
    #[error("Invalid response: {reason}")]
    InvalidResponse {
        /// Description of the response error.
        reason: String,
    },

    /// Connect, read or write did not finish within the configured timeout.
    #[error("Communication timeout")]
    Timeout,

    /// I/O error during communication.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl MatrixError {
    /// Creates a new `InvalidArgument` error.
    ///
    /// # Example
    ///
    /// ```
    /// use hdmi_matrix::MatrixError;
    ///
    /// let err = MatrixError::invalid_argument("input", "not a number");
    /// assert_eq!(err.to_string(), "Invalid argument 'input': not a number");
    /// ```
    pub fn invalid_argument(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            parameter,
            reason: reason.into(),
        }
    }

    /// Creates a new `OutOfRange` error.
    pub fn out_of_range(parameter: &'static str, value: i64, min: i64, max: i64) -> Self {
        Self::OutOfRange {
            parameter,
            value,
            min,
            max,
        }
    }

    /// Creates a new `SessionMisuse` error.
    pub fn session_misuse(operation: &'static str) -> Self {
        Self::SessionMisuse { operation }
    }

    /// Creates a new `InvalidResponse` error.
    ///
    /// # Example
    ///
    /// ```
    /// use hdmi_matrix::MatrixError;
    ///
    /// let err = MatrixError::invalid_response("reply too short");
    /// ```
    pub fn invalid_response(reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            reason: reason.into(),
        }
    }

    /// Returns whether the error came from the underlying connection.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let err = MatrixError::invalid_argument("output", "'x' is not an integer");
        assert_eq!(
            err.to_string(),
            "Invalid argument 'output': 'x' is not an integer"
        );
    }

    #[test]
    fn test_out_of_range_display() {
        let err = MatrixError::out_of_range("input", 4, 0, 3);
        assert_eq!(
            err.to_string(),
            "input index 4 out of range: must be within 0..=3"
        );
    }

    #[test]
    fn test_session_misuse_display() {
        let err = MatrixError::session_misuse("simple_map_io");
        assert_eq!(
            err.to_string(),
            "Session misuse: simple_map_io cannot be used while connected manually"
        );
    }

    #[test]
    fn test_timeout_display() {
        assert_eq!(MatrixError::Timeout.to_string(), "Communication timeout");
    }

    #[test]
    fn test_is_transport() {
        let io = MatrixError::from(io::Error::new(io::ErrorKind::ConnectionReset, "reset"));
        assert!(io.is_transport());
        assert!(MatrixError::Timeout.is_transport());
        assert!(!MatrixError::NotConnected.is_transport());
        assert!(!MatrixError::invalid_response("short").is_transport());
    }
}
