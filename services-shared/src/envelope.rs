//! Response envelope returned by every external call.
//!
//! An [`Envelope`] is either the decoded payload from the remote system or a
//! [`ServiceError`] describing why the call failed. On the wire it renders as
//! the payload itself, or as `{"error": "<message>"}`.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

/// Category of a failed external call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required credential or setting is missing. No I/O was attempted.
    Configuration,
    /// The request was rejected locally before any I/O.
    InvalidRequest,
    /// Connection failure, timeout, or any other failure to complete the request.
    Transport,
    /// The remote system answered with a non-success status.
    Remote {
        /// Numeric status code returned by the remote system.
        status: u16,
    },
    /// The response could not be decoded.
    Decode,
    /// The vector database client reported a failure.
    Store,
}

impl ErrorKind {
    /// Status code carried by a remote error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ErrorKind::Remote { status } => Some(*status),
            _ => None,
        }
    }
}

/// A normalized failure from an external system.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ServiceError {
    /// What went wrong.
    pub kind: ErrorKind,
    /// Human-readable description.
    pub message: String,
}

impl ServiceError {
    /// Create an error of the given kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Create a configuration error for a missing credential.
    pub fn not_configured(credential: &str) -> Self {
        Self::new(
            ErrorKind::Configuration,
            format!("{} not configured", credential),
        )
    }

    /// Create an error for a request rejected before it was sent.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidRequest, msg)
    }

    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, msg)
    }

    /// Create a remote error for a non-success status.
    pub fn remote(status: u16, msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Remote { status }, msg)
    }

    /// Create a decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Decode, msg)
    }

    /// Create a store error.
    pub fn store(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Store, msg)
    }
}

impl Serialize for ServiceError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("error", &self.message)?;
        map.end()
    }
}

/// Success-or-error wrapper returned by every outward-facing client call.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    /// The call succeeded with a decoded payload.
    Success(T),
    /// The call failed; the error has already been logged by the client.
    Failure(ServiceError),
}

impl<T> Envelope<T> {
    /// Returns `true` if the call succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Success(_))
    }

    /// Returns `true` if the call failed.
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Borrow the payload, if any.
    pub fn success(&self) -> Option<&T> {
        match self {
            Envelope::Success(value) => Some(value),
            Envelope::Failure(_) => None,
        }
    }

    /// Borrow the error, if any.
    pub fn error(&self) -> Option<&ServiceError> {
        match self {
            Envelope::Success(_) => None,
            Envelope::Failure(err) => Some(err),
        }
    }

    /// Convert into a standard `Result`.
    pub fn into_result(self) -> Result<T, ServiceError> {
        match self {
            Envelope::Success(value) => Ok(value),
            Envelope::Failure(err) => Err(err),
        }
    }

    /// Map the success payload, leaving failures untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        match self {
            Envelope::Success(value) => Envelope::Success(f(value)),
            Envelope::Failure(err) => Envelope::Failure(err),
        }
    }
}

impl<T> From<Result<T, ServiceError>> for Envelope<T> {
    fn from(result: Result<T, ServiceError>) -> Self {
        match result {
            Ok(value) => Envelope::Success(value),
            Err(err) => Envelope::Failure(err),
        }
    }
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Envelope::Success(value) => value.serialize(serializer),
            Envelope::Failure(err) => err.serialize(serializer),
        }
    }
}

impl<T: Serialize> Envelope<T> {
    /// Render the envelope as JSON: the payload on success, `{"error": ...}` on failure.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|e| json!({ "error": e.to_string() }))
    }
}
