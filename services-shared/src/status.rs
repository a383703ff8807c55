//! Status envelope returned by vector store mutations.

use serde::{Deserialize, Serialize};

use crate::envelope::ServiceError;

/// Outcome reported in a [`StatusEnvelope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// `{status: "success"|"error", message}` result of a write operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEnvelope {
    pub status: Status,
    pub message: String,
}

impl StatusEnvelope {
    /// Create a success status with the given message.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            message: message.into(),
        }
    }

    /// Create an error status with the given message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}

impl From<ServiceError> for StatusEnvelope {
    fn from(err: ServiceError) -> Self {
        Self::error(err.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_serializes_lowercase() {
        let ok = StatusEnvelope::success("Vector added successfully");
        let failed = StatusEnvelope::from(ServiceError::store("collection not found"));

        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({ "status": "success", "message": "Vector added successfully" })
        );
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({ "status": "error", "message": "collection not found" })
        );
        assert!(!failed.is_success());
    }
}
