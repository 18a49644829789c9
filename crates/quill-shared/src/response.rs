//! Error bodies returned by the blog API.

use serde::{Deserialize, Serialize};

/// Text of the plain-text body sent when a write payload fails validation.
pub const INVALID_PAYLOAD_TEXT: &str = "Invalid Credentials";

/// Message sent for absent resources.
pub const NOT_FOUND_MESSAGE: &str = "Error found in that segment";

/// Message sent for storage and other internal failures.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Access failure body: `{"error": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    pub fn unauthorized() -> Self {
        Self::new("unauthorized")
    }

    pub fn forbidden() -> Self {
        Self::new("forbidden")
    }

    pub fn invalid_principal() -> Self {
        Self::new("invalid principal")
    }
}

/// Lookup or server failure body: `{"message": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn not_found() -> Self {
        Self::new(NOT_FOUND_MESSAGE)
    }

    pub fn internal_error() -> Self {
        Self::new(INTERNAL_ERROR_MESSAGE)
    }
}
