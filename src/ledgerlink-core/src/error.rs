use thiserror::Error;

/// Errors surfaced by the validator client.
///
/// Nothing in this crate retries; every variant reaches the caller from the
/// point where it was detected. A 404 is not an error at all and shows up as
/// `Ok(None)` from the store queries.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A required argument was missing or invalid. Raised before any I/O.
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// The connection to the validator failed.
    #[error("transport error: {0}")]
    Transport(String),

    /// A 400 response carrying a `type: message` body.
    #[error("validator rejected request ({status_code}): {}: {}",
        .error_type_message.as_deref().unwrap_or("<none>"),
        .error_message.as_deref().unwrap_or("<none>"))]
    Application {
        status_code: u16,
        error_type_message: Option<String>,
        error_message: Option<String>,
    },

    /// Any other unsuccessful status.
    #[error("Invalid Request: {0}")]
    Status(u16),

    /// A successful response lacked the fields needed to finish the call.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The response body did not match its declared content type.
    #[error("failed to decode response body: {0}")]
    Decode(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    pub fn precondition(message: impl Into<String>) -> Self {
        ClientError::Precondition(message.into())
    }

    pub fn is_precondition(&self) -> bool {
        matches!(self, ClientError::Precondition(_))
    }

    /// HTTP status attached to the error, if it came from a response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::Application { status_code, .. } => Some(*status_code),
            ClientError::Status(code) => Some(*code),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_is_exposed() {
        assert_eq!(ClientError::Status(503).status_code(), Some(503));
        let err = ClientError::Application {
            status_code: 400,
            error_type_message: Some("TypeA".to_string()),
            error_message: None,
        };
        assert_eq!(err.status_code(), Some(400));
        assert_eq!(ClientError::precondition("x").status_code(), None);
    }

    #[test]
    fn test_generic_failure_display() {
        assert_eq!(ClientError::Status(500).to_string(), "Invalid Request: 500");
    }
}
