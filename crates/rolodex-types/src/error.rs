use serde::{Deserialize, Serialize};
use std::fmt;

/// Failure reported by the remote contact store or the transport in front of it.
///
/// Every gateway failure collapses into this one kind; `message` is what the
/// user sees in the error slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteError {
    pub message: String,
    /// HTTP status when the store answered, `None` for transport/decode failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl RemoteError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: Some(status),
        }
    }

    /// Fallback wording when the store's error body carries no message
    pub fn from_status(status: u16) -> Self {
        Self::with_status(status, format!("Request failed with status code {}", status))
    }

    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for RemoteError {}

/// Shape of the JSON body the contact store returns alongside a failure status
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// Decode a failure body, falling back to the status wording when it is
    /// not JSON or has no `message`
    pub fn into_remote_error(status: u16, body: &str) -> RemoteError {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(ErrorBody {
                message: Some(message),
            }) if !message.is_empty() => RemoteError::with_status(status, message),
            _ => RemoteError::from_status(status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_message_is_used() {
        let err = ErrorBody::into_remote_error(404, r#"{"message":"Contact not found"}"#);
        assert_eq!(err.message, "Contact not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_error_body_without_message_falls_back_to_status() {
        let err = ErrorBody::into_remote_error(500, "<html>oops</html>");
        assert_eq!(err.to_string(), "Request failed with status code 500");
        assert_eq!(err.status, Some(500));

        let err = ErrorBody::into_remote_error(400, r#"{"error":"bad"}"#);
        assert_eq!(err.to_string(), "Request failed with status code 400");
    }
}
