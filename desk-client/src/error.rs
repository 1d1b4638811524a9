//! Client error types

use reqwest::StatusCode;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response was received
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("{message}")]
    Api {
        status: StatusCode,
        message: String,
        /// Message taken from the response body, if the server sent one
        server_message: Option<String>,
    },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Message the server put in the error body (`message`, else `error`)
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { server_message, .. } => server_message.as_deref(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status(),
            _ => None,
        }
    }

    /// Most specific message available for display
    pub fn user_message(&self) -> String {
        self.server_message()
            .map(str::to_string)
            .unwrap_or_else(|| self.to_string())
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_preferred() {
        let err = ClientError::Api {
            status: StatusCode::BAD_REQUEST,
            message: "Request failed with status 400".into(),
            server_message: Some("Phone is invalid".into()),
        };
        assert_eq!(err.server_message(), Some("Phone is invalid"));
        assert_eq!(err.user_message(), "Phone is invalid");
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn test_user_message_falls_back_to_display() {
        let err = ClientError::Api {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Request failed with status 500".into(),
            server_message: None,
        };
        assert_eq!(err.server_message(), None);
        assert_eq!(err.user_message(), "Request failed with status 500");

        let err = ClientError::InvalidResponse("missing id".into());
        assert_eq!(err.user_message(), "Invalid response: missing id");
    }
}
