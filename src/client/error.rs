//! Dashboard client errors

use thiserror::Error;

/// Errors raised while talking to the Dashboard API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request/response error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("Dashboard API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Joined `errors` array, or the raw body when it had none
        message: String,
    },

    /// The API key was rejected (401/403)
    #[error("Authentication failed ({status}): {message}")]
    Authentication {
        /// HTTP status code
        status: u16,
        /// Error text returned by the API
        message: String,
    },

    /// The addressed object does not exist (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// The organization's request budget is exhausted (429)
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// The response body did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The request could not be built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Classify a non-success response.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => Self::Authentication { status, message },
            404 => Self::NotFound(message),
            429 => Self::RateLimited(message),
            _ => Self::Api { status, message },
        }
    }

    /// HTTP status carried by this error, when there is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::Authentication { status, .. } => Some(*status),
            Self::NotFound(_) => Some(404),
            Self::RateLimited(_) => Some(429),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            Self::Decode(_) | Self::InvalidRequest(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_classification() {
        assert!(matches!(
            ClientError::from_status(401, "bad key".into()),
            ClientError::Authentication { status: 401, .. }
        ));
        assert!(matches!(
            ClientError::from_status(404, "gone".into()),
            ClientError::NotFound(_)
        ));
        assert!(matches!(
            ClientError::from_status(429, "slow down".into()),
            ClientError::RateLimited(_)
        ));
        assert!(matches!(
            ClientError::from_status(500, "oops".into()),
            ClientError::Api { status: 500, .. }
        ));
    }

    #[test]
    fn test_status_roundtrip() {
        assert_eq!(ClientError::from_status(403, String::new()).status(), Some(403));
        assert_eq!(ClientError::NotFound("x".into()).status(), Some(404));
        assert_eq!(ClientError::InvalidRequest("x".into()).status(), None);
    }

    #[test]
    fn test_display() {
        let err = ClientError::from_status(400, "Invalid serial".into());
        assert_eq!(err.to_string(), "Dashboard API error (400): Invalid serial");
    }
}
