use thiserror::Error;

/// Failures talking to the analysis service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error: {0}")]
    Status(u16),

    #[error("Malformed response: {0}")]
    Malformed(String),

    /// The service answered with `success: false`.
    #[error("{0}")]
    Service(String),
}

impl From<ClientError> for String {
    fn from(err: ClientError) -> Self {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(ClientError::Status(502).to_string(), "HTTP error: 502");
        assert_eq!(
            ClientError::Service("Code too long".to_string()).to_string(),
            "Code too long"
        );
        let message: String = ClientError::Network("offline".to_string()).into();
        assert_eq!(message, "Network error: offline");
    }
}
