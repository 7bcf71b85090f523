use thiserror::Error;

/// Result type alias for Dependency-Track operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the violation client
#[derive(Error, Debug)]
pub enum Error {
    /// The HTTP request could not be sent or its body could not be read
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The response body did not match the expected JSON shape
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Pagination did not reach an empty page within the configured bound
    #[error("No empty page returned within {max_pages} pages")]
    PageLimit { max_pages: u32 },

    /// Invalid configuration file, override or base URL
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether the request never produced a usable response (transport failure or non-2xx status)
    pub fn is_request(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Status { .. })
    }

    /// Whether a response arrived but could not be decoded
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_is_request_kind() {
        let err = Error::Status {
            status: reqwest::StatusCode::UNAUTHORIZED,
            body: "Unauthorized".into(),
        };
        assert!(err.is_request());
        assert!(!err.is_decode());
        assert_eq!(err.to_string(), "HTTP 401 Unauthorized: Unauthorized");
    }

    #[test]
    fn test_decode_error_kind() {
        let err: Error = serde_json::from_str::<Vec<u32>>("{").unwrap_err().into();
        assert!(err.is_decode());
        assert!(!err.is_request());
    }
}
