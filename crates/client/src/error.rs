use labadmin_core::error::CoreError;

/// Errors from the lab REST client layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status code.
    #[error("Lab API HTTP error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The envelope carried a failure code.
    #[error("Lab API rejected the request ({code}): {msg}")]
    Api { code: i32, msg: String },

    /// The response body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Query parameters could not be encoded.
    #[error("Invalid query: {0}")]
    Query(String),

    /// Client configuration is invalid.
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Convenience alias for client results.
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// Text suitable for a user-facing notification.
    ///
    /// Envelope failures surface the backend's `msg` verbatim; everything
    /// else falls back to the error's display form.
    pub fn message(&self) -> String {
        match self {
            Self::Api { msg, .. } if !msg.is_empty() => msg.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_prefers_envelope_msg() {
        let err = ClientError::Api {
            code: 500,
            msg: "Username already exists".into(),
        };
        assert_eq!(err.message(), "Username already exists");
    }

    #[test]
    fn message_falls_back_to_display() {
        let err = ClientError::Status {
            status: 502,
            body: "bad gateway".into(),
        };
        assert_eq!(err.message(), "Lab API HTTP error (502): bad gateway");
    }
}
