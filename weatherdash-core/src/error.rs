use thiserror::Error;

/// Why one leg of a fetch cycle failed.
///
/// Downstream only the [`FetchError::user_message`] survives; the variants
/// exist so providers and logs can tell the cases apart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Provider answered with a non-success status.
    #[error("request rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// Request never produced a response.
    #[error("network failure: {0}")]
    Network(String),

    /// Response arrived but its body could not be decoded.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl FetchError {
    /// The message shown to the user and stored in the store's `error` field.
    pub fn user_message(&self) -> &str {
        match self {
            FetchError::Rejected { message, .. } => message,
            FetchError::Network(message) | FetchError::Decode(message) => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_is_bare_text() {
        let err = FetchError::Rejected {
            status: 404,
            message: "city not found".into(),
        };
        assert_eq!(err.user_message(), "city not found");
        assert_eq!(err.to_string(), "request rejected with status 404: city not found");

        let err = FetchError::Network("connection refused".into());
        assert_eq!(err.user_message(), "connection refused");
    }
}
