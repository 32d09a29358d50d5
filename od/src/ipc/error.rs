//! IPC error types

use thiserror::Error;

/// Errors on the order server wire protocol
#[derive(Debug, Error)]
pub enum IpcError {
    #[error("Message too large: exceeds {limit} bytes")]
    MessageTooLarge { limit: usize },

    #[error("Empty message received")]
    EmptyMessage,

    #[error("Malformed message: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_too_large_message() {
        let err = IpcError::MessageTooLarge { limit: 4096 };
        assert!(err.to_string().contains("4096"));
    }

    #[test]
    fn test_malformed_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: IpcError = serde_err.into();
        assert!(matches!(err, IpcError::Malformed(_)));
        assert!(err.to_string().starts_with("Malformed message"));
    }
}
