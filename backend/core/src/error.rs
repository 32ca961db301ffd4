use thiserror::Error;

/// Default text shown when the backend gives no usable error message.
pub const CONNECTION_ERROR_MESSAGE: &str = "Erreur de connexion à l'API";

/// Default text for a 2xx answer flagged `success: false` without an error.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Erreur inconnue";

/// Failure of a gateway call.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// No response was received, or its body could not be read.
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend answered with an error envelope or a non-2xx status.
    #[error("backend error ({status}): {}", .error.as_deref().unwrap_or(CONNECTION_ERROR_MESSAGE))]
    Backend {
        status: u16,
        error: Option<String>,
        suggestion: Option<String>,
    },

    /// A 2xx response whose body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// User-facing message: the backend's `error` text followed by its
    /// `suggestion`, if any. Without an `error`, a 2xx answer reads as an
    /// unknown error and anything else as a connection failure.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Backend {
                status,
                error,
                suggestion,
            } => {
                let fallback = if (200..300).contains(status) {
                    UNKNOWN_ERROR_MESSAGE
                } else {
                    CONNECTION_ERROR_MESSAGE
                };
                let mut msg = error
                    .clone()
                    .filter(|e| !e.trim().is_empty())
                    .unwrap_or_else(|| fallback.to_string());
                if let Some(hint) = suggestion.as_deref().filter(|s| !s.trim().is_empty()) {
                    msg.push_str("\n💡 ");
                    msg.push_str(hint);
                }
                msg
            }
            ApiError::Transport(_) | ApiError::Decode(_) => CONNECTION_ERROR_MESSAGE.to_string(),
        }
    }
}
