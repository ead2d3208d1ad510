use thiserror::Error;

/// Typed error hierarchy for hatchbot.
///
/// Use at module boundaries (API calls, config validation). Internal/leaf
/// functions can continue using `anyhow::Result` — the `Internal` variant
/// allows seamless conversion via the `?` operator.
#[derive(Debug, Error)]
pub enum HatchbotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl HatchbotError {
    /// Whether this error is likely transient (server-side or network trouble)
    /// rather than a mistake on our end.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Api { status, .. } => *status >= 500 || *status == 429,
            Self::Transport(_) => true,
            Self::Config(_) | Self::Internal(_) => false,
        }
    }
}
