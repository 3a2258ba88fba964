//! Error taxonomy for the deck service.

/// Main error type for the deck service.
///
/// `Config` and `Generation` always reach the caller. `ExternalService` is
/// produced inside the HTTP-backed providers and replaced there with
/// fallback text, so request handlers never see it.
#[derive(Debug, thiserror::Error)]
pub enum DeckError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("could not generate a valid deck after {attempts} attempts")]
    Generation { attempts: u32 },

    #[error("external service error: {0}")]
    ExternalService(String),

    #[error("invalid request: {0}")]
    Request(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, DeckError>;
