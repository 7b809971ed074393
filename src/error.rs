//! Error type shared by the formatting helpers and the configuration layer.

/// Errors surfaced by the widget's pure helpers and config loading.
///
/// Rendering code never propagates these to the host: it logs and falls
/// back to a neutral label instead.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid color: {0}")]
    InvalidColor(String),
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ChatError>;
