use thiserror::Error;

/// Errors from the configuration surfaces of this crate.
///
/// Rendering itself is total and never returns an error.
#[derive(Debug, Error)]
pub enum MarkupError {
    #[error("unknown theme `{0}` (expected `dark` or `light`)")]
    InvalidTheme(String),

    #[error("unknown timestamp style `{0}` (expected one of t, T, d, D, f, F, R)")]
    InvalidTimestampStyle(String),

    #[error("invalid markup options: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T, E = MarkupError> = std::result::Result<T, E>;
