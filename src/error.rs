use thiserror::Error;

/// Failures while loading or parsing a canvas document. Everything past
/// parsing is total; sequencing and layout never fail.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("canvas io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed canvas document: {0}")]
    Malformed(String),
}
