//! Error types for mnemo.

use thiserror::Error;

/// Main error type for mnemo operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Similarity index error (unavailable index, bad vector, failed query).
    ///
    /// Index errors are propagated unchanged; the backend never swallows or
    /// retries them.
    #[error("Index error: {0}")]
    Index(#[from] crate::index::Error),

    /// Malformed input, rejected before touching the index.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// ONNX inference error.
    #[error("Inference error: {0}")]
    Inference(String),

    /// Tokenization error.
    #[error("Tokenization error: {0}")]
    Tokenization(#[from] tokenizers::Error),

    /// ONNX session error.
    #[error("ONNX session error: {0}")]
    Onnx(#[from] ort::Error),

    /// HuggingFace Hub error.
    #[error("HuggingFace Hub error: {0}")]
    HfHub(#[from] hf_hub::api::sync::ApiError),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The ort `SessionBuilder` methods return `ort::Error<SessionBuilder>`, which
/// the `?` operator cannot convert to `Error` in a single step. ort provides
/// the conversion to the default `ort::Error<()>`; route it into `Onnx`.
impl From<ort::Error<ort::session::builder::SessionBuilder>> for Error {
    fn from(err: ort::Error<ort::session::builder::SessionBuilder>) -> Self {
        Error::Onnx(err.into())
    }
}
