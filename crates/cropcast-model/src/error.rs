use std::path::PathBuf;

use thiserror::Error;

/// Failure while running the model on a request vector.
///
/// The only per-request error in the pipeline; everything else degrades
/// silently (zero-fill, scaler skip, absent label).
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("input width {got} does not match model width {expected}")]
    ShapeMismatch { expected: usize, got: usize },

    #[error("model artifact is inconsistent: {0}")]
    MalformedModel(String),

    #[error("non-finite score during prediction")]
    NonFiniteScore,
}

/// Failure while loading a persisted artifact at startup.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact not found: {0}")]
    NotFound(PathBuf),

    #[error("read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}
