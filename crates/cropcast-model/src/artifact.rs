//! Loading persisted artifacts from disk.
//!
//! Artifacts are tagged JSON documents exported from the training run.
//! The model is mandatory; each scaler is independently optional and a
//! broken scaler file is tolerated (logged, then treated as not loaded).

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::ArtifactError;
use crate::predictor::{LinearClassifier, Predictor};
use crate::scaler::{AffineScaler, FeatureTransform};

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ModelFile {
    LinearClassifier(LinearClassifier),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ScalerFile {
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    MinMax { data_min: Vec<f64>, data_max: Vec<f64> },
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, ArtifactError> {
    if !path.exists() {
        return Err(ArtifactError::NotFound(path.to_path_buf()));
    }
    let bytes = std::fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the mandatory model artifact. Failure here is fatal at startup.
pub fn load_model(path: &Path) -> Result<Arc<dyn Predictor>, ArtifactError> {
    let ModelFile::LinearClassifier(model) = read_json(path)?;
    info!(
        path = %path.display(),
        width = model.input_width(),
        classes = model.class_values().map_or(0, <[_]>::len),
        "loaded model artifact"
    );
    Ok(Arc::new(model))
}

/// Load one fitted scaler artifact.
pub fn load_scaler(path: &Path) -> Result<AffineScaler, ArtifactError> {
    let scaler = match read_json(path)? {
        ScalerFile::Standard { mean, scale } => AffineScaler::standard(mean, scale),
        ScalerFile::MinMax { data_min, data_max } => AffineScaler::min_max(data_min, data_max),
    };
    Ok(scaler)
}

/// Load a scaler tolerantly: a missing or unusable file means the slot
/// stays empty and the chain reports it as not applied.
pub fn load_optional_scaler(path: &Path) -> Option<AffineScaler> {
    match load_scaler(path) {
        Ok(scaler) => {
            info!(
                path = %path.display(),
                width = scaler.expected_input_width(),
                "loaded scaler artifact"
            );
            Some(scaler)
        }
        Err(ArtifactError::NotFound(_)) => {
            debug!(path = %path.display(), "scaler artifact not present");
            None
        }
        Err(err) => {
            warn!(path = %path.display(), %err, "ignoring unusable scaler artifact");
            None
        }
    }
}
