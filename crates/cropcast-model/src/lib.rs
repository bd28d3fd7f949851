//! Inference pipeline over persisted crop-recommendation artifacts.
//!
//! Artifacts (one model, up to two fitted scalers) are loaded once at
//! startup and held read-only; everything per-request is a pure function
//! over them.

pub mod artifact;
pub mod engine;
pub mod error;
pub mod labels;
pub mod predictor;
pub mod scaler;

pub use artifact::{load_model, load_optional_scaler, load_scaler};
pub use engine::{Engine, Prediction};
pub use error::{ArtifactError, InferenceError};
pub use labels::resolve_label;
pub use predictor::{ClassValue, LinearClassifier, Predictor, RawOutput};
pub use scaler::{AffineScaler, FeatureTransform, ScalerChain, ScalerOrder};
