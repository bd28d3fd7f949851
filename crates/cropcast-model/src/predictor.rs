//! The model seam: a narrow capability trait plus the native artifact
//! implementation.
//!
//! Different trained estimators return predictions in different
//! conventions — some emit the class value directly, some a numeric code —
//! so [`RawOutput`] carries either and the label resolver decides later.

use serde::{Deserialize, Serialize};

use crate::error::InferenceError;

/// Single value produced by one prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawOutput {
    Number(f64),
    Text(String),
}

impl RawOutput {
    /// Interpret the output as a class index: a non-negative,
    /// integer-valued number. Anything else is not an index.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            RawOutput::Number(n) if n.is_finite() && *n >= 0.0 && n.fract() == 0.0 => {
                Some(*n as usize)
            }
            _ => None,
        }
    }
}

/// One entry of a trained class list. Real estimators persist either
/// string labels or numeric codes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassValue {
    Number(f64),
    Text(String),
}

/// Capability interface for the loaded model artifact.
///
/// The pipeline never inspects the artifact beyond these two operations.
pub trait Predictor: Send + Sync + std::fmt::Debug {
    /// Run single-row prediction over a feature row in trained order.
    ///
    /// Any incompatibility between the row and the artifact (width
    /// mismatch, inconsistent parameters, numeric blowup) is an
    /// [`InferenceError`] — the one per-request failure in the system.
    fn predict_row(&self, row: &[f64]) -> Result<RawOutput, InferenceError>;

    /// Ordered class list, if the estimator carries one.
    fn class_values(&self) -> Option<&[ClassValue]>;
}

/// Linear (argmax-of-affine-scores) classifier persisted as plain
/// coefficient arrays.
///
/// With a class list the prediction is the class value at the best score,
/// mirroring how sklearn's `predict` maps into `classes_`; without one the
/// best index itself is the output.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearClassifier {
    /// One coefficient row per class, each as wide as the feature vector.
    coefficients: Vec<Vec<f64>>,
    /// One intercept per class.
    intercepts: Vec<f64>,
    /// Optional trained class list, same length as `coefficients`.
    #[serde(default)]
    classes: Option<Vec<ClassValue>>,
}

impl LinearClassifier {
    pub fn new(
        coefficients: Vec<Vec<f64>>,
        intercepts: Vec<f64>,
        classes: Option<Vec<ClassValue>>,
    ) -> Self {
        Self {
            coefficients,
            intercepts,
            classes,
        }
    }

    /// Feature width the classifier was trained on.
    pub fn input_width(&self) -> usize {
        self.coefficients.first().map_or(0, Vec::len)
    }

    fn check_consistent(&self) -> Result<(), InferenceError> {
        let n_classes = self.coefficients.len();
        if n_classes == 0 {
            return Err(InferenceError::MalformedModel(
                "no coefficient rows".into(),
            ));
        }
        let width = self.input_width();
        if self.coefficients.iter().any(|c| c.len() != width) {
            return Err(InferenceError::MalformedModel(
                "ragged coefficient rows".into(),
            ));
        }
        if self.intercepts.len() != n_classes {
            return Err(InferenceError::MalformedModel(format!(
                "{} intercepts for {n_classes} classes",
                self.intercepts.len()
            )));
        }
        if let Some(classes) = &self.classes
            && classes.len() != n_classes
        {
            return Err(InferenceError::MalformedModel(format!(
                "{} class values for {n_classes} coefficient rows",
                classes.len()
            )));
        }
        Ok(())
    }
}

impl Predictor for LinearClassifier {
    fn predict_row(&self, row: &[f64]) -> Result<RawOutput, InferenceError> {
        self.check_consistent()?;

        let expected = self.input_width();
        if row.len() != expected {
            return Err(InferenceError::ShapeMismatch {
                expected,
                got: row.len(),
            });
        }

        let mut best_index = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (index, (coefs, intercept)) in
            self.coefficients.iter().zip(&self.intercepts).enumerate()
        {
            let score: f64 =
                intercept + coefs.iter().zip(row).map(|(c, x)| c * x).sum::<f64>();
            if !score.is_finite() {
                return Err(InferenceError::NonFiniteScore);
            }
            if score > best_score {
                best_score = score;
                best_index = index;
            }
        }

        match &self.classes {
            Some(classes) => Ok(match &classes[best_index] {
                ClassValue::Text(label) => RawOutput::Text(label.clone()),
                ClassValue::Number(code) => RawOutput::Number(*code),
            }),
            None => Ok(RawOutput::Number(best_index as f64)),
        }
    }

    fn class_values(&self) -> Option<&[ClassValue]> {
        self.classes.as_deref()
    }
}
