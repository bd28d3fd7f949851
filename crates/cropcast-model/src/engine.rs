//! The per-request pipeline over the artifacts loaded at startup.

use std::sync::Arc;

use cropcast_core::{FeatureRecord, assemble};

use crate::error::InferenceError;
use crate::labels::resolve_label;
use crate::predictor::{Predictor, RawOutput};
use crate::scaler::{ScalerChain, ScalerOrder};

/// Outcome of one prediction, plus the transform metadata the response
/// reports back.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub raw: RawOutput,
    pub label: Option<String>,
    pub scaler_order: ScalerOrder,
    /// Artifact presence at startup, not per-request application.
    pub std_loaded: bool,
    pub min_max_loaded: bool,
}

/// Immutable inference context: the model and scaler chain, built once at
/// startup and shared read-only by every request.
pub struct Engine {
    model: Arc<dyn Predictor>,
    scalers: ScalerChain,
}

impl Engine {
    pub fn new(model: Arc<dyn Predictor>, scalers: ScalerChain) -> Self {
        Self { model, scalers }
    }

    pub fn scalers(&self) -> &ScalerChain {
        &self.scalers
    }

    /// Assemble, scale, predict, resolve.
    ///
    /// Only the model call can fail; assembly and scaling are total, and
    /// an unresolved label is an ordinary `None`.
    pub fn predict(&self, record: &FeatureRecord) -> Result<Prediction, InferenceError> {
        let vector = assemble(record);
        let vector = self.scalers.apply(&vector);
        let raw = self.model.predict_row(vector.as_slice())?;
        let label = resolve_label(&raw, self.model.as_ref());

        Ok(Prediction {
            raw,
            label,
            scaler_order: self.scalers.order(),
            std_loaded: self.scalers.std_loaded(),
            min_max_loaded: self.scalers.min_max_loaded(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predictor::ClassValue;
    use crate::scaler::AffineScaler;

    /// Model that records nothing and echoes its configured output, but
    /// checks the row it is given.
    #[derive(Debug)]
    struct Probe {
        expect_row: Option<Vec<f64>>,
        output: RawOutput,
        classes: Option<Vec<ClassValue>>,
    }

    impl Predictor for Probe {
        fn predict_row(&self, row: &[f64]) -> Result<RawOutput, InferenceError> {
            if let Some(expected) = &self.expect_row {
                assert_eq!(row, expected.as_slice(), "model saw an unexpected row");
            }
            Ok(self.output.clone())
        }

        fn class_values(&self) -> Option<&[ClassValue]> {
            self.classes.as_deref()
        }
    }

    fn full_record() -> FeatureRecord {
        FeatureRecord {
            nitrogen: Some(90.0),
            phosphorus: Some(42.0),
            potassium: Some(43.0),
            temperature: Some(20.8),
            humidity: Some(82.0),
            ph: Some(6.5),
            rainfall: Some(202.9),
            ..Default::default()
        }
    }

    #[test]
    fn no_scalers_passes_raw_vector_to_model() {
        let model = Probe {
            expect_row: Some(vec![90.0, 42.0, 43.0, 20.8, 82.0, 6.5, 202.9]),
            output: RawOutput::Text("rice".into()),
            classes: None,
        };
        let engine = Engine::new(Arc::new(model), ScalerChain::empty(ScalerOrder::default()));

        let prediction = engine.predict(&full_record()).unwrap();
        assert_eq!(prediction.raw, RawOutput::Text("rice".into()));
        assert_eq!(prediction.label, Some("rice".into()));
        assert_eq!(prediction.scaler_order, ScalerOrder::StdThenMinMax);
        assert!(!prediction.std_loaded);
        assert!(!prediction.min_max_loaded);
    }

    #[test]
    fn scaled_vector_reaches_model() {
        let std = AffineScaler::standard(vec![0.0; 7], vec![2.0; 7]);
        let chain = ScalerChain::new(Some(Box::new(std)), None, ScalerOrder::StdThenMinMax);
        let model = Probe {
            expect_row: Some(vec![45.0, 21.0, 21.5, 10.4, 41.0, 3.25, 101.45]),
            output: RawOutput::Number(1.0),
            classes: None,
        };
        let engine = Engine::new(Arc::new(model), chain);

        let prediction = engine.predict(&full_record()).unwrap();
        assert!(prediction.std_loaded);
        assert!(!prediction.min_max_loaded);
        assert_eq!(prediction.label, None);
    }

    #[test]
    fn numeric_output_resolves_through_class_list() {
        let model = Probe {
            expect_row: None,
            output: RawOutput::Number(2.0),
            classes: Some(
                ["rice", "maize", "jute"]
                    .into_iter()
                    .map(|s| ClassValue::Text(s.to_string()))
                    .collect(),
            ),
        };
        let engine = Engine::new(Arc::new(model), ScalerChain::empty(ScalerOrder::default()));

        let prediction = engine.predict(&FeatureRecord::default()).unwrap();
        assert_eq!(prediction.raw, RawOutput::Number(2.0));
        assert_eq!(prediction.label, Some("jute".into()));
    }
}
