//! Feature schema for crop recommendation inference.
//!
//! The model was trained on seven features in a fixed order; every consumer
//! downstream (scalers, predictor) assumes that order. Changing it means
//! retraining all persisted artifacts.

use serde::{Deserialize, Serialize};

/// Number of features the model was trained on.
pub const FEATURE_COUNT: usize = 7;

/// Trained feature order. Scalers and the model both assume it.
pub const FEATURE_ORDER: [&str; FEATURE_COUNT] = [
    "N",
    "P",
    "K",
    "temperature",
    "humidity",
    "ph",
    "rainfall",
];

/// One inbound prediction request: soil and weather measurements.
///
/// Every field is independently optional. `soilN`/`soilP`/`soilK` are
/// aliases some frontends send instead of `N`/`P`/`K`; the direct field
/// wins when both are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureRecord {
    #[serde(rename = "N")]
    pub nitrogen: Option<f64>,
    #[serde(rename = "P")]
    pub phosphorus: Option<f64>,
    #[serde(rename = "K")]
    pub potassium: Option<f64>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub ph: Option<f64>,
    pub rainfall: Option<f64>,
    #[serde(rename = "soilN")]
    pub soil_nitrogen: Option<f64>,
    #[serde(rename = "soilP")]
    pub soil_phosphorus: Option<f64>,
    #[serde(rename = "soilK")]
    pub soil_potassium: Option<f64>,
}

/// Dense feature row in trained order, always exactly [`FEATURE_COUNT`] wide.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.0
    }

    /// Row width, identical for every vector in the system.
    pub fn width(&self) -> usize {
        FEATURE_COUNT
    }
}

/// Map a sparse record into a dense vector in [`FEATURE_ORDER`].
///
/// `N`/`P`/`K` fall back to their `soil*` alias, then to `0.0`; the four
/// weather fields fall back straight to `0.0`. An incomplete record is
/// never rejected. Pure and total.
pub fn assemble(record: &FeatureRecord) -> FeatureVector {
    FeatureVector([
        record.nitrogen.or(record.soil_nitrogen).unwrap_or(0.0),
        record.phosphorus.or(record.soil_phosphorus).unwrap_or(0.0),
        record.potassium.or(record.soil_potassium).unwrap_or(0.0),
        record.temperature.unwrap_or(0.0),
        record.humidity.unwrap_or(0.0),
        record.ph.unwrap_or(0.0),
        record.rainfall.unwrap_or(0.0),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assemble_full_record() {
        let record = FeatureRecord {
            nitrogen: Some(90.0),
            phosphorus: Some(42.0),
            potassium: Some(43.0),
            temperature: Some(20.8),
            humidity: Some(82.0),
            ph: Some(6.5),
            rainfall: Some(202.9),
            ..Default::default()
        };

        let vector = assemble(&record);
        assert_eq!(
            vector.as_slice(),
            &[90.0, 42.0, 43.0, 20.8, 82.0, 6.5, 202.9]
        );
    }

    #[test]
    fn assemble_empty_record_zero_fills() {
        let vector = assemble(&FeatureRecord::default());
        assert_eq!(vector.as_slice(), &[0.0; FEATURE_COUNT]);
        assert_eq!(vector.width(), 7);
    }

    #[test]
    fn soil_aliases_fill_missing_npk() {
        let record = FeatureRecord {
            soil_nitrogen: Some(12.0),
            soil_phosphorus: Some(34.0),
            soil_potassium: Some(56.0),
            ph: Some(7.0),
            ..Default::default()
        };

        let vector = assemble(&record);
        assert_eq!(vector.as_slice(), &[12.0, 34.0, 56.0, 0.0, 0.0, 7.0, 0.0]);
    }

    #[test]
    fn direct_field_wins_over_alias() {
        let record = FeatureRecord {
            nitrogen: Some(90.0),
            soil_nitrogen: Some(11.0),
            ..Default::default()
        };

        let vector = assemble(&record);
        assert_eq!(vector.as_slice()[0], 90.0);
    }

    #[test]
    fn assemble_is_deterministic() {
        let record = FeatureRecord {
            potassium: Some(43.0),
            rainfall: Some(100.0),
            ..Default::default()
        };

        assert_eq!(assemble(&record), assemble(&record));
    }

    #[test]
    fn record_deserializes_wire_names() {
        let record: FeatureRecord = serde_json::from_str(
            r#"{"N": 90, "soilK": 43, "temperature": 20.8, "ph": 6.5}"#,
        )
        .unwrap();

        assert_eq!(record.nitrogen, Some(90.0));
        assert_eq!(record.soil_potassium, Some(43.0));
        assert_eq!(record.phosphorus, None);

        let vector = assemble(&record);
        assert_eq!(vector.as_slice(), &[90.0, 0.0, 43.0, 20.8, 0.0, 6.5, 0.0]);
    }

    #[test]
    fn feature_order_matches_training_layout() {
        assert_eq!(FEATURE_ORDER.len(), FEATURE_COUNT);
        assert_eq!(FEATURE_ORDER[0], "N");
        assert_eq!(FEATURE_ORDER[6], "rainfall");
    }
}
