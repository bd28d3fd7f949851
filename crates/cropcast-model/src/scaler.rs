//! Fitted feature scalers and the two-slot scaler chain.
//!
//! Scalers apply parameters fitted at training time; nothing here fits
//! anything. A scaler whose fitted width does not match the request vector
//! is skipped rather than applied — a mismatched artifact must never touch
//! the features the model sees.

use cropcast_core::FeatureVector;

/// Capability a fitted transform must expose to join the chain.
///
/// Replaces attribute probing on an opaque artifact: the chain asks for the
/// fitted width up front and applies the transform statelessly.
pub trait FeatureTransform: Send + Sync {
    /// Number of features the transform was fitted on.
    fn expected_input_width(&self) -> usize;

    /// Apply the fitted parameters to one row, in place.
    ///
    /// Callers guarantee `row.len() == self.expected_input_width()`.
    fn apply(&self, row: &mut [f64]);
}

/// Element-wise fitted transform: `x' = (x - offset) * scale`.
///
/// Both standardization and min-max scaling reduce to this form once
/// fitted.
#[derive(Debug, Clone, PartialEq)]
pub struct AffineScaler {
    offset: Vec<f64>,
    scale: Vec<f64>,
}

impl AffineScaler {
    /// Build from raw per-feature offset and scale. Lengths must match;
    /// the shorter of the two wins if they do not.
    pub fn from_parts(offset: Vec<f64>, scale: Vec<f64>) -> Self {
        let width = offset.len().min(scale.len());
        let mut offset = offset;
        let mut scale = scale;
        offset.truncate(width);
        scale.truncate(width);
        Self { offset, scale }
    }

    /// Standardization: `(x - mean) / std`. A zero std leaves the feature
    /// unscaled, matching how sklearn persists constant features.
    pub fn standard(mean: Vec<f64>, std: Vec<f64>) -> Self {
        let scale = std
            .iter()
            .map(|&s| if s == 0.0 { 1.0 } else { 1.0 / s })
            .collect();
        Self::from_parts(mean, scale)
    }

    /// Min-max scaling into `[0, 1]`: `(x - min) / (max - min)`.
    /// A degenerate feature (min == max) passes through shifted only.
    pub fn min_max(data_min: Vec<f64>, data_max: Vec<f64>) -> Self {
        let scale = data_min
            .iter()
            .zip(&data_max)
            .map(|(&lo, &hi)| {
                let range = hi - lo;
                if range == 0.0 { 1.0 } else { 1.0 / range }
            })
            .collect();
        Self::from_parts(data_min, scale)
    }
}

impl FeatureTransform for AffineScaler {
    fn expected_input_width(&self) -> usize {
        self.offset.len()
    }

    fn apply(&self, row: &mut [f64]) {
        for ((x, &offset), &scale) in row.iter_mut().zip(&self.offset).zip(&self.scale) {
            *x = (*x - offset) * scale;
        }
    }
}

/// Order the two scaler slots run in.
///
/// The chain is order-sensitive: standardize-then-rescale is numerically
/// different from rescale-then-standardize, so the order is part of the
/// trained contract and must match how the artifacts were fitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScalerOrder {
    #[default]
    StdThenMinMax,
    MinMaxThenStd,
}

impl ScalerOrder {
    /// Parse a configured order string. Anything unrecognized falls back
    /// to the default rather than failing.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "minmax_then_std" => Self::MinMaxThenStd,
            _ => Self::StdThenMinMax,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StdThenMinMax => "std_then_minmax",
            Self::MinMaxThenStd => "minmax_then_std",
        }
    }
}

/// The standardization and min-max slots, applied in a configured order.
///
/// Either slot may be empty (artifact never loaded). A present slot is
/// still skipped when its fitted width differs from the vector width; the
/// vector passes through that slot unchanged.
pub struct ScalerChain {
    std: Option<Box<dyn FeatureTransform>>,
    min_max: Option<Box<dyn FeatureTransform>>,
    order: ScalerOrder,
}

impl ScalerChain {
    pub fn new(
        std: Option<Box<dyn FeatureTransform>>,
        min_max: Option<Box<dyn FeatureTransform>>,
        order: ScalerOrder,
    ) -> Self {
        Self {
            std,
            min_max,
            order,
        }
    }

    /// Chain with both slots empty; every vector passes through unchanged.
    pub fn empty(order: ScalerOrder) -> Self {
        Self::new(None, None, order)
    }

    /// Run the configured slots over a vector. Each applied transform
    /// feeds the next; skipped slots leave the vector as-is.
    pub fn apply(&self, vector: &FeatureVector) -> FeatureVector {
        let mut out = vector.clone();
        let row = out.as_mut_slice();

        match self.order {
            ScalerOrder::StdThenMinMax => {
                apply_slot(self.std.as_deref(), row);
                apply_slot(self.min_max.as_deref(), row);
            }
            ScalerOrder::MinMaxThenStd => {
                apply_slot(self.min_max.as_deref(), row);
                apply_slot(self.std.as_deref(), row);
            }
        }

        out
    }

    /// Whether a standardization artifact was loaded at all — not whether
    /// it was applied to any particular vector.
    pub fn std_loaded(&self) -> bool {
        self.std.is_some()
    }

    /// Whether a min-max artifact was loaded at all.
    pub fn min_max_loaded(&self) -> bool {
        self.min_max.is_some()
    }

    pub fn order(&self) -> ScalerOrder {
        self.order
    }
}

fn apply_slot(slot: Option<&dyn FeatureTransform>, row: &mut [f64]) {
    if let Some(transform) = slot
        && transform.expected_input_width() == row.len()
    {
        transform.apply(row);
    }
}
