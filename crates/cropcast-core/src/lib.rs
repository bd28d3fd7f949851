pub mod feature;

pub use feature::{FEATURE_COUNT, FEATURE_ORDER, FeatureRecord, FeatureVector, assemble};
