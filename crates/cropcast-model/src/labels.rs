//! Best-effort decoding of a raw prediction into a human-readable label.

use crate::predictor::{ClassValue, Predictor, RawOutput};

/// Resolve a raw prediction to a class label, if one can be determined.
///
/// Two independent rules, tried in order:
/// 1. A string output already is the label.
/// 2. A non-negative integer output indexes the model's class list; the
///    entry counts only if it is itself a string.
///
/// Everything else — no class list, fractional or negative output, index
/// out of range, numeric class entry — resolves to `None`. Total function;
/// an absent label is an ordinary branch, never an error.
pub fn resolve_label(raw: &RawOutput, model: &dyn Predictor) -> Option<String> {
    if let RawOutput::Text(label) = raw {
        return Some(label.clone());
    }

    let classes = model.class_values()?;
    let index = raw.as_index()?;
    match classes.get(index)? {
        ClassValue::Text(label) => Some(label.clone()),
        ClassValue::Number(_) => None,
    }
}
