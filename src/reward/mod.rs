//! Outcome reward scoring for verifiable tasks.
//!
//! Turns a model completion plus a ground truth into a binary score: extract
//! the final answer from each side using the data source's extraction rule,
//! normalize, and compare. Anything that fails extraction scores 0.0.

pub mod compare;
pub mod extract;

use serde_json::Value;

pub use compare::compare_pred_gt;
pub use extract::extract_by_source;

/// A ground truth as supplied by the dataset.
///
/// Some datasets store a bare answer string, others wrap it in a record with
/// a `ground_truth` field plus style metadata.
#[derive(Debug, Clone)]
pub enum GroundTruth {
    Text(String),
    Structured(Value),
}

impl GroundTruth {
    /// The answer text to compare against.
    fn as_text(&self) -> String {
        match self {
            GroundTruth::Text(s) => s.clone(),
            GroundTruth::Structured(v) => match v.get("ground_truth") {
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => String::new(),
            },
        }
    }
}

impl From<&str> for GroundTruth {
    fn from(s: &str) -> Self {
        GroundTruth::Text(s.to_string())
    }
}

/// Score one completion against its ground truth.
///
/// Both the completion and the ground truth go through the same per-source
/// extraction rule; if either side yields no answer the score is 0.0. The
/// `extra_info` metadata is accepted for interface compatibility with reward
/// managers that pass it, but no current rule consumes it.
pub fn compute_score(
    data_source: &str,
    completion: &str,
    ground_truth: &GroundTruth,
    _extra_info: Option<&Value>,
) -> f64 {
    let gt_text = ground_truth.as_text();

    let pred = extract_by_source(completion, data_source);
    let gt = extract_by_source(&gt_text, data_source);

    match (pred, gt) {
        (Some(pred), Some(gt)) => {
            if compare_pred_gt(&pred, &gt) {
                1.0
            } else {
                0.0
            }
        }
        _ => 0.0,
    }
}
