//! Binary precision/recall at a score threshold.

use bmcs_common::ScoredPrediction;

/// Compute (precision, recall) treating `score >= threshold` as positive.
///
/// With zero predicted positives the pair is defined as `(1.0, 0.0)`:
/// no predictions means no false alarms, which is the bias the
/// precision-first search relies on.
pub fn precision_recall(predictions: &[ScoredPrediction], threshold: f64) -> (f64, f64) {
    let mut true_positives = 0usize;
    let mut false_positives = 0usize;
    let mut false_negatives = 0usize;

    for prediction in predictions {
        let actual_positive = prediction.actual > 0.5;
        let predicted_positive = prediction.score >= threshold;
        match (actual_positive, predicted_positive) {
            (true, true) => true_positives += 1,
            (false, true) => false_positives += 1,
            (true, false) => false_negatives += 1,
            (false, false) => {}
        }
    }

    if true_positives + false_positives == 0 {
        return (1.0, 0.0);
    }

    let precision = true_positives as f64 / (true_positives + false_positives) as f64;
    let recall = if true_positives + false_negatives == 0 {
        0.0
    } else {
        true_positives as f64 / (true_positives + false_negatives) as f64
    };
    (precision, recall)
}
