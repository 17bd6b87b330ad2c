//! Monotone threshold boundary searches.
//!
//! Two independent one-sided scans over the same prediction array:
//! recall-first from the permissive end (τ = 0 upward) and
//! precision-first from the strict end (τ = 1 downward). Both assume
//! well-behaved scores: recall non-increasing in τ, precision
//! non-decreasing in τ.

use tracing::debug;

use bmcs_common::{Result, RetrainError, ScoredPrediction};

use crate::metrics::precision_recall;

/// A threshold with the precision/recall measured at it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatingPoint {
    pub threshold: f64,
    pub precision: f64,
    pub recall: f64,
}

/// Scan τ upward from 0 by `step` while recall stays strictly above
/// `target_recall`; return the last point before recall crossed.
///
/// Scores live in [0, 1], so the scan is capped one step past 1.0 — by
/// then nothing is predicted positive and recall has hit 0.
pub fn find_recall_threshold(
    predictions: &[ScoredPrediction],
    target_recall: f64,
    step: f64,
) -> OperatingPoint {
    let mut threshold = 0.0;
    let (mut precision, mut recall) = precision_recall(predictions, threshold);
    let mut last = OperatingPoint {
        threshold,
        precision,
        recall,
    };

    while recall > target_recall && threshold <= 1.0 + step {
        last = OperatingPoint {
            threshold,
            precision,
            recall,
        };
        threshold += step;
        let (p, r) = precision_recall(predictions, threshold);
        precision = p;
        recall = r;
    }

    debug!(
        threshold = last.threshold,
        precision = last.precision,
        recall = last.recall,
        "recall-first boundary"
    );
    last
}

/// Scan τ downward from 1 by `step` while precision stays strictly above
/// `target_precision`; return the last point before precision crossed.
///
/// Capped at τ = 0: below that every prediction is positive and precision
/// is pinned at the base rate, so continuing cannot cross the target.
pub fn find_precision_threshold(
    predictions: &[ScoredPrediction],
    target_precision: f64,
    step: f64,
) -> OperatingPoint {
    let mut threshold = 1.0;
    let (mut precision, mut recall) = precision_recall(predictions, threshold);
    let mut last = OperatingPoint {
        threshold,
        precision,
        recall,
    };

    while precision > target_precision && threshold > 0.0 {
        last = OperatingPoint {
            threshold,
            precision,
            recall,
        };
        threshold -= step;
        let (p, r) = precision_recall(predictions, threshold);
        precision = p;
        recall = r;
    }

    debug!(
        threshold = last.threshold,
        precision = last.precision,
        recall = last.recall,
        "precision-first boundary"
    );
    last
}

/// Run both boundary searches for one model's predictions.
///
/// Returns `(recall_point, precision_point)`. Targets must lie in (0, 1)
/// and the step must be positive; anything else is a configuration error.
pub fn calibrate(
    predictions: &[ScoredPrediction],
    target_recall: f64,
    target_precision: f64,
    step: f64,
) -> Result<(OperatingPoint, OperatingPoint)> {
    if !(step > 0.0) {
        return Err(RetrainError::Config(format!(
            "threshold step must be positive, got {step}"
        )));
    }
    for (name, target) in [("recall", target_recall), ("precision", target_precision)] {
        if !(0.0..1.0).contains(&target) || target == 0.0 {
            return Err(RetrainError::Config(format!(
                "target {name} must lie in (0, 1), got {target}"
            )));
        }
    }

    let recall_point = find_recall_threshold(predictions, target_recall, step);
    let precision_point = find_precision_threshold(predictions, target_precision, step);
    Ok((recall_point, precision_point))
}
