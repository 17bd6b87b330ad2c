//! Combined-model score construction.
//!
//! BmCS ships two complementary classifiers; the combined score for a
//! citation is the product of the voting-model and CNN probabilities.

use std::collections::HashMap;

use bmcs_common::{Result, RetrainError, ScoredPrediction};

/// Join CNN and voting predictions by PMID and multiply their scores.
///
/// Output order follows the CNN array. The ground-truth label is taken
/// from the voting side, matching the historical pipeline. A CNN PMID
/// with no voting counterpart is fatal: the two models score the same
/// validation set, so a mismatch means the inputs are inconsistent.
pub fn combined_predictions(
    cnn: &[ScoredPrediction],
    voting: &[ScoredPrediction],
) -> Result<Vec<ScoredPrediction>> {
    let voting_by_pmid: HashMap<u32, &ScoredPrediction> =
        voting.iter().map(|p| (p.pmid, p)).collect();

    let mut combined = Vec::with_capacity(cnn.len());
    for cnn_prediction in cnn {
        let voting_prediction = voting_by_pmid.get(&cnn_prediction.pmid).ok_or_else(|| {
            RetrainError::MalformedInput(format!(
                "no voting prediction for pmid {}",
                cnn_prediction.pmid
            ))
        })?;
        combined.push(ScoredPrediction {
            pmid: cnn_prediction.pmid,
            actual: voting_prediction.actual,
            score: voting_prediction.score * cnn_prediction.score,
        });
    }
    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(pmid: u32, actual: f64, score: f64) -> ScoredPrediction {
        ScoredPrediction {
            pmid,
            actual,
            score,
        }
    }

    #[test]
    fn test_scores_multiply_and_label_comes_from_voting() {
        let cnn = vec![prediction(1, 1.0, 0.5), prediction(2, 0.0, 0.4)];
        let voting = vec![prediction(2, 1.0, 0.5), prediction(1, 1.0, 0.8)];

        let combined = combined_predictions(&cnn, &voting).unwrap();
        assert_eq!(combined.len(), 2);
        assert_eq!(combined[0].pmid, 1);
        assert!((combined[0].score - 0.4).abs() < 1e-12);
        // Label from the voting side, not the CNN side.
        assert_eq!(combined[1].actual, 1.0);
        assert!((combined[1].score - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_missing_voting_pmid_is_fatal() {
        let cnn = vec![prediction(1, 1.0, 0.5)];
        let err = combined_predictions(&cnn, &[]).unwrap_err();
        assert!(matches!(err, RetrainError::MalformedInput(_)));
    }

    #[test]
    fn test_empty_inputs_combine_to_empty() {
        assert!(combined_predictions(&[], &[]).unwrap().is_empty());
    }
}
