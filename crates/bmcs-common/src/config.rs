//! Pipeline configuration and the versioned partition policy.
//!
//! Earlier iterations of the pipeline repurposed mutable module-level
//! constants per "version"; here every knob is a plain immutable value
//! passed into the components that need it.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How duplicate PMIDs are resolved when merging corpus shards.
///
/// Both rules existed historically: the reporting-journal pipeline kept
/// the first occurrence, every later variant kept the last. The choice is
/// explicit rather than implied by the policy so the drift is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupRule {
    FirstWins,
    LastWins,
}

/// Which historical dataset-creation variant to run.
///
/// Each variant fixes the test-candidate predicate, the train-candidate
/// predicate, and what happens to shuffled test candidates left over
/// after the test/val slices are taken. Policies that
/// consult BmCS results read the metadata attached to each `Article`, so
/// `Corpus::attach_bmcs_results` must run before partitioning for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum PartitionPolicy {
    /// Test set drawn from the reporting journals of interest; every
    /// article not selected for test/val is pooled into training.
    ReportingJournals { reporting: HashSet<String> },
    /// Test set drawn from PMIDs the legacy tool scored confidently;
    /// training restricted to earlier, never-scored articles.
    BmcsPmids,
    /// Test set restricted to the selectively-indexed journal allowlist,
    /// excluding BmCS-scored PMIDs; known-noisy journals dropped
    /// corpus-wide.
    SelectiveJournals {
        allowlist: HashSet<String>,
        problematic: HashSet<String>,
    },
    /// Latest variant: training pool limited to articles whose label came
    /// from a human (directly, or via BmCS-uncertain review).
    ManualLabels {
        allowlist: HashSet<String>,
        problematic: HashSet<String>,
    },
}

impl PartitionPolicy {
    /// The dedup rule this variant used historically.
    pub fn default_dedup_rule(&self) -> DedupRule {
        match self {
            PartitionPolicy::ReportingJournals { .. } => DedupRule::FirstWins,
            _ => DedupRule::LastWins,
        }
    }

    /// Whether shuffled test candidates beyond the val slice flow back
    /// into the training pool instead of being discarded.
    pub fn folds_remainder_into_train(&self) -> bool {
        matches!(self, PartitionPolicy::ReportingJournals { .. })
    }

    /// Journals excluded corpus-wide as known-noisy, when the variant
    /// applies that exclusion.
    pub fn problematic_journals(&self) -> Option<&HashSet<String>> {
        match self {
            PartitionPolicy::SelectiveJournals { problematic, .. }
            | PartitionPolicy::ManualLabels { problematic, .. } => Some(problematic),
            _ => None,
        }
    }
}

/// Immutable settings for one retraining run.
///
/// `Default` yields the reference configuration of the production
/// pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrainConfig {
    /// Publication year articles must match to be test candidates.
    pub test_year: i32,
    pub test_size: usize,
    pub val_size: usize,
    /// Articles in a problematic journal completed before this year are
    /// dropped (data-quality regime change).
    pub problematic_cutoff_year: i32,
    /// Latest trusted BmCS processing / human completion date for the
    /// manual-label variant.
    pub max_processed_date: Option<NaiveDate>,
    /// RefTypes that disqualify an article from the corpus.
    pub excluded_ref_types: HashSet<String>,
    pub target_recall: f64,
    pub target_precision: f64,
    pub threshold_step: f64,
    /// Optional shuffle seed. The production pipeline shuffles from
    /// entropy; tests seed for reproducibility.
    pub shuffle_seed: Option<u64>,
    /// Overrides the policy's historical dedup rule when set.
    pub dedup_override: Option<DedupRule>,
}

impl Default for RetrainConfig {
    fn default() -> Self {
        Self {
            test_year: 2018,
            test_size: 30_000,
            val_size: 15_000,
            problematic_cutoff_year: 2015,
            max_processed_date: None,
            excluded_ref_types: default_excluded_ref_types(),
            target_recall: 0.995,
            target_precision: 0.97,
            threshold_step: 0.000_05,
            shuffle_seed: None,
            dedup_override: None,
        }
    }
}

impl RetrainConfig {
    /// Effective dedup rule for a policy: the explicit override if set,
    /// otherwise the policy's historical default.
    pub fn dedup_rule(&self, policy: &PartitionPolicy) -> DedupRule {
        self.dedup_override
            .unwrap_or_else(|| policy.default_dedup_rule())
    }
}

/// Derogatory cross-reference types: editorial bookkeeping, not content.
fn default_excluded_ref_types() -> HashSet<String> {
    [
        "CommentOn",
        "ErratumFor",
        "ExpressionOfConcernFor",
        "RepublishedFrom",
        "RetractionOf",
        "UpdateOf",
        "OriginalReportIn",
        "ReprintOf",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dedup_rules_match_history() {
        let reporting = PartitionPolicy::ReportingJournals {
            reporting: HashSet::new(),
        };
        let manual = PartitionPolicy::ManualLabels {
            allowlist: HashSet::new(),
            problematic: HashSet::new(),
        };
        assert_eq!(reporting.default_dedup_rule(), DedupRule::FirstWins);
        assert_eq!(manual.default_dedup_rule(), DedupRule::LastWins);
    }

    #[test]
    fn test_dedup_override_beats_policy_default() {
        let policy = PartitionPolicy::BmcsPmids;
        let mut config = RetrainConfig::default();
        assert_eq!(config.dedup_rule(&policy), DedupRule::LastWins);
        config.dedup_override = Some(DedupRule::FirstWins);
        assert_eq!(config.dedup_rule(&policy), DedupRule::FirstWins);
    }

    #[test]
    fn test_only_reporting_variant_folds_remainder() {
        let reporting = PartitionPolicy::ReportingJournals {
            reporting: HashSet::new(),
        };
        assert!(reporting.folds_remainder_into_train());
        assert!(!PartitionPolicy::BmcsPmids.folds_remainder_into_train());
    }

    #[test]
    fn test_reference_exclusion_set_has_eight_types() {
        let config = RetrainConfig::default();
        assert_eq!(config.excluded_ref_types.len(), 8);
        assert!(config.excluded_ref_types.contains("RetractionOf"));
        assert!(config.excluded_ref_types.contains("ReprintOf"));
    }
}
