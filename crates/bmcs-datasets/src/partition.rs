//! Train/validation/test partitioning.
//!
//! Implements the split algorithm over a merged corpus:
//! corpus-wide exclusions, policy-selected test candidates, a uniform
//! shuffle, fixed-size test/val slices, and a policy-selected training
//! pool that explicitly excludes every placed PMID. Disjointness of the
//! three outputs is enforced by that exclusion, not by construction order.

use std::collections::HashSet;

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{info, warn};

use bmcs_common::{
    Article, DatasetSplit, PartitionPolicy, Result, RetrainConfig, RetrainError,
    BMCS_CONFIDENT_CUTOFF,
};

use crate::filters::{
    has_excluded_ref_type, is_bmcs_manual_labeled, is_manual_labeled, is_problematic_article,
};

/// Split a merged corpus into train/validation/test sets.
///
/// Fewer candidates than the configured sizes produce smaller sets and a
/// warning, never an error. Policies that consult BmCS metadata expect
/// `Corpus::attach_bmcs_results` to have run already.
pub fn partition(
    corpus: Vec<Article>,
    policy: &PartitionPolicy,
    config: &RetrainConfig,
) -> Result<DatasetSplit> {
    let mut rng = match config.shuffle_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    // ManualLabels is the only variant that cannot run without a cutoff.
    let manual_cutoff = match policy {
        PartitionPolicy::ManualLabels { .. } => {
            Some(config.max_processed_date.ok_or_else(|| {
                RetrainError::Config(
                    "ManualLabels policy requires max_processed_date".to_string(),
                )
            })?)
        }
        _ => None,
    };

    // Corpus-wide exclusions.
    let filtered: Vec<Article> = corpus
        .into_iter()
        .filter(|article| !has_excluded_ref_type(&config.excluded_ref_types, article))
        .filter(|article| match policy.problematic_journals() {
            Some(problematic) => {
                !is_problematic_article(problematic, config.problematic_cutoff_year, article)
            }
            None => true,
        })
        .collect();

    let (mut candidates, rest): (Vec<Article>, Vec<Article>) = filtered
        .into_iter()
        .partition(|article| is_test_candidate(policy, config, article));

    candidates.shuffle(&mut rng);

    let test_len = candidates.len().min(config.test_size);
    let val_len = (candidates.len() - test_len).min(config.val_size);
    let remainder: Vec<Article> = candidates.split_off(test_len + val_len);
    let val: Vec<Article> = candidates.split_off(test_len);
    let test = candidates;

    if test.len() < config.test_size {
        warn!(
            have = test.len(),
            want = config.test_size,
            "insufficient test candidates; producing a smaller test set"
        );
    }
    if val.len() < config.val_size {
        warn!(
            have = val.len(),
            want = config.val_size,
            "insufficient validation candidates; producing a smaller validation set"
        );
    }

    let placed: HashSet<u32> = test.iter().chain(val.iter()).map(|a| a.pmid).collect();

    // Unselected candidates rejoin the training pool only for policies
    // that fold the remainder back; the rest discard it.
    let mut pool = rest;
    if policy.folds_remainder_into_train() {
        pool.extend(remainder);
    }

    let mut train: Vec<Article> = pool
        .into_iter()
        .filter(|article| !placed.contains(&article.pmid))
        .filter(|article| is_train_candidate(policy, config, manual_cutoff, article))
        .collect();
    train.shuffle(&mut rng);

    info!(
        train = train.len(),
        val = val.len(),
        test = test.len(),
        "partitioned corpus"
    );
    Ok(DatasetSplit { train, val, test })
}

/// Whether the legacy tool scored this article at all.
fn in_bmcs_set(article: &Article) -> bool {
    article.bmcs_result.is_some()
}

fn is_test_candidate(
    policy: &PartitionPolicy,
    config: &RetrainConfig,
    article: &Article,
) -> bool {
    if article.pub_year != config.test_year {
        return false;
    }
    match policy {
        PartitionPolicy::ReportingJournals { reporting } => {
            reporting.contains(&article.journal_nlmid)
        }
        PartitionPolicy::BmcsPmids => article
            .bmcs_result
            .map_or(false, |result| result < BMCS_CONFIDENT_CUTOFF),
        PartitionPolicy::SelectiveJournals { allowlist, .. } => {
            allowlist.contains(&article.journal_nlmid) && !in_bmcs_set(article)
        }
        PartitionPolicy::ManualLabels { allowlist, .. } => {
            let within_cutoff = match (article.bmcs_processed_date, config.max_processed_date) {
                (Some(processed), Some(max)) => processed <= max,
                _ => true,
            };
            allowlist.contains(&article.journal_nlmid)
                && !in_bmcs_set(article)
                && within_cutoff
        }
    }
}

fn is_train_candidate(
    policy: &PartitionPolicy,
    config: &RetrainConfig,
    manual_cutoff: Option<NaiveDate>,
    article: &Article,
) -> bool {
    match policy {
        // Everything not placed in test/val is trainable, including the
        // shuffled-candidate remainder.
        PartitionPolicy::ReportingJournals { .. } => true,
        PartitionPolicy::BmcsPmids | PartitionPolicy::SelectiveJournals { .. } => {
            article.pub_year < config.test_year && !in_bmcs_set(article)
        }
        PartitionPolicy::ManualLabels { .. } => manual_cutoff.map_or(false, |max| {
            is_manual_labeled(article, max) || is_bmcs_manual_labeled(article, max)
        }),
    }
}
