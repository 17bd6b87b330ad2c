//! End-to-end dataset construction.
//!
//! Orchestrates one build:
//!   1. Load selective-indexing periods
//!   2. Stream each extracted shard through the corpus filter
//!      (selectively indexed, no excluded RefType)
//!   3. Merge shards by PMID under the configured dedup rule
//!   4. Attach legacy BmCS results, when provided
//!   5. Partition into train/val/test per the policy
//!   6. Write the three compressed dataset files
//!
//! Strict pipeline: every stage fully consumes its input before the next
//! starts, and nothing is written until partitioning has succeeded.

use std::path::PathBuf;

use tracing::info;

use bmcs_common::{DatasetSplit, PartitionPolicy, Result, RetrainConfig};

use crate::corpus::{load_corpus_shard, Corpus};
use crate::dataset::save_dataset;
use crate::filters::{has_excluded_ref_type, is_selectively_indexed};
use crate::inputs::load_bmcs_results;
use crate::partition::partition;
use crate::periods::load_indexing_periods;

/// File locations for one dataset build.
#[derive(Debug, Clone)]
pub struct BuildJob {
    /// Extracted shard files, in baseline order.
    pub shard_paths: Vec<PathBuf>,
    pub periods_path: PathBuf,
    /// Legacy BmCS results; required by BmCS-aware policies.
    pub bmcs_results_path: Option<PathBuf>,
    pub train_path: PathBuf,
    pub val_path: PathBuf,
    pub test_path: PathBuf,
}

/// Run the full dataset build and return the split that was written.
pub fn build_datasets(
    job: &BuildJob,
    policy: &PartitionPolicy,
    config: &RetrainConfig,
) -> Result<DatasetSplit> {
    info!(shards = job.shard_paths.len(), "building datasets");

    let periods = load_indexing_periods(&job.periods_path, false)?;
    let dedup_rule = config.dedup_rule(policy);

    let mut corpus = Corpus::new();
    for (shard_num, shard_path) in job.shard_paths.iter().enumerate() {
        let mut articles = load_corpus_shard(shard_path)?;
        articles.retain(|article| {
            is_selectively_indexed(&periods, article)
                && !has_excluded_ref_type(&config.excluded_ref_types, article)
        });
        corpus.merge(articles, dedup_rule);
        info!(
            shard = shard_num + 1,
            shards = job.shard_paths.len(),
            corpus = corpus.len(),
            "merged shard"
        );
    }

    if let Some(results_path) = &job.bmcs_results_path {
        let results = load_bmcs_results(results_path)?;
        corpus.attach_bmcs_results(&results);
    }

    let split = partition(corpus.into_articles(), policy, config)?;

    info!(
        train = split.train.len(),
        val = split.val.len(),
        test = split.test.len(),
        "saving datasets"
    );
    save_dataset(&job.train_path, &split.train)?;
    save_dataset(&job.val_path, &split.val)?;
    save_dataset(&job.test_path, &split.test)?;

    Ok(split)
}
