//! bmcs-common — Shared types, errors, and configuration used across the
//! BmCS retraining crates.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{DedupRule, PartitionPolicy, RetrainConfig};
pub use error::{Result, RetrainError};
pub use models::{
    Article, BmcsResult, BmcsResultMap, DatasetSplit, IndexingPeriod, IndexingPeriodMap,
    ScoredPrediction, BMCS_CONFIDENT_CUTOFF, BMCS_UNCERTAIN_RESULT,
};
