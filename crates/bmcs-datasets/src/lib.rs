//! bmcs-datasets — Dataset construction for BmCS retraining.
//!
//! Covers the data half of the retraining core:
//! - Selective-indexing period parsing
//! - Article inclusion/exclusion predicates
//! - Corpus shard merging with explicit duplicate-PMID policy
//! - Auxiliary set loading (legacy results, journal lists)
//! - Train/validation/test partitioning
//! - Compressed dataset file I/O

pub mod corpus;
pub mod dataset;
pub mod filters;
pub mod inputs;
pub mod partition;
pub mod periods;
pub mod pipeline;

pub use corpus::Corpus;
pub use dataset::{load_dataset, save_dataset};
pub use partition::partition;
pub use periods::load_indexing_periods;
pub use pipeline::{build_datasets, BuildJob};
