//! Data models for the retraining pipeline.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// BmCS result code meaning "uncertain" — the legacy tool could not decide
/// and the citation was routed to a human reviewer.
pub const BMCS_UNCERTAIN_RESULT: i32 = 2;

/// Legacy result codes below this value meant "confident" in the
/// reporting-journal era of the pipeline.
pub const BMCS_CONFIDENT_CUTOFF: i32 = 20;

/// One bibliographic record extracted from a MEDLINE baseline shard.
///
/// Created by the (out-of-scope) XML extraction stage. The only permitted
/// mutation after creation is attaching the BmCS processing metadata
/// (`bmcs_processed_date` / `bmcs_result`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Article {
    pub pmid: u32,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    /// Author affiliations, joined into a single string by extraction.
    pub affiliations: String,
    /// NLM unique ID of the publishing journal.
    pub journal_nlmid: String,
    pub pub_year: i32,
    pub date_completed: Option<NaiveDate>,
    pub date_revised: Option<NaiveDate>,
    /// Ground-truth label: was the article indexed for MEDLINE.
    pub is_indexed: bool,
    /// CommentsCorrections RefType values attached to the citation.
    pub ref_types: HashSet<String>,
    /// Date the legacy BmCS tool processed this citation, if it did.
    #[serde(default)]
    pub bmcs_processed_date: Option<NaiveDate>,
    /// Raw BmCS result code (0/1 = confident, 2 = uncertain).
    #[serde(default)]
    pub bmcs_result: Option<i32>,
}

impl Article {
    /// Year the citation was human-completed, falling back to the revision
    /// date when no completion date exists.
    pub fn completion_year(&self) -> Option<i32> {
        use chrono::Datelike;
        self.date_completed
            .or(self.date_revised)
            .map(|date| date.year())
    }
}

/// One selective-indexing date range for a journal.
///
/// `end_year` of `None` means the journal is still selectively indexed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexingPeriod {
    pub nlm_id: String,
    pub citation_subset: String,
    pub is_fully_indexed: bool,
    pub start_year: i32,
    pub end_year: Option<i32>,
}

/// Journal NLM ID → indexing periods, in input-file order.
pub type IndexingPeriodMap = HashMap<String, Vec<IndexingPeriod>>;

/// A model prediction paired with its ground-truth label.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPrediction {
    pub pmid: u32,
    /// Ground-truth label as 0.0 / 1.0.
    pub actual: f64,
    /// Predicted probability in [0, 1].
    pub score: f64,
}

/// One row of the BmCS legacy-results file.
#[derive(Debug, Clone, PartialEq)]
pub struct BmcsResult {
    pub processed_date: Option<NaiveDate>,
    pub result: i32,
}

/// PMID → legacy BmCS result.
pub type BmcsResultMap = HashMap<u32, BmcsResult>;

/// The three disjoint dataset partitions produced by one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct DatasetSplit {
    pub train: Vec<Article>,
    pub val: Vec<Article>,
    pub test: Vec<Article>,
}
