//! Corpus assembly from extracted MEDLINE shards.
//!
//! Shards are gzip-compressed JSON objects with a top-level `articles`
//! array. The same PMID can appear in more than one shard; merging
//! resolves duplicates under an explicit [`DedupRule`] instead of relying
//! on insertion-order accidents.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use flate2::read::GzDecoder;
use serde::Deserialize;
use tracing::debug;

use bmcs_common::{Article, BmcsResultMap, DedupRule, Result};

#[derive(Debug, Deserialize)]
struct ShardFile {
    articles: Vec<Article>,
}

/// Read one extracted shard (gzip JSON, `{"articles": [...]}`).
pub fn load_corpus_shard(path: &Path) -> Result<Vec<Article>> {
    let file = File::open(path)?;
    let decoder = GzDecoder::new(BufReader::new(file));
    let shard: ShardFile = serde_json::from_reader(decoder)?;
    Ok(shard.articles)
}

/// The merged article corpus, unique by PMID.
///
/// Preserves first-insertion order so a seeded partition shuffle is
/// reproducible regardless of which shard won a duplicate.
#[derive(Debug, Default)]
pub struct Corpus {
    articles: Vec<Article>,
    index: HashMap<u32, usize>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a shard's articles into the corpus under the given rule.
    ///
    /// `FirstWins` keeps the already-present record for a duplicate PMID;
    /// `LastWins` replaces it in place (the record keeps its original
    /// corpus position either way).
    pub fn merge(&mut self, articles: Vec<Article>, rule: DedupRule) {
        let mut duplicates = 0usize;
        for article in articles {
            match self.index.get(&article.pmid) {
                Some(&slot) => {
                    duplicates += 1;
                    if rule == DedupRule::LastWins {
                        self.articles[slot] = article;
                    }
                }
                None => {
                    self.index.insert(article.pmid, self.articles.len());
                    self.articles.push(article);
                }
            }
        }
        if duplicates > 0 {
            debug!(duplicates, ?rule, "resolved duplicate PMIDs during merge");
        }
    }

    /// Attach legacy BmCS processing metadata to matching articles.
    ///
    /// This is the one permitted mutation of an `Article` after
    /// extraction; articles absent from the result map are untouched.
    pub fn attach_bmcs_results(&mut self, results: &BmcsResultMap) {
        let mut attached = 0usize;
        for article in &mut self.articles {
            if let Some(result) = results.get(&article.pmid) {
                article.bmcs_processed_date = result.processed_date;
                article.bmcs_result = Some(result.result);
                attached += 1;
            }
        }
        debug!(attached, "attached BmCS results to corpus");
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn into_articles(self) -> Vec<Article> {
        self.articles
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}
