//! Dataset file I/O.
//!
//! Datasets are gzip-compressed JSON arrays of article records, one file
//! per partition (train/val/test).

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use tracing::debug;

use bmcs_common::{Article, Result};

/// Write a dataset partition to a gzip JSON file.
pub fn save_dataset(path: &Path, articles: &[Article]) -> Result<()> {
    let file = File::create(path)?;
    let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
    serde_json::to_writer_pretty(&mut encoder, articles)?;
    encoder.finish()?;
    debug!(path = %path.display(), articles = articles.len(), "saved dataset");
    Ok(())
}

/// Read a dataset partition back from a gzip JSON file.
pub fn load_dataset(path: &Path) -> Result<Vec<Article>> {
    let file = File::open(path)?;
    let decoder = GzDecoder::new(BufReader::new(file));
    let articles: Vec<Article> = serde_json::from_reader(decoder)?;
    debug!(path = %path.display(), articles = articles.len(), "loaded dataset");
    Ok(articles)
}
