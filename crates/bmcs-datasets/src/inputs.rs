//! Loaders for the auxiliary input files.
//!
//! - BmCS legacy-results: gzip tab-delimited,
//!   columns `pmid, _, _, processed_date, result`
//! - Problematic journals / reporting journals: CSV, NLM ID in the first
//!   column
//! - Selectively-indexed journal allowlist: JSON array of NLM IDs

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::NaiveDate;
use flate2::read::GzDecoder;
use serde::Deserialize;
use tracing::debug;

use bmcs_common::{BmcsResult, BmcsResultMap, Result, RetrainError};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Load the legacy BmCS results file into a PMID-keyed map.
///
/// A missing processed-date field is tolerated (older exports lack it);
/// a malformed PMID, date, or result code is fatal.
pub fn load_bmcs_results(path: &Path) -> Result<BmcsResultMap> {
    let file = File::open(path)?;
    let decoder = GzDecoder::new(BufReader::new(file));
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(decoder);

    let mut results = BmcsResultMap::new();
    for (line_num, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() < 5 {
            return Err(RetrainError::MalformedInput(format!(
                "{}:{}: expected 5 tab-separated fields, found {}",
                path.display(),
                line_num + 1,
                record.len()
            )));
        }

        let pmid: u32 = record[0].trim().parse().map_err(|_| {
            RetrainError::MalformedInput(format!(
                "{}:{}: non-integer pmid {:?}",
                path.display(),
                line_num + 1,
                &record[0]
            ))
        })?;

        let date_field = record[3].trim();
        let processed_date = if date_field.is_empty() {
            None
        } else {
            Some(
                NaiveDate::parse_from_str(date_field, DATE_FORMAT).map_err(|_| {
                    RetrainError::MalformedInput(format!(
                        "{}:{}: bad processed date {:?}",
                        path.display(),
                        line_num + 1,
                        date_field
                    ))
                })?,
            )
        };

        let result: i32 = record[4].trim().parse().map_err(|_| {
            RetrainError::MalformedInput(format!(
                "{}:{}: non-integer result code {:?}",
                path.display(),
                line_num + 1,
                &record[4]
            ))
        })?;

        // Last occurrence of a pmid wins, matching the source export.
        results.insert(
            pmid,
            BmcsResult {
                processed_date,
                result,
            },
        );
    }

    debug!(results = results.len(), "loaded BmCS legacy results");
    Ok(results)
}

/// Load a journal-ID set from a CSV file (first column per row).
pub fn load_journal_id_csv(path: &Path) -> Result<HashSet<String>> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let mut ids = HashSet::new();
    for record in reader.records() {
        let record = record?;
        if let Some(id) = record.get(0) {
            let id = id.trim();
            if !id.is_empty() {
                ids.insert(id.to_string());
            }
        }
    }
    Ok(ids)
}

/// Load the known-noisy journal set.
pub fn load_problematic_journals(path: &Path) -> Result<HashSet<String>> {
    let ids = load_journal_id_csv(path)?;
    debug!(journals = ids.len(), "loaded problematic journals");
    Ok(ids)
}

/// Load the reporting-journals-of-interest set.
pub fn load_reporting_journals(path: &Path) -> Result<HashSet<String>> {
    let ids = load_journal_id_csv(path)?;
    debug!(journals = ids.len(), "loaded reporting journals");
    Ok(ids)
}

/// The allowlist file shipped in two shapes over the years: a plain JSON
/// array of NLM IDs, and an ID → journal-title mapping whose keys are
/// the IDs.
#[derive(Deserialize)]
#[serde(untagged)]
enum AllowlistFile {
    Ids(HashSet<String>),
    Mapping(std::collections::HashMap<String, serde_json::Value>),
}

/// Load the selectively-indexed journal allowlist.
///
/// Accepts either a JSON array of NLM IDs or a JSON object keyed by NLM
/// ID (only the keys are used).
pub fn load_journal_allowlist(path: &Path) -> Result<HashSet<String>> {
    let file = File::open(path)?;
    let parsed: AllowlistFile = serde_json::from_reader(BufReader::new(file))?;
    let ids = match parsed {
        AllowlistFile::Ids(ids) => ids,
        AllowlistFile::Mapping(mapping) => mapping.into_keys().collect(),
    };
    debug!(journals = ids.len(), "loaded journal allowlist");
    Ok(ids)
}
