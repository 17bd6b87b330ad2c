//! Selective-indexing period file parsing.
//!
//! The input is comma-delimited text, one period per line:
//! `nlm_id, citation_subset, start_year, end_year`. Negative years are
//! sentinels: a negative start year means the start is unknown and the
//! record contributes no period at all; a negative end year means the
//! journal is still selectively indexed (open-ended period).

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use bmcs_common::{IndexingPeriod, IndexingPeriodMap, Result, RetrainError};

/// Parse an indexing-periods file into a journal → periods map.
///
/// `is_fully_indexed` is stamped onto every parsed period; the same file
/// format serves both the selective and the fully-indexed period lists.
/// Periods append in file order; nothing is merged or sorted. A line with
/// fewer than four fields or a non-integer year is fatal — the pipeline
/// cannot proceed without complete period data.
pub fn load_indexing_periods(
    path: &Path,
    is_fully_indexed: bool,
) -> Result<IndexingPeriodMap> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut periods = IndexingPeriodMap::new();
    let mut total = 0usize;
    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() < 4 {
            return Err(RetrainError::MalformedInput(format!(
                "{}:{}: expected 4 comma-separated fields, found {}",
                path.display(),
                line_num + 1,
                fields.len()
            )));
        }

        let nlm_id = fields[0].to_string();
        let citation_subset = fields[1].to_string();
        let start_year = parse_year(fields[2], path, line_num)?;
        let end_year = parse_year(fields[3], path, line_num)?;

        // Unknown start: the journal contributes no period.
        if start_year < 0 {
            continue;
        }
        let end_year = if end_year < 0 { None } else { Some(end_year) };

        periods
            .entry(nlm_id.clone())
            .or_insert_with(Vec::new)
            .push(IndexingPeriod {
                nlm_id,
                citation_subset,
                is_fully_indexed,
                start_year,
                end_year,
            });
        total += 1;
    }

    debug!(
        journals = periods.len(),
        periods = total,
        "loaded indexing periods"
    );
    Ok(periods)
}

fn parse_year(field: &str, path: &Path, line_num: usize) -> Result<i32> {
    field.parse::<i32>().map_err(|_| {
        RetrainError::MalformedInput(format!(
            "{}:{}: non-integer year field {:?}",
            path.display(),
            line_num + 1,
            field
        ))
    })
}
