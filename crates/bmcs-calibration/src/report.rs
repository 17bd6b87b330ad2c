//! Threshold report output.
//!
//! One plain-text file per model, two lines: the recall-target operating
//! point first, then the precision-target point, each formatted as
//! `Threshold: <τ>, Precision: <p>, Recall: <r>`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use bmcs_common::{Result, RetrainConfig, ScoredPrediction};

use crate::search::{calibrate, OperatingPoint};

/// Report file name for a model (`cnn`, `voting`, `combined`).
pub fn report_path(dir: &Path, model_name: &str) -> PathBuf {
    dir.join(format!("{model_name}_optimum_thresholds.txt"))
}

/// Write one model's two operating points to a report file.
pub fn write_threshold_report(
    path: &Path,
    recall_point: &OperatingPoint,
    precision_point: &OperatingPoint,
) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for point in [recall_point, precision_point] {
        writeln!(
            writer,
            "Threshold: {}, Precision: {}, Recall: {}",
            point.threshold, point.precision, point.recall
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Calibrate every model and write its report into `dir`.
pub fn write_model_reports(
    dir: &Path,
    models: &[(&str, &[ScoredPrediction])],
    config: &RetrainConfig,
) -> Result<()> {
    for (model_name, predictions) in models {
        let (recall_point, precision_point) = calibrate(
            predictions,
            config.target_recall,
            config.target_precision,
            config.threshold_step,
        )?;
        let path = report_path(dir, model_name);
        write_threshold_report(&path, &recall_point, &precision_point)?;
        info!(
            model = model_name,
            recall_threshold = recall_point.threshold,
            precision_threshold = precision_point.threshold,
            "wrote threshold report"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_format_is_two_lines() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = report_path(dir.path(), "cnn");

        let recall_point = OperatingPoint {
            threshold: 0.0215,
            precision: 0.912,
            recall: 0.9955,
        };
        let precision_point = OperatingPoint {
            threshold: 0.874,
            precision: 0.9702,
            recall: 0.81,
        };
        write_threshold_report(&path, &recall_point, &precision_point).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Threshold: 0.0215, Precision: 0.912, Recall: 0.9955");
        assert_eq!(lines[1], "Threshold: 0.874, Precision: 0.9702, Recall: 0.81");
    }

    #[test]
    fn test_write_model_reports_creates_one_file_per_model() {
        let dir = tempfile::TempDir::new().unwrap();
        let predictions = vec![
            ScoredPrediction {
                pmid: 1,
                actual: 1.0,
                score: 0.9,
            },
            ScoredPrediction {
                pmid: 2,
                actual: 0.0,
                score: 0.2,
            },
        ];
        let config = RetrainConfig {
            threshold_step: 0.01,
            target_recall: 0.9,
            target_precision: 0.9,
            ..RetrainConfig::default()
        };

        let models: Vec<(&str, &[ScoredPrediction])> = vec![
            ("cnn", predictions.as_slice()),
            ("voting", predictions.as_slice()),
        ];
        write_model_reports(dir.path(), &models, &config).unwrap();

        assert!(report_path(dir.path(), "cnn").exists());
        assert!(report_path(dir.path(), "voting").exists());
        let contents =
            std::fs::read_to_string(report_path(dir.path(), "cnn")).unwrap();
        assert_eq!(contents.lines().count(), 2);
    }
}
