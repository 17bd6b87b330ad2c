//! bmcs-calibration — Decision-threshold calibration for BmCS retraining.
//!
//! Given validation-set predictions from the CNN and voting models, finds
//! the score thresholds that hit the configured target recall and target
//! precision via one-sided monotone boundary searches, and writes the
//! per-model threshold reports.

pub mod combine;
pub mod metrics;
pub mod report;
pub mod search;

pub use combine::combined_predictions;
pub use metrics::precision_recall;
pub use search::{calibrate, find_precision_threshold, find_recall_threshold, OperatingPoint};
