//! This module is dedicated to classifier performance evaluation :
//! confusion matrix with derived precision/recall/f1 metrics, and the
//! precision recall curve traced by varying a score threshold.
//!
//! Everything here is a pure transformation of aligned label/score sequences
//! into in-memory reports; rendering is left to the caller.

pub mod confusion;
pub mod prcurve;

pub use confusion::{ClassMetrics, ConfusionCounts, ConfusionMatrix};
pub use prcurve::{PrPoint, precision_recall_curve, write_pr_csv};
