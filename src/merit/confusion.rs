//! Confusion matrix over aligned sequences of actual and predicted labels.
//!
//! The matrix is backed by a classes x classes contingency table;
//! per class counts and the derived metrics are read off its marginals.
//! Macro averages run over the distinct classes present in the actual
//! sequence.

use indexmap::{IndexMap, IndexSet};
use ndarray::Array2;
use serde::Serialize;

use crate::error::ShapeError;

/// per class tally. The four counts always sum to the number of evaluated samples
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct ConfusionCounts {
    pub true_pos: usize,
    pub false_pos: usize,
    pub false_neg: usize,
    pub true_neg: usize,
}

/// per class derived metrics
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// Built once from two aligned label sequences of equal length, then queried.
pub struct ConfusionMatrix {
    // classes in first encounter order, actual sequence first
    classes: IndexSet<String>,
    // present[i] is true when classes[i] appears in the actual sequence
    present: Vec<bool>,
    // table[[i,j]] counts samples of actual class i predicted as class j
    table: Array2<usize>,
    nb_total: usize,
}

impl ConfusionMatrix {
    pub fn new<S: AsRef<str>>(actual: &[S], predicted: &[S]) -> Result<Self, ShapeError> {
        if actual.is_empty() {
            return Err(ShapeError::InvalidInput(String::from(
                "empty label sequences",
            )));
        }
        if actual.len() != predicted.len() {
            return Err(ShapeError::InvalidInput(format!(
                "{} actual labels but {} predicted",
                actual.len(),
                predicted.len()
            )));
        }
        //
        let mut classes = IndexSet::<String>::new();
        for label in actual.iter().chain(predicted.iter()) {
            classes.insert(label.as_ref().to_string());
        }
        let present: Vec<bool> = classes
            .iter()
            .map(|c| actual.iter().any(|a| a.as_ref() == c.as_str()))
            .collect();
        //
        let nb_classes = classes.len();
        let mut table = Array2::<usize>::zeros((nb_classes, nb_classes));
        for (a, p) in actual.iter().zip(predicted.iter()) {
            let i = classes.get_index_of(a.as_ref()).unwrap();
            let j = classes.get_index_of(p.as_ref()).unwrap();
            table[[i, j]] += 1;
        }
        Ok(ConfusionMatrix {
            classes,
            present,
            table,
            nb_total: actual.len(),
        })
    } // end of new

    /// classes seen in either sequence, first encounter order
    pub fn get_classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(|c| c.as_str())
    }

    /// number of evaluated samples
    pub fn get_nb_samples(&self) -> usize {
        self.nb_total
    }

    /// counts for one class, None if the class was never seen
    pub fn get_counts(&self, label: &str) -> Option<ConfusionCounts> {
        let i = self.classes.get_index_of(label)?;
        let true_pos = self.table[[i, i]];
        let row_sum: usize = self.table.row(i).sum();
        let col_sum: usize = self.table.column(i).sum();
        let false_neg = row_sum - true_pos;
        let false_pos = col_sum - true_pos;
        let true_neg = self.nb_total - true_pos - false_pos - false_neg;
        Some(ConfusionCounts {
            true_pos,
            false_pos,
            false_neg,
            true_neg,
        })
    } // end of get_counts

    /// counts of every class present in the actual sequence, encounter order
    pub fn counts_report(&self) -> IndexMap<String, ConfusionCounts> {
        self.classes
            .iter()
            .zip(self.present.iter())
            .filter(|(_, present)| **present)
            .map(|(label, _)| (label.clone(), self.get_counts(label).unwrap()))
            .collect()
    }

    /// fraction of samples whose predicted label matches the actual one, in [0,1]
    pub fn accuracy(&self) -> f64 {
        let correct: usize = self.table.diag().sum();
        correct as f64 / self.nb_total as f64
    }

    /// TP / (TP + FP). Undefined when nothing was predicted as this class
    pub fn precision(&self, label: &str) -> Result<f64, ShapeError> {
        let counts = self.checked_counts(label)?;
        let denom = counts.true_pos + counts.false_pos;
        if denom == 0 {
            return Err(ShapeError::UndefinedMetric {
                class: label.to_string(),
                reason: String::from("no sample predicted as this class"),
            });
        }
        Ok(counts.true_pos as f64 / denom as f64)
    }

    /// TP / (TP + FN). Undefined when the class has no actual sample
    pub fn recall(&self, label: &str) -> Result<f64, ShapeError> {
        let counts = self.checked_counts(label)?;
        let denom = counts.true_pos + counts.false_neg;
        if denom == 0 {
            return Err(ShapeError::UndefinedMetric {
                class: label.to_string(),
                reason: String::from("no actual sample of this class"),
            });
        }
        Ok(counts.true_pos as f64 / denom as f64)
    }

    /// harmonic mean of precision and recall. Undefined when both are zero
    pub fn f1(&self, label: &str) -> Result<f64, ShapeError> {
        let precision = self.precision(label)?;
        let recall = self.recall(label)?;
        if precision + recall == 0. {
            return Err(ShapeError::UndefinedMetric {
                class: label.to_string(),
                reason: String::from("precision + recall is zero"),
            });
        }
        Ok(2. * precision * recall / (precision + recall))
    }

    /// precision, recall and f1 of one class
    pub fn class_metrics(&self, label: &str) -> Result<ClassMetrics, ShapeError> {
        Ok(ClassMetrics {
            precision: self.precision(label)?,
            recall: self.recall(label)?,
            f1: self.f1(label)?,
        })
    }

    /// mean precision over the distinct classes present in the actual sequence
    pub fn macro_precision(&self) -> Result<f64, ShapeError> {
        self.macro_average(|label| self.precision(label))
    }

    /// mean recall over the distinct classes present in the actual sequence
    pub fn macro_recall(&self) -> Result<f64, ShapeError> {
        self.macro_average(|label| self.recall(label))
    }

    /// mean f1 over the distinct classes present in the actual sequence
    pub fn macro_f1(&self) -> Result<f64, ShapeError> {
        self.macro_average(|label| self.f1(label))
    }

    // averages a per class metric over classes present in actual.
    // An undefined class metric makes the average undefined; callers wanting
    // a skip or zero policy can iterate counts_report themselves
    fn macro_average(
        &self,
        metric: impl Fn(&str) -> Result<f64, ShapeError>,
    ) -> Result<f64, ShapeError> {
        let mut sum = 0.;
        let mut nb_classes = 0usize;
        for (label, present) in self.classes.iter().zip(self.present.iter()) {
            if !*present {
                continue;
            }
            sum += metric(label)?;
            nb_classes += 1;
        }
        Ok(sum / nb_classes as f64)
    } // end of macro_average

    fn checked_counts(&self, label: &str) -> Result<ConfusionCounts, ShapeError> {
        self.get_counts(label)
            .ok_or_else(|| ShapeError::InvalidInput(format!("unknown class {}", label)))
    }
} // end of impl ConfusionMatrix

//========================================================

// end of mod tests
