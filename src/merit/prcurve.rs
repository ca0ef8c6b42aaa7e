//! precision recall curve for one target class.
//!
//! Useful to compare classifiers on unbalanced classes where accuracy alone
//! says little.

use serde::Serialize;

use std::cmp::Ordering;
use std::path::Path;

use crate::error::ShapeError;

/// one point of the curve, both coordinates in [0,1]
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PrPoint {
    pub recall: f64,
    pub precision: f64,
}

/// Walks the (score, actual label) pairs by decreasing score, each prefix of
/// the walk acting as the positive set of one threshold, and emits one
/// (recall, precision) point per element. Tied scores keep input order, so
/// duplicate points are possible. Precision of an empty positive set is 1,
/// recall without any actual positive is 0.
///
/// Recall is non decreasing along the returned curve.
pub fn precision_recall_curve<S: AsRef<str>>(
    actual: &[S],
    scores: &[f64],
    target_class: &str,
) -> Result<Vec<PrPoint>, ShapeError> {
    if actual.is_empty() {
        return Err(ShapeError::InvalidInput(String::from(
            "empty label sequence",
        )));
    }
    if actual.len() != scores.len() {
        return Err(ShapeError::InvalidInput(format!(
            "{} actual labels but {} scores",
            actual.len(),
            scores.len()
        )));
    }
    if scores.iter().any(|s| !s.is_finite()) {
        return Err(ShapeError::InvalidInput(String::from(
            "scores must be finite",
        )));
    }
    //
    let mut ranked: Vec<(f64, &str)> = scores
        .iter()
        .copied()
        .zip(actual.iter().map(|a| a.as_ref()))
        .collect();
    // decreasing score, stable
    ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
    //
    let mut true_pos = 0usize;
    let mut false_pos = 0usize;
    // every actual positive starts as a false negative
    let mut false_neg = actual
        .iter()
        .filter(|a| a.as_ref() == target_class)
        .count();
    //
    let mut points = Vec::<PrPoint>::with_capacity(ranked.len());
    for (_, label) in ranked {
        if label == target_class {
            true_pos += 1;
            false_neg -= 1;
        } else {
            false_pos += 1;
        }
        let precision = if true_pos + false_pos > 0 {
            true_pos as f64 / (true_pos + false_pos) as f64
        } else {
            1.
        };
        let recall = if true_pos + false_neg > 0 {
            true_pos as f64 / (true_pos + false_neg) as f64
        } else {
            0.
        };
        points.push(PrPoint { recall, precision });
    }
    Ok(points)
} // end of precision_recall_curve

/// dumps curve points to a csv file (header recall,precision) for external plotting
pub fn write_pr_csv<P: AsRef<Path>>(points: &[PrPoint], path: P) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    for point in points {
        writer.serialize(point)?;
    }
    writer.flush()?;
    log::info!(
        "wrote {} precision recall points to {:?}",
        points.len(),
        path.as_ref()
    );
    Ok(())
} // end of write_pr_csv

//========================================================

#[cfg(test)]
mod tests {

    use super::*;

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_curve_points() {
        log_init_test();
        //
        let actual = ["A", "B", "A"];
        let scores = [0.9, 0.8, 0.3];
        let points = precision_recall_curve(&actual, &scores, "A").unwrap();
        // one point per instance
        assert_eq!(points.len(), 3);
        // walk : (0.9,A) then (0.8,B) then (0.3,A)
        assert_eq!((points[0].recall, points[0].precision), (0.5, 1.));
        assert_eq!((points[1].recall, points[1].precision), (0.5, 0.5));
        assert_eq!((points[2].recall, points[2].precision), (1., 2. / 3.));
    }

    #[test]
    fn test_recall_non_decreasing() {
        log_init_test();
        //
        let actual = ["A", "B", "A", "B", "A", "A", "B"];
        let scores = [0.1, 0.9, 0.8, 0.4, 0.7, 0.2, 0.5];
        let points = precision_recall_curve(&actual, &scores, "A").unwrap();
        assert_eq!(points.len(), actual.len());
        for pair in points.windows(2) {
            assert!(pair[1].recall >= pair[0].recall);
        }
        for point in &points {
            assert!((0. ..=1.).contains(&point.recall));
            assert!((0. ..=1.).contains(&point.precision));
        }
        // all positives retrieved at the end of the walk
        assert_eq!(points.last().unwrap().recall, 1.);
    }

    #[test]
    fn test_no_positive_in_actual() {
        log_init_test();
        //
        let actual = ["B", "B"];
        let scores = [0.9, 0.1];
        let points = precision_recall_curve(&actual, &scores, "A").unwrap();
        // recall defaults to 0 when there is no actual positive
        for point in points {
            assert_eq!(point.recall, 0.);
            assert_eq!(point.precision, 0.);
        }
    }

    #[test]
    fn test_bad_input() {
        log_init_test();
        //
        let empty: [&str; 0] = [];
        assert!(precision_recall_curve(&empty, &[], "A").is_err());
        assert!(precision_recall_curve(&["A"], &[0.5, 0.2], "A").is_err());
        assert!(precision_recall_curve(&["A"], &[f64::NAN], "A").is_err());
    }

    #[test]
    fn test_write_csv() {
        log_init_test();
        //
        let actual = ["A", "B", "A"];
        let scores = [0.9, 0.8, 0.3];
        let points = precision_recall_curve(&actual, &scores, "A").unwrap();
        let path = std::env::temp_dir().join("shapeclass_pr_curve.csv");
        write_pr_csv(&points, &path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next().unwrap(), "recall,precision");
        assert_eq!(lines.count(), points.len());
    }
} // end of mod tests
