//! k nearest neighbor classification of shape descriptors.
//!
//! The classifier keeps its training samples read only, so independent
//! predictions are side effect free and can run in parallel, see
//! [Knn::predict_batch].

use indexmap::IndexMap;
use rayon::prelude::*;

use std::fmt::Debug;

use num_traits::float::Float;

use crate::data::point::{Descriptor, euclidean};
use crate::error::ShapeError;

/// The classifier. Built once from labeled training samples of uniform
/// dimensionality, then queried any number of times.
pub struct Knn<T> {
    // number of neighbors taking part in the vote
    k: usize,
    // read only after construction
    training_data: Vec<Descriptor<T>>,
    // common dimension of training features
    dim: usize,
}

impl<T> Knn<T>
where
    T: Float + Debug + Send + Sync,
{
    /// Builds a classifier voting among `k` neighbors.
    /// A `k` larger than the training set degrades to a vote among all
    /// samples instead of failing.
    pub fn new(k: usize, training_data: Vec<Descriptor<T>>) -> Result<Self, ShapeError> {
        if k == 0 {
            return Err(ShapeError::InvalidInput(String::from(
                "neighbor count k must be positive",
            )));
        }
        if training_data.is_empty() {
            return Err(ShapeError::InvalidInput(String::from(
                "empty training set",
            )));
        }
        let dim = training_data[0].get_dimension();
        if !training_data.iter().all(|d| d.get_dimension() == dim) {
            return Err(ShapeError::InvalidInput(String::from(
                "training samples do not share one dimension",
            )));
        }
        if k > training_data.len() {
            log::warn!(
                "k = {} larger than training size {}, vote degrades to all samples",
                k,
                training_data.len()
            );
        }
        Ok(Knn {
            k,
            training_data,
            dim,
        })
    } // end of new

    pub fn get_k(&self) -> usize {
        self.k
    }

    pub fn get_nb_samples(&self) -> usize {
        self.training_data.len()
    }

    // labels and distances of the k nearest training samples, nearest first.
    // The sort is stable so exactly equal distances keep training set order
    // (first encountered wins).
    fn neighbors(&self, features: &[T]) -> Result<Vec<(&str, T)>, ShapeError> {
        if features.len() != self.dim {
            return Err(ShapeError::InvalidInput(format!(
                "query dimension {} does not match training dimension {}",
                features.len(),
                self.dim
            )));
        }
        let mut neighbors: Vec<(&str, T)> = self
            .training_data
            .iter()
            .map(|d| (d.get_label(), euclidean(features, d.get_features())))
            .collect();
        neighbors.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        neighbors.truncate(self.k.min(self.training_data.len()));
        Ok(neighbors)
    } // end of neighbors

    /// Predicts the label of a feature vector by majority vote among the k
    /// nearest training samples. A vote tie is broken by the smallest mean
    /// distance among the tied labels, a remaining exact tie by first
    /// encounter order, so the result is deterministic.
    pub fn predict(&self, features: &[T]) -> Result<String, ShapeError> {
        let neighbors = self.neighbors(features)?;
        // tally votes in neighbor encounter order
        let mut tally: IndexMap<&str, (usize, T)> = IndexMap::new();
        for (label, dist) in neighbors.iter() {
            let entry = tally.entry(*label).or_insert((0, T::zero()));
            entry.0 += 1;
            entry.1 = entry.1 + *dist;
        }
        //
        let mut best_label: &str = "";
        let mut best_count: usize = 0;
        let mut best_mean = T::max_value();
        for (label, (count, dist_sum)) in tally {
            let mean = dist_sum / T::from(count).unwrap();
            if count > best_count || (count == best_count && mean < best_mean) {
                best_label = label;
                best_count = count;
                best_mean = mean;
            }
        }
        Ok(best_label.to_string())
    } // end of predict

    /// Score of each label among the k nearest neighbors : occurrence count
    /// over the effective neighbor count, so scores sum to 1. Labels absent
    /// from the neighborhood are omitted. Map order is neighbor encounter
    /// order.
    pub fn predict_with_scores(&self, features: &[T]) -> Result<IndexMap<String, f64>, ShapeError> {
        let neighbors = self.neighbors(features)?;
        let nb_neighbors = neighbors.len();
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        for (label, _) in neighbors.iter() {
            *counts.entry((*label).to_string()).or_insert(0) += 1;
        }
        let scores = counts
            .into_iter()
            .map(|(label, count)| (label, count as f64 / nb_neighbors as f64))
            .collect();
        Ok(scores)
    } // end of predict_with_scores

    /// predictions are independent, run them in parallel
    pub fn predict_batch(&self, queries: &[Vec<T>]) -> Result<Vec<String>, ShapeError> {
        queries.par_iter().map(|q| self.predict(q)).collect()
    }
} // end of impl Knn

//========================================================

#[cfg(test)]
mod tests {

    use super::*;

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn desc(name: &str, features: Vec<f64>, label: &str) -> Descriptor<f64> {
        Descriptor::new(String::from(name), features, String::from(label))
    }

    fn small_training_set() -> Vec<Descriptor<f64>> {
        vec![
            desc("a1", vec![0., 0.], "A"),
            desc("a2", vec![0., 1.], "A"),
            desc("b1", vec![5., 5.], "B"),
        ]
    }

    #[test]
    fn test_predict_nearest() {
        log_init_test();
        //
        let knn = Knn::new(1, small_training_set()).unwrap();
        assert_eq!(knn.predict(&[0., 0.4]).unwrap(), "A");
        assert_eq!(knn.predict(&[5., 4.6]).unwrap(), "B");
        // same input, same output
        assert_eq!(knn.predict(&[0., 0.4]).unwrap(), knn.predict(&[0., 0.4]).unwrap());
    }

    #[test]
    fn test_predict_with_scores() {
        log_init_test();
        //
        let knn = Knn::new(3, small_training_set()).unwrap();
        let scores = knn.predict_with_scores(&[0., 0.5]).unwrap();
        assert_eq!(scores.len(), 2);
        assert_eq!(scores["A"], 2. / 3.);
        assert_eq!(scores["B"], 1. / 3.);
        assert!((scores.values().sum::<f64>() - 1.).abs() < 1.0e-12);
    }

    #[test]
    fn test_vote_tie_broken_by_distance() {
        log_init_test();
        //
        let training = vec![desc("a1", vec![0., 0.], "A"), desc("b1", vec![1., 0.], "B")];
        let knn = Knn::new(2, training).unwrap();
        // one vote each, A is nearer so A wins
        assert_eq!(knn.predict(&[0.4, 0.]).unwrap(), "A");
        assert_eq!(knn.predict(&[0.6, 0.]).unwrap(), "B");
    }

    #[test]
    fn test_k_degrades_to_all_samples() {
        log_init_test();
        //
        let knn = Knn::new(10, small_training_set()).unwrap();
        let scores = knn.predict_with_scores(&[0., 0.]).unwrap();
        // all 3 samples vote
        assert_eq!(scores["A"], 2. / 3.);
        assert_eq!(scores["B"], 1. / 3.);
    }

    #[test]
    fn test_predict_batch() {
        log_init_test();
        //
        let knn = Knn::new(1, small_training_set()).unwrap();
        let queries = vec![vec![0., 0.4], vec![5., 4.6], vec![0., 0.9]];
        let predicted = knn.predict_batch(&queries).unwrap();
        assert_eq!(predicted, vec!["A", "B", "A"]);
    }

    #[test]
    fn test_bad_input() {
        log_init_test();
        //
        assert!(Knn::new(0, small_training_set()).is_err());
        assert!(Knn::<f64>::new(1, Vec::new()).is_err());
        //
        let knn = Knn::new(1, small_training_set()).unwrap();
        match knn.predict(&[0., 0., 0.]) {
            Err(ShapeError::InvalidInput(_)) => (),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }
} // end of mod tests
