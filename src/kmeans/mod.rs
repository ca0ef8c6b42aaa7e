//! centroid based clustering of feature vectors (Lloyd algorithm).
//!
//! Initialization draws the initial centroids uniformly without replacement
//! from the input; the generator comes from the caller so a fixed seed and a
//! fixed input order give a reproducible clustering.

pub mod inertia;

use rand::Rng;
use rayon::prelude::*;

use std::fmt::Debug;

use num_traits::float::Float;

use crate::data::point::{euclidean, uniform_dimension};
use crate::error::ShapeError;

// iteration stops early when the summed centroid shift drops below this
const CONVERGENCE_THRESHOLD: f64 = 1.0e-6;

/// Final affectation of input vectors to clusters.
/// Cluster indices are dense in 0..nb_cluster; every input rank appears in
/// exactly one member list.
#[derive(Debug, Clone)]
pub struct ClusterSet {
    // affectation[rank] gives the cluster of the input vector of that rank
    affectation: Vec<usize>,
    // members[c] lists the ranks assigned to cluster c, in input order
    members: Vec<Vec<usize>>,
}

impl ClusterSet {
    fn new(affectation: Vec<usize>, nb_cluster: usize) -> Self {
        let mut members = vec![Vec::<usize>::new(); nb_cluster];
        for (rank, c) in affectation.iter().enumerate() {
            members[*c].push(rank);
        }
        ClusterSet {
            affectation,
            members,
        }
    }

    /// given the rank of an input vector, returns its cluster index
    pub fn get_affectation(&self, rank: usize) -> usize {
        self.affectation[rank]
    }

    /// returns the number of clusters
    pub fn get_nb_cluster(&self) -> usize {
        self.members.len()
    }

    /// ranks of the input vectors assigned to a cluster
    pub fn get_members(&self, cluster: usize) -> &[usize] {
        &self.members[cluster]
    }

    pub fn get_nb_points(&self) -> usize {
        self.affectation.len()
    }

    /// iterator on couples (rank, cluster index)
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> {
        self.affectation.iter().copied().enumerate()
    }
} // end of impl ClusterSet

//========================================================

/// The clusterer. `fit` consumes nothing : input vectors are borrowed and the
/// centroid state lives in the structure, recomputed at each call.
pub struct KMeans<T> {
    // number of clusters asked for
    nb_cluster: usize,
    // iteration bound, the only runtime bound of fit
    max_iter: usize,
    // centroids of the last fit, empty before
    centroids: Vec<Vec<T>>,
}

impl<T> KMeans<T>
where
    T: Float + Debug + Send + Sync,
{
    pub fn new(nb_cluster: usize, max_iter: usize) -> Self {
        KMeans {
            nb_cluster,
            max_iter,
            centroids: Vec::new(),
        }
    }

    pub fn get_nb_cluster(&self) -> usize {
        self.nb_cluster
    }

    /// the fitted centroids, index aligned with the cluster set returned by fit
    pub fn get_centroids(&self) -> &[Vec<T>] {
        &self.centroids
    }

    /// Runs the Lloyd iteration on the input vectors and returns the final
    /// affectation, recomputed once after the loop so it reflects the final
    /// centroid positions.
    pub fn fit<R: Rng>(&mut self, data: &[Vec<T>], rng: &mut R) -> Result<ClusterSet, ShapeError> {
        if self.nb_cluster == 0 {
            return Err(ShapeError::InvalidInput(String::from(
                "nb_cluster must be positive",
            )));
        }
        if data.len() < self.nb_cluster {
            return Err(ShapeError::InvalidInput(format!(
                "nb_cluster {} exceeds the {} input vectors",
                self.nb_cluster,
                data.len()
            )));
        }
        if uniform_dimension(data).is_none() {
            return Err(ShapeError::InvalidInput(String::from(
                "input vectors do not share one dimension",
            )));
        }
        // initial centroids : nb_cluster distinct vectors drawn without replacement
        let init_ranks = rand::seq::index::sample(rng, data.len(), self.nb_cluster);
        self.centroids = init_ranks.iter().map(|rank| data[rank].clone()).collect();
        //
        for iter in 0..self.max_iter {
            let affectation = self.assign(data);
            let new_centroids = self.update_centroids(data, &affectation);
            let shift = centroid_shift(&self.centroids, &new_centroids);
            self.centroids = new_centroids;
            if shift < CONVERGENCE_THRESHOLD {
                log::debug!(
                    "kmeans converged after {} iterations, shift : {:.3e}",
                    iter + 1,
                    shift
                );
                break;
            }
        }
        Ok(ClusterSet::new(self.assign(data), self.nb_cluster))
    } // end of fit

    // assignment step. Affectations are independent, computed in parallel
    fn assign(&self, data: &[Vec<T>]) -> Vec<usize> {
        data.par_iter().map(|v| self.closest_centroid(v)).collect()
    }

    // index of the nearest centroid, a distance tie goes to the lowest index
    fn closest_centroid(&self, v: &[T]) -> usize {
        let mut closest = 0;
        let mut min_dist = euclidean(v, &self.centroids[0]);
        for (i, centroid) in self.centroids.iter().enumerate().skip(1) {
            let dist = euclidean(v, centroid);
            if dist < min_dist {
                closest = i;
                min_dist = dist;
            }
        }
        closest
    }

    // coordinatewise mean of the members of each cluster.
    // A cluster with no member keeps its previous centroid
    fn update_centroids(&self, data: &[Vec<T>], affectation: &[usize]) -> Vec<Vec<T>> {
        let dim = self.centroids[0].len();
        let mut sums = vec![vec![T::zero(); dim]; self.nb_cluster];
        let mut counts = vec![0usize; self.nb_cluster];
        for (rank, c) in affectation.iter().enumerate() {
            counts[*c] += 1;
            for (j, x) in data[rank].iter().enumerate() {
                sums[*c][j] = sums[*c][j] + *x;
            }
        }
        (0..self.nb_cluster)
            .map(|c| {
                if counts[c] == 0 {
                    self.centroids[c].clone()
                } else {
                    let nb = T::from(counts[c]).unwrap();
                    sums[c].iter().map(|s| *s / nb).collect()
                }
            })
            .collect()
    } // end of update_centroids
} // end of impl KMeans

// sum over centroids of the distance between old and new position
fn centroid_shift<T: Float>(old: &[Vec<T>], new: &[Vec<T>]) -> f64 {
    old.iter()
        .zip(new.iter())
        .fold(T::zero(), |acc, (o, n)| acc + euclidean(o, n))
        .to_f64()
        .unwrap()
}

//========================================================

// end of mod tests
