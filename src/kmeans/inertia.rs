//! cluster tightness diagnostic

use std::fmt::Debug;

use num_traits::float::Float;

use super::ClusterSet;
use crate::data::point::squared_euclidean;
use crate::error::ShapeError;

#[cfg_attr(doc, katexit::katexit)]
/// Inertia of a clustering : $$ \sum_{c} \sum_{x \in c} \lVert x - \mu_c \rVert^2 $$
/// where $\mu_c$ is the centroid of cluster $c$. Lower is tighter.
///
/// Pure function over the affectation produced by
/// [fit](super::KMeans::fit) and the fitted centroids. The elbow sweep over
/// cluster counts belongs to the caller, one fit and one inertia per k.
pub fn compute_inertia<T>(
    data: &[Vec<T>],
    clusters: &ClusterSet,
    centroids: &[Vec<T>],
) -> Result<f64, ShapeError>
where
    T: Float + Debug,
{
    if clusters.get_nb_cluster() != centroids.len() {
        return Err(ShapeError::InvalidInput(format!(
            "{} clusters but {} centroids",
            clusters.get_nb_cluster(),
            centroids.len()
        )));
    }
    let mut total = T::zero();
    for c in 0..clusters.get_nb_cluster() {
        let centroid = &centroids[c];
        for rank in clusters.get_members(c) {
            if data[*rank].len() != centroid.len() {
                return Err(ShapeError::InvalidInput(format!(
                    "vector of rank {} has dimension {} but centroid {} has dimension {}",
                    rank,
                    data[*rank].len(),
                    c,
                    centroid.len()
                )));
            }
            total = total + squared_euclidean(&data[*rank], centroid);
        }
    }
    Ok(total.to_f64().unwrap())
} // end of compute_inertia

//========================================================

// end of mod tests
