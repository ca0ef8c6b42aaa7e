//! defines data description

use num_traits::float::Float;

use std::fmt::Debug;

/// A shape descriptor extracted from one signature file.
/// Couples the source file name, the feature vector and the class label
/// attached to the file. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct Descriptor<T> {
    // source file name, unique within a dataset
    name: String,
    /// feature vector
    features: Vec<T>,
    /// class label. "Unknown" is a legitimate label for unmapped files
    label: String,
}

impl<T> Descriptor<T>
where
    T: Float + Debug,
{
    pub fn new(name: String, features: Vec<T>, label: String) -> Self {
        Descriptor {
            name,
            features,
            label,
        }
    }

    /// get the source file name
    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// get the class label
    pub fn get_label(&self) -> &str {
        &self.label
    }

    /// gets the feature coordinates
    pub fn get_features(&self) -> &[T] {
        &self.features
    }

    /// get minima and maxima of features over all dimensions
    pub fn get_minmax(&self) -> (T, T) {
        self.features
            .iter()
            .fold((T::max_value(), T::min_value()), |acc, x| {
                (acc.0.min(*x), acc.1.max(*x))
            })
    }

    pub fn get_dimension(&self) -> usize {
        self.features.len()
    }
} // end of impl Descriptor

//========================================================

/// squared euclidean distance between two feature vectors of the same dimension
pub fn squared_euclidean<T: Float>(v1: &[T], v2: &[T]) -> T {
    assert_eq!(v1.len(), v2.len());
    v1.iter()
        .zip(v2.iter())
        .fold(T::zero(), |acc, (x, y)| acc + (*x - *y) * (*x - *y))
}

/// euclidean distance between two feature vectors of the same dimension
pub fn euclidean<T: Float>(v1: &[T], v2: &[T]) -> T {
    squared_euclidean(v1, v2).sqrt()
}

// checks all vectors share one dimension and returns it
pub(crate) fn uniform_dimension<T: Float>(data: &[Vec<T>]) -> Option<usize> {
    let dim = data.first().map(|v| v.len())?;
    if data.iter().all(|v| v.len() == dim) {
        Some(dim)
    } else {
        None
    }
}

//========================================================

#[cfg(test)]
mod tests {

    use super::*;

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_distances() {
        log_init_test();
        //
        let v1 = vec![0.0f64, 0.];
        let v2 = vec![3.0f64, 4.];
        assert_eq!(squared_euclidean(&v1, &v2), 25.);
        assert_eq!(euclidean(&v1, &v2), 5.);
        assert_eq!(euclidean(&v1, &v1), 0.);
    }

    #[test]
    fn test_minmax() {
        log_init_test();
        //
        let desc = Descriptor::<f64>::new(
            String::from("s01n001.zrk"),
            vec![0.5, -1., 3., 2.],
            String::from("Pigeon"),
        );
        assert_eq!(desc.get_minmax(), (-1., 3.));
        assert_eq!(desc.get_dimension(), 4);
        assert_eq!(desc.get_label(), "Pigeon");
    }

    #[test]
    fn test_uniform_dimension() {
        log_init_test();
        //
        let data = vec![vec![0.0f64, 1.], vec![2., 3.]];
        assert_eq!(uniform_dimension(&data), Some(2));
        let ragged = vec![vec![0.0f64, 1.], vec![2.]];
        assert_eq!(uniform_dimension(&ragged), None);
        let empty: Vec<Vec<f64>> = Vec::new();
        assert_eq!(uniform_dimension(&empty), None);
    }
} // end of mod tests
