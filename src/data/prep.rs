//! elementwise feature preprocessing

use num_traits::float::Float;

/// Min-max normalization of one feature vector : coordinates are mapped
/// affinely onto [0,1]. A constant vector is mapped to all zeros instead of
/// dividing by a zero width.
pub fn normalize_features<T: Float>(features: &[T]) -> Vec<T> {
    let (min, max) = features
        .iter()
        .fold((T::max_value(), T::min_value()), |acc, x| {
            (acc.0.min(*x), acc.1.max(*x))
        });
    let width = max - min;
    if width <= T::zero() {
        return vec![T::zero(); features.len()];
    }
    features.iter().map(|x| (*x - min) / width).collect()
} // end of normalize_features

//========================================================

// end of mod tests
