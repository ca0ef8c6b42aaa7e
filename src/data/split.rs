//! seeded train/test partitioning of labeled descriptors.
//!
//! Two strategies are provided. The plain split shuffles the whole sample list
//! and cuts it at the train ratio; with few samples per class nothing
//! guarantees every class reaches both parts. The stratified split cuts each
//! label group separately so per-class proportions are preserved.
//!
//! Both take the random generator from the caller, so repeated or concurrent
//! runs are reproducible independently of each other.

use indexmap::IndexMap;
use rand::Rng;
use rand::seq::SliceRandom;

use std::fmt::Debug;

use num_traits::float::Float;

use super::point::Descriptor;
use crate::error::ShapeError;

/// Plain split : shuffles the full sample list, takes the first
/// `n * train_ratio` samples (integer truncation) as train, the rest as test.
pub fn split_plain<T, R>(
    samples: Vec<Descriptor<T>>,
    train_ratio: f64,
    rng: &mut R,
) -> Result<(Vec<Descriptor<T>>, Vec<Descriptor<T>>), ShapeError>
where
    T: Float + Debug,
    R: Rng,
{
    check_split_input(samples.len(), train_ratio)?;
    //
    let mut train = samples;
    train.shuffle(rng);
    let train_size = (train.len() as f64 * train_ratio) as usize;
    let test = train.split_off(train_size);
    log::debug!(
        "plain split : {} samples in train, {} in test",
        train.len(),
        test.len()
    );
    Ok((train, test))
} // end of split_plain

/// Stratified split : samples are grouped by label (groups keep first
/// encounter order), each group is shuffled independently and cut at
/// `round(group_len * train_ratio)` (half up), so every class is represented
/// proportionally in both parts.
pub fn split_stratified<T, R>(
    samples: Vec<Descriptor<T>>,
    train_ratio: f64,
    rng: &mut R,
) -> Result<(Vec<Descriptor<T>>, Vec<Descriptor<T>>), ShapeError>
where
    T: Float + Debug,
    R: Rng,
{
    check_split_input(samples.len(), train_ratio)?;
    //
    let mut groups: IndexMap<String, Vec<Descriptor<T>>> = IndexMap::new();
    for sample in samples {
        let label = sample.get_label().to_string();
        groups.entry(label).or_default().push(sample);
    }
    //
    let mut train = Vec::<Descriptor<T>>::new();
    let mut test = Vec::<Descriptor<T>>::new();
    for (label, mut group) in groups {
        group.shuffle(rng);
        let train_size = (group.len() as f64 * train_ratio).round() as usize;
        log::debug!(
            "label {} : {} samples in train, {} in test",
            label,
            train_size,
            group.len() - train_size
        );
        let rest = group.split_off(train_size);
        train.extend(group);
        test.extend(rest);
    }
    Ok((train, test))
} // end of split_stratified

fn check_split_input(nb_samples: usize, train_ratio: f64) -> Result<(), ShapeError> {
    if nb_samples == 0 {
        return Err(ShapeError::InvalidInput(String::from("empty sample set")));
    }
    if !(0. ..=1.).contains(&train_ratio) {
        return Err(ShapeError::InvalidInput(format!(
            "train_ratio {} not in [0,1]",
            train_ratio
        )));
    }
    Ok(())
}

//========================================================

#[cfg(test)]
mod tests {

    use super::*;

    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    use std::collections::HashSet;

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    // 5 samples for each of the two labels, features are just the rank
    fn make_samples() -> Vec<Descriptor<f64>> {
        let mut samples = Vec::new();
        for i in 0..10 {
            let label = if i % 2 == 0 { "Pigeon" } else { "Bone" };
            samples.push(Descriptor::new(
                format!("s{:02}n{:03}.zrk", 1 + i % 2, i),
                vec![i as f64, 0.],
                String::from(label),
            ));
        }
        samples
    }

    fn names(samples: &[Descriptor<f64>]) -> HashSet<String> {
        samples.iter().map(|s| s.get_name().to_string()).collect()
    }

    #[test]
    fn test_plain_split_completeness() {
        log_init_test();
        //
        let samples = make_samples();
        let all_names = names(&samples);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(234567_u64);
        let (train, test) = split_plain(samples, 0.6, &mut rng).unwrap();
        assert_eq!(train.len(), 6);
        assert_eq!(test.len(), 4);
        // union = input, no overlap, no duplicate introduced
        let train_names = names(&train);
        let test_names = names(&test);
        assert!(train_names.is_disjoint(&test_names));
        assert_eq!(
            train_names.union(&test_names).cloned().collect::<HashSet<_>>(),
            all_names
        );
    }

    #[test]
    fn test_stratified_split_balance() {
        log_init_test();
        //
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(234567_u64);
        let (train, test) = split_stratified(make_samples(), 0.6, &mut rng).unwrap();
        // each label counts 5 samples, round(5 * 0.6) = 3 in train
        for label in ["Pigeon", "Bone"] {
            let in_train = train.iter().filter(|s| s.get_label() == label).count();
            let in_test = test.iter().filter(|s| s.get_label() == label).count();
            assert_eq!(in_train, 3);
            assert_eq!(in_test, 2);
        }
        assert!(names(&train).is_disjoint(&names(&test)));
    }

    #[test]
    fn test_split_reproducibility() {
        log_init_test();
        //
        let mut rng1 = Xoshiro256PlusPlus::seed_from_u64(7_u64);
        let mut rng2 = Xoshiro256PlusPlus::seed_from_u64(7_u64);
        let (train1, _) = split_stratified(make_samples(), 0.6, &mut rng1).unwrap();
        let (train2, _) = split_stratified(make_samples(), 0.6, &mut rng2).unwrap();
        let names1: Vec<&str> = train1.iter().map(|s| s.get_name()).collect();
        let names2: Vec<&str> = train2.iter().map(|s| s.get_name()).collect();
        assert_eq!(names1, names2);
    }

    #[test]
    fn test_split_bad_input() {
        log_init_test();
        //
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1_u64);
        let empty: Vec<Descriptor<f64>> = Vec::new();
        assert!(split_plain(empty, 0.6, &mut rng).is_err());
        assert!(split_plain(make_samples(), 1.5, &mut rng).is_err());
        assert!(split_stratified(make_samples(), -0.1, &mut rng).is_err());
    }
} // end of mod tests
