//! Runs the whole knn pipeline on a directory of shape descriptor files :
//! list the files, label them from their name prefix, split train/test
//! stratified by class, train the classifier, predict the test part in
//! parallel and report confusion metrics plus one precision recall curve csv
//! per class.
//!
//! ```text
//! cargo run --example shapes_knn -- --dir .../Signatures/Zernike7 --ext .zrk --knbrs 3 --ratio 0.6 --seed 12345
//! ```

use clap::{Arg, ArgAction, Command};

use std::path::{Path, PathBuf};

use cpu_time::ProcessTime;
use std::time::SystemTime;

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use shapeclass::data::desc::{list_desc_files, read_desc};
use shapeclass::data::labels::label_for_file;
use shapeclass::data::point::Descriptor;
use shapeclass::data::prep::normalize_features;
use shapeclass::data::split::split_stratified;
use shapeclass::knn::Knn;
use shapeclass::merit::{ConfusionMatrix, precision_recall_curve, write_pr_csv};

// reads every descriptor file of the directory, normalized and labeled
fn load_descriptors(dir: &Path, extension: &str) -> anyhow::Result<Vec<Descriptor<f64>>> {
    let files = list_desc_files(&[dir], extension);
    log::info!("found {} files with extension {} in {:?}", files.len(), extension, dir);
    let mut descriptors = Vec::<Descriptor<f64>>::with_capacity(files.len());
    for path in files {
        let features: Vec<f64> = read_desc(&path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let label = label_for_file(&name).to_string();
        descriptors.push(Descriptor::new(name, normalize_features(&features), label));
    }
    Ok(descriptors)
} // end of load_descriptors

pub fn main() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    //
    let matches = Command::new("shapes_knn")
        .arg(
            Arg::new("dir")
                .long("dir")
                .required(true)
                .action(ArgAction::Set)
                .help("directory containing the descriptor files"),
        )
        .arg(
            Arg::new("extension")
                .long("ext")
                .action(ArgAction::Set)
                .default_value(".zrk")
                .help("descriptor file extension"),
        )
        .arg(
            Arg::new("knbrs")
                .long("knbrs")
                .action(ArgAction::Set)
                .value_parser(clap::value_parser!(usize))
                .default_value("3")
                .help("number of neighbors in the vote"),
        )
        .arg(
            Arg::new("ratio")
                .long("ratio")
                .action(ArgAction::Set)
                .value_parser(clap::value_parser!(f64))
                .default_value("0.6")
                .help("fraction of samples going to the training set"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .action(ArgAction::Set)
                .value_parser(clap::value_parser!(u64))
                .default_value("12345")
                .help("seed of the split generator"),
        )
        .get_matches();
    //
    let dir = PathBuf::from(matches.get_one::<String>("dir").unwrap());
    let extension = matches.get_one::<String>("extension").unwrap();
    let knbrs = *matches.get_one::<usize>("knbrs").unwrap();
    let ratio = *matches.get_one::<f64>("ratio").unwrap();
    let seed = *matches.get_one::<u64>("seed").unwrap();
    //
    let descriptors = load_descriptors(&dir, extension)?;
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let (train, test) = split_stratified(descriptors, ratio, &mut rng)?;
    println!(
        "training set : {} samples, test set : {} samples",
        train.len(),
        test.len()
    );
    //
    let cpu_start = ProcessTime::now();
    let sys_now = SystemTime::now();
    //
    let knn = Knn::new(knbrs, train)?;
    let queries: Vec<Vec<f64>> = test.iter().map(|d| d.get_features().to_vec()).collect();
    let predicted = knn.predict_batch(&queries)?;
    //
    println!(
        "  sys time(ms) {:?} cpu time(ms) {:?}",
        sys_now.elapsed().unwrap().as_millis(),
        cpu_start.elapsed().as_millis()
    );
    //
    let actual: Vec<String> = test.iter().map(|d| d.get_label().to_string()).collect();
    let matrix = ConfusionMatrix::new(&actual, &predicted)?;
    println!("confusion matrix :");
    for (label, counts) in matrix.counts_report() {
        println!("class : {}", label);
        println!("  true positive (TP) : {}", counts.true_pos);
        println!("  false positive (FP) : {}", counts.false_pos);
        println!("  false negative (FN) : {}", counts.false_neg);
        println!("  true negative (TN) : {}", counts.true_neg);
    }
    println!("accuracy : {:.3}", matrix.accuracy());
    match (matrix.macro_precision(), matrix.macro_recall(), matrix.macro_f1()) {
        (Ok(precision), Ok(recall), Ok(f1)) => {
            println!("precision : {:.3}", precision);
            println!("recall : {:.3}", recall);
            println!("f1 score : {:.3}", f1);
        }
        _ => log::warn!("some class has an undefined metric, macro averages skipped"),
    }
    //
    // one precision recall curve per class present in the test part,
    // score maps computed once and reused across classes
    let mut score_maps = Vec::with_capacity(queries.len());
    for query in &queries {
        score_maps.push(knn.predict_with_scores(query)?);
    }
    let report = matrix.counts_report();
    for class in report.keys() {
        let scores: Vec<f64> = score_maps
            .iter()
            .map(|m| m.get(class.as_str()).copied().unwrap_or(0.))
            .collect();
        let points = precision_recall_curve(&actual, &scores, class)?;
        write_pr_csv(&points, format!("pr_{}.csv", class.to_lowercase()))?;
    }
    //
    Ok(())
}
