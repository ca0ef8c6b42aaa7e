//! Clusters the normalized descriptors of a directory with kmeans and logs
//! the inertia over a sweep of cluster counts (elbow method), then prints the
//! clustering obtained for the chosen count.
//!
//! ```text
//! cargo run --example shapes_kmeans -- --dir .../Signatures/Zernike7 --ext .zrk --nbcluster 3 --kmax 8
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
use shapeclass::kmeans::{KMeans, inertia::compute_inertia};

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
    let matches = Command::new("shapes_kmeans")
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
            Arg::new("nbcluster")
                .long("nbcluster")
                .action(ArgAction::Set)
                .value_parser(clap::value_parser!(usize))
                .default_value("3")
                .help("cluster count of the final clustering"),
        )
        .arg(
            Arg::new("kmax")
                .long("kmax")
                .action(ArgAction::Set)
                .value_parser(clap::value_parser!(usize))
                .default_value("8")
                .help("upper bound of the elbow sweep"),
        )
        .arg(
            Arg::new("maxiter")
                .long("maxiter")
                .action(ArgAction::Set)
                .value_parser(clap::value_parser!(usize))
                .default_value("100")
                .help("iteration bound of one fit"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .action(ArgAction::Set)
                .value_parser(clap::value_parser!(u64))
                .default_value("12345")
                .help("seed of the centroid initialization"),
        )
        .get_matches();
    //
    let dir = PathBuf::from(matches.get_one::<String>("dir").unwrap());
    let extension = matches.get_one::<String>("extension").unwrap();
    let nbcluster = *matches.get_one::<usize>("nbcluster").unwrap();
    let kmax = *matches.get_one::<usize>("kmax").unwrap();
    let maxiter = *matches.get_one::<usize>("maxiter").unwrap();
    let seed = *matches.get_one::<u64>("seed").unwrap();
    //
    let descriptors = load_descriptors(&dir, extension)?;
    let data: Vec<Vec<f64>> = descriptors
        .iter()
        .map(|d| d.get_features().to_vec())
        .collect();
    //
    let cpu_start = ProcessTime::now();
    let sys_now = SystemTime::now();
    //
    // elbow sweep : one independent seeded fit and one inertia per cluster count
    for k in 1..=kmax.min(data.len()) {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed + k as u64);
        let mut kmeans = KMeans::<f64>::new(k, maxiter);
        let clusters = kmeans.fit(&data, &mut rng)?;
        let inertia = compute_inertia(&data, &clusters, kmeans.get_centroids())?;
        println!("k = {:2}   inertia : {:.3e}", k, inertia);
    }
    println!(
        "  sweep sys time(ms) {:?} cpu time(ms) {:?}",
        sys_now.elapsed().unwrap().as_millis(),
        cpu_start.elapsed().as_millis()
    );
    //
    // final clustering at the chosen count
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut kmeans = KMeans::<f64>::new(nbcluster, maxiter);
    let clusters = kmeans.fit(&data, &mut rng)?;
    for c in 0..clusters.get_nb_cluster() {
        let members = clusters.get_members(c);
        println!("cluster {} : {} members", c, members.len());
        for rank in members {
            println!(
                "   {}  (label {})",
                descriptors[*rank].get_name(),
                descriptors[*rank].get_label()
            );
        }
    }
    //
    Ok(())
}
