//! signature file io.
//! A descriptor file stores one feature value per line; files of one
//! descriptor family share an extension (.zrk for Zernike moments and so on)

use anyhow::anyhow;

use std::fs::OpenOptions;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use num_traits::float::Float;

/// reads one descriptor file, one feature value per line, empty lines skipped
pub fn read_desc<T, P>(path: P) -> anyhow::Result<Vec<T>>
where
    T: Float + FromStr,
    P: AsRef<Path>,
{
    let fileres = OpenOptions::new().read(true).open(path.as_ref());
    if fileres.is_err() {
        log::error!("read_desc could not open file {:?}", path.as_ref());
        return Err(anyhow!(
            "read_desc could not open file {}",
            path.as_ref().display()
        ));
    }
    let bufreader = BufReader::new(fileres?);
    let mut features = Vec::<T>::new();
    for line in bufreader.lines() {
        let line = line?;
        let field = line.trim();
        if field.is_empty() {
            continue;
        }
        if let Ok(val) = field.parse::<T>() {
            features.push(val);
        } else {
            log::error!("read_desc could not parse field {:?}", field);
            return Err(anyhow!(
                "read_desc could not parse field {} in file {}",
                field,
                path.as_ref().display()
            ));
        }
    }
    Ok(features)
} // end of read_desc

/// Lists the descriptor files carrying the given extension in the given
/// directories. The listing is sorted by path so runs are reproducible
/// whatever order the filesystem returns entries in.
pub fn list_desc_files<P: AsRef<Path>>(directories: &[P], extension: &str) -> Vec<PathBuf> {
    let mut desc_files = Vec::<PathBuf>::new();
    for dir in directories {
        let entries = match std::fs::read_dir(dir.as_ref()) {
            Ok(entries) => entries,
            Err(_) => {
                log::warn!("directory not found : {:?}", dir.as_ref());
                continue;
            }
        };
        for entry in entries.flatten() {
            let path = entry.path();
            let matches = path
                .file_name()
                .map(|name| name.to_string_lossy().ends_with(extension))
                .unwrap_or(false);
            if path.is_file() && matches {
                desc_files.push(path);
            }
        }
    }
    desc_files.sort();
    desc_files
} // end of list_desc_files

//========================================================

// end of mod tests
