//! Reading of extracted example batches.
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use log::debug;

use crate::dataset::ExampleRecord;
use crate::error::Error;

/// Lists the `*.json` batch files of `src`, sorted by path.
pub fn batch_paths(src: &Path) -> Result<Vec<PathBuf>, Error> {
    if !src.is_dir() {
        return Err(Error::Custom(format!("{:?} is not a directory", src)));
    }

    let pattern = src.join("*.json");
    let mut paths = glob::glob(&pattern.to_string_lossy())?.collect::<Result<Vec<_>, _>>()?;
    paths.sort();

    debug!("found {} batch files in {:?}", paths.len(), src);
    Ok(paths)
}

/// Reads a batch file, a JSON array of [ExampleRecord].
pub fn read_batch(path: &Path) -> Result<Vec<ExampleRecord>, Error> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
