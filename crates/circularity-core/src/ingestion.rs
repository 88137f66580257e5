use std::path::{Path, PathBuf};

use blake3::Hasher;
use circularity_parser::{parse_table, ProductSystemData};
use serde::Serialize;
use tracing::info;

use crate::error::{CoreError, Result};

/// A parsed table plus where it came from.
#[derive(Debug, Clone, Serialize)]
pub struct LoadedTable {
    pub path: PathBuf,
    pub hash: String,
    pub data: ProductSystemData,
}

pub fn compute_hash(contents: &[u8]) -> String {
    let mut hasher = Hasher::new();
    hasher.update(contents);
    hasher.finalize().to_hex().to_string()
}

/// Parses table contents already held in memory.
pub fn load_table(path: impl Into<PathBuf>, contents: &str, delimiter: char) -> Result<LoadedTable> {
    let path = path.into();
    let hash = compute_hash(contents.as_bytes());
    let data = parse_table(contents, delimiter)?;
    info!(
        path = %path.display(),
        hash = %hash,
        processes = data.len(),
        "Loaded product system table"
    );
    Ok(LoadedTable { path, hash, data })
}

/// Reads the whole file at `path` and parses it.
pub fn read_table(path: &Path, delimiter: char) -> Result<LoadedTable> {
    let contents = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_table(path, &contents, delimiter)
}
