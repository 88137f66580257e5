// crates/circularity-core/src/error.rs

use std::path::PathBuf;

use circularity_parser::ParserError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Table parsing failed: {0}")]
    Parse(#[from] ParserError),

    #[error("No processes matched {filter}")]
    EmptyResult { filter: String },

    #[error("File I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV writing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
