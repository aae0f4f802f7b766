//! Error type shared by the scanning, layout and rendering stages.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("scan root does not exist: {}", .0.display())]
    MissingRoot(PathBuf),
    #[error("nothing to map under {} (is the root ignored?)", .0.display())]
    EmptyTree(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: ron::de::SpannedError,
    },
    #[error("invalid reference pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("embedded asset not found: {0}")]
    AssetNotFound(String),
    #[error("invalid UTF-8 in embedded asset: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("failed to rasterise map: {0}")]
    Rasterise(String),
}
