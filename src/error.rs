//! Crate error type.
//!
//! Only construction can fail. Once a controller exists, invalid input
//! (clicks on resolved tiles, pressing a disabled control) is reported as
//! an ignored outcome, never as an error.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::ImageRef;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("at least one image is required")]
    NoImages,

    #[error("image listed more than once: {0}")]
    DuplicateImage(ImageRef),

    #[error("too many images for one board: {count} (limit {limit})")]
    TooManyImages { count: usize, limit: usize },

    #[error("board needs at least one column")]
    NoColumns,

    #[error("{field} must be greater than zero")]
    ZeroInterval { field: &'static str },

    #[error("victory message is empty")]
    EmptyVictoryMessage,

    #[error("failed to read config {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    ParseConfig(#[from] serde_json::Error),
}
