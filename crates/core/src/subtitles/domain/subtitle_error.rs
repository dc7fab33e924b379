use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SubtitleError {
    #[error("Input file not found: {0}")]
    MissingInputFile(PathBuf),
}
