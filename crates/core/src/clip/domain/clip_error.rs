use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ClipError {
    #[error("Invalid time format: {0}")]
    InvalidTimeFormat(String),
    #[error("Invalid start or end time: {start_ms}ms to {end_ms}ms does not fit a {total_ms}ms video")]
    InvalidClipWindow {
        start_ms: u64,
        end_ms: u64,
        total_ms: u64,
    },
    #[error("No files downloaded matching {0}")]
    MissingDownloadArtifact(PathBuf),
}
