use std::path::{Path, PathBuf};

/// Online video host reachable by URL.
pub trait MediaSource: Send {
    /// Total duration in milliseconds.
    fn duration_ms(&self, url: &str) -> Result<u64, Box<dyn std::error::Error>>;

    /// Download the full media next to `stem` (the extension is the
    /// source's choice) and return the file that was written.
    fn download(&self, url: &str, stem: &Path) -> Result<PathBuf, Box<dyn std::error::Error>>;
}
