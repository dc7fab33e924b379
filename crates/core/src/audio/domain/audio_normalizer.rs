use std::path::{Path, PathBuf};

/// Produces a loudness-normalized copy of a media file's audio.
pub trait AudioNormalizer: Send {
    /// Write the normalized copy inside `workdir` and return its path.
    fn normalize(&self, input: &Path, workdir: &Path)
        -> Result<PathBuf, Box<dyn std::error::Error>>;
}
