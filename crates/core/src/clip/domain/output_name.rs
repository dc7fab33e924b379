use std::path::{Path, PathBuf};

use crate::shared::constants::{CLIP_EXTENSION, DEFAULT_CLIP_NAME, SUBTITLED_SUFFIX};

/// Output path for a clip: blank falls back to the default name and `.mp4`
/// is appended unless already present.
pub fn clip_output_path(name: &str) -> PathBuf {
    let name = name.trim();
    let name = if name.is_empty() { DEFAULT_CLIP_NAME } else { name };
    if name.ends_with(CLIP_EXTENSION) {
        PathBuf::from(name)
    } else {
        PathBuf::from(format!("{name}{CLIP_EXTENSION}"))
    }
}

/// `<dir>/<stem>_subtitled.mp4` next to the input video.
pub fn subtitled_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}{SUBTITLED_SUFFIX}{CLIP_EXTENSION}"))
}
