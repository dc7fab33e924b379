use std::path::Path;

use crate::shared::video_metadata::VideoMetadata;

/// Reads frame size, rate and duration of a video without decoding it.
pub trait VideoProbe: Send {
    fn probe(&self, path: &Path) -> Result<VideoMetadata, Box<dyn std::error::Error>>;
}
