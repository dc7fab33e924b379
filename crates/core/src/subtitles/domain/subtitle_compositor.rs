use std::path::Path;

use crate::shared::video_metadata::VideoMetadata;

use super::word_cue::Cue;

/// Layers timed text cues over a base video and writes the result.
pub trait SubtitleCompositor: Send {
    fn composite(
        &self,
        video: &Path,
        metadata: &VideoMetadata,
        cues: &[Cue],
        output: &Path,
    ) -> Result<(), Box<dyn std::error::Error>>;
}
