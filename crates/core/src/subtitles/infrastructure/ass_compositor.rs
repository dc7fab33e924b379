use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::shared::external_tool::{run_tool, Tool};
use crate::shared::video_metadata::VideoMetadata;
use crate::subtitles::domain::subtitle_compositor::SubtitleCompositor;
use crate::subtitles::domain::word_cue::Cue;

use super::ass_document::{build_ass_document, RenderStyle};

/// Burns cues into the video with ffmpeg's libass filter.
///
/// The cues are written to a throwaway `.ass` document which ffmpeg renders
/// while re-encoding the video to H.264/AAC.
pub struct AssCompositor {
    ffmpeg: PathBuf,
    style: RenderStyle,
}

impl AssCompositor {
    pub fn new(ffmpeg: PathBuf, style: RenderStyle) -> Self {
        Self { ffmpeg, style }
    }
}

impl SubtitleCompositor for AssCompositor {
    fn composite(
        &self,
        video: &Path,
        metadata: &VideoMetadata,
        cues: &[Cue],
        output: &Path,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let document = build_ass_document(cues, metadata.width, metadata.height, &self.style)?;

        let workdir = tempfile::tempdir()?;
        let document_path = workdir.path().join("subtitles.ass");
        fs::write(&document_path, document)?;
        log::info!("Wrote {} cues to {}", cues.len(), document_path.display());

        let mut command = Command::new(&self.ffmpeg);
        command
            .arg("-y")
            .arg("-i")
            .arg(video)
            .arg("-vf")
            .arg(ass_filter(&document_path))
            .args(["-c:v", "libx264", "-c:a", "aac"])
            .arg(output);
        run_tool(Tool::Ffmpeg, &mut command)?;
        Ok(())
    }
}

/// `ass=` filter argument with the path quoted for ffmpeg's filtergraph parser.
pub fn ass_filter(path: &Path) -> String {
    let escaped = path
        .to_string_lossy()
        .replace('\\', "/")
        .replace(':', "\\:")
        .replace('\'', "\\'");
    format!("ass='{escaped}'")
}
