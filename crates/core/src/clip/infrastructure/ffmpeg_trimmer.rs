use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::clip::domain::clip_trimmer::ClipTrimmer;
use crate::clip::domain::time_span::TimeSpan;
use crate::shared::external_tool::{run_tool, Tool};

/// Trims with the `ffmpeg` executable, re-encoding to H.264/AAC.
///
/// Stream copy would be faster but cuts on keyframes and leaves audio and
/// video out of sync.
pub struct FfmpegTrimmer {
    ffmpeg: PathBuf,
}

impl FfmpegTrimmer {
    pub fn new(ffmpeg: PathBuf) -> Self {
        Self { ffmpeg }
    }
}

impl ClipTrimmer for FfmpegTrimmer {
    fn trim(
        &self,
        input: &Path,
        span: &TimeSpan,
        output: &Path,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut command = Command::new(&self.ffmpeg);
        command.args(trim_args(input, span, output));
        run_tool(Tool::Ffmpeg, &mut command)?;
        Ok(())
    }
}

fn trim_args(input: &Path, span: &TimeSpan, output: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["-i".into(), input.into()];
    args.extend(
        [
            "-ss".to_string(),
            format!("{:.3}", span.start_seconds()),
            "-to".to_string(),
            format!("{:.3}", span.end_seconds()),
            "-c:v".to_string(),
            "libx264".to_string(),
            "-c:a".to_string(),
            "aac".to_string(),
        ]
        .map(OsString::from),
    );
    args.push(output.into());
    args
}
