use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::audio::domain::audio_normalizer::AudioNormalizer;
use crate::shared::constants::{LOUDNORM_FILTER, WHISPER_SAMPLE_RATE};
use crate::shared::external_tool::{run_tool, Tool};

const NORMALIZED_FILE: &str = "normalized.wav";

/// EBU R128 loudness normalization through ffmpeg's `loudnorm` filter.
///
/// The output is a mono WAV at the transcription sample rate; it only feeds
/// the transcriber and never ends up in the rendered video.
#[derive(Debug)]
pub struct LoudnormNormalizer {
    ffmpeg: PathBuf,
}

impl LoudnormNormalizer {
    pub fn new(ffmpeg: PathBuf) -> Self {
        Self { ffmpeg }
    }

    pub fn normalize_args(input: &Path, output: &Path) -> Vec<OsString> {
        vec![
            "-y".into(),
            "-i".into(),
            input.as_os_str().to_owned(),
            "-vn".into(),
            "-af".into(),
            LOUDNORM_FILTER.into(),
            "-ar".into(),
            WHISPER_SAMPLE_RATE.to_string().into(),
            "-ac".into(),
            "1".into(),
            output.as_os_str().to_owned(),
        ]
    }
}

impl AudioNormalizer for LoudnormNormalizer {
    fn normalize(
        &self,
        input: &Path,
        workdir: &Path,
    ) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let output = workdir.join(NORMALIZED_FILE);
        log::info!("Normalizing audio loudness of {}", input.display());
        let mut command = Command::new(&self.ffmpeg);
        command.args(Self::normalize_args(input, &output));
        run_tool(Tool::Ffmpeg, &mut command)?;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_args() {
        let args = LoudnormNormalizer::normalize_args(Path::new("in.mp4"), Path::new("out.wav"));
        let args: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            [
                "-y",
                "-i",
                "in.mp4",
                "-vn",
                "-af",
                "loudnorm=I=-16:TP=-1.5:LRA=11",
                "-ar",
                "16000",
                "-ac",
                "1",
                "out.wav"
            ]
        );
    }

    #[test]
    fn test_normalize_missing_ffmpeg_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let normalizer = LoudnormNormalizer::new(PathBuf::from("/nonexistent/ffmpeg"));
        assert!(normalizer
            .normalize(Path::new("in.mp4"), dir.path())
            .is_err());
    }
}
