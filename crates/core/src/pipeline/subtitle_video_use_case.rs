use std::path::{Path, PathBuf};

use crate::audio::domain::audio_normalizer::AudioNormalizer;
use crate::audio::domain::transcriber::Transcriber;
use crate::audio::domain::transcript::Segment;
use crate::clip::domain::output_name::subtitled_output_path;
use crate::shared::constants::WHISPER_SAMPLE_RATE;
use crate::subtitles::domain::segment_editor::SegmentEditor;
use crate::subtitles::domain::subtitle_compositor::SubtitleCompositor;
use crate::subtitles::domain::subtitle_error::SubtitleError;
use crate::subtitles::domain::subtitle_scheduler::SubtitleScheduler;
use crate::video::domain::audio_reader::AudioReader;
use crate::video::domain::video_probe::VideoProbe;

use super::pipeline_logger::{
    timed, PipelineLogger, STAGE_NORMALIZE, STAGE_RENDER, STAGE_REVIEW, STAGE_SCHEDULE,
    STAGE_TRANSCRIBE,
};

/// Where the subtitled video of `input` goes, or `None` if the operator
/// declined to overwrite an existing file there.
///
/// `confirm_overwrite` is only asked when the output already exists.
pub fn plan_output(
    input: &Path,
    mut confirm_overwrite: impl FnMut(&Path) -> std::io::Result<bool>,
) -> Result<Option<PathBuf>, Box<dyn std::error::Error>> {
    if !input.is_file() {
        return Err(SubtitleError::MissingInputFile(input.to_path_buf()).into());
    }
    let output = subtitled_output_path(input);
    if output.exists() && !confirm_overwrite(&output)? {
        log::info!("Keeping existing {}", output.display());
        return Ok(None);
    }
    Ok(Some(output))
}

/// Transcribes a local video and burns word-by-word subtitles into a copy.
///
/// Stages run in order: probe, optional loudness normalization of the audio
/// fed to the transcriber, transcription, optional review, scheduling and
/// rendering. The rendered video always keeps the original audio.
pub struct SubtitleVideoUseCase {
    probe: Box<dyn VideoProbe>,
    audio_reader: Box<dyn AudioReader>,
    transcriber: Box<dyn Transcriber>,
    normalizer: Option<Box<dyn AudioNormalizer>>,
    editor: Option<Box<dyn SegmentEditor>>,
    scheduler: SubtitleScheduler,
    compositor: Box<dyn SubtitleCompositor>,
    logger: Box<dyn PipelineLogger>,
}

impl SubtitleVideoUseCase {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        probe: Box<dyn VideoProbe>,
        audio_reader: Box<dyn AudioReader>,
        transcriber: Box<dyn Transcriber>,
        normalizer: Option<Box<dyn AudioNormalizer>>,
        editor: Option<Box<dyn SegmentEditor>>,
        scheduler: SubtitleScheduler,
        compositor: Box<dyn SubtitleCompositor>,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            probe,
            audio_reader,
            transcriber,
            normalizer,
            editor,
            scheduler,
            compositor,
            logger,
        }
    }

    pub fn execute(
        &mut self,
        input: &Path,
        output: &Path,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if !input.is_file() {
            return Err(SubtitleError::MissingInputFile(input.to_path_buf()).into());
        }

        let metadata = self.probe.probe(input)?;
        self.logger.info(&format!(
            "Input {}x{}, {:.1}s",
            metadata.width, metadata.height, metadata.duration_seconds
        ));

        let mut segments = self.transcribe(input)?;
        self.logger.metric("segments", segments.len() as f64);

        if let Some(editor) = self.editor.as_mut() {
            timed(self.logger.as_mut(), STAGE_REVIEW, || {
                editor.review(&mut segments)
            })?;
        }

        let scheduler = &self.scheduler;
        let cues = timed(self.logger.as_mut(), STAGE_SCHEDULE, || {
            scheduler.schedule_all(&segments, metadata.width)
        });
        self.logger.metric("cues", cues.len() as f64);

        self.logger
            .info(&format!("Rendering subtitles into {}", output.display()));
        let compositor = &self.compositor;
        timed(self.logger.as_mut(), STAGE_RENDER, || {
            compositor.composite(input, &metadata, &cues, output)
        })?;

        self.logger.summary();
        Ok(())
    }

    fn transcribe(&mut self, input: &Path) -> Result<Vec<Segment>, Box<dyn std::error::Error>> {
        // Keeps the normalized copy alive until it has been decoded
        let workdir = tempfile::tempdir()?;
        let audio_source = match &self.normalizer {
            Some(normalizer) => timed(self.logger.as_mut(), STAGE_NORMALIZE, || {
                normalizer.normalize(input, workdir.path())
            })?,
            None => input.to_path_buf(),
        };

        let Some(audio) = self.audio_reader.read_mono(&audio_source, WHISPER_SAMPLE_RATE)? else {
            self.logger
                .info("No audio track found; the video is rendered without subtitles");
            return Ok(Vec::new());
        };

        let transcriber = &self.transcriber;
        let segments = timed(self.logger.as_mut(), STAGE_TRANSCRIBE, || {
            transcriber.transcribe(&audio)
        })?;
        self.logger
            .info(&format!("Transcribed {} segments", segments.len()));
        Ok(segments)
    }
}
