use std::fs;
use std::path::{Path, PathBuf};

use crate::clip::domain::clip_trimmer::ClipTrimmer;
use crate::clip::domain::media_source::MediaSource;
use crate::clip::domain::time_span::TimeSpan;
use crate::clip::domain::timestamp::{format_time, parse_time};
use crate::shared::constants::TEMP_DOWNLOAD_STEM;

use super::pipeline_logger::{timed, PipelineLogger, STAGE_DOWNLOAD, STAGE_TRIM};

/// What to cut, from where, and where to put it.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipRequest {
    pub url: String,
    pub start: String,
    pub end: String,
    pub output: PathBuf,
}

/// Downloads an online video and trims it to the requested window.
///
/// The window is validated against the reported duration before anything is
/// downloaded. The full download lives in a private temporary directory and
/// is removed once the trim has been attempted.
pub struct ClipVideoUseCase {
    source: Box<dyn MediaSource>,
    trimmer: Box<dyn ClipTrimmer>,
    logger: Box<dyn PipelineLogger>,
}

impl ClipVideoUseCase {
    pub fn new(
        source: Box<dyn MediaSource>,
        trimmer: Box<dyn ClipTrimmer>,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            source,
            trimmer,
            logger,
        }
    }

    pub fn execute(
        &mut self,
        request: &ClipRequest,
    ) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let start_ms = parse_time(&request.start)?;
        let end_ms = parse_time(&request.end)?;

        let total_ms = self.source.duration_ms(&request.url)?;
        self.logger
            .info(&format!("Video duration: {}", format_time(total_ms)));

        let span = TimeSpan::validate(start_ms, end_ms, total_ms)?;

        let workdir = tempfile::tempdir()?;
        let stem = workdir.path().join(TEMP_DOWNLOAD_STEM);
        self.logger.info(&format!("Downloading {}", request.url));
        let source = &self.source;
        let downloaded = timed(self.logger.as_mut(), STAGE_DOWNLOAD, || {
            source.download(&request.url, &stem)
        })?;

        self.logger.info(&format!(
            "Trimming {} - {} into {}",
            format_time(span.start_ms()),
            format_time(span.end_ms()),
            request.output.display()
        ));
        let trimmer = &self.trimmer;
        let trimmed = timed(self.logger.as_mut(), STAGE_TRIM, || {
            trimmer.trim(&downloaded, &span, &request.output)
        });

        remove_download(&downloaded);
        trimmed?;

        self.logger
            .metric("clip_seconds", span.duration_ms() as f64 / 1000.0);
        self.logger.summary();
        Ok(request.output.clone())
    }
}

fn remove_download(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => log::debug!("Removed temporary download {}", path.display()),
        Err(e) => log::warn!(
            "Could not remove temporary download {}: {e}",
            path.display()
        ),
    }
}
