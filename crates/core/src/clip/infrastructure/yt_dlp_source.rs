use std::path::{Path, PathBuf};
use std::process::Command;

use crate::clip::domain::clip_error::ClipError;
use crate::clip::domain::media_source::MediaSource;
use crate::clip::domain::timestamp::parse_time;
use crate::shared::external_tool::{capture_tool_output, run_tool, Tool};

/// Fetches duration and media through the `yt-dlp` executable.
pub struct YtDlpSource {
    yt_dlp: PathBuf,
}

impl YtDlpSource {
    pub fn new(yt_dlp: PathBuf) -> Self {
        Self { yt_dlp }
    }
}

impl MediaSource for YtDlpSource {
    fn duration_ms(&self, url: &str) -> Result<u64, Box<dyn std::error::Error>> {
        let mut command = Command::new(&self.yt_dlp);
        command.arg("--get-duration").arg(url);
        let reported = capture_tool_output(Tool::YtDlp, &mut command)?;
        log::info!("Reported duration: {reported}");
        Ok(parse_time(&normalize_duration(&reported))?)
    }

    fn download(&self, url: &str, stem: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let template = format!("{}.%(ext)s", stem.display());
        let mut command = Command::new(&self.yt_dlp);
        command.arg(url).arg("-o").arg(&template);
        run_tool(Tool::YtDlp, &mut command)?;
        Ok(find_download(stem)?)
    }
}

/// `yt-dlp --get-duration` prints videos under a minute as bare seconds.
fn normalize_duration(reported: &str) -> String {
    let first = reported.lines().next().unwrap_or_default().trim();
    if first.contains(':') {
        first.to_string()
    } else {
        format!("0:{first}")
    }
}

/// Locate the file yt-dlp wrote for `stem`, whatever extension it picked.
pub fn find_download(stem: &Path) -> Result<PathBuf, ClipError> {
    let missing = || ClipError::MissingDownloadArtifact(stem.with_extension("*"));
    let pattern = format!("{}.*", glob::Pattern::escape(&stem.to_string_lossy()));

    let mut matches: Vec<PathBuf> = glob::glob(&pattern)
        .map_err(|_| missing())?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .map_or(true, |ext| ext != "part" && ext != "ytdl")
        })
        .collect();
    matches.sort();
    matches.into_iter().next().ok_or_else(missing)
}
