use std::path::PathBuf;
use std::process;

use clap::error::ErrorKind;
use clap::Parser;

use youclipper_core::audio::domain::audio_normalizer::AudioNormalizer;
use youclipper_core::audio::domain::transcriber::TranscriptionMode;
use youclipper_core::audio::infrastructure::loudnorm_normalizer::LoudnormNormalizer;
use youclipper_core::audio::infrastructure::whisper_transcriber::create_transcriber;
use youclipper_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use youclipper_core::pipeline::subtitle_video_use_case::{plan_output, SubtitleVideoUseCase};
use youclipper_core::shared::external_tool::{require_tool, Tool};
use youclipper_core::shared::model_resolver::resolve_whisper_model;
use youclipper_core::shared::prompt::Prompt;
use youclipper_core::shared::settings::SubtitleSettings;
use youclipper_core::subtitles::domain::segment_editor::SegmentEditor;
use youclipper_core::subtitles::domain::subtitle_scheduler::SubtitleScheduler;
use youclipper_core::subtitles::domain::word_cue::Anchor;
use youclipper_core::subtitles::infrastructure::ass_compositor::AssCompositor;
use youclipper_core::subtitles::infrastructure::prompt_segment_editor::PromptSegmentEditor;
use youclipper_core::video::infrastructure::ffmpeg_audio_reader::FfmpegAudioReader;
use youclipper_core::video::infrastructure::ffmpeg_probe::FfmpegProbe;

/// Burn auto-generated, word-by-word subtitles into a video.
#[derive(Parser)]
#[command(name = "yousubtitler", version)]
struct Cli {
    /// Input video file.
    input: PathBuf,

    /// Settings file (JSON). Defaults to the user config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Review and correct each transcribed segment before rendering.
    #[arg(long)]
    review: bool,

    /// Loudness-normalize the audio before transcription.
    #[arg(long)]
    normalize: bool,

    /// Show words at a fixed size instead of growing them.
    #[arg(long)]
    no_animate: bool,

    /// Transcribe word by word instead of phrase by phrase.
    #[arg(long)]
    word_level: bool,

    /// Whisper model name, e.g. tiny.en, base.en, medium.en.
    #[arg(long)]
    model: Option<String>,

    /// Vertical placement: top, middle or bottom.
    #[arg(long)]
    anchor: Option<Anchor>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return;
        }
        Err(e) => {
            let _ = e.print();
            process::exit(1);
        }
    };

    if let Err(e) = run(cli) {
        println!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let ffmpeg = require_tool(Tool::Ffmpeg)?;
    let settings = apply_overrides(SubtitleSettings::load(cli.config.as_deref())?, &cli);
    settings.validate()?;

    let Some(output) = plan_output(&cli.input, |path| {
        Prompt::stdio().confirm(&format!(
            "{} already exists. Overwrite?",
            path.display()
        ))
    })?
    else {
        println!("Kept the existing output; nothing was written.");
        return Ok(());
    };

    log::info!("Starting transcription and subtitling process...");
    let model_path = resolve_whisper_model(&settings.model, Some(Box::new(download_progress)))?;
    eprintln!();

    let transcriber = create_transcriber(settings.transcription, &model_path)?;
    let normalizer: Option<Box<dyn AudioNormalizer>> = settings
        .normalize_audio
        .then(|| Box::new(LoudnormNormalizer::new(ffmpeg.clone())) as Box<dyn AudioNormalizer>);
    let editor: Option<Box<dyn SegmentEditor>> = settings
        .review
        .then(|| Box::new(PromptSegmentEditor::new(Prompt::stdio())) as Box<dyn SegmentEditor>);

    let mut use_case = SubtitleVideoUseCase::new(
        Box::new(FfmpegProbe),
        Box::new(FfmpegAudioReader),
        transcriber,
        normalizer,
        editor,
        SubtitleScheduler::new(settings.schedule_config()),
        Box::new(AssCompositor::new(ffmpeg, settings.render_style())),
        Box::new(StdoutPipelineLogger::new()),
    );
    use_case.execute(&cli.input, &output)?;

    log::info!("Process completed successfully.");
    println!("Subtitled video written to: {}", output.display());
    Ok(())
}

/// Command-line flags win over the settings file.
fn apply_overrides(mut settings: SubtitleSettings, cli: &Cli) -> SubtitleSettings {
    if cli.review {
        settings.review = true;
    }
    if cli.normalize {
        settings.normalize_audio = true;
    }
    if cli.no_animate {
        settings.animate = false;
    }
    if cli.word_level {
        settings.transcription = TranscriptionMode::Word;
    }
    if let Some(model) = &cli.model {
        settings.model = model.clone();
    }
    if let Some(anchor) = cli.anchor {
        settings.anchor = anchor;
    }
    settings
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading Whisper model... {pct}%");
    } else {
        eprint!("\rDownloading Whisper model... {downloaded} bytes");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_positional_argument() {
        let cli = Cli::try_parse_from(["yousubtitler", "talk.mp4"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("talk.mp4"));
        assert!(!cli.review);
    }

    #[test]
    fn test_missing_or_extra_arguments_rejected() {
        assert!(Cli::try_parse_from(["yousubtitler"]).is_err());
        assert!(Cli::try_parse_from(["yousubtitler", "a.mp4", "b.mp4"]).is_err());
    }

    #[test]
    fn test_flags_override_settings() {
        let cli = Cli::try_parse_from([
            "yousubtitler",
            "talk.mp4",
            "--review",
            "--no-animate",
            "--word-level",
            "--model",
            "tiny.en",
            "--anchor",
            "top",
        ])
        .unwrap();
        let settings = apply_overrides(SubtitleSettings::default(), &cli);
        assert!(settings.review);
        assert!(!settings.animate);
        assert_eq!(settings.transcription, TranscriptionMode::Word);
        assert_eq!(settings.model, "tiny.en");
        assert_eq!(settings.anchor, Anchor::Top);
        assert!(!settings.normalize_audio);
    }

    #[test]
    fn test_absent_flags_keep_settings() {
        let cli = Cli::try_parse_from(["yousubtitler", "talk.mp4"]).unwrap();
        let file_settings = SubtitleSettings {
            review: true,
            anchor: Anchor::Middle,
            ..SubtitleSettings::default()
        };
        assert_eq!(apply_overrides(file_settings.clone(), &cli), file_settings);
    }

    #[test]
    fn test_unknown_anchor_rejected() {
        assert!(Cli::try_parse_from(["yousubtitler", "a.mp4", "--anchor", "left"]).is_err());
    }
}
