use std::io::{self, BufRead, Write};
use std::process;

use clap::Parser;

use youclipper_core::clip::domain::output_name::clip_output_path;
use youclipper_core::clip::infrastructure::ffmpeg_trimmer::FfmpegTrimmer;
use youclipper_core::clip::infrastructure::yt_dlp_source::YtDlpSource;
use youclipper_core::pipeline::clip_video_use_case::{ClipRequest, ClipVideoUseCase};
use youclipper_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use youclipper_core::shared::constants::DEFAULT_CLIP_NAME;
use youclipper_core::shared::external_tool::{require_tool, Tool};
use youclipper_core::shared::prompt::Prompt;

/// Download and clip online videos easily.
#[derive(Parser)]
#[command(name = "youclipper", version)]
struct Cli {
    /// URL of the video to download and clip.
    #[arg(long)]
    url: Option<String>,

    /// Start of the clip, hh:mm:ss[.xxx] or mm:ss[.xxx].
    #[arg(long)]
    start: Option<String>,

    /// End of the clip, hh:mm:ss[.xxx] or mm:ss[.xxx].
    #[arg(long, alias = "stop")]
    end: Option<String>,

    /// Output file name; ".mp4" is appended when missing.
    #[arg(long, alias = "out")]
    output: Option<String>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(output) => println!("Video clipped successfully: {output}"),
        Err(e) => {
            println!("Error: {e}");
            process::exit(1);
        }
    }
}

fn run() -> Result<String, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let yt_dlp = require_tool(Tool::YtDlp)?;
    let ffmpeg = require_tool(Tool::Ffmpeg)?;

    let request = complete_request(cli, &mut Prompt::stdio())?;

    let mut use_case = ClipVideoUseCase::new(
        Box::new(YtDlpSource::new(yt_dlp)),
        Box::new(FfmpegTrimmer::new(ffmpeg)),
        Box::new(StdoutPipelineLogger::new()),
    );
    let output = use_case.execute(&request)?;
    Ok(output.display().to_string())
}

/// Ask for every value not given on the command line. Blank values count
/// as not given.
fn complete_request<R: BufRead, W: Write>(
    cli: Cli,
    prompt: &mut Prompt<R, W>,
) -> io::Result<ClipRequest> {
    let url = given_or_ask(cli.url, prompt, "Enter video URL: ")?;
    let start = given_or_ask(
        cli.start,
        prompt,
        "Enter start time (hh:mm:ss[.xxx] or mm:ss[.xxx]): ",
    )?;
    let end = given_or_ask(
        cli.end,
        prompt,
        "Enter end time (hh:mm:ss[.xxx] or mm:ss[.xxx]): ",
    )?;
    let name = given_or_ask(
        cli.output,
        prompt,
        &format!("Enter output filename without extension (default: {DEFAULT_CLIP_NAME}): "),
    )?;

    Ok(ClipRequest {
        url: url.trim().to_string(),
        start,
        end,
        output: clip_output_path(&name),
    })
}

fn given_or_ask<R: BufRead, W: Write>(
    value: Option<String>,
    prompt: &mut Prompt<R, W>,
    question: &str,
) -> io::Result<String> {
    match value.filter(|v| !v.trim().is_empty()) {
        Some(value) => Ok(value),
        None => prompt.ask(question),
    }
}
