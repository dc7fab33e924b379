/// Default whisper.cpp model. Resolved to `ggml-<name>.bin`.
pub const DEFAULT_WHISPER_MODEL: &str = "medium.en";
pub const WHISPER_MODEL_BASE_URL: &str = "https://huggingface.co/ggerganov/whisper.cpp/resolve/main";
pub const WHISPER_SAMPLE_RATE: u32 = 16000;
pub const WHISPER_LANGUAGE: &str = "en";

pub const DEFAULT_CLIP_NAME: &str = "output_clip";
pub const CLIP_EXTENSION: &str = ".mp4";

/// Base name yt-dlp writes the full download to; the extension is yt-dlp's choice.
pub const TEMP_DOWNLOAD_STEM: &str = "temp_video";

pub const SUBTITLED_SUFFIX: &str = "_subtitled";

/// Pause between consecutive words of one segment, in seconds.
pub const DEFAULT_WORD_GAP: f64 = 0.1;

/// Length of one font-size animation tick, in seconds.
pub const DEFAULT_UPDATE_INTERVAL: f64 = 0.05;

/// Shortest on-screen time a word can get when a segment is too short for its words.
/// One centisecond, the resolution of ASS timestamps.
pub const MIN_WORD_DURATION: f64 = 0.01;

pub const DEFAULT_FONT_SIZE: u32 = 40;
pub const DEFAULT_INITIAL_FONT_SIZE: u32 = 30;
pub const DEFAULT_FINAL_FONT_SIZE: u32 = 60;

/// Fraction of the video width a word may occupy before wrapping.
pub const WRAP_WIDTH_RATIO: f64 = 0.9;

pub const DEFAULT_FONT: &str = "Arial";
pub const DEFAULT_TEXT_COLOR: &str = "black";
pub const DEFAULT_HIGHLIGHT_COLOR: &str = "yellow";

/// Fade-in and fade-out applied to each caption, in seconds.
pub const DEFAULT_FADE: f64 = 0.5;

/// EBU R128 targets handed to ffmpeg's loudnorm filter.
pub const LOUDNORM_FILTER: &str = "loudnorm=I=-16:TP=-1.5:LRA=11";
