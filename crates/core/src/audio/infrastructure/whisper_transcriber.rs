use std::path::{Path, PathBuf};

use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::audio::domain::audio_segment::AudioSegment;
use crate::audio::domain::transcriber::{Transcriber, TranscriptionMode};
use crate::audio::domain::transcript::Segment;
use crate::shared::constants::{WHISPER_LANGUAGE, WHISPER_SAMPLE_RATE};

/// Phrase-level transcription with whisper.cpp via whisper-rs.
#[derive(Debug)]
pub struct WhisperSegmentTranscriber {
    model_path: PathBuf,
}

/// Word-level transcription with whisper.cpp via whisper-rs.
///
/// Whisper is asked to split on word boundaries with a maximum segment
/// length of one token, so each returned segment carries a single word and
/// that word's own timestamps.
#[derive(Debug)]
pub struct WhisperWordTranscriber {
    model_path: PathBuf,
}

impl WhisperSegmentTranscriber {
    pub fn new(model_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            model_path: existing_model(model_path)?,
        })
    }
}

impl WhisperWordTranscriber {
    pub fn new(model_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            model_path: existing_model(model_path)?,
        })
    }
}

impl Transcriber for WhisperSegmentTranscriber {
    fn transcribe(&self, audio: &AudioSegment) -> Result<Vec<Segment>, Box<dyn std::error::Error>> {
        run_whisper(&self.model_path, audio, TranscriptionMode::Segment)
    }
}

impl Transcriber for WhisperWordTranscriber {
    fn transcribe(&self, audio: &AudioSegment) -> Result<Vec<Segment>, Box<dyn std::error::Error>> {
        run_whisper(&self.model_path, audio, TranscriptionMode::Word)
    }
}

/// Build the transcriber for `mode`.
pub fn create_transcriber(
    mode: TranscriptionMode,
    model_path: &Path,
) -> Result<Box<dyn Transcriber>, Box<dyn std::error::Error>> {
    log::info!("Using {mode}-level transcription with {}", model_path.display());
    match mode {
        TranscriptionMode::Segment => Ok(Box::new(WhisperSegmentTranscriber::new(model_path)?)),
        TranscriptionMode::Word => Ok(Box::new(WhisperWordTranscriber::new(model_path)?)),
    }
}

fn existing_model(model_path: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if !model_path.exists() {
        return Err(format!("Whisper model not found at: {}", model_path.display()).into());
    }
    Ok(model_path.to_path_buf())
}

fn run_whisper(
    model_path: &Path,
    audio: &AudioSegment,
    mode: TranscriptionMode,
) -> Result<Vec<Segment>, Box<dyn std::error::Error>> {
    if audio.is_empty() {
        return Ok(Vec::new());
    }
    if audio.sample_rate() != WHISPER_SAMPLE_RATE {
        return Err(format!(
            "Whisper needs {WHISPER_SAMPLE_RATE} Hz audio, got {} Hz",
            audio.sample_rate()
        )
        .into());
    }

    log::info!("Loading Whisper model...");
    let ctx = WhisperContext::new_with_params(
        model_path.to_str().ok_or("Invalid model path")?,
        WhisperContextParameters::default(),
    )
    .map_err(|e| format!("Failed to load Whisper model: {e}"))?;

    let mut state = ctx
        .create_state()
        .map_err(|e| format!("Failed to create Whisper state: {e}"))?;

    let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
    params.set_language(Some(WHISPER_LANGUAGE));
    params.set_translate(false);
    params.set_print_special(false);
    params.set_print_progress(false);
    params.set_print_realtime(false);
    params.set_print_timestamps(false);
    params.set_n_threads(num_cpus().min(8) as i32);
    if mode == TranscriptionMode::Word {
        params.set_token_timestamps(true);
        params.set_split_on_word(true);
        params.set_max_len(1);
    }

    log::info!("Transcribing {:.1}s of audio", audio.duration());
    state
        .full(params, audio.samples())
        .map_err(|e| format!("Whisper inference failed: {e}"))?;

    let mut segments = Vec::new();
    for seg_idx in 0..state.full_n_segments() {
        let Some(segment) = state.get_segment(seg_idx) else {
            continue;
        };
        let text = match segment.to_str() {
            Ok(t) => t,
            Err(_) => continue,
        };
        // Timestamps are in centiseconds (10ms units)
        let start = segment.start_timestamp() as f64 / 100.0;
        let end = segment.end_timestamp() as f64 / 100.0;
        if let Some(segment) = clean_segment(text, start, end) {
            segments.push(segment);
        }
    }

    log::info!("Transcription completed: {} segments", segments.len());
    Ok(segments)
}

/// Drop blank text, non-speech markers like `[BLANK_AUDIO]` and empty spans.
fn clean_segment(text: &str, start: f64, end: f64) -> Option<Segment> {
    let text = text.trim();
    if text.is_empty() || (text.starts_with('[') && text.ends_with(']')) {
        return None;
    }
    if end <= start {
        return None;
    }
    Some(Segment::new(text, start, end))
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_nonexistent_path_returns_error() {
        let result = WhisperSegmentTranscriber::new(Path::new("/nonexistent/model.bin"));
        assert!(result.is_err());
        let result = WhisperWordTranscriber::new(Path::new("/nonexistent/model.bin"));
        assert!(result.is_err());
    }

    #[test]
    fn test_new_nonexistent_path_error_message() {
        let err = WhisperSegmentTranscriber::new(Path::new("/nonexistent/model.bin"))
            .unwrap_err()
            .to_string();
        assert!(
            err.contains("not found"),
            "Expected 'not found' in error, got: {err}"
        );
    }

    #[test]
    fn test_factory_checks_model_for_both_modes() {
        for mode in [TranscriptionMode::Segment, TranscriptionMode::Word] {
            assert!(create_transcriber(mode, Path::new("/nonexistent/model.bin")).is_err());
        }
    }

    #[test]
    fn test_empty_audio_skips_inference() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let transcriber = WhisperWordTranscriber::new(tmp.path()).unwrap();
        let segments = transcriber
            .transcribe(&AudioSegment::new(Vec::new(), 16000, 1))
            .unwrap();
        assert!(segments.is_empty());
    }

    #[test]
    fn test_wrong_sample_rate_rejected_before_loading_model() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let transcriber = WhisperSegmentTranscriber::new(tmp.path()).unwrap();
        let err = transcriber
            .transcribe(&AudioSegment::new(vec![0.0; 4410], 44100, 1))
            .unwrap_err();
        assert!(err.to_string().contains("44100 Hz"));
    }

    #[test]
    fn test_clean_segment_trims_text() {
        let seg = clean_segment("  Hello there. ", 1.0, 2.5).unwrap();
        assert_eq!(seg, Segment::new("Hello there.", 1.0, 2.5));
    }

    #[test]
    fn test_clean_segment_drops_markers_and_blanks() {
        assert!(clean_segment("[BLANK_AUDIO]", 0.0, 1.0).is_none());
        assert!(clean_segment("   ", 0.0, 1.0).is_none());
    }

    #[test]
    fn test_clean_segment_drops_empty_span() {
        assert!(clean_segment("word", 1.0, 1.0).is_none());
    }

    #[test]
    #[ignore] // Requires whisper model file
    fn test_transcribe_does_not_crash_on_sine_wave() {
        let model_path = crate::shared::model_resolver::resolve_whisper_model("tiny.en", None)
            .expect("Failed to resolve whisper model");

        let transcriber =
            WhisperSegmentTranscriber::new(&model_path).expect("Failed to create transcriber");

        let sample_rate = 16000u32;
        let len = (3.0 * sample_rate as f64) as usize;
        let samples: Vec<f32> = (0..len)
            .map(|i| {
                let t = i as f64 / sample_rate as f64;
                (2.0 * std::f64::consts::PI * 440.0 * t).sin() as f32
            })
            .collect();
        let audio = AudioSegment::new(samples, sample_rate, 1);

        let result = transcriber.transcribe(&audio);
        assert!(result.is_ok(), "Transcription should not error: {result:?}");
    }
}
