use std::fmt;

use serde::{Deserialize, Serialize};

use super::audio_segment::AudioSegment;
use super::transcript::Segment;

/// Domain interface for speech-to-text transcription.
///
/// Implementations return chronologically ordered segments; how finely the
/// speech is cut into segments is up to the implementation.
pub trait Transcriber: Send {
    fn transcribe(&self, audio: &AudioSegment) -> Result<Vec<Segment>, Box<dyn std::error::Error>>;
}

/// Granularity of the segments a transcriber produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptionMode {
    /// One segment per recognised phrase.
    #[default]
    Segment,
    /// One segment per recognised word, with the word's own timing.
    Word,
}

impl fmt::Display for TranscriptionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranscriptionMode::Segment => write!(f, "segment"),
            TranscriptionMode::Word => write!(f, "word"),
        }
    }
}
