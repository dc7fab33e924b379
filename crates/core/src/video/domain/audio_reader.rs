use std::path::Path;

use crate::audio::domain::audio_segment::AudioSegment;

/// Decodes the speech track of a media file for transcription.
pub trait AudioReader: Send {
    /// Decode to mono PCM at `sample_rate`. `None` when the file has no audio track.
    fn read_mono(
        &self,
        path: &Path,
        sample_rate: u32,
    ) -> Result<Option<AudioSegment>, Box<dyn std::error::Error>>;
}
