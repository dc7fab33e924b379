use std::path::Path;

use ffmpeg_next::util::frame::audio::Audio;

use crate::audio::domain::audio_segment::AudioSegment;
use crate::video::domain::audio_reader::AudioReader;

/// Decodes and downmixes a media file's audio using ffmpeg-next.
#[derive(Debug, Default)]
pub struct FfmpegAudioReader;

impl AudioReader for FfmpegAudioReader {
    fn read_mono(
        &self,
        path: &Path,
        sample_rate: u32,
    ) -> Result<Option<AudioSegment>, Box<dyn std::error::Error>> {
        ffmpeg_next::init()?;

        let mut ictx = ffmpeg_next::format::input(path)?;

        let Some(audio_stream) = ictx.streams().best(ffmpeg_next::media::Type::Audio) else {
            log::warn!("{} has no audio track", path.display());
            return Ok(None);
        };
        let audio_stream_index = audio_stream.index();

        let codec_ctx =
            ffmpeg_next::codec::context::Context::from_parameters(audio_stream.parameters())?;
        let mut decoder = codec_ctx.decoder().audio()?;

        let mut resampler = ffmpeg_next::software::resampling::Context::get(
            decoder.format(),
            decoder.channel_layout(),
            decoder.rate(),
            ffmpeg_next::format::Sample::F32(ffmpeg_next::format::sample::Type::Planar),
            ffmpeg_next::ChannelLayout::MONO,
            sample_rate,
        )?;

        let mut samples: Vec<f32> = Vec::new();
        let mut decoded = Audio::empty();
        let mut resampled = Audio::empty();

        for (stream, packet) in ictx.packets() {
            if stream.index() != audio_stream_index {
                continue;
            }
            decoder.send_packet(&packet)?;
            while decoder.receive_frame(&mut decoded).is_ok() {
                resampler.run(&decoded, &mut resampled)?;
                append_samples(&resampled, &mut samples);
            }
        }

        decoder.send_eof()?;
        while decoder.receive_frame(&mut decoded).is_ok() {
            resampler.run(&decoded, &mut resampled)?;
            append_samples(&resampled, &mut samples);
        }

        // The resampler may still hold a tail of buffered samples
        if let Ok(Some(delay)) = resampler.flush(&mut resampled) {
            if delay.output > 0 {
                append_samples(&resampled, &mut samples);
            }
        }

        let segment = AudioSegment::new(samples, sample_rate, 1);
        log::info!(
            "Decoded {:.1}s of audio from {}",
            segment.duration(),
            path.display()
        );
        Ok(Some(segment))
    }
}

/// Append the samples of a planar mono f32 frame.
fn append_samples(frame: &Audio, out: &mut Vec<f32>) {
    let num_samples = frame.samples();
    if num_samples == 0 {
        return;
    }
    let data = frame.data(0);
    let floats = unsafe { std::slice::from_raw_parts(data.as_ptr() as *const f32, num_samples) };
    out.extend_from_slice(floats);
}
