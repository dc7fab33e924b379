use std::path::Path;

use crate::shared::video_metadata::VideoMetadata;
use crate::video::domain::video_probe::VideoProbe;

/// Reads container and stream headers via ffmpeg-next (libavformat).
///
/// Width and height are reported as displayed: a stream tagged with a 90 or
/// 270 degree rotation has them swapped, since ffmpeg autorotates before the
/// subtitle filter sees the frame.
#[derive(Debug, Default)]
pub struct FfmpegProbe;

impl VideoProbe for FfmpegProbe {
    fn probe(&self, path: &Path) -> Result<VideoMetadata, Box<dyn std::error::Error>> {
        ffmpeg_next::init()?;

        let ictx = ffmpeg_next::format::input(path)?;

        let stream = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or("No video stream found")?;

        let codec_ctx = ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())?;
        let decoder = codec_ctx.decoder().video()?;

        let rate = stream.rate();
        let fps = if rate.denominator() != 0 {
            rate.numerator() as f64 / rate.denominator() as f64
        } else {
            0.0
        };

        let (width, height) = match extract_rotation(&stream) {
            90 | 270 => (decoder.height(), decoder.width()),
            _ => (decoder.width(), decoder.height()),
        };

        // Container duration is in AV_TIME_BASE units (microseconds).
        let duration_seconds = if ictx.duration() > 0 {
            ictx.duration() as f64 / f64::from(ffmpeg_next::ffi::AV_TIME_BASE)
        } else {
            0.0
        };

        let metadata = VideoMetadata {
            width,
            height,
            fps,
            duration_seconds,
            source_path: Some(path.to_path_buf()),
        };
        log::debug!(
            "Probed {}: {}x{} @ {:.2} fps, {:.2}s",
            path.display(),
            metadata.width,
            metadata.height,
            metadata.fps,
            metadata.duration_seconds
        );
        Ok(metadata)
    }
}

fn extract_rotation(stream: &ffmpeg_next::format::stream::Stream) -> i32 {
    for side_data in stream.side_data() {
        if side_data.kind() == ffmpeg_next::codec::packet::side_data::Type::DisplayMatrix {
            if let Some(angle) = parse_display_matrix(side_data.data()) {
                return normalize_rotation(angle);
            }
        }
    }

    // Older muxers only set a "rotate" tag
    if let Some(rotate_str) = stream.metadata().get("rotate") {
        if let Ok(angle) = rotate_str.parse::<i32>() {
            return normalize_rotation(angle);
        }
    }

    0
}

/// Rotation in degrees from a 3x3 display matrix of 16.16 fixed-point i32s.
fn parse_display_matrix(data: &[u8]) -> Option<i32> {
    if data.len() < 36 {
        return None;
    }

    let m00 = i32::from_le_bytes(data[0..4].try_into().ok()?) as f64 / 65536.0;
    let m10 = i32::from_le_bytes(data[4..8].try_into().ok()?) as f64 / 65536.0;

    Some(-m10.atan2(m00).to_degrees().round() as i32)
}

fn normalize_rotation(angle: i32) -> i32 {
    match angle.rem_euclid(360) {
        45..=134 => 90,
        135..=224 => 180,
        225..=315 => 270,
        _ => 0,
    }
}
