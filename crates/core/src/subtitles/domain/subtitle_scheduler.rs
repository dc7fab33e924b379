use crate::audio::domain::transcript::Segment;
use crate::shared::constants::{
    DEFAULT_FINAL_FONT_SIZE, DEFAULT_FONT_SIZE, DEFAULT_INITIAL_FONT_SIZE, DEFAULT_UPDATE_INTERVAL,
    DEFAULT_WORD_GAP, MIN_WORD_DURATION, WRAP_WIDTH_RATIO,
};

use super::word_cue::{Anchor, Cue, FontKeyframe, WordCue};

/// Linear font-size ramp applied across each word's display window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontAnimation {
    pub initial_size: f64,
    pub final_size: f64,
    /// Seconds between two rendered sizes. A non-positive interval renders
    /// only the first and last size.
    pub update_interval: f64,
}

impl Default for FontAnimation {
    fn default() -> Self {
        Self {
            initial_size: DEFAULT_INITIAL_FONT_SIZE as f64,
            final_size: DEFAULT_FINAL_FONT_SIZE as f64,
            update_interval: DEFAULT_UPDATE_INTERVAL,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleConfig {
    /// Pause between consecutive words, in seconds.
    pub word_gap: f64,
    /// Size used when `animation` is `None`.
    pub font_size: f64,
    pub animation: Option<FontAnimation>,
    pub anchor: Anchor,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            word_gap: DEFAULT_WORD_GAP,
            font_size: DEFAULT_FONT_SIZE as f64,
            animation: Some(FontAnimation::default()),
            anchor: Anchor::default(),
        }
    }
}

/// Splits segments into per-word cues.
///
/// A segment of duration `D` with `n` words and gap `g` shows each word for
/// `(D - g*(n-1)) / n` seconds, words chained from the segment start. When
/// that would drop below [`MIN_WORD_DURATION`], words are held at the minimum
/// and the gaps shrink to whatever time is left, down to zero.
pub struct SubtitleScheduler {
    config: ScheduleConfig,
}

impl SubtitleScheduler {
    pub fn new(config: ScheduleConfig) -> Self {
        Self { config }
    }

    pub fn schedule(&self, segment: &Segment, video_width: u32) -> Vec<WordCue> {
        let words: Vec<&str> = segment.words().collect();
        if words.is_empty() {
            return Vec::new();
        }

        let (duration, gap) = word_timing(segment.duration(), words.len(), self.config.word_gap);
        let keyframes = self.keyframes(duration);
        let max_width = (video_width as f64 * WRAP_WIDTH_RATIO).round() as u32;

        let mut start = segment.start;
        words
            .into_iter()
            .map(|word| {
                let cue = WordCue {
                    word: word.to_string(),
                    start,
                    duration,
                    font_keyframes: keyframes.clone(),
                    anchor: self.config.anchor,
                    max_width,
                };
                start += duration + gap;
                cue
            })
            .collect()
    }

    /// Schedule every segment and flatten the rendered elements in order.
    pub fn schedule_all(&self, segments: &[Segment], video_width: u32) -> Vec<Cue> {
        segments
            .iter()
            .flat_map(|segment| self.schedule(segment, video_width))
            .flat_map(|word| word.cues())
            .collect()
    }

    fn keyframes(&self, duration: f64) -> Vec<FontKeyframe> {
        let Some(animation) = self.config.animation else {
            return vec![FontKeyframe {
                offset: 0.0,
                size: self.config.font_size,
            }];
        };

        let interval = animation.update_interval;
        let last = if interval > 0.0 {
            tick_count(duration, interval)
        } else {
            1
        };
        (0..=last)
            .map(|tick| {
                let offset = if tick == last {
                    duration
                } else {
                    (tick as f64 * interval).min(duration)
                };
                let progress = offset / duration;
                FontKeyframe {
                    offset,
                    size: animation.initial_size
                        + (animation.final_size - animation.initial_size) * progress,
                }
            })
            .collect()
    }
}

/// `ceil(duration / interval)`, ignoring float noise just above a whole number.
fn tick_count(duration: f64, interval: f64) -> usize {
    (duration / interval - 1e-9).ceil().max(0.0) as usize
}

/// Per-word display duration and inter-word gap for `words` words in `available` seconds.
fn word_timing(available: f64, words: usize, gap: f64) -> (f64, f64) {
    let available = available.max(0.0);
    let gap = gap.max(0.0);
    let n = words as f64;
    let gaps = words.saturating_sub(1) as f64;

    let duration = (available - gap * gaps) / n;
    if duration >= MIN_WORD_DURATION {
        return (duration, gap);
    }
    if gaps == 0.0 {
        return (MIN_WORD_DURATION, 0.0);
    }

    let shrunk_gap = ((available - MIN_WORD_DURATION * n) / gaps).max(0.0);
    (MIN_WORD_DURATION, shrunk_gap)
}
