use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Vertical placement of subtitle text. Text is always horizontally centred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Top,
    Middle,
    #[default]
    Bottom,
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anchor::Top => write!(f, "top"),
            Anchor::Middle => write!(f, "middle"),
            Anchor::Bottom => write!(f, "bottom"),
        }
    }
}

impl FromStr for Anchor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "top" => Ok(Anchor::Top),
            "middle" | "center" => Ok(Anchor::Middle),
            "bottom" => Ok(Anchor::Bottom),
            other => Err(format!(
                "anchor must be one of: top, middle, bottom, got '{other}'"
            )),
        }
    }
}

/// Font size at a point in a word's display window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontKeyframe {
    /// Seconds from the word's display start.
    pub offset: f64,
    pub size: f64,
}

/// One word of a segment with its display window.
#[derive(Debug, Clone, PartialEq)]
pub struct WordCue {
    pub word: String,
    pub start: f64,
    pub duration: f64,
    /// Always at least one keyframe, the first at offset 0.
    pub font_keyframes: Vec<FontKeyframe>,
    pub anchor: Anchor,
    /// Widest the rendered word may get, in pixels.
    pub max_width: u32,
}

impl WordCue {
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// Expand into rendered elements, one per keyframe.
    ///
    /// Each element lasts until the next keyframe; the last one until the
    /// word's window closes.
    pub fn cues(&self) -> Vec<Cue> {
        let keyframes = &self.font_keyframes;
        keyframes
            .iter()
            .enumerate()
            .map(|(i, keyframe)| {
                let until = match keyframes.get(i + 1) {
                    Some(next) => next.offset,
                    None => self.duration,
                };
                Cue {
                    text: self.word.clone(),
                    start: self.start + keyframe.offset,
                    duration: (until - keyframe.offset).max(0.0),
                    font_size: keyframe.size,
                    anchor: self.anchor,
                    max_width: self.max_width,
                }
            })
            .collect()
    }
}

/// A single timed, styled text overlay handed to the compositor.
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    pub text: String,
    pub start: f64,
    pub duration: f64,
    pub font_size: f64,
    pub anchor: Anchor,
    pub max_width: u32,
}

impl Cue {
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn cue(keyframes: Vec<FontKeyframe>, duration: f64) -> WordCue {
        WordCue {
            word: "hello".to_string(),
            start: 2.0,
            duration,
            font_keyframes: keyframes,
            anchor: Anchor::Bottom,
            max_width: 576,
        }
    }

    fn kf(offset: f64, size: f64) -> FontKeyframe {
        FontKeyframe { offset, size }
    }

    #[rstest]
    #[case("top", Anchor::Top)]
    #[case("Middle", Anchor::Middle)]
    #[case("center", Anchor::Middle)]
    #[case(" bottom ", Anchor::Bottom)]
    fn test_anchor_from_str(#[case] input: &str, #[case] expected: Anchor) {
        assert_eq!(input.parse::<Anchor>().unwrap(), expected);
    }

    #[test]
    fn test_anchor_from_str_rejects_unknown() {
        assert!("left".parse::<Anchor>().is_err());
    }

    #[test]
    fn test_anchor_default_is_bottom() {
        assert_eq!(Anchor::default(), Anchor::Bottom);
    }

    #[test]
    fn test_static_word_yields_one_cue() {
        let word = cue(vec![kf(0.0, 40.0)], 0.8);
        let cues = word.cues();
        assert_eq!(cues.len(), 1);
        assert_relative_eq!(cues[0].start, 2.0);
        assert_relative_eq!(cues[0].duration, 0.8);
        assert_eq!(cues[0].text, "hello");
    }

    #[test]
    fn test_animated_word_cues_chain() {
        let word = cue(vec![kf(0.0, 30.0), kf(0.05, 35.0), kf(0.08, 40.0)], 0.08);
        let cues = word.cues();
        assert_eq!(cues.len(), 3);
        assert_relative_eq!(cues[0].duration, 0.05);
        assert_relative_eq!(cues[1].start, 2.05, epsilon = 1e-9);
        assert_relative_eq!(cues[1].duration, 0.03, epsilon = 1e-9);
        assert_relative_eq!(cues[2].duration, 0.0);
        assert_relative_eq!(cues[2].font_size, 40.0);
    }

    #[test]
    fn test_word_end() {
        assert_relative_eq!(cue(vec![kf(0.0, 40.0)], 0.5).end(), 2.5);
    }
}
