use std::fmt::Write;

use crate::shared::constants::{
    DEFAULT_FADE, DEFAULT_FONT, DEFAULT_FONT_SIZE, DEFAULT_HIGHLIGHT_COLOR, DEFAULT_TEXT_COLOR,
};
use crate::subtitles::domain::word_cue::{Anchor, Cue};

/// Look of the rendered words.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    pub font: String,
    pub bold: bool,
    /// Colour name or `#rrggbb`.
    pub text_color: String,
    /// Box drawn behind each word. `None` renders plain text.
    pub highlight_color: Option<String>,
    /// Fade-in and fade-out length in seconds for cues long enough to hold both.
    pub fade: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            font: DEFAULT_FONT.to_string(),
            bold: true,
            text_color: DEFAULT_TEXT_COLOR.to_string(),
            highlight_color: Some(DEFAULT_HIGHLIGHT_COLOR.to_string()),
            fade: DEFAULT_FADE,
        }
    }
}

/// Convert a colour name or `#rrggbb` into ASS `&HAABBGGRR` notation.
pub fn ass_color(color: &str) -> Result<String, String> {
    let rgb = match color.trim().to_lowercase().as_str() {
        "black" => 0x000000,
        "white" => 0xffffff,
        "yellow" => 0xffff00,
        "red" => 0xff0000,
        "green" => 0x00ff00,
        "blue" => 0x0000ff,
        "cyan" => 0x00ffff,
        "magenta" => 0xff00ff,
        "orange" => 0xffa500,
        "gray" | "grey" => 0x808080,
        other => {
            let hex = other
                .strip_prefix('#')
                .filter(|h| h.len() == 6)
                .ok_or_else(|| format!("unknown colour '{color}'"))?;
            u32::from_str_radix(hex, 16).map_err(|_| format!("unknown colour '{color}'"))?
        }
    };
    let r = (rgb >> 16) & 0xff;
    let g = (rgb >> 8) & 0xff;
    let b = rgb & 0xff;
    Ok(format!("&H00{b:02X}{g:02X}{r:02X}"))
}

/// `h:mm:ss.cc`, the ASS timestamp format.
pub fn ass_timestamp(centiseconds: u64) -> String {
    let cs = centiseconds % 100;
    let total_secs = centiseconds / 100;
    format!(
        "{}:{:02}:{:02}.{:02}",
        total_secs / 3600,
        (total_secs / 60) % 60,
        total_secs % 60,
        cs
    )
}

fn to_centiseconds(seconds: f64) -> u64 {
    (seconds.max(0.0) * 100.0).round() as u64
}

fn alignment(anchor: Anchor) -> u8 {
    // Numpad layout: 8 top-centre, 5 middle-centre, 2 bottom-centre.
    match anchor {
        Anchor::Top => 8,
        Anchor::Middle => 5,
        Anchor::Bottom => 2,
    }
}

/// Keep override blocks from being opened by the transcribed text.
fn escape_text(text: &str) -> String {
    text.replace('\\', "\\\u{200B}")
        .replace('{', "\\{")
        .replace('}', "\\}")
}

/// Render cues as an Advanced SubStation Alpha document sized to the video.
///
/// Cues shorter than one centisecond once rounded are left out.
pub fn build_ass_document(
    cues: &[Cue],
    width: u32,
    height: u32,
    style: &RenderStyle,
) -> Result<String, String> {
    let primary = ass_color(&style.text_color)?;
    let (border_style, box_color) = match &style.highlight_color {
        Some(color) => (3, ass_color(color)?),
        None => (1, ass_color("black")?),
    };
    let bold = if style.bold { -1 } else { 0 };
    let margin_v = (height as f64 * 0.05).round() as u32;

    let mut doc = String::new();
    let _ = writeln!(doc, "[Script Info]");
    let _ = writeln!(doc, "ScriptType: v4.00+");
    let _ = writeln!(doc, "PlayResX: {width}");
    let _ = writeln!(doc, "PlayResY: {height}");
    let _ = writeln!(doc, "WrapStyle: 0");
    let _ = writeln!(doc, "ScaledBorderAndShadow: yes");
    let _ = writeln!(doc);
    let _ = writeln!(doc, "[V4+ Styles]");
    let _ = writeln!(
        doc,
        "Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, \
         BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, \
         BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding"
    );
    let _ = writeln!(
        doc,
        "Style: Word,{},{DEFAULT_FONT_SIZE},{primary},{primary},{box_color},{box_color},{bold},0,0,0,100,100,0,0,{border_style},4,0,2,0,0,{margin_v},1",
        style.font
    );
    let _ = writeln!(doc);
    let _ = writeln!(doc, "[Events]");
    let _ = writeln!(
        doc,
        "Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text"
    );

    for cue in cues {
        let start = to_centiseconds(cue.start);
        let end = to_centiseconds(cue.end());
        if end <= start {
            continue;
        }
        let margin_h = width.saturating_sub(cue.max_width) / 2;
        let fade_ms = (style.fade * 1000.0).round() as u64;
        let fade = if fade_ms > 0 && (end - start) * 10 > 2 * fade_ms {
            format!("\\fad({fade_ms},{fade_ms})")
        } else {
            String::new()
        };
        let _ = writeln!(
            doc,
            "Dialogue: 0,{},{},Word,,{margin_h},{margin_h},0,,{{\\an{}\\fs{}{fade}}}{}",
            ass_timestamp(start),
            ass_timestamp(end),
            alignment(cue.anchor),
            cue.font_size.round() as u32,
            escape_text(&cue.text)
        );
    }

    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn cue(text: &str, start: f64, duration: f64, size: f64, anchor: Anchor) -> Cue {
        Cue {
            text: text.to_string(),
            start,
            duration,
            font_size: size,
            anchor,
            max_width: 1152,
        }
    }

    fn dialogues(doc: &str) -> Vec<&str> {
        doc.lines().filter(|l| l.starts_with("Dialogue:")).collect()
    }

    #[rstest]
    #[case("black", "&H00000000")]
    #[case("yellow", "&H0000FFFF")]
    #[case("White", "&H00FFFFFF")]
    #[case("#ff8000", "&H000080FF")]
    fn test_ass_color(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(ass_color(input).unwrap(), expected);
    }

    #[rstest]
    #[case("chartreuse-ish")]
    #[case("#12345")]
    #[case("#zzzzzz")]
    fn test_ass_color_rejects(#[case] input: &str) {
        assert!(ass_color(input).is_err());
    }

    #[rstest]
    #[case(0, "0:00:00.00")]
    #[case(103, "0:00:01.03")]
    #[case(372_350, "1:02:03.50")]
    fn test_ass_timestamp(#[case] cs: u64, #[case] expected: &str) {
        assert_eq!(ass_timestamp(cs), expected);
    }

    #[test]
    fn test_document_header_uses_video_size() {
        let doc = build_ass_document(&[], 1280, 720, &RenderStyle::default()).unwrap();
        assert!(doc.contains("PlayResX: 1280"));
        assert!(doc.contains("PlayResY: 720"));
        assert!(doc.contains("Style: Word,Arial,"));
        assert!(dialogues(&doc).is_empty());
    }

    #[test]
    fn test_highlight_uses_opaque_box() {
        let doc = build_ass_document(&[], 1280, 720, &RenderStyle::default()).unwrap();
        let style_line = doc.lines().find(|l| l.starts_with("Style:")).unwrap();
        let fields: Vec<&str> = style_line.split(',').collect();
        assert_eq!(fields[15], "3");
        assert_eq!(fields[5], "&H0000FFFF");
    }

    #[test]
    fn test_dialogue_per_cue_with_anchor_and_size() {
        let cues = vec![
            cue("hello", 0.0, 0.5, 40.0, Anchor::Bottom),
            cue("world", 0.6, 0.5, 52.4, Anchor::Top),
        ];
        let doc = build_ass_document(&cues, 1280, 720, &RenderStyle::default()).unwrap();
        let lines = dialogues(&doc);
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "Dialogue: 0,0:00:00.00,0:00:00.50,Word,,64,64,0,,{\\an2\\fs40}hello"
        );
        assert!(lines[1].contains("0:00:00.60,0:00:01.10"));
        assert!(lines[1].contains("{\\an8\\fs52}world"));
    }

    #[test]
    fn test_zero_length_cues_are_skipped() {
        let cues = vec![
            cue("a", 1.0, 0.0, 40.0, Anchor::Middle),
            cue("b", 1.0, 0.004, 40.0, Anchor::Middle),
            cue("c", 1.0, 0.05, 40.0, Anchor::Middle),
        ];
        let doc = build_ass_document(&cues, 1280, 720, &RenderStyle::default()).unwrap();
        let lines = dialogues(&doc);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("{\\an5\\fs40}c"));
    }

    #[test]
    fn test_fade_only_on_long_enough_cues() {
        let style = RenderStyle {
            fade: 0.2,
            ..RenderStyle::default()
        };
        let cues = vec![
            cue("long", 0.0, 1.0, 40.0, Anchor::Bottom),
            cue("short", 2.0, 0.3, 40.0, Anchor::Bottom),
        ];
        let doc = build_ass_document(&cues, 1280, 720, &style).unwrap();
        let lines = dialogues(&doc);
        assert!(lines[0].contains("\\fad(200,200)"));
        assert!(!lines[1].contains("\\fad"));
    }

    #[test]
    fn test_default_style_fades_static_words() {
        let cues = vec![
            cue("steady", 0.0, 1.5, 40.0, Anchor::Bottom),
            cue("tick", 2.0, 0.05, 30.0, Anchor::Bottom),
        ];
        let doc = build_ass_document(&cues, 1280, 720, &RenderStyle::default()).unwrap();
        let lines = dialogues(&doc);
        assert!(lines[0].ends_with("{\\an2\\fs40\\fad(500,500)}steady"));
        assert!(lines[1].ends_with("{\\an2\\fs30}tick"));
    }

    #[test]
    fn test_braces_in_text_are_escaped() {
        let cues = vec![cue("{oops}", 0.0, 1.0, 40.0, Anchor::Bottom)];
        let doc = build_ass_document(&cues, 1280, 720, &RenderStyle::default()).unwrap();
        assert!(dialogues(&doc)[0].ends_with("\\{oops\\}"));
    }

    #[test]
    fn test_plain_text_without_highlight() {
        let style = RenderStyle {
            highlight_color: None,
            ..RenderStyle::default()
        };
        let doc = build_ass_document(&[], 640, 360, &style).unwrap();
        let style_line = doc.lines().find(|l| l.starts_with("Style:")).unwrap();
        assert_eq!(style_line.split(',').nth(15), Some("1"));
    }

    #[test]
    fn test_invalid_text_color_is_error() {
        let style = RenderStyle {
            text_color: "nope".to_string(),
            ..RenderStyle::default()
        };
        assert!(build_ass_document(&[], 640, 360, &style).is_err());
    }
}
