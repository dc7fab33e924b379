use std::io::{BufRead, Write};

use crate::audio::domain::transcript::Segment;
use crate::shared::prompt::Prompt;
use crate::subtitles::domain::segment_editor::SegmentEditor;

/// Walks the operator through every segment on a line-based terminal prompt.
///
/// A blank answer keeps the transcribed text. Any other answer must be
/// confirmed; declining asks for a new replacement for the same segment.
pub struct PromptSegmentEditor<R, W> {
    prompt: Prompt<R, W>,
}

impl<R: BufRead, W: Write> PromptSegmentEditor<R, W> {
    pub fn new(prompt: Prompt<R, W>) -> Self {
        Self { prompt }
    }

    fn review_one(
        &mut self,
        index: usize,
        total: usize,
        segment: &mut Segment,
    ) -> std::io::Result<()> {
        self.prompt.say(&format!(
            "\n[{}/{}] {:.2}s - {:.2}s: {}",
            index + 1,
            total,
            segment.start,
            segment.end,
            segment.text.trim()
        ))?;

        loop {
            let replacement = self
                .prompt
                .ask("Replacement text (leave blank to keep): ")?;
            let replacement = replacement.trim();
            if replacement.is_empty() {
                return Ok(());
            }
            if self.prompt.confirm(&format!("Use \"{replacement}\"?"))? {
                log::info!("Segment {} text replaced", index + 1);
                segment.text = replacement.to_string();
                return Ok(());
            }
        }
    }
}

impl<R: BufRead, W: Write> SegmentEditor for PromptSegmentEditor<R, W> {
    fn review(&mut self, segments: &mut [Segment]) -> Result<(), Box<dyn std::error::Error>> {
        let total = segments.len();
        for (index, segment) in segments.iter_mut().enumerate() {
            self.review_one(index, total, segment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn editor(input: &str) -> PromptSegmentEditor<Cursor<Vec<u8>>, Vec<u8>> {
        PromptSegmentEditor::new(Prompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new()))
    }

    fn segments() -> Vec<Segment> {
        vec![
            Segment::new(" hello wrld", 0.0, 1.5),
            Segment::new(" second line", 1.5, 3.0),
        ]
    }

    #[test]
    fn test_blank_answers_keep_text() {
        let mut segs = segments();
        editor("\n\n").review(&mut segs).unwrap();
        assert_eq!(segs, segments());
    }

    #[test]
    fn test_confirmed_replacement_is_committed() {
        let mut segs = segments();
        editor("hello world\ny\n\n").review(&mut segs).unwrap();
        assert_eq!(segs[0].text, "hello world");
        assert_eq!(segs[1].text, " second line");
    }

    #[test]
    fn test_rejected_replacement_reprompts_same_segment() {
        let mut segs = segments();
        editor("hullo\nn\nhello world\nyes\n\n")
            .review(&mut segs)
            .unwrap();
        assert_eq!(segs[0].text, "hello world");
    }

    #[test]
    fn test_rejected_then_blank_keeps_original() {
        let mut segs = segments();
        editor("oops\nn\n\n\n").review(&mut segs).unwrap();
        assert_eq!(segs[0].text, " hello wrld");
    }

    #[test]
    fn test_timings_are_untouched() {
        let mut segs = segments();
        editor("a\ny\nb\ny\n").review(&mut segs).unwrap();
        assert_eq!(segs[0].start, 0.0);
        assert_eq!(segs[0].end, 1.5);
        assert_eq!(segs[1].start, 1.5);
        assert_eq!(segs[1].end, 3.0);
        assert_eq!(segs[1].text, "b");
    }

    #[test]
    fn test_closed_input_is_an_error() {
        let mut segs = segments();
        assert!(editor("fix\n").review(&mut segs).is_err());
    }

    #[test]
    fn test_output_shows_segment_position() {
        let mut segs = segments();
        let mut out = Vec::new();
        PromptSegmentEditor::new(Prompt::new(Cursor::new(b"\n\n".to_vec()), &mut out))
            .review(&mut segs)
            .unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("[1/2] 0.00s - 1.50s: hello wrld"));
        assert!(out.contains("[2/2]"));
    }
}
