use crate::audio::domain::transcript::Segment;

/// Lets an operator correct transcribed text before it is rendered.
///
/// Implementations may only rewrite `text`; timings, order and count of the
/// segments are left as they are.
pub trait SegmentEditor {
    fn review(&mut self, segments: &mut [Segment]) -> Result<(), Box<dyn std::error::Error>>;
}
