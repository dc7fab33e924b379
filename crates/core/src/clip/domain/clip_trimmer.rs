use std::path::Path;

use super::time_span::TimeSpan;

/// Cuts `span` out of a local media file into `output`.
pub trait ClipTrimmer: Send {
    fn trim(
        &self,
        input: &Path,
        span: &TimeSpan,
        output: &Path,
    ) -> Result<(), Box<dyn std::error::Error>>;
}
