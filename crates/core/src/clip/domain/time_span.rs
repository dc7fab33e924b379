use super::clip_error::ClipError;

/// A validated trim window in milliseconds.
///
/// Only obtainable through [`TimeSpan::validate`], so holding one means
/// `start_ms < end_ms <= total duration` was checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSpan {
    start_ms: u64,
    end_ms: u64,
}

impl TimeSpan {
    pub fn validate(start_ms: u64, end_ms: u64, total_ms: u64) -> Result<Self, ClipError> {
        if start_ms >= end_ms || end_ms > total_ms {
            return Err(ClipError::InvalidClipWindow {
                start_ms,
                end_ms,
                total_ms,
            });
        }
        Ok(Self { start_ms, end_ms })
    }

    pub fn start_ms(&self) -> u64 {
        self.start_ms
    }

    pub fn end_ms(&self) -> u64 {
        self.end_ms
    }

    pub fn duration_ms(&self) -> u64 {
        self.end_ms - self.start_ms
    }

    pub fn start_seconds(&self) -> f64 {
        self.start_ms as f64 / 1000.0
    }

    pub fn end_seconds(&self) -> f64 {
        self.end_ms as f64 / 1000.0
    }
}
