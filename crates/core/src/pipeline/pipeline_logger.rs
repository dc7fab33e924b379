use std::collections::BTreeMap;
use std::time::Instant;

pub const STAGE_DOWNLOAD: &str = "download";
pub const STAGE_TRIM: &str = "trim";
pub const STAGE_NORMALIZE: &str = "normalize";
pub const STAGE_TRANSCRIBE: &str = "transcribe";
pub const STAGE_REVIEW: &str = "review";
pub const STAGE_SCHEDULE: &str = "schedule";
pub const STAGE_RENDER: &str = "render";

/// Cross-cutting logger for pipeline orchestration events.
///
/// Keeps use cases independent of where their status and timings end up.
pub trait PipelineLogger: Send {
    /// Record how long a named pipeline stage took.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a count or measurement (segments transcribed, cues rendered).
    fn metric(&mut self, name: &str, value: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-pipeline summary. Default: no-op.
    fn summary(&self) {}
}

/// Run `work` and record its wall-clock time under `stage`.
pub fn timed<T>(logger: &mut dyn PipelineLogger, stage: &str, work: impl FnOnce() -> T) -> T {
    let started = Instant::now();
    let result = work();
    logger.timing(stage, started.elapsed().as_secs_f64() * 1000.0);
    result
}

/// Silent logger that discards all events.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// CLI logger: forwards messages to `log` and reports stage timings and
/// metrics once the pipeline is done.
pub struct StdoutPipelineLogger {
    timings: BTreeMap<String, f64>,
    metrics: BTreeMap<String, f64>,
    start_time: Instant,
}

impl StdoutPipelineLogger {
    pub fn new() -> Self {
        Self {
            timings: BTreeMap::new(),
            metrics: BTreeMap::new(),
            start_time: Instant::now(),
        }
    }

    /// Returns the formatted summary string, or `None` if no data recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() && self.metrics.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let mut lines = vec![format!(
            "Pipeline summary ({:.1}s total):",
            elapsed_ms / 1000.0
        )];

        for (stage, total_ms) in &self.timings {
            let pct = if elapsed_ms > 0.0 {
                total_ms / elapsed_ms * 100.0
            } else {
                0.0
            };
            lines.push(format!("  {stage:12}: {total_ms:9.0}ms  ({pct:4.1}%)"));
        }

        for (name, value) in &self.metrics {
            lines.push(format!("  {name}: {value}"));
        }

        Some(lines.join("\n"))
    }
}

impl Default for StdoutPipelineLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineLogger for StdoutPipelineLogger {
    fn timing(&mut self, stage: &str, duration_ms: f64) {
        *self.timings.entry(stage.to_string()).or_default() += duration_ms;
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics.insert(name.to_string(), value);
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
