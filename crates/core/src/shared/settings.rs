use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::audio::domain::transcriber::TranscriptionMode;
use crate::shared::constants::{
    DEFAULT_FADE, DEFAULT_FINAL_FONT_SIZE, DEFAULT_FONT, DEFAULT_FONT_SIZE, DEFAULT_HIGHLIGHT_COLOR,
    DEFAULT_INITIAL_FONT_SIZE, DEFAULT_TEXT_COLOR, DEFAULT_UPDATE_INTERVAL, DEFAULT_WHISPER_MODEL,
    DEFAULT_WORD_GAP, MIN_WORD_DURATION,
};
use crate::subtitles::domain::subtitle_scheduler::{FontAnimation, ScheduleConfig};
use crate::subtitles::domain::word_cue::Anchor;
use crate::subtitles::infrastructure::ass_document::{ass_color, RenderStyle};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid setting '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Everything that shapes a subtitling run.
///
/// Stored as JSON; every field is optional in the file and falls back to
/// its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubtitleSettings {
    pub word_gap: f64,
    pub animate: bool,
    pub update_interval: f64,
    pub font_size: u32,
    pub initial_font_size: u32,
    pub final_font_size: u32,
    pub anchor: Anchor,
    pub font: String,
    pub text_color: String,
    pub highlight_color: Option<String>,
    pub fade: f64,
    pub transcription: TranscriptionMode,
    pub model: String,
    pub normalize_audio: bool,
    pub review: bool,
}

impl Default for SubtitleSettings {
    fn default() -> Self {
        Self {
            word_gap: DEFAULT_WORD_GAP,
            animate: true,
            update_interval: DEFAULT_UPDATE_INTERVAL,
            font_size: DEFAULT_FONT_SIZE,
            initial_font_size: DEFAULT_INITIAL_FONT_SIZE,
            final_font_size: DEFAULT_FINAL_FONT_SIZE,
            anchor: Anchor::default(),
            font: DEFAULT_FONT.to_string(),
            text_color: DEFAULT_TEXT_COLOR.to_string(),
            highlight_color: Some(DEFAULT_HIGHLIGHT_COLOR.to_string()),
            fade: DEFAULT_FADE,
            transcription: TranscriptionMode::default(),
            model: DEFAULT_WHISPER_MODEL.to_string(),
            normalize_audio: false,
            review: false,
        }
    }
}

impl SubtitleSettings {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("YouClipper").join("settings.json"))
    }

    /// Load settings from `explicit`, or from the default location.
    ///
    /// Problems with an explicitly named file are errors. A missing default
    /// file means defaults; an unreadable one is logged and ignored.
    pub fn load(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        let settings = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path).unwrap_or_else(|e| {
                    log::warn!("{e}; using default settings");
                    Self::default()
                }),
                _ => Self::default(),
            },
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |field, reason: &str| SettingsError::Invalid {
            field,
            reason: reason.to_string(),
        };
        if !(self.word_gap >= 0.0 && self.word_gap.is_finite()) {
            return Err(invalid("word_gap", "must be zero or more seconds"));
        }
        if !(self.update_interval >= MIN_WORD_DURATION && self.update_interval.is_finite()) {
            return Err(invalid(
                "update_interval",
                &format!("must be at least {MIN_WORD_DURATION} seconds"),
            ));
        }
        if !(self.fade >= 0.0 && self.fade.is_finite()) {
            return Err(invalid("fade", "must be zero or more seconds"));
        }
        for (field, size) in [
            ("font_size", self.font_size),
            ("initial_font_size", self.initial_font_size),
            ("final_font_size", self.final_font_size),
        ] {
            if size == 0 {
                return Err(invalid(field, "must be at least 1"));
            }
        }
        if self.model.trim().is_empty() {
            return Err(invalid("model", "must name a whisper model"));
        }
        ass_color(&self.text_color).map_err(|reason| invalid("text_color", &reason))?;
        if let Some(color) = &self.highlight_color {
            ass_color(color).map_err(|reason| invalid("highlight_color", &reason))?;
        }
        Ok(())
    }

    pub fn schedule_config(&self) -> ScheduleConfig {
        ScheduleConfig {
            word_gap: self.word_gap,
            font_size: self.font_size as f64,
            animation: self.animate.then(|| FontAnimation {
                initial_size: self.initial_font_size as f64,
                final_size: self.final_font_size as f64,
                update_interval: self.update_interval,
            }),
            anchor: self.anchor,
        }
    }

    pub fn render_style(&self) -> RenderStyle {
        RenderStyle {
            font: self.font.clone(),
            bold: true,
            text_color: self.text_color.clone(),
            highlight_color: self.highlight_color.clone(),
            fade: self.fade,
        }
    }
}
