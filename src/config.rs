//! Process configuration: default speed bounds, segment density, encoder and logging settings.
//!
//! Every field has a default, so a config file only needs to name what it changes.

use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::curve::profile::CurveProfile;
use crate::encode::ffmpeg::EncodeConfig;
use crate::encode::syntax::DEFAULT_FILTER_WARN_LEN;
use crate::foundation::core::{DEFAULT_MAX_SPEED, DEFAULT_MIN_SPEED, SpeedBounds};
use crate::foundation::error::{RampError, RampResult};

/// Requested segment density when a call does not specify one.
pub const DEFAULT_TARGET_SEGMENTS: usize = 240;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RampConfig {
    /// Lower bound of the playback speed.
    pub min_speed: f64,

    /// Upper bound of the playback speed. Also sets the minimum segment length.
    pub max_speed: f64,

    /// Requested segment count; silently reduced for short clips.
    pub target_segments: usize,

    /// Profile used when the caller does not name one.
    pub profile: CurveProfile,

    /// Encoder settings handed to ffmpeg.
    pub encode: EncodeConfig,

    /// Rendered filter graphs longer than this many characters log a warning.
    pub filter_warn_len: usize,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "speedramp=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for RampConfig {
    fn default() -> Self {
        Self {
            min_speed: DEFAULT_MIN_SPEED,
            max_speed: DEFAULT_MAX_SPEED,
            target_segments: DEFAULT_TARGET_SEGMENTS,
            profile: CurveProfile::Sifo,
            encode: EncodeConfig::default(),
            filter_warn_len: DEFAULT_FILTER_WARN_LEN,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl RampConfig {
    /// Load a JSON config file. Missing fields take their defaults.
    pub fn from_path(path: &Path) -> RampResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Parse and validate a JSON config document.
    pub fn from_json_str(text: &str) -> RampResult<Self> {
        let cfg: Self = serde_json::from_str(text)
            .map_err(|e| RampError::serde(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Configured speed bounds.
    pub fn bounds(&self) -> SpeedBounds {
        SpeedBounds {
            min_speed: self.min_speed,
            max_speed: self.max_speed,
        }
    }

    /// Check bounds, segment count and encoder settings.
    pub fn validate(&self) -> RampResult<()> {
        self.bounds().validate()?;
        if self.target_segments == 0 {
            return Err(RampError::invalid_config("target_segments must be > 0"));
        }
        self.encode.validate()?;
        Ok(())
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> RampResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| RampError::serde(e.to_string()))
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
