use crate::foundation::error::{RampError, RampResult};

/// Default lower speed bound applied when a call does not override it.
pub const DEFAULT_MIN_SPEED: f64 = 1.0;
/// Default upper speed bound applied when a call does not override it.
pub const DEFAULT_MAX_SPEED: f64 = 5.0;
/// Smallest speed the filter syntax can express (four decimal places).
pub const SPEED_RESOLUTION: f64 = 1e-4;

/// Timing metadata of a single source clip, as reported by a media probe.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MediaInfo {
    /// Container duration in seconds.
    pub duration_seconds: f64,
    /// Number of frames in the video stream.
    pub total_frames: u64,
    /// Frames per second.
    pub fps: f64,
}

impl MediaInfo {
    /// Create media info from already probed values.
    pub fn new(duration_seconds: f64, total_frames: u64, fps: f64) -> Self {
        Self {
            duration_seconds,
            total_frames,
            fps,
        }
    }

    /// Duration implied by the frame count, falling back to the probed duration.
    pub fn frames_duration_secs(&self) -> f64 {
        if self.fps > 0.0 {
            self.total_frames as f64 / self.fps
        } else {
            self.duration_seconds
        }
    }
}

/// Inclusive playback speed range; `0 < min_speed <= max_speed`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpeedBounds {
    /// Slowest playback speed.
    pub min_speed: f64,
    /// Fastest playback speed.
    pub max_speed: f64,
}

impl Default for SpeedBounds {
    fn default() -> Self {
        Self {
            min_speed: DEFAULT_MIN_SPEED,
            max_speed: DEFAULT_MAX_SPEED,
        }
    }
}

impl SpeedBounds {
    /// Create validated bounds.
    pub fn new(min_speed: f64, max_speed: f64) -> RampResult<Self> {
        let bounds = Self {
            min_speed,
            max_speed,
        };
        bounds.validate()?;
        Ok(bounds)
    }

    /// Check that both bounds are finite and `SPEED_RESOLUTION <= min_speed <= max_speed`.
    pub fn validate(&self) -> RampResult<()> {
        if !self.min_speed.is_finite() || !self.max_speed.is_finite() {
            return Err(RampError::invalid_config("speed bounds must be finite"));
        }
        if self.min_speed <= 0.0 {
            return Err(RampError::invalid_config(format!(
                "min_speed must be > 0 (got {})",
                self.min_speed
            )));
        }
        if self.min_speed < SPEED_RESOLUTION {
            return Err(RampError::invalid_config(format!(
                "min_speed must be >= {SPEED_RESOLUTION} (got {})",
                self.min_speed
            )));
        }
        if self.min_speed > self.max_speed {
            return Err(RampError::invalid_config(format!(
                "min_speed ({}) must be <= max_speed ({})",
                self.min_speed, self.max_speed
            )));
        }
        Ok(())
    }

    /// Width of the speed range.
    pub fn span(&self) -> f64 {
        self.max_speed - self.min_speed
    }

    /// Map a normalized factor in `[0, 1]` onto the bounds.
    pub fn lerp(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        (self.min_speed + self.span() * t).clamp(self.min_speed, self.max_speed)
    }

    /// Fewest source frames a segment needs to still yield an output frame at `max_speed`.
    pub fn min_frames_per_segment(&self) -> u64 {
        (self.max_speed.ceil() as u64).max(1)
    }
}

/// Rational frame rate as reported by ffprobe (`r_frame_rate`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRate {
    /// Numerator.
    pub num: u32,
    /// Denominator; 0 means unknown.
    pub den: u32,
}

impl FrameRate {
    /// Rate assumed when the stream does not report one.
    pub const FALLBACK: Self = Self { num: 30, den: 1 };

    /// Parse an ffmpeg-style `num/den` ratio. A bare integer is read as `num/1`.
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.trim().split('/');
        let num = parts.next()?.trim().parse::<u32>().ok()?;
        let den = match parts.next() {
            Some(d) => d.trim().parse::<u32>().ok()?,
            None => 1,
        };
        if parts.next().is_some() {
            return None;
        }
        Some(Self { num, den })
    }

    /// Frames per second; a zero denominator yields the fallback rate.
    pub fn as_f64(self) -> f64 {
        if self.den == 0 {
            Self::FALLBACK.as_f64()
        } else {
            f64::from(self.num) / f64::from(self.den)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
