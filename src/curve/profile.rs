use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::str::FromStr;

use crate::foundation::core::SpeedBounds;
use crate::foundation::error::{RampError, RampResult};

/// Named easing shape controlling how playback speed varies along the timeline.
///
/// Names read as `{Fast|Slow} In, {Fast|Slow} Out`: the first letter pair is the speed at the
/// start of the clip, the second the speed at the end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurveProfile {
    /// Fast at both ends, slowest at the midpoint.
    Fifo,
    /// Fast start easing down to a slow end.
    Fiso,
    /// Slow start easing up to a fast end.
    Sifo,
    /// Slow at both ends, fastest at the midpoint.
    Siso,
}

impl CurveProfile {
    /// Every profile, in tag order.
    pub const ALL: [Self; 4] = [Self::Fifo, Self::Fiso, Self::Sifo, Self::Siso];

    /// Upper-case category tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fifo => "FIFO",
            Self::Fiso => "FISO",
            Self::Sifo => "SIFO",
            Self::Siso => "SISO",
        }
    }

    /// Case-insensitive parse of a category tag.
    pub fn parse(tag: &str) -> RampResult<Self> {
        match tag.trim().to_ascii_uppercase().as_str() {
            "FIFO" => Ok(Self::Fifo),
            "FISO" => Ok(Self::Fiso),
            "SIFO" => Ok(Self::Sifo),
            "SISO" => Ok(Self::Siso),
            _ => Err(RampError::invalid_config(format!(
                "unknown curve profile '{tag}' (expected one of FIFO, FISO, SIFO, SISO)"
            ))),
        }
    }

    /// Interpolation factor `t(u)` in `[0, 1]` for a normalized timeline position.
    pub fn factor(self, u: f64) -> f64 {
        let u = u.clamp(0.0, 1.0);
        let t = match self {
            Self::Sifo => (u * FRAC_PI_2).sin().powi(2),
            Self::Fiso => (u * FRAC_PI_2).cos().powi(2),
            Self::Fifo => (PI * u).cos().powi(2),
            Self::Siso => (PI * u).sin().powi(2),
        };
        t.clamp(0.0, 1.0)
    }

    /// Speed multiplier at normalized position `u`; always inside `bounds`.
    pub fn speed_at(self, u: f64, bounds: &SpeedBounds) -> f64 {
        bounds.lerp(self.factor(u))
    }

    /// True when speed never decreases as `u` grows.
    pub fn is_non_decreasing(self) -> bool {
        matches!(self, Self::Sifo)
    }

    /// True when speed never increases as `u` grows.
    pub fn is_non_increasing(self) -> bool {
        matches!(self, Self::Fiso)
    }

    /// True when `speed_at(u) == speed_at(1 - u)`.
    pub fn is_symmetric(self) -> bool {
        matches!(self, Self::Fifo | Self::Siso)
    }
}

/// Free-function form of [`CurveProfile::speed_at`].
pub fn speed_at(profile: CurveProfile, u: f64, bounds: &SpeedBounds) -> f64 {
    profile.speed_at(u, bounds)
}

impl fmt::Display for CurveProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurveProfile {
    type Err = RampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/curve/profile.rs"]
mod tests;
