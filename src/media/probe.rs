use std::path::Path;
use std::process::Command;

use crate::foundation::core::{FrameRate, MediaInfo};
use crate::foundation::error::{RampError, RampResult};

/// Reads timing metadata from a local media file.
pub trait MediaProbe {
    /// Read duration, frame count and frame rate of `path`.
    fn probe(&self, path: &Path) -> RampResult<MediaInfo>;
}

/// Probe backed by the system `ffprobe` binary.
#[derive(Clone, Copy, Debug, Default)]
pub struct FfprobeProbe;

impl FfprobeProbe {
    fn args() -> [&'static str; 8] {
        [
            "-v",
            "error",
            "-select_streams",
            "v:0",
            "-show_entries",
            "format=duration:stream=r_frame_rate,nb_frames",
            "-of",
            "json",
        ]
    }
}

impl MediaProbe for FfprobeProbe {
    #[tracing::instrument(skip(self))]
    fn probe(&self, path: &Path) -> RampResult<MediaInfo> {
        let out = Command::new("ffprobe")
            .args(Self::args())
            .arg(path)
            .output()
            .map_err(|e| RampError::probe(format!("failed to run ffprobe: {e}")))?;
        if !out.status.success() {
            return Err(RampError::probe(format!(
                "ffprobe failed for '{}': {}",
                path.display(),
                String::from_utf8_lossy(&out.stderr).trim()
            )));
        }

        let info = parse_ffprobe_json(&out.stdout)?;
        tracing::info!(
            duration_s = info.duration_seconds,
            frames = info.total_frames,
            fps = info.fps,
            "video info"
        );
        Ok(info)
    }
}

/// Parse `ffprobe -of json` output restricted to the first video stream.
///
/// Missing duration reads as 0, a missing or zero-denominator frame rate as 30 fps, and a missing
/// frame count is derived from `duration * fps`.
pub fn parse_ffprobe_json(bytes: &[u8]) -> RampResult<MediaInfo> {
    #[derive(serde::Deserialize)]
    struct ProbeStream {
        r_frame_rate: Option<String>,
        nb_frames: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeFormat {
        duration: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        #[serde(default)]
        streams: Vec<ProbeStream>,
        format: Option<ProbeFormat>,
    }

    let parsed: ProbeOut = serde_json::from_slice(bytes)
        .map_err(|e| RampError::probe(format!("ffprobe json parse failed: {e}")))?;

    let duration_seconds = parsed
        .format
        .as_ref()
        .and_then(|f| f.duration.as_deref())
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|d| d.is_finite() && *d >= 0.0)
        .unwrap_or(0.0);

    let stream = parsed
        .streams
        .first()
        .ok_or_else(|| RampError::probe("no video stream found"))?;

    let rate = match stream.r_frame_rate.as_deref() {
        Some(s) => FrameRate::parse(s)
            .ok_or_else(|| RampError::probe(format!("invalid video r_frame_rate '{s}'")))?,
        None => FrameRate::FALLBACK,
    };
    let fps = rate.as_f64();
    if !(fps.is_finite() && fps > 0.0) {
        return Err(RampError::probe(format!(
            "video frame rate must be > 0 (got {}/{})",
            rate.num, rate.den
        )));
    }

    let total_frames = stream
        .nb_frames
        .as_deref()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or_else(|| (duration_seconds * fps).floor() as u64);

    Ok(MediaInfo::new(duration_seconds, total_frames, fps))
}

#[cfg(test)]
#[path = "../../tests/unit/media/probe.rs"]
mod tests;
