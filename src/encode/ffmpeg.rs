use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::encode::syntax::{output_map_arg, render_filter_complex};
use crate::foundation::error::{RampError, RampResult};
use crate::graph::plan::FilterGraphPlan;

/// Encoder settings passed alongside the filter graph.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EncodeConfig {
    /// Video codec (`-c:v`).
    pub codec: String,
    /// Constant rate factor, 0..=51.
    pub crf: u8,
    /// Encoder speed preset.
    pub preset: String,
    /// Move the MP4 index to the front of the file (`-movflags +faststart`).
    pub faststart: bool,
    /// Replace an existing output file (`-y`) instead of refusing (`-n`).
    pub overwrite: bool,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            codec: "libx264".to_string(),
            crf: 18,
            preset: "veryfast".to_string(),
            faststart: true,
            overwrite: true,
        }
    }
}

impl EncodeConfig {
    /// Reject empty codec/preset names and out-of-range CRF values.
    pub fn validate(&self) -> RampResult<()> {
        if self.codec.trim().is_empty() {
            return Err(RampError::invalid_config("encode codec must be non-empty"));
        }
        if self.preset.trim().is_empty() {
            return Err(RampError::invalid_config("encode preset must be non-empty"));
        }
        if self.crf > 51 {
            return Err(RampError::invalid_config(format!(
                "encode crf must be in 0..=51 (got {})",
                self.crf
            )));
        }
        Ok(())
    }
}

/// Runs a [`FilterGraphPlan`] against an input file to produce an output file.
pub trait FilterGraphExecutor {
    /// Render `input` through `plan` into `output`.
    fn execute(&self, input: &Path, plan: &FilterGraphPlan, output: &Path) -> RampResult<()>;
}

/// True when an `ffmpeg` binary can be spawned.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Create the parent directory of `path` if it does not exist.
pub fn ensure_parent_dir(path: &Path) -> RampResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Full `ffmpeg` argument list for one render, without the program name.
pub fn ffmpeg_args(
    cfg: &EncodeConfig,
    input: &Path,
    filter_complex: &str,
    map: &str,
    output: &Path,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = Vec::with_capacity(20);
    args.push(if cfg.overwrite { "-y" } else { "-n" }.into());
    args.extend(["-loglevel", "error", "-i"].map(OsString::from));
    args.push(input.as_os_str().to_owned());
    args.extend(
        [
            "-filter_complex",
            filter_complex,
            "-map",
            map,
            "-an",
            "-c:v",
            cfg.codec.as_str(),
            "-crf",
        ]
        .map(OsString::from),
    );
    args.push(cfg.crf.to_string().into());
    args.extend(["-preset", cfg.preset.as_str()].map(OsString::from));
    if cfg.faststart {
        args.extend(["-movflags", "+faststart"].map(OsString::from));
    }
    args.push(output.as_os_str().to_owned());
    args
}

/// Executor backed by the system `ffmpeg` binary.
#[derive(Clone, Debug, Default)]
pub struct FfmpegExecutor {
    cfg: EncodeConfig,
}

impl FfmpegExecutor {
    /// Create an executor with validated settings.
    pub fn new(cfg: EncodeConfig) -> RampResult<Self> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    /// Encoder settings in use.
    pub fn config(&self) -> &EncodeConfig {
        &self.cfg
    }
}

impl FilterGraphExecutor for FfmpegExecutor {
    #[tracing::instrument(skip(self, plan), fields(segments = plan.segment_count()))]
    fn execute(&self, input: &Path, plan: &FilterGraphPlan, output: &Path) -> RampResult<()> {
        ensure_parent_dir(output)?;
        if !self.cfg.overwrite && output.exists() {
            return Err(RampError::invalid_config(format!(
                "output file '{}' already exists",
                output.display()
            )));
        }

        if !is_ffmpeg_on_path() {
            return Err(RampError::execution(
                "ffmpeg is required for rendering, but was not found on PATH",
            ));
        }

        let filter_complex = render_filter_complex(plan);
        let args = ffmpeg_args(
            &self.cfg,
            input,
            &filter_complex,
            &output_map_arg(plan),
            output,
        );

        tracing::info!(
            codec = %self.cfg.codec,
            crf = self.cfg.crf,
            preset = %self.cfg.preset,
            "running ffmpeg"
        );

        let out = Command::new("ffmpeg")
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                RampError::execution(format!(
                    "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
                ))
            })?;

        if !out.status.success() {
            return Err(RampError::execution(format!(
                "ffmpeg exited with status {}: {}",
                out.status,
                String::from_utf8_lossy(&out.stderr).trim()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
