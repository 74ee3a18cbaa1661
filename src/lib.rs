//! speedramp turns a clip's timing metadata and a named easing profile into a variable-speed
//! render plan.
//!
//! # Pipeline overview
//!
//! 1. **Probe**: `path -> MediaInfo` (duration, frame count, frame rate) via `ffprobe`
//! 2. **Plan**: `MediaInfo + CurveProfile + SpeedBounds -> Vec<Segment>` (safety-clamped frame
//!    ranges, one speed each)
//! 3. **Synthesize**: `Vec<Segment> -> FilterGraphPlan` (trim / retime chains plus one concat node)
//! 4. **Render**: `FilterGraphPlan -> -filter_complex` text handed to the system `ffmpeg` binary
//!
//! Steps 2 and 3 are pure and deterministic: no IO, no shared state, same input gives the same
//! plan. Probing, rendering, and resolving inputs sit behind the [`MediaProbe`],
//! [`FilterGraphExecutor`] and [`MediaSource`] traits.
//!
//! ```
//! use speedramp::{CurveProfile, MediaInfo, SpeedBounds, plan_segments, synthesize};
//!
//! let media = MediaInfo::new(10.0, 300, 30.0);
//! let segments = plan_segments(&media, 10, &SpeedBounds::default(), CurveProfile::Sifo)?;
//! let graph = synthesize(&segments);
//! assert_eq!(graph.concat.inputs.len(), 10);
//! # Ok::<(), speedramp::RampError>(())
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod curve;
mod encode;
mod foundation;
mod graph;
mod media;
mod plan;

/// Configuration file model and defaults.
pub mod config;
/// Tracing subscriber setup.
pub mod logging;
/// Orchestration of probe, plan and render for one clip.
pub mod pipeline;

pub use config::{DEFAULT_TARGET_SEGMENTS, LoggingConfig, RampConfig};
pub use curve::profile::{CurveProfile, speed_at};
pub use encode::ffmpeg::{
    EncodeConfig, FfmpegExecutor, FilterGraphExecutor, ensure_parent_dir, ffmpeg_args,
    is_ffmpeg_on_path,
};
pub use encode::syntax::{DEFAULT_FILTER_WARN_LEN, output_map_arg, render_filter_complex};
pub use foundation::core::{
    DEFAULT_MAX_SPEED, DEFAULT_MIN_SPEED, FrameRate, MediaInfo, SPEED_RESOLUTION, SpeedBounds,
};
pub use foundation::error::{RampError, RampResult};
pub use graph::plan::{
    ConcatNode, FilterChain, FilterGraphPlan, FilterOp, InputStream, OUTPUT_LABEL, StreamKind,
    synthesize,
};
pub use media::probe::{FfprobeProbe, MediaProbe, parse_ffprobe_json};
pub use media::source::{LocalFileSource, MediaSource};
pub use pipeline::{
    Collaborators, RampOpts, RampOutcome, RampPlan, plan_file, prepare_ramp, render_checked,
    run_speedramp,
};
pub use plan::segment::{Segment, SegmentPlanner, Segmentation, plan_segments, segment_label};
