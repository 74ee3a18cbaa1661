use std::path::{Path, PathBuf};

use crate::config::RampConfig;
use crate::curve::profile::CurveProfile;
use crate::encode::ffmpeg::FilterGraphExecutor;
use crate::encode::syntax::render_filter_complex;
use crate::foundation::core::{MediaInfo, SpeedBounds};
use crate::foundation::error::{RampError, RampResult};
use crate::graph::plan::{FilterGraphPlan, synthesize};
use crate::media::probe::MediaProbe;
use crate::media::source::MediaSource;
use crate::plan::segment::{Segment, SegmentPlanner, Segmentation};

/// Per-call planning parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RampOpts {
    /// Easing shape.
    pub profile: CurveProfile,
    /// Requested segment count before the safety clamp.
    pub target_segments: usize,
    /// Speed range.
    pub bounds: SpeedBounds,
    /// Rendered graph length above which a warning is logged.
    pub filter_warn_len: usize,
}

impl Default for RampOpts {
    fn default() -> Self {
        Self::from_config(&RampConfig::default())
    }
}

impl RampOpts {
    /// Take per-call defaults from `cfg`.
    pub fn from_config(cfg: &RampConfig) -> Self {
        Self {
            profile: cfg.profile,
            target_segments: cfg.target_segments,
            bounds: cfg.bounds(),
            filter_warn_len: cfg.filter_warn_len,
        }
    }

    /// Reject a zero segment count and invalid bounds.
    pub fn validate(&self) -> RampResult<()> {
        if self.target_segments == 0 {
            return Err(RampError::invalid_config("target segment count must be > 0"));
        }
        self.bounds.validate()
    }

    /// Replace the profile with the one named by a category tag.
    pub fn with_category(mut self, category: &str) -> RampResult<Self> {
        self.profile = CurveProfile::parse(category)?;
        Ok(self)
    }
}

/// Everything decided for one clip before any rendering happens.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RampPlan {
    /// Probed clip metadata.
    pub media: MediaInfo,
    /// Easing shape used.
    pub profile: CurveProfile,
    /// Speed range used.
    pub bounds: SpeedBounds,
    /// How the requested density was resolved.
    pub segmentation: Segmentation,
    /// Planned segments, in timeline order.
    pub segments: Vec<Segment>,
    /// Filter graph built from `segments`.
    pub graph: FilterGraphPlan,
}

impl RampPlan {
    /// Expected output duration once every segment is retimed.
    pub fn output_duration_secs(&self) -> f64 {
        if self.media.fps <= 0.0 {
            return 0.0;
        }
        self.segments.iter().map(Segment::output_frames).sum::<f64>() / self.media.fps
    }
}

/// Result of a completed render.
#[derive(Clone, Debug)]
pub struct RampOutcome {
    /// Resolved local input file.
    pub input: PathBuf,
    /// Rendered output file.
    pub output: PathBuf,
    /// Plan that was executed.
    pub plan: RampPlan,
}

/// External collaborators the pipeline drives.
pub struct Collaborators<'a> {
    /// Turns a locator into a local file.
    pub source: &'a dyn MediaSource,
    /// Reads clip metadata.
    pub probe: &'a dyn MediaProbe,
    /// Runs the filter graph.
    pub executor: &'a dyn FilterGraphExecutor,
}

/// Segment `media` and build its filter graph. Pure; performs no IO.
#[tracing::instrument(skip(opts), fields(profile = %opts.profile, target = opts.target_segments))]
pub fn prepare_ramp(media: &MediaInfo, opts: &RampOpts) -> RampResult<RampPlan> {
    let segmentation =
        Segmentation::resolve(media.total_frames, opts.target_segments, &opts.bounds)?;

    tracing::info!(
        max_speed = opts.bounds.max_speed,
        min_frames_per_segment = segmentation.min_frames_per_segment,
        segments = segmentation.actual,
        frames_per_segment = segmentation.frames_per_segment,
        "segmentation resolved"
    );

    let planner = SegmentPlanner::new(opts.profile, opts.bounds);
    let segments = planner.segments_for(media.total_frames, &segmentation);
    for s in &segments {
        tracing::debug!(
            index = s.index,
            start = s.start_frame,
            end = s.end_frame,
            speed = s.speed,
            "segment"
        );
    }

    let graph = synthesize(&segments);
    Ok(RampPlan {
        media: *media,
        profile: opts.profile,
        bounds: opts.bounds,
        segmentation,
        segments,
        graph,
    })
}

/// Render `plan` to text and warn when it is longer than `warn_len` characters.
///
/// Diagnostic only: nothing is rejected. Executors render the plan themselves, and rendering is
/// deterministic, so the checked text is the text they run.
pub fn render_checked(plan: &FilterGraphPlan, warn_len: usize) -> String {
    let text = render_filter_complex(plan);
    if text.len() > warn_len {
        tracing::warn!(
            len = text.len(),
            limit = warn_len,
            segments = plan.segment_count(),
            "filter graph is very long"
        );
    }
    text
}

/// Probe a local file and plan it without rendering.
pub fn plan_file(path: &Path, probe: &dyn MediaProbe, opts: &RampOpts) -> RampResult<RampPlan> {
    let media = probe.probe(path)?;
    prepare_ramp(&media, opts)
}

/// Resolve, probe, plan and render one clip.
#[tracing::instrument(skip(collab, opts), fields(profile = %opts.profile))]
pub fn run_speedramp(
    locator: &str,
    output: &Path,
    opts: &RampOpts,
    collab: &Collaborators<'_>,
) -> RampResult<RampOutcome> {
    opts.validate()?;

    let input = collab.source.resolve(locator)?;
    let plan = plan_file(&input, collab.probe, opts)?;

    let filter_text = render_checked(&plan.graph, opts.filter_warn_len);
    tracing::debug!(len = filter_text.len(), "filter graph rendered");
    collab.executor.execute(&input, &plan.graph, output)?;

    tracing::info!(
        output = %output.display(),
        expected_duration_s = plan.output_duration_secs(),
        "speed ramp rendered"
    );

    Ok(RampOutcome {
        input,
        output: output.to_path_buf(),
        plan,
    })
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
