use crate::curve::profile::CurveProfile;
use crate::foundation::core::{MediaInfo, SpeedBounds};
use crate::foundation::error::{RampError, RampResult};

/// Contiguous source frame range `[start_frame, end_frame)` played at one speed.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Segment {
    /// Position in the plan, starting at 0.
    pub index: usize,
    /// First source frame.
    pub start_frame: u64,
    /// One past the last source frame.
    pub end_frame: u64,
    /// Playback speed multiplier.
    pub speed: f64,
    /// Graph-internal stream label, derived from `index`.
    pub label: String,
}

impl Segment {
    /// Source frames covered.
    pub fn len_frames(&self) -> u64 {
        self.end_frame.saturating_sub(self.start_frame)
    }

    /// Output frames this segment is expected to produce after retiming.
    pub fn output_frames(&self) -> f64 {
        self.len_frames() as f64 / self.speed
    }
}

/// Stable stream label for the segment at `index`.
pub fn segment_label(index: usize) -> String {
    format!("v{index}")
}

/// How a requested segment density was resolved against the clip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Segmentation {
    /// Segment count the caller asked for.
    pub requested: usize,
    /// `ceil(max_speed)`, at least 1.
    pub min_frames_per_segment: u64,
    /// Most segments the clip can hold at `min_frames_per_segment`.
    pub max_safe_segments: u64,
    /// Segment count actually planned.
    pub actual: usize,
    /// Base segment length; the last segment also takes the remainder.
    pub frames_per_segment: u64,
}

impl Segmentation {
    /// Apply the safety clamp: never produce segments thinner than `ceil(max_speed)` frames.
    pub fn resolve(
        total_frames: u64,
        requested: usize,
        bounds: &SpeedBounds,
    ) -> RampResult<Self> {
        if requested == 0 {
            return Err(RampError::invalid_config("target segment count must be > 0"));
        }
        bounds.validate()?;
        if total_frames < 1 {
            return Err(RampError::degenerate(
                "media has no frames; cannot form a segment",
            ));
        }

        let min_frames_per_segment = bounds.min_frames_per_segment();
        let max_safe_segments = total_frames / min_frames_per_segment;
        let clamped = (requested as u64).min(max_safe_segments).max(1);
        // clamped <= requested, so this always fits.
        let actual = usize::try_from(clamped).unwrap_or(requested);
        let frames_per_segment = total_frames / clamped;

        Ok(Self {
            requested,
            min_frames_per_segment,
            max_safe_segments,
            actual,
            frames_per_segment,
        })
    }

    /// True when fewer segments than requested were planned.
    pub fn was_downgraded(&self) -> bool {
        self.actual < self.requested
    }
}

/// Splits a clip into eased-speed segments.
#[derive(Clone, Copy, Debug)]
pub struct SegmentPlanner {
    /// Easing shape.
    pub profile: CurveProfile,
    /// Speed range the curve maps onto.
    pub bounds: SpeedBounds,
}

impl SegmentPlanner {
    /// Create a planner.
    pub fn new(profile: CurveProfile, bounds: SpeedBounds) -> Self {
        Self { profile, bounds }
    }

    /// Resolve the segment count for `media` and emit its segments.
    #[tracing::instrument(skip(self), fields(profile = %self.profile))]
    pub fn plan(&self, media: &MediaInfo, target_segments: usize) -> RampResult<Vec<Segment>> {
        let seg = Segmentation::resolve(media.total_frames, target_segments, &self.bounds)?;
        if seg.was_downgraded() {
            tracing::debug!(
                requested = seg.requested,
                actual = seg.actual,
                min_frames_per_segment = seg.min_frames_per_segment,
                "segment density downgraded to keep segments above the speed floor"
            );
        }
        Ok(self.segments_for(media.total_frames, &seg))
    }

    /// Emit segments for an already resolved segmentation.
    pub fn segments_for(&self, total_frames: u64, seg: &Segmentation) -> Vec<Segment> {
        let mut out = Vec::with_capacity(seg.actual);
        let last = seg.actual.saturating_sub(1);
        for i in 0..seg.actual {
            let start_frame = (i as u64) * seg.frames_per_segment;
            if start_frame >= total_frames {
                break;
            }
            let end_frame = if i == last {
                total_frames
            } else {
                start_frame + seg.frames_per_segment
            };

            let u = i as f64 / seg.actual as f64;
            let speed = self.profile.speed_at(u, &self.bounds);

            out.push(Segment {
                index: i,
                start_frame,
                end_frame,
                speed,
                label: segment_label(i),
            });
        }
        out
    }
}

/// Plan the segments of `media` for one call. See [`SegmentPlanner::plan`].
pub fn plan_segments(
    media: &MediaInfo,
    target_segments: usize,
    bounds: &SpeedBounds,
    profile: CurveProfile,
) -> RampResult<Vec<Segment>> {
    SegmentPlanner::new(profile, *bounds).plan(media, target_segments)
}

#[cfg(test)]
#[path = "../../tests/unit/plan/segment.rs"]
mod tests;
