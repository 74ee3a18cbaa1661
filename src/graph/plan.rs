use crate::plan::segment::Segment;

/// Label of the concatenated output stream.
pub const OUTPUT_LABEL: &str = "v";

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Renderer-neutral description of a time-remapping filter graph.
///
/// A plan consists of:
/// - one chain per segment (`chains`), in segment index order
/// - a terminal concatenation of every chain output (`concat`)
///
/// Serialization to a concrete executor syntax is kept out of this module; see
/// [`crate::render_filter_complex`].
pub struct FilterGraphPlan {
    /// Per-segment chains.
    pub chains: Vec<FilterChain>,
    /// Terminal concatenation.
    pub concat: ConcatNode,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Reference to a stream of one of the graph inputs.
pub struct InputStream {
    /// Input file index.
    pub input: u32,
    /// Stream type within that input.
    pub kind: StreamKind,
}

impl InputStream {
    /// The first video stream of the sole input.
    pub const PRIMARY_VIDEO: Self = Self {
        input: 0,
        kind: StreamKind::Video,
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Stream type selected from an input.
pub enum StreamKind {
    /// Video stream.
    Video,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Linear run of operations from one input stream to one labeled output.
pub struct FilterChain {
    /// Index of the segment this chain renders.
    pub segment: usize,
    /// Source stream.
    pub input: InputStream,
    /// Operations in application order.
    pub ops: Vec<FilterOp>,
    /// Output stream label.
    pub output: String,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
/// A single operation inside a [`FilterChain`].
pub enum FilterOp {
    /// Keep source frames `[start_frame, end_frame)`.
    Trim {
        /// First kept frame.
        start_frame: u64,
        /// One past the last kept frame.
        end_frame: u64,
    },
    /// Shift timestamps so the chain starts at zero.
    ResetTimestamps,
    /// Divide timestamps by `speed`; values above 1 play faster.
    ScaleTimestamps {
        /// Speed multiplier.
        speed: f64,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Joins chain outputs end to end into one stream.
pub struct ConcatNode {
    /// Chain output labels, in playback order.
    pub inputs: Vec<String>,
    /// Video streams per input (always 1).
    pub video_streams: u32,
    /// Audio streams per input (always 0).
    pub audio_streams: u32,
    /// Label of the joined stream.
    pub output: String,
}

impl FilterGraphPlan {
    /// Number of segment chains.
    pub fn segment_count(&self) -> usize {
        self.chains.len()
    }

    /// Total operations, counting the concat node as one.
    pub fn op_count(&self) -> usize {
        self.chains.iter().map(|c| c.ops.len()).sum::<usize>() + 1
    }

    /// Label of the final output stream.
    pub fn output_label(&self) -> &str {
        &self.concat.output
    }
}

/// Build the per-segment trim/retime chains and the terminal concat node.
pub fn synthesize(segments: &[Segment]) -> FilterGraphPlan {
    let chains: Vec<FilterChain> = segments
        .iter()
        .map(|seg| FilterChain {
            segment: seg.index,
            input: InputStream::PRIMARY_VIDEO,
            ops: vec![
                FilterOp::Trim {
                    start_frame: seg.start_frame,
                    end_frame: seg.end_frame,
                },
                FilterOp::ResetTimestamps,
                FilterOp::ScaleTimestamps { speed: seg.speed },
            ],
            output: seg.label.clone(),
        })
        .collect();

    let concat = ConcatNode {
        inputs: chains.iter().map(|c| c.output.clone()).collect(),
        video_streams: 1,
        audio_streams: 0,
        output: OUTPUT_LABEL.to_string(),
    };

    FilterGraphPlan { chains, concat }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/plan.rs"]
mod tests;
