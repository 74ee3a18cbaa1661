use std::fmt::Write as _;

use crate::foundation::core::SPEED_RESOLUTION;
use crate::graph::plan::{FilterChain, FilterGraphPlan, FilterOp, InputStream, StreamKind};

/// Filter graphs longer than this are reported as a diagnostic.
pub const DEFAULT_FILTER_WARN_LEN: usize = 30_000;

/// Render a plan as an ffmpeg `-filter_complex` expression.
///
/// Chains are joined with `;` and the concat node comes last, e.g.
/// `[0:v]trim=start_frame=0:end_frame=30,setpts=PTS-STARTPTS,setpts=PTS/1.0000[v0];[v0]concat=n=1:v=1:a=0[v]`.
/// Speeds are written with four decimals; validated bounds never go below
/// [`crate::SPEED_RESOLUTION`].
pub fn render_filter_complex(plan: &FilterGraphPlan) -> String {
    let mut parts: Vec<String> = plan.chains.iter().map(render_chain).collect();

    let mut concat = String::new();
    for label in &plan.concat.inputs {
        let _ = write!(concat, "[{label}]");
    }
    let _ = write!(
        concat,
        "concat=n={}:v={}:a={}[{}]",
        plan.concat.inputs.len(),
        plan.concat.video_streams,
        plan.concat.audio_streams,
        plan.concat.output
    );
    parts.push(concat);

    parts.join(";")
}

/// The `-map` argument selecting the plan's output stream.
pub fn output_map_arg(plan: &FilterGraphPlan) -> String {
    format!("[{}]", plan.output_label())
}

fn render_chain(chain: &FilterChain) -> String {
    let ops: Vec<String> = chain.ops.iter().map(render_op).collect();
    format!(
        "{}{}[{}]",
        render_input(chain.input),
        ops.join(","),
        chain.output
    )
}

fn render_input(input: InputStream) -> String {
    let kind = match input.kind {
        StreamKind::Video => "v",
    };
    format!("[{}:{kind}]", input.input)
}

fn render_op(op: &FilterOp) -> String {
    match *op {
        FilterOp::Trim {
            start_frame,
            end_frame,
        } => format!("trim=start_frame={start_frame}:end_frame={end_frame}"),
        FilterOp::ResetTimestamps => "setpts=PTS-STARTPTS".to_string(),
        FilterOp::ScaleTimestamps { speed } => format!("setpts=PTS/{}", render_speed(speed)),
    }
}

// Four decimals, unless that would round a positive speed to 0.
fn render_speed(speed: f64) -> String {
    if speed >= SPEED_RESOLUTION {
        format!("{speed:.4}")
    } else {
        format!("{speed}")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/syntax.rs"]
mod tests;
