use super::*;
use std::cell::RefCell;

struct FixedSource;

impl MediaSource for FixedSource {
    fn resolve(&self, locator: &str) -> RampResult<PathBuf> {
        Ok(PathBuf::from(locator))
    }
}

struct FixedProbe(MediaInfo);

impl MediaProbe for FixedProbe {
    fn probe(&self, _path: &Path) -> RampResult<MediaInfo> {
        Ok(self.0)
    }
}

#[derive(Default)]
struct RecordingExecutor {
    calls: RefCell<Vec<(PathBuf, FilterGraphPlan, PathBuf)>>,
}

impl FilterGraphExecutor for RecordingExecutor {
    fn execute(&self, input: &Path, plan: &FilterGraphPlan, output: &Path) -> RampResult<()> {
        self.calls
            .borrow_mut()
            .push((input.to_path_buf(), plan.clone(), output.to_path_buf()));
        Ok(())
    }
}

struct PanickingProbe;

impl MediaProbe for PanickingProbe {
    fn probe(&self, _path: &Path) -> RampResult<MediaInfo> {
        panic!("probe must not run for invalid options");
    }
}

fn opts(profile: CurveProfile, target_segments: usize) -> RampOpts {
    RampOpts {
        profile,
        target_segments,
        ..RampOpts::default()
    }
}

#[test]
fn prepare_builds_matching_segments_and_graph() {
    let media = MediaInfo::new(10.0, 300, 30.0);
    let plan = prepare_ramp(&media, &opts(CurveProfile::Sifo, 10)).unwrap();

    assert_eq!(plan.segmentation.actual, 10);
    assert_eq!(plan.segments.len(), 10);
    assert_eq!(plan.graph.segment_count(), 10);
    let labels: Vec<&str> = plan.segments.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(plan.graph.concat.inputs, labels);
}

#[test]
fn output_is_shorter_than_input_when_speeding_up() {
    let media = MediaInfo::new(10.0, 300, 30.0);
    let plan = prepare_ramp(&media, &opts(CurveProfile::Siso, 10)).unwrap();
    let out = plan.output_duration_secs();
    assert!(out > 10.0 / 5.0);
    assert!(out < 10.0);
}

#[test]
fn category_parsing_feeds_options() {
    let o = RampOpts::default().with_category("fiso").unwrap();
    assert_eq!(o.profile, CurveProfile::Fiso);
    assert!(
        RampOpts::default()
            .with_category("FOFI")
            .unwrap_err()
            .is_invalid_configuration()
    );
}

#[test]
fn run_hands_plan_to_executor() {
    let exec = RecordingExecutor::default();
    let collab = Collaborators {
        source: &FixedSource,
        probe: &FixedProbe(MediaInfo::new(10.0, 300, 30.0)),
        executor: &exec,
    };

    let outcome = run_speedramp(
        "in.mp4",
        Path::new("out.mp4"),
        &opts(CurveProfile::Fifo, 240),
        &collab,
    )
    .unwrap();

    // 300 frames at max 5x allows at most 60 segments.
    assert_eq!(outcome.plan.segments.len(), 60);
    let calls = exec.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, PathBuf::from("in.mp4"));
    assert_eq!(calls[0].1, outcome.plan.graph);
    assert_eq!(calls[0].2, PathBuf::from("out.mp4"));
}

#[test]
fn invalid_options_fail_before_collaborators_run() {
    let exec = RecordingExecutor::default();
    let collab = Collaborators {
        source: &FixedSource,
        probe: &PanickingProbe,
        executor: &exec,
    };

    let err = run_speedramp(
        "in.mp4",
        Path::new("out.mp4"),
        &opts(CurveProfile::Sifo, 0),
        &collab,
    )
    .unwrap_err();
    assert!(err.is_invalid_configuration());
    assert!(exec.calls.borrow().is_empty());
}

#[test]
fn degenerate_media_never_reaches_executor() {
    let exec = RecordingExecutor::default();
    let collab = Collaborators {
        source: &FixedSource,
        probe: &FixedProbe(MediaInfo::new(0.0, 0, 30.0)),
        executor: &exec,
    };

    let err = run_speedramp(
        "in.mp4",
        Path::new("out.mp4"),
        &opts(CurveProfile::Sifo, 10),
        &collab,
    )
    .unwrap_err();
    assert!(matches!(err, RampError::DegenerateInput(_)));
    assert!(exec.calls.borrow().is_empty());
}

#[test]
fn render_checked_returns_full_text() {
    let media = MediaInfo::new(100.0, 3000, 30.0);
    let plan = prepare_ramp(&media, &opts(CurveProfile::Sifo, 240)).unwrap();
    let text = render_checked(&plan.graph, 10);
    assert_eq!(text, render_filter_complex(&plan.graph));
    assert!(text.ends_with("concat=n=240:v=1:a=0[v]"));
}

#[derive(Clone, Default)]
struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn render_with_captured_logs(graph: &FilterGraphPlan, warn_len: usize) -> (String, String) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .finish();
    let text = tracing::subscriber::with_default(subscriber, || render_checked(graph, warn_len));
    (text, logs.text())
}

#[test]
fn render_checked_warns_only_above_threshold() {
    let media = MediaInfo::new(10.0, 300, 30.0);
    let plan = prepare_ramp(&media, &opts(CurveProfile::Sifo, 10)).unwrap();
    let len = render_filter_complex(&plan.graph).len();

    let (_, logs) = render_with_captured_logs(&plan.graph, len);
    assert!(!logs.contains("filter graph is very long"), "{logs}");

    let (text, logs) = render_with_captured_logs(&plan.graph, len - 1);
    assert_eq!(text.len(), len);
    assert!(logs.contains("filter graph is very long"), "{logs}");
    assert!(logs.contains("WARN"), "{logs}");
}
