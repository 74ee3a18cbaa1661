use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "speedramp", version)]
struct Cli {
    /// JSON config file; flags override its values.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter (e.g. "debug", "speedramp=debug"). `RUST_LOG` wins when set.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the segment plan or filter graph without rendering.
    Plan(PlanArgs),
    /// Render a speed-ramped MP4 (requires `ffmpeg` and `ffprobe` on PATH).
    Render(RenderArgs),
    /// List the available curve profiles with sample speeds.
    Profiles,
}

#[derive(Parser, Debug)]
struct RampArgs {
    /// Curve profile: FIFO, FISO, SIFO or SISO (case-insensitive).
    #[arg(long)]
    profile: Option<String>,

    /// Requested segment count (reduced automatically for short clips).
    #[arg(long)]
    segments: Option<usize>,

    /// Lowest playback speed.
    #[arg(long)]
    min_speed: Option<f64>,

    /// Highest playback speed.
    #[arg(long)]
    max_speed: Option<f64>,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Input video to probe. Mutually exclusive with --frames.
    #[arg(long = "in", conflicts_with = "frames")]
    in_path: Option<PathBuf>,

    /// Total frame count (use instead of probing).
    #[arg(long, requires = "fps")]
    frames: Option<u64>,

    /// Frame rate when --frames is given.
    #[arg(long)]
    fps: Option<f64>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = PlanFormat::Json)]
    format: PlanFormat,

    #[command(flatten)]
    ramp: RampArgs,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input video path or file:// URI.
    #[arg(long = "in")]
    in_path: String,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Constant rate factor for the encoder.
    #[arg(long)]
    crf: Option<u8>,

    /// Encoder preset.
    #[arg(long)]
    preset: Option<String>,

    /// Fail instead of overwriting an existing output.
    #[arg(long, default_value_t = false)]
    no_overwrite: bool,

    #[command(flatten)]
    ramp: RampArgs,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PlanFormat {
    /// Full plan (media, segmentation, segments, graph) as JSON.
    Json,
    /// ffmpeg `-filter_complex` text.
    Filter,
    /// One line per segment.
    Table,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut cfg = load_config(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        cfg.logging.level = level;
    }
    speedramp::logging::init_logging(&cfg.logging);

    match cli.cmd {
        Command::Plan(args) => cmd_plan(&cfg, args),
        Command::Render(args) => cmd_render(cfg, args),
        Command::Profiles => cmd_profiles(&cfg),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<speedramp::RampConfig> {
    match path {
        Some(p) => speedramp::RampConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(speedramp::RampConfig::default()),
    }
}

fn ramp_opts(
    cfg: &speedramp::RampConfig,
    args: &RampArgs,
) -> anyhow::Result<speedramp::RampOpts> {
    let mut opts = speedramp::RampOpts::from_config(cfg);
    if let Some(category) = args.profile.as_deref() {
        opts = opts.with_category(category)?;
    }
    if let Some(n) = args.segments {
        opts.target_segments = n;
    }
    if let Some(v) = args.min_speed {
        opts.bounds.min_speed = v;
    }
    if let Some(v) = args.max_speed {
        opts.bounds.max_speed = v;
    }
    opts.validate()?;
    Ok(opts)
}

fn cmd_plan(cfg: &speedramp::RampConfig, args: PlanArgs) -> anyhow::Result<()> {
    let opts = ramp_opts(cfg, &args.ramp)?;

    let plan = match (&args.in_path, args.frames) {
        (Some(path), _) => speedramp::plan_file(path, &speedramp::FfprobeProbe, &opts)
            .with_context(|| format!("plan '{}'", path.display()))?,
        (None, Some(frames)) => {
            let fps = args.fps.context("--fps is required with --frames")?;
            anyhow::ensure!(fps > 0.0 && fps.is_finite(), "--fps must be > 0");
            let media = speedramp::MediaInfo::new(frames as f64 / fps, frames, fps);
            speedramp::prepare_ramp(&media, &opts)?
        }
        (None, None) => anyhow::bail!("either --in or --frames/--fps is required"),
    };

    match args.format {
        PlanFormat::Json => {
            let json = serde_json::to_string_pretty(&plan).context("serialize plan")?;
            println!("{json}");
        }
        PlanFormat::Filter => {
            println!(
                "{}",
                speedramp::render_checked(&plan.graph, opts.filter_warn_len)
            );
        }
        PlanFormat::Table => {
            for s in &plan.segments {
                println!(
                    "{:>5}  {:>8}..{:<8}  {:.4}x  [{}]",
                    s.index, s.start_frame, s.end_frame, s.speed, s.label
                );
            }
            eprintln!(
                "{} segments (requested {}), expected output {:.2}s",
                plan.segmentation.actual,
                plan.segmentation.requested,
                plan.output_duration_secs()
            );
        }
    }
    Ok(())
}

fn cmd_render(mut cfg: speedramp::RampConfig, args: RenderArgs) -> anyhow::Result<()> {
    let opts = ramp_opts(&cfg, &args.ramp)?;

    if let Some(crf) = args.crf {
        cfg.encode.crf = crf;
    }
    if let Some(preset) = args.preset {
        cfg.encode.preset = preset;
    }
    if args.no_overwrite {
        cfg.encode.overwrite = false;
    }

    let executor = speedramp::FfmpegExecutor::new(cfg.encode)?;
    let source = speedramp::LocalFileSource::new();
    let collab = speedramp::Collaborators {
        source: &source,
        probe: &speedramp::FfprobeProbe,
        executor: &executor,
    };

    let outcome = speedramp::run_speedramp(&args.in_path, &args.out, &opts, &collab)
        .with_context(|| format!("render '{}'", args.in_path))?;

    eprintln!(
        "wrote {} ({} segments, {})",
        outcome.output.display(),
        outcome.plan.segments.len(),
        outcome.plan.profile
    );
    Ok(())
}

fn cmd_profiles(cfg: &speedramp::RampConfig) -> anyhow::Result<()> {
    let bounds = cfg.bounds();
    bounds.validate()?;
    for profile in speedramp::CurveProfile::ALL {
        let samples: Vec<String> = [0.0, 0.25, 0.5, 0.75, 1.0]
            .iter()
            .map(|&u| format!("{:.2}", profile.speed_at(u, &bounds)))
            .collect();
        println!("{profile}  {}", samples.join(" "));
    }
    Ok(())
}
