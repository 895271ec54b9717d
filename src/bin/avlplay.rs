use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context as _;
use avl_playback::{
    Camera, Driver, DriverStatus, FixedTicker, LayoutOpts, PlaybackOpts, Point, Recorder, Trace,
    TreeEngine, scene_to_svg,
};
use clap::{Parser, Subcommand};

/// Upper bound on ticks when playing without a clock.
const MAX_TICKS: usize = 10_000_000;

#[derive(Parser, Debug)]
#[command(name = "avlplay", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the instruction trace for a list of values as JSON.
    Trace(TraceArgs),
    /// Play the insertions through the playback engine and print the step log.
    Play(PlayArgs),
    /// Play the insertions to the end and write the final scene as SVG.
    Svg(SvgArgs),
}

#[derive(Parser, Debug)]
struct TraceArgs {
    /// Values to insert, separated by commas or spaces. Non-numeric entries are ignored.
    #[arg(long)]
    values: String,

    /// Pretty-print the JSON.
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Values to insert, separated by commas or spaces. Non-numeric entries are ignored.
    #[arg(long)]
    values: String,

    /// Playback options JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip every animation instead of ticking through them.
    #[arg(long, default_value_t = false)]
    skip_all: bool,

    /// Step back this many instructions after reaching the end.
    #[arg(long, default_value_t = 0)]
    back: usize,

    /// Tick on a wall clock at the configured interval.
    #[arg(long, default_value_t = false)]
    realtime: bool,
}

#[derive(Parser, Debug)]
struct SvgArgs {
    /// Values to insert, separated by commas or spaces. Non-numeric entries are ignored.
    #[arg(long)]
    values: String,

    /// Output SVG path.
    #[arg(long)]
    out: PathBuf,

    /// Playback options JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = 1.0)]
    zoom: f64,

    #[arg(long, default_value_t = 800)]
    width: u32,

    #[arg(long, default_value_t = 600)]
    height: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Trace(args) => cmd_trace(args),
        Command::Play(args) => cmd_play(args),
        Command::Svg(args) => cmd_svg(args),
    }
}

fn parse_values(raw: &str) -> Vec<f64> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .filter_map(|s| match s.parse::<f64>() {
            Ok(v) if v.is_finite() => Some(v),
            _ => {
                tracing::warn!(input = s, "ignoring non-numeric value");
                None
            }
        })
        .collect()
}

fn load_opts(config: Option<&PathBuf>) -> anyhow::Result<PlaybackOpts> {
    match config {
        Some(path) => PlaybackOpts::from_path(path)
            .with_context(|| format!("load config '{}'", path.display())),
        None => Ok(PlaybackOpts::default()),
    }
}

fn cmd_trace(args: TraceArgs) -> anyhow::Result<()> {
    let mut engine = TreeEngine::new(LayoutOpts::default());
    let mut trace = Trace::new();
    trace.extend(engine.insert_values(&parse_values(&args.values)));

    let json = if args.pretty {
        serde_json::to_string_pretty(&trace)
    } else {
        serde_json::to_string(&trace)
    }
    .context("serialize trace")?;
    println!("{json}");
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let opts = load_opts(args.config.as_ref())?;
    let mut driver = Driver::new(opts, Recorder::new())?;
    driver.insert_command(&parse_values(&args.values))?;

    if args.skip_all {
        driver.skip_all()?;
    } else if args.realtime {
        let mut ticker = FixedTicker::new(driver.tick_interval(), Instant::now());
        'play: loop {
            std::thread::sleep(ticker.until_next(Instant::now()));
            for _ in 0..ticker.poll(Instant::now()) {
                if driver.tick()? != DriverStatus::Animating {
                    break 'play;
                }
            }
        }
    } else {
        let status = driver.run_until_idle(MAX_TICKS)?;
        anyhow::ensure!(
            status == DriverStatus::Finished,
            "playback stopped early: {status:?}"
        );
    }

    for _ in 0..args.back {
        driver.go_back()?;
    }

    let recorder = driver.sink();
    for command in &recorder.step_log {
        println!("{}", command.name);
        for step in &command.steps {
            println!("  {step}");
        }
    }
    if let Some(at) = recorder.selected {
        println!("selected: {at}");
    }
    println!("progress: {:.3}", driver.progress());
    println!("in-order: {:?}", driver.tree().in_order());
    println!("crowded: {}", driver.engine().detect_crowding());
    Ok(())
}

fn cmd_svg(args: SvgArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.zoom.is_finite() && args.zoom > 0.0,
        "--zoom must be finite and > 0"
    );
    let opts = load_opts(args.config.as_ref())?;
    let mut driver = Driver::new(opts, Recorder::new())?;
    driver.insert_command(&parse_values(&args.values))?;
    driver.skip_all()?;

    let tree = driver.tree();
    let center = match tree.root() {
        Some(root) => {
            let depth = f64::from(root.height.max(0)) * driver.opts().layout.level_height;
            Point::new(root.position.x, root.position.y + depth / 2.0)
        }
        None => Point::ORIGIN,
    };
    let camera = Camera::centered_on(
        center,
        f64::from(args.width),
        f64::from(args.height),
        args.zoom,
    );
    let svg = scene_to_svg(
        driver.scene(),
        &camera,
        &driver.opts().style,
        args.width,
        args.height,
    );

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, svg)
        .with_context(|| format!("write svg '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
