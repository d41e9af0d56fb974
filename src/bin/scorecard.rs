use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use tracing::level_filters::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "scorecard", version)]
struct Cli {
    /// Increase log verbosity (`-v` info with timings, `-vv` debug, `-vvv` trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render score cards as PNG files.
    Render(RenderArgs),
    /// Print the computed layout for a canvas size as JSON.
    Layout(LayoutArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Card template JSON.
    #[arg(long)]
    config: PathBuf,

    /// Score request JSON; repeat for several cards.
    #[arg(long = "score", required = true)]
    scores: Vec<PathBuf>,

    /// Directory receiving `<score stem>.png`.
    #[arg(long)]
    out_dir: PathBuf,

    /// Generate each card this many times and log the timings.
    #[arg(long, default_value_t = 1)]
    repeat: u32,

    /// Outline every layout rectangle.
    #[arg(long)]
    debug_layout: bool,
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    /// Canvas width in pixels.
    #[arg(long)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long)]
    height: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Layout(args) => cmd_layout(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let size = scorecard::CanvasSize::new(args.width, args.height)?;
    let layout = scorecard::EmbedLayout::new(size)?;
    let json = serde_json::to_string_pretty(&layout).context("serialize layout")?;
    println!("{json}");
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.repeat > 0, "--repeat must be at least 1");

    let (mut config, root) = scorecard::CardConfig::from_json_path(&args.config)?;
    config.debug_layout |= args.debug_layout;
    let generator = scorecard::prepare_generator(&config, &root)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let started = Instant::now();
    args.scores
        .par_iter()
        .map(|score_path| render_one(&generator, score_path, &args.out_dir, args.repeat))
        .collect::<anyhow::Result<Vec<()>>>()?;

    tracing::info!(
        cards = args.scores.len(),
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "done"
    );
    Ok(())
}

fn render_one(
    generator: &scorecard::EmbedGenerator,
    score_path: &Path,
    out_dir: &Path,
    repeat: u32,
) -> anyhow::Result<()> {
    let (request, root) = scorecard::ScoreRequest::from_json_path(score_path)?;
    let record = request
        .load(&root)
        .with_context(|| format!("load score '{}'", score_path.display()))?;

    let mut card = None;
    for iteration in 0..repeat {
        let t0 = Instant::now();
        card = Some(generator.generate(&record)?);
        tracing::info!(
            score = %score_path.display(),
            iteration,
            elapsed_ms = t0.elapsed().as_secs_f64() * 1000.0,
            "generated"
        );
    }
    let card = card.context("no card generated")?;

    let stem = score_path
        .file_stem()
        .with_context(|| format!("score path '{}' has no file name", score_path.display()))?;
    let out = out_dir.join(format!("{}.png", stem.to_string_lossy()));
    let png = scorecard::encode_png(&card)?;
    std::fs::write(&out, png).with_context(|| format!("write png '{}'", out.display()))?;

    eprintln!("wrote {}", out.display());
    Ok(())
}
