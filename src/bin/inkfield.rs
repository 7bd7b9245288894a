use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "inkfield", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a script and write the final raster as a PNG.
    Frame(FrameArgs),
    /// Replay a script and print the stroke history as JSON.
    Strokes(StrokesArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input replay script JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct StrokesArgs {
    /// Input replay script JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Strokes(args) => cmd_strokes(args),
    }
}

fn replay(path: &std::path::Path) -> anyhow::Result<inkfield::Replay> {
    let script = inkfield::Script::from_path(path)
        .with_context(|| format!("load replay script '{}'", path.display()))?;
    let replay = script
        .run()
        .with_context(|| format!("replay '{}'", path.display()))?;
    Ok(replay)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let replay = replay(&args.in_path)?;
    let raster = replay.canvas.raster();
    let viewport = raster.viewport();

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &raster.to_rgba8(),
        viewport.width,
        viewport.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} frames, {} strokes)",
        args.out.display(),
        replay.frames_updated,
        replay.canvas.stroke_count()
    );
    Ok(())
}

fn cmd_strokes(args: StrokesArgs) -> anyhow::Result<()> {
    let replay = replay(&args.in_path)?;
    let json = serde_json::to_string_pretty(&replay.canvas.snapshot())
        .context("serialize canvas snapshot")?;
    println!("{json}");
    Ok(())
}
