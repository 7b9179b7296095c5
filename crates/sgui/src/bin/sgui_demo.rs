//! # SGUI Demo
//!
//! Runs the reference form UI headlessly: scripted input in, software
//! rasterizer out, final frame optionally written as PPM.
//!
//! ```text
//! sgui_demo --frames 120 --ppm out.ppm
//! sgui_demo --script tour.toml --config light.toml --seed 7
//! ```
//!
//! Without `--script` the built-in tour is played.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use sgui::logging::init_logging;
use sgui::{run_headless, tour, GuiConfig, HeadlessOptions, InputScript};

/// Headless host for the SGUI reference UI
#[derive(Parser, Debug)]
#[command(name = "sgui_demo")]
#[command(about = "Run the SGUI reference UI headlessly")]
#[command(version)]
struct Args {
    /// Number of frames to run
    #[arg(short, long, default_value = "120")]
    frames: u64,

    /// TOML input script (defaults to the built-in tour)
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Write the last frame to this PPM file
    #[arg(short, long)]
    ppm: Option<PathBuf>,

    /// TOML engine configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Viewport width
    #[arg(long, default_value = "640")]
    width: u32,

    /// Viewport height
    #[arg(long, default_value = "480")]
    height: u32,

    /// Seed for Edit > Random Background
    #[arg(long, default_value = "0")]
    seed: u64,
}

fn main() -> Result<()> {
    init_logging().context("installing the log subscriber")?;
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GuiConfig::from_toml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GuiConfig::default(),
    };
    let script = match &args.script {
        Some(path) => InputScript::from_toml_file(path)
            .with_context(|| format!("loading script {}", path.display()))?,
        None => tour(),
    };

    let report = run_headless(HeadlessOptions {
        width: args.width,
        height: args.height,
        frames: args.frames,
        seed: args.seed,
        config,
        script,
        ppm: args.ppm.clone(),
    })
    .context("running the demo")?;

    let state = &report.state;
    tracing::info!(
        frames = report.frames,
        commands = report.commands,
        user = %state.user,
        toggled = state.toggled,
        fruit = ?state.fruit,
        clicks = state.button_clicks,
        quit = state.quit_requested,
        "demo finished"
    );
    if let Some(path) = &args.ppm {
        tracing::info!(path = %path.display(), "last frame written");
    }
    Ok(())
}
