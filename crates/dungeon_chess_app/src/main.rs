// SPDX-License-Identifier: MIT OR Apache-2.0
//! Dungeon Chess - 3D chess where captured pieces are escorted to a dungeon cell
//!
//! The binary runs the capture escort headlessly from a RON configuration
//! and reports where the guard and the piece ended up.

use clap::Parser;
use dungeon_chess_app::{run_replay, AppConfig, AppError, CONFIG_FILE_NAME};
use dungeon_chess_board::{Square, ThemePreset};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "dungeon_chess", version, about)]
struct Cli {
    /// Configuration file
    #[arg(short, long, default_value = CONFIG_FILE_NAME)]
    config: PathBuf,

    /// Override the replay frame rate
    #[arg(long)]
    frame_rate: Option<f64>,

    /// Override the capture square (e.g. `d5`)
    #[arg(long)]
    capture: Option<String>,

    /// Override the board theme
    #[arg(long)]
    theme: Option<String>,

    /// Write the effective configuration back to `--config` and exit
    #[arg(long)]
    write_config: bool,
}

fn parse_theme(name: &str) -> Result<ThemePreset, AppError> {
    ThemePreset::all()
        .iter()
        .copied()
        .find(|preset| preset.name().eq_ignore_ascii_case(name))
        .ok_or_else(|| AppError::UnknownTheme(name.to_string()))
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let mut config = AppConfig::load_or_default(&cli.config)?;
    if let Some(frame_rate) = cli.frame_rate {
        config.replay.frame_rate = frame_rate;
    }
    if let Some(capture) = &cli.capture {
        config.replay.capture_square = capture.parse::<Square>()?;
    }
    if let Some(theme) = &cli.theme {
        config.theme = parse_theme(theme)?;
    }
    config.validate()?;

    if cli.write_config {
        config.save(&cli.config)?;
        tracing::info!("Wrote config to {:?}", cli.config);
        return Ok(());
    }

    tracing::info!("Theme: {}", config.theme.name());
    let summary = run_replay(&config)?;
    match summary.completed_at {
        Some(at) => tracing::info!("Escort finished at {:.3}s after {} frames", at, summary.frames),
        None => tracing::warn!("Escort did not finish within {} frames", summary.frames),
    }
    tracing::info!(
        "Guard at {:?}, piece at {:?} ({})",
        summary.final_guard,
        summary.final_piece,
        if summary.piece_visible { "visible" } else { "hidden" }
    );
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,dungeon_chess_app=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Dungeon Chess v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&cli) {
        tracing::error!("Dungeon Chess failed: {e}");
        std::process::exit(1);
    }
}
