//! lamco-pointer-replay - replay recorded pointer input
//!
//! Entry point for the replay binary. Reads JSON-lines host events, runs them
//! through a coordinator on a virtual clock and prints the normalized events.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lamco_pointer_input::config::Config;
use lamco_pointer_input::input::MouseCoordinator;
use lamco_pointer_input::replay::{read_records, replay};

/// Command-line arguments for lamco-pointer-replay
#[derive(Parser, Debug)]
#[command(name = "lamco-pointer-replay")]
#[command(version, about = "Replay recorded pointer input", long_about = None)]
pub struct Args {
    /// Recorded host events (JSON lines), "-" for stdin
    pub input: String,

    /// Configuration file path
    #[arg(short, long, env = "LAMCO_POINTER_CONFIG")]
    pub config: Option<String>,

    /// Start unfocused (all pointer events ignored)
    #[arg(long)]
    pub unfocused: bool,

    /// Touch button mask (0, 1, 2 or 4)
    #[arg(long)]
    pub touch_button: Option<u32>,

    /// Verbose logging (can be specified multiple times)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log format (json|pretty|compact)
    #[arg(long)]
    pub log_format: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default_config()?,
    };
    let config = config.with_overrides(args.unfocused.then_some(false), args.touch_button);
    config.validate()?;

    init_logging(&args, &config)?;
    info!("lamco-pointer-replay v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!("Config: {:?}", config);

    let records = if args.input == "-" {
        read_records(io::stdin().lock())?
    } else {
        let file = File::open(&args.input)
            .with_context(|| format!("Failed to open replay input: {}", args.input))?;
        read_records(BufReader::new(file))?
    };
    info!("Loaded {} records", records.len());

    let surface = config.to_surface()?;
    let mut coordinator = MouseCoordinator::new(Arc::new(surface), config.to_mouse_options()?);
    let events = replay(&mut coordinator, &records);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for event in &events {
        serde_json::to_writer(&mut out, event)?;
        writeln!(out)?;
    }
    out.flush()?;

    info!("Replay finished: {:?}", coordinator.stats());
    Ok(())
}

fn init_logging(args: &Args, config: &Config) -> Result<()> {
    let log_level = match args.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "lamco_pointer_input={level},lamco_pointer_replay={level},warn",
            level = log_level
        ))
    });

    let format = args.log_format.as_deref().unwrap_or(&config.logging.format);

    // stdout carries replay output, logs go to stderr
    match format {
        "json" => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .try_init(),
        "compact" => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().compact().with_writer(io::stderr))
            .try_init(),
        "pretty" => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(io::stderr))
            .try_init(),
        other => anyhow::bail!("Invalid log format: {}", other),
    }
    .context("Failed to initialize logging")?;

    Ok(())
}
