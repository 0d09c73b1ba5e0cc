//! TickLadder replay - main entry point
//!
//! Generates a synthetic tick log, replays it through the five-level book and
//! reports what the feature extractor saw.

use std::path::Path;
use std::time::Instant;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ladder_feed::SyntheticGenerator;
use ladder_lob::FEATURE_NAMES;
use ladder_replay::config::ReplayConfig;
use ladder_replay::replay::Replayer;

/// TickLadder replay
#[derive(Parser, Debug)]
#[command(name = "ladder-replay")]
#[command(author = "TickLadder Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Replay a tick log through a five-level book and extract features", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml", env = "LADDER_CONFIG")]
    config: String,

    /// Number of synthetic events to replay
    #[arg(short, long)]
    events: Option<usize>,

    /// Seed for the synthetic generator
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the final feature vector
    #[arg(short = 'f', long)]
    print_features: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = if Path::new(&args.config).exists() {
        ReplayConfig::load(&args.config)?
    } else {
        ReplayConfig::default()
    };
    if let Some(events) = args.events {
        config.events = events;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    if !Path::new(&args.config).exists() {
        tracing::warn!("Config file {} not found, using defaults", args.config);
    }
    tracing::info!("Starting {} replay", config.name);

    let mut generator = SyntheticGenerator::with_seed(config.synthetic.clone(), config.seed);
    let log = generator.generate_log(config.events)?;
    tracing::info!(
        events = log.len(),
        groups = log.group_count(),
        seed = config.seed,
        "Generated synthetic tick log"
    );

    let mut replayer = Replayer::new(config.window_size);
    let mut crossed = 0u64;

    let start = Instant::now();
    let summary = replayer.run(&log, |book, _| {
        if book.is_crossed() {
            crossed += 1;
        }
    })?;
    let duration = start.elapsed();

    tracing::info!("Replay completed in {:?}", duration);
    tracing::info!("Batches applied: {}", summary.batches);
    tracing::info!("Events processed: {}", summary.events);
    tracing::info!(
        "Trades: {} ({} unmatched)",
        summary.trades,
        summary.unmatched_trades
    );
    tracing::info!("Crossed batches: {}", crossed);

    if summary.batches > 0 {
        let per_batch = duration.as_nanos() / u128::from(summary.batches);
        tracing::info!("Mean time per batch: {} ns", per_batch);
    }

    if args.print_features {
        if let Some(features) = summary.final_features {
            for (name, value) in FEATURE_NAMES.iter().zip(features.to_array()) {
                println!("{name:>24} {value:.6}");
            }
        }
    }

    Ok(())
}
