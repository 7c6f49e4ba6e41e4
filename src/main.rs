//! cosmiclens: celestial lookups that keep working without a network
//!
//! Usage:
//!   cosmiclens probe                        → check the remote generator
//!   cosmiclens lookup "Sagittarius A*"      → resolve one object
//!   cosmiclens seed --json                  → print the initial point set
//!   cosmiclens explore Vega "Planet Nine"   → seed, then grow the point set
//!   cosmiclens --offline lookup Europa      → never touch the network

use anyhow::Context;
use clap::{Parser, Subcommand};
use cosmiclens_atlas::CosmicLens;
use cosmiclens_core::{CelestialRecord, Config, PlotPoint};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "cosmiclens",
    about = "Celestial object lookups with an offline simulation fallback",
    version = env!("CARGO_PKG_VERSION")
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a cosmiclens.toml config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Ignore any API key and answer from local data only
    #[arg(long, global = true, default_value_t = false)]
    offline: bool,

    /// Write logs to a file (in addition to stderr)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check connectivity and print the status code
    Probe,
    /// Resolve a single object by name
    Lookup {
        query: String,
        /// Print the record as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Fetch the initial point population
    Seed {
        /// Print the points as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Seed the point set, then resolve and add each query in turn
    Explore {
        #[arg(required = true)]
        queries: Vec<String>,
        /// Print the final point set as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.log_file.as_deref())?;

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading {}", path.display()))?
            .with_env_overrides(),
        None => Config::from_env(),
    };
    tracing::debug!("Config: {:?}", config);

    let lens = if cli.offline {
        CosmicLens::offline(config)
    } else {
        CosmicLens::new(config)
    };

    match cli.command {
        Commands::Probe => {
            let result = lens.probe_connectivity().await;
            println!("{}", lens.status_line());
            if !result.success {
                return Ok(ExitCode::FAILURE);
            }
        }

        Commands::Lookup { query, json } => {
            lens.probe_connectivity().await;
            let record = lens.resolve(&query).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                print_record(&record);
            }
        }

        Commands::Seed { json } => {
            lens.probe_connectivity().await;
            let points = lens.seed_points().await;
            if json {
                println!("{}", serde_json::to_string_pretty(&points)?);
            } else {
                print_points(&points);
            }
        }

        Commands::Explore { queries, json } => {
            lens.probe_connectivity().await;
            lens.seed_points().await;
            for query in &queries {
                let (record, point) = lens.explore(query).await;
                if !json {
                    print_record(&record);
                    if point.is_none() {
                        println!("  (no plot position; not added)");
                    }
                    println!();
                }
            }
            let points = lens.points().await;
            if json {
                println!("{}", serde_json::to_string_pretty(&points)?);
            } else {
                println!("{} points ({:?})", points.len(), lens.phase().await);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_record(record: &CelestialRecord) {
    let source = if record.is_simulated { "simulated" } else { "remote" };
    println!("{} [{}] ({})", record.name, record.category, source);
    if record.is_hypothetical() {
        println!("  ** hypothetical object **");
    }
    println!("  distance:    {}", record.distance_label);
    println!("  mass:        {}", record.mass_label);
    println!("  temperature: {}", record.temperature_label);
    println!("  discovered:  {}", record.discovered_label);
    if let Some(p) = record.plot_position {
        println!("  plot:        ({:.1}, {:.1})", p.x, p.y);
    }
    println!("  {}", record.summary);
    println!("  fact: {}", record.highlight);
}

fn print_points(points: &[PlotPoint]) {
    for p in points {
        println!(
            "{:<28} {:<26} x={:>5.1} y={:>5.1} w={:>4.1} {}",
            p.name, p.category, p.x, p.y, p.weight, p.color_hint
        );
    }
}

/// Stderr logging, plus an uncoloured copy in `log_file` when given.
/// The returned guard flushes the file writer on drop.
fn init_tracing(log_file: Option<&Path>) -> anyhow::Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let (file_layer, guard) = match log_file {
        Some(path) => {
            let dir = path.parent().filter(|d| !d.as_os_str().is_empty()).unwrap_or(Path::new("."));
            let name = path
                .file_name()
                .with_context(|| format!("log file path has no file name: {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            let layer = tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cosmiclens=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    Ok(guard)
}
