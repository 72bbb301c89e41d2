//! CLI binary for carbonshift.

use std::path::PathBuf;
use std::sync::Arc;

use carbonshift::host::stdio::run_stdio_bridge;
use carbonshift::search::order::recommendation_order;
use carbonshift::{CarbonConfig, CarbonService, Recommendation, ToolMode, build_registry};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// carbonshift: pick the lowest-carbon region and time for a job.
#[derive(Parser)]
#[command(name = "carbonshift", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the forecast dataset path.
    #[arg(long)]
    forecast: Option<PathBuf>,

    /// Print machine-readable JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Show the persisted preference profile.
    Profile,

    /// List allowed regions.
    Regions {
        /// List the regions the forecast dataset covers instead.
        #[arg(long)]
        dataset: bool,
    },

    /// Write a default config file to --config or the default location.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },

    /// Update preferences; omitted flags keep their current value.
    SetPrefs {
        /// Comma-separated regions, e.g. "SG,EU_WEST".
        #[arg(long)]
        regions: Option<String>,
        /// Allowed shift window in minutes.
        #[arg(long, allow_negative_numbers = true)]
        shift: Option<i64>,
    },

    /// Print a region's forecast series.
    Forecast {
        /// Region identifier.
        region: String,
    },

    /// Best slot in one region within a window around START.
    BestSlot {
        /// Region identifier.
        region: String,
        /// Requested start time, ISO-8601.
        start: String,
        /// Minutes either side of START to consider.
        #[arg(short, long, default_value_t = 60, allow_negative_numbers = true)]
        window: i64,
    },

    /// Best (region, time) across allowed regions under current preferences.
    Recommend {
        /// Requested start time, ISO-8601.
        start: String,
        /// List every region's candidate, best first.
        #[arg(long)]
        all: bool,
    },

    /// Serve tool calls as newline-delimited JSON over stdin/stdout.
    Serve {
        /// Hide tools that change preferences.
        #[arg(long)]
        read_only: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so `serve` keeps stdout for the protocol.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("carbonshift=info")),
        )
        .init();

    let cli = Cli::parse();

    if let Command::Init { force } = cli.command {
        let path = CarbonConfig::init_file(cli.config.as_deref(), force)?;
        println!("{}", path.display());
        return Ok(());
    }

    let mut config = CarbonConfig::load_or_default(cli.config.as_deref())?;
    if let Some(path) = cli.forecast {
        config.forecast.path = Some(path);
    }
    let service = config.build_service();
    let json = cli.json;

    match cli.command {
        Command::Profile => {
            let profile = service.get_profile();
            if json {
                print_json(&profile)?;
            } else {
                println!("regions_allowed:       {}", profile.regions_allowed.join(", "));
                println!("allowed_shift_minutes: {}", profile.allowed_shift_minutes);
            }
        }
        Command::Regions { dataset } => {
            let regions = if dataset {
                service.dataset_regions()
            } else {
                service.list_regions()
            };
            if json {
                print_json(&regions)?;
            } else {
                for region in regions {
                    println!("{region}");
                }
            }
        }
        Command::SetPrefs { regions, shift } => {
            let profile = service.update_preferences(regions.as_deref(), shift)?;
            print_json(&profile)?;
        }
        Command::Forecast { region } => {
            let series = service.region_forecast(&region);
            if json {
                print_json(&series)?;
            } else if series.is_empty() {
                println!("no forecast for {region}");
            } else {
                for sample in series {
                    println!("{sample}");
                }
            }
        }
        Command::BestSlot {
            region,
            start,
            window,
        } => {
            let rec = service.best_slot_in_window(&region, &start, window)?;
            print_recommendation(rec.as_ref(), json)?;
        }
        Command::Recommend { start, all } => {
            if all {
                let mut candidates = service.region_candidates(&start)?;
                candidates.sort_by(recommendation_order);
                if json {
                    print_json(&candidates)?;
                } else if candidates.is_empty() {
                    println!("no region has forecast data in the allowed window");
                } else {
                    for rec in candidates {
                        println!("{rec}");
                    }
                }
            } else {
                let rec = if config.search.parallel {
                    service.recommend_best_concurrent(&start).await?
                } else {
                    service.recommend_best(&start)?
                };
                print_recommendation(rec.as_ref(), json)?;
            }
        }
        Command::Serve { read_only } => {
            let mode = if read_only {
                ToolMode::ReadOnly
            } else {
                config.tools.mode
            };
            serve(&service, mode).await?;
        }
        // Handled before the config is loaded.
        Command::Init { .. } => {}
    }

    Ok(())
}

async fn serve(service: &CarbonService, mode: ToolMode) -> anyhow::Result<()> {
    let registry = Arc::new(build_registry(service, mode));
    tracing::info!(?mode, tools = registry.list_available().len(), "serving tool calls on stdio");
    run_stdio_bridge(registry).await?;
    Ok(())
}

fn print_recommendation(rec: Option<&Recommendation>, json: bool) -> anyhow::Result<()> {
    match (rec, json) {
        (Some(rec), true) => print_json(rec)?,
        (None, true) => println!("{{}}"),
        (Some(rec), false) => {
            println!("{rec}");
            let saved = rec.intensity_saved();
            if saved > 0 {
                println!("saves {saved} gCO2/kWh versus the requested start");
            }
        }
        (None, false) => println!("no forecast data in the window"),
    }
    Ok(())
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
