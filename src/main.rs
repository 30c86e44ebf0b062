//! EcoWatcher CLI
//!
//! Terminal rendition of the EcoWatcher dashboard:
//! - Watch the latest eco-score, trend and chart
//! - Print the latest reading or recent history
//! - Show the score band reference table
//! - Generate a default config file

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use ecowatcher::client::{EcoApi, HttpEcoClient};
use ecowatcher::config::{generate_default_config, Config};
use ecowatcher::dashboard::{watch, Dashboard, TerminalView, TextChart, NO_DATA_TEXT};
use ecowatcher::model::{Latest, Severity, Trend};
use ecowatcher::ui::render_html;

#[derive(Parser)]
#[command(name = "ecowatcher")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Eco-score dashboard for the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend URL (overrides config and ECOWATCHER_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Refresh the score card and chart until Ctrl-C
    Watch {
        /// Chart height in rows
        #[arg(long, default_value = "10")]
        height: usize,
        /// Don't ring the terminal bell on critical readings
        #[arg(long)]
        quiet: bool,
    },

    /// Show the latest reading
    Latest,

    /// Show recent readings, oldest first
    History {
        /// Number of readings
        #[arg(short, long, default_value = "30")]
        limit: usize,
    },

    /// Show the score bands
    Bands {
        /// Print table rows as HTML
        #[arg(long)]
        html: bool,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    ecowatcher::logging::init(&config.logging);

    match cli.command {
        Commands::Watch { height, quiet } => {
            let client = HttpEcoClient::new(config.api.client_config())?;
            let dashboard: Dashboard<_, TextChart> =
                Dashboard::new(client, config.dashboard.dashboard_config());

            tracing::info!(
                "Watching {} every {:?}",
                config.api.base_url,
                dashboard.config().poll_interval
            );

            let surface = TextChart::new(height).with_echo();
            let mut view = TerminalView::new(std::io::stdout());
            if quiet {
                view = view.without_bell();
            }

            let shutdown = async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::error!("Failed to listen for Ctrl-C: {}", e);
                    std::future::pending::<()>().await;
                }
            };

            watch(&dashboard, &mut view, Some(&surface), shutdown).await;
        }

        Commands::Latest => {
            let client = HttpEcoClient::new(config.api.client_config())?;
            let latest = client
                .latest()
                .await
                .with_context(|| format!("Failed to reach {}", config.api.base_url))?;

            match latest {
                Latest::NoData => {
                    if cli.format == "json" {
                        println!("{}", serde_json::json!({ "status": "sin_datos" }));
                    } else {
                        println!("{}", NO_DATA_TEXT);
                    }
                }
                Latest::Reading(reading) => {
                    let severity = Severity::classify(reading.ecoscore);
                    if cli.format == "json" {
                        println!(
                            "{}",
                            serde_json::json!({
                                "reading": reading,
                                "severity": severity,
                            })
                        );
                    } else {
                        println!("EcoScore:  {:.2} ({})", reading.ecoscore, reading.timestamp);
                        println!("Estado:    {} - {}", severity.label(), severity.advice());
                    }
                }
            }
        }

        Commands::History { limit } => {
            let client = HttpEcoClient::new(config.api.client_config())?;
            let readings = client
                .history(limit)
                .await
                .with_context(|| format!("Failed to reach {}", config.api.base_url))?
                .chronological();

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&readings)?);
            } else if readings.is_empty() {
                println!("{}", NO_DATA_TEXT);
            } else {
                println!("{:<20} {:>8}  Estado", "Timestamp", "EcoScore");
                println!("{}", "-".repeat(42));
                for reading in &readings {
                    println!(
                        "{:<20} {:>8.2}  {}",
                        reading.timestamp,
                        reading.ecoscore,
                        Severity::classify(reading.ecoscore)
                    );
                }

                let current = readings[readings.len() - 1].ecoscore;
                println!();
                println!("Tendencia: {}", Trend::compute(current, &readings).label);
            }
        }

        Commands::Bands { html } => {
            let rows = Severity::reference_rows();

            if html {
                println!("{}", render_html(&rows));
            } else if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                println!("{:<12} Estado", "Rango");
                println!("{}", "-".repeat(24));
                for row in &rows {
                    println!("{:<12} {}", row.range, row.label);
                }
            }
        }

        Commands::Config { output } => {
            let config = generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}
