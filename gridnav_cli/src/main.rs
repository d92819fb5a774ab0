mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use gridnav::prelude::*;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "gridnav")]
#[command(about = "GRIDNAV - grid-based shortest-path planner")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Planner configuration file (YAML, TOML or JSON)
    #[arg(short = 'c', long = "config", env = "GRIDNAV_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a single request and print the JSON response
    Plan {
        /// Request file (reads stdin when omitted or "-")
        request: Option<PathBuf>,

        /// Simplification tolerance in world units
        #[arg(short = 'e', long = "epsilon")]
        epsilon: Option<f64>,

        /// Return the raw grid path
        #[arg(long = "no-simplify")]
        no_simplify: bool,

        /// Pretty-print the response
        #[arg(short = 'p', long = "pretty")]
        pretty: bool,
    },

    /// Plan a JSON array of requests in parallel
    Batch {
        /// Requests file (reads stdin when omitted or "-")
        requests: Option<PathBuf>,

        /// Pretty-print the responses
        #[arg(short = 'p', long = "pretty")]
        pretty: bool,
    },

    /// Draw the workspace and planned path as ASCII
    Render {
        /// Request file (reads stdin when omitted or "-")
        request: Option<PathBuf>,
    },

    /// Print the effective planner configuration as YAML
    Params,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run_command(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            std::process::exit(2);
        }
    }
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "gridnav=info",
        1 => "gridnav=debug",
        _ => "gridnav=trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Returns whether every planned request succeeded
fn run_command(cli: Cli) -> Result<bool> {
    let params = PlannerParams::load_or_default(cli.config.as_deref())
        .context("failed to load planner configuration")?;
    if let Some(path) = &cli.config {
        tracing::debug!("using configuration {}", path.display());
    }

    match cli.command {
        Commands::Plan {
            request,
            epsilon,
            no_simplify,
            pretty,
        } => {
            let text = read_input(request.as_deref())?;
            let service = PathPlanningService::new(params)?;

            let response = match PlanRequest::from_json(&text) {
                Ok(mut req) => {
                    if epsilon.is_some() {
                        req.epsilon = epsilon;
                    }
                    if no_simplify {
                        req.simplify = Some(false);
                    }
                    service.plan(&req)
                }
                Err(e) => PlanResponse::from_error(&e),
            };

            log_response(&response);
            print_json(&response, pretty)?;
            Ok(response.success)
        }

        Commands::Batch { requests, pretty } => {
            let text = read_input(requests.as_deref())?;
            let requests: Vec<PlanRequest> =
                serde_json::from_str(&text).context("expected a JSON array of plan requests")?;
            let service = PathPlanningService::new(params)?;

            tracing::info!(
                "planning {} requests on {} workers",
                requests.len(),
                service.params().worker_count()
            );
            let responses = service.plan_batch(&requests);
            let failed = responses.iter().filter(|r| !r.success).count();
            if failed > 0 {
                tracing::info!("{} of {} requests failed", failed, responses.len());
            }

            print_json(&responses, pretty)?;
            Ok(failed == 0)
        }

        Commands::Render { request } => {
            let text = read_input(request.as_deref())?;
            let req = PlanRequest::from_json(&text)?;
            let service = PathPlanningService::new(params)?;

            let output = render::render_plan(&service, &req)?;
            print!("{}", output);
            Ok(true)
        }

        Commands::Params => {
            print!("{}", params.to_yaml()?);
            Ok(true)
        }
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| format!("failed to read {}", p.display())),
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read request from stdin")?;
            Ok(text)
        }
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", text);
    Ok(())
}

fn log_response(response: &PlanResponse) {
    if response.success {
        tracing::info!(
            "{} ({:.2} units, {} of {} waypoints kept)",
            response.message,
            response.length,
            response.path.len(),
            response.raw_waypoints
        );
    } else {
        tracing::warn!("planning failed: {}", response.message);
    }
}
