mod bench;
mod config;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use fibsvc_core::{ComputeService, Strategy};
use fibsvc_http::{build_cors_layer, build_router, AppState, CorsOptions};

use crate::config::Config;

#[derive(Parser)]
#[command(
    name = "fibsvc",
    version,
    about = "Fibonacci compute service for latency benchmarks"
)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        bind: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Fibonacci strategy (overrides config)
        #[arg(short, long)]
        strategy: Option<CliStrategy>,

        /// Name reported by /health and / (overrides config)
        #[arg(long)]
        service_name: Option<String>,
    },

    /// Compute once and print the JSON response
    Compute {
        /// Size parameter, normalized exactly like the HTTP query
        #[arg(allow_negative_numbers = true)]
        size: Option<String>,

        /// Fibonacci strategy (overrides config)
        #[arg(short, long)]
        strategy: Option<CliStrategy>,
    },

    /// Time every strategy in-process
    Bench {
        /// Calls per strategy and size
        #[arg(short, long, default_value = "20")]
        runs: usize,

        /// Comma-separated sizes
        #[arg(long, default_value = "10,20,30")]
        sizes: String,
    },

    /// Show the resolved configuration
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum CliStrategy {
    Recursive,
    Memoized,
    Iterative,
    Hybrid,
}

impl From<CliStrategy> for Strategy {
    fn from(val: CliStrategy) -> Self {
        match val {
            CliStrategy::Recursive => Strategy::Recursive,
            CliStrategy::Memoized => Strategy::Memoized,
            CliStrategy::Iterative => Strategy::Iterative,
            CliStrategy::Hybrid => Strategy::Hybrid,
        }
    }
}

fn main() -> Result<()> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(directives.as_deref()))
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();
    let mut cfg = config::load_config(config_path)?;

    match cli.command {
        Commands::Serve {
            bind,
            port,
            strategy,
            service_name,
        } => {
            if let Some(bind) = bind {
                cfg.server.bind = bind;
            }
            if let Some(port) = port {
                cfg.server.port = port;
            }
            if let Some(s) = strategy {
                cfg.compute.strategy = s.into();
            }
            if let Some(name) = service_name {
                cfg.server.service_name = name;
            }
            cmd_serve(&cfg)
        }
        Commands::Compute { size, strategy } => {
            if let Some(s) = strategy {
                cfg.compute.strategy = s.into();
            }
            cmd_compute(&cfg, size.as_deref())
        }
        Commands::Bench { runs, sizes } => cmd_bench(&cfg, &sizes, runs),
        Commands::Config => cmd_config(&cfg, config_path),
    }
}

/// Used when `RUST_LOG` is unset, empty or unparsable.
const DEFAULT_LOG_FILTER: &str = "info";

fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn build_service(cfg: &Config) -> Result<ComputeService> {
    let strategy = cfg.compute.strategy;
    let cache = cfg.cache.build(strategy)?;
    ComputeService::new(strategy, cache).context("building compute service")
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_serve(cfg: &Config) -> Result<()> {
    let addr = cfg.server.socket_addr()?;
    let service = Arc::new(build_service(cfg)?);
    info!(
        service = %cfg.server.service_name,
        strategy = %service.strategy(),
        "starting compute service"
    );

    let state = AppState::new(service, &cfg.server.service_name);
    let cors = build_cors_layer(&CorsOptions::from(&cfg.cors));
    let router = build_router(state, cors);

    let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
    runtime.block_on(fibsvc_http::serve(addr, router))
}

fn cmd_compute(cfg: &Config, size: Option<&str>) -> Result<()> {
    let service = build_service(cfg)?;
    let resp = service.compute(size);
    println!("{}", resp.to_json()?);
    Ok(())
}

fn cmd_bench(cfg: &Config, sizes: &str, runs: usize) -> Result<()> {
    let sizes = bench::parse_sizes(sizes)?;
    let rows = bench::run(&cfg.cache, &sizes, runs)?;
    bench::print(&rows);
    Ok(())
}

fn cmd_config(cfg: &Config, explicit: Option<&Path>) -> Result<()> {
    println!("Config: {}", config::show_config_path(explicit));
    println!();
    println!("[server]");
    println!("  bind = {}", cfg.server.bind);
    println!("  port = {}", cfg.server.port);
    println!("  service_name = {}", cfg.server.service_name);
    println!();
    println!("[compute]");
    println!("  strategy = {}", cfg.compute.strategy);
    println!();
    println!("[cache]");
    println!("  kind = {}", cfg.cache.kind);
    println!("  capacity = {}", cfg.cache.capacity);
    println!();
    println!("[cors]");
    println!("  enabled = {}", cfg.cors.enabled);
    println!("  allowed_origins = {:?}", cfg.cors.allowed_origins);
    Ok(())
}
