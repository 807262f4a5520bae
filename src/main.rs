//! segment-router CLI
//!
//! ```text
//!   routes.toml ──▶ config::load_config ──▶ Router::from_config
//!                                                │
//!   check:   list routes ◀───────────────────────┤
//!   resolve: argv paths ──▶ Router::resolve ──▶ JSON lines
//!   watch:   stdin paths ──▶ SharedRouter ──▶ JSON lines
//!                               ▲
//!            ConfigWatcher ─────┘ (rebuild + swap on change)
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};

use segment_router::config::{load_config, ConfigWatcher, RouteTableConfig};
use segment_router::observability::logging::init_logging;
use segment_router::{Router, SharedRouter};

#[derive(Parser)]
#[command(name = "segment-router")]
#[command(about = "Resolve paths against a route table", long_about = None)]
struct Cli {
    /// Log level override (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a route table and list its routes
    Check {
        #[arg(short, long)]
        routes: PathBuf,
    },
    /// Resolve paths, printing one JSON object per path
    Resolve {
        #[arg(short, long)]
        routes: PathBuf,

        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Resolve paths read from stdin, reloading the table when it changes
    Watch {
        #[arg(short, long)]
        routes: PathBuf,
    },
}

#[derive(Serialize)]
struct Resolved<'a, R> {
    path: &'a str,
    #[serde(flatten)]
    result: R,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let routes_path = match &cli.command {
        Commands::Check { routes }
        | Commands::Resolve { routes, .. }
        | Commands::Watch { routes } => routes.clone(),
    };
    let config = load_config(&routes_path)?;

    let level = cli
        .log_level
        .as_deref()
        .unwrap_or(config.observability.log_level.as_str());
    init_logging(level);

    tracing::info!(
        path = %routes_path.display(),
        routes = config.routes.len(),
        "Route table loaded"
    );

    match cli.command {
        Commands::Check { .. } => check(&config)?,
        Commands::Resolve { paths, .. } => resolve(&config, &paths)?,
        Commands::Watch { routes } => watch(&routes, &config).await?,
    }

    Ok(())
}

fn check(config: &RouteTableConfig) -> Result<(), Box<dyn std::error::Error>> {
    let router = Router::from_config(&config.routes)?;
    for (pattern, handler) in router.routes() {
        println!("{}\t{}", pattern, handler);
    }
    println!("{} routes, {} trie nodes", router.len(), router.node_count());
    Ok(())
}

fn resolve(config: &RouteTableConfig, paths: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let router = Router::from_config(&config.routes)?;
    for path in paths {
        let output = Resolved {
            path,
            result: router.resolve(path),
        };
        println!("{}", serde_json::to_string(&output)?);
    }
    Ok(())
}

async fn watch(path: &Path, config: &RouteTableConfig) -> Result<(), Box<dyn std::error::Error>> {
    let shared = Arc::new(SharedRouter::new(Router::from_config(&config.routes)?));

    let (watcher, updates) = ConfigWatcher::new(path, config);
    let _watcher = watcher.run()?;

    let reload = {
        let shared = shared.clone();
        tokio::spawn(async move { shared.follow(updates).await })
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let path = line.trim();
        if path.is_empty() {
            continue;
        }
        let output = Resolved {
            path,
            result: shared.resolve_owned(path),
        };
        println!("{}", serde_json::to_string(&output)?);
    }

    reload.abort();
    tracing::info!("Input closed, shutting down");
    Ok(())
}
