//! profilegen - GitHub profile README generator
//!
//! Fetches a handful of public metrics for one GitHub user, fills them into
//! a mustache template and rewrites the output document every time a
//! metric arrives.
//!
//! Exit codes:
//!   0 - Finished (fetch and render failures are reported in the document/log)
//!   1 - Startup error (invalid arguments, unreadable config)

mod analysis;
mod cli;
mod config;
mod error;
mod fetch;
mod models;
mod report;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::Args;
use config::{Config, CONFIG_FILE};
use fetch::HttpSource;
use indicatif::{ProgressBar, ProgressStyle};
use models::{Metric, Snapshot, EASTER_EGG_PROBABILITY};
use rand::Rng;
use report::MetricsAggregator;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    init_logging(&args);

    info!("profilegen v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("Startup failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = generate(config, &args).await {
        error!("Generation aborted: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .profilegen.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(CONFIG_FILE);

    if path.exists() {
        eprintln!("⚠️  {} already exists. Remove it first or edit it manually.", CONFIG_FILE);
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).with_context(|| format!("Failed to write {}", CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE);
    println!("   Edit it to change the user, template and output paths.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {:#}", e);
            Ok(Config::default())
        }
    }
}

/// Render placeholders, fetch every metric, re-render as results land.
async fn generate(config: Config, args: &Args) -> Result<()> {
    let start_time = Instant::now();

    let evil = rand::thread_rng().gen_bool(EASTER_EGG_PROBABILITY);
    if evil {
        info!("Rolled the easter egg greeting");
    }

    let mut aggregator = MetricsAggregator::new(
        Snapshot::new(Utc::now(), evil),
        config.general.template.clone(),
        config.general.output.clone(),
    );

    // The document must exist even if nothing below succeeds.
    aggregator.render().await;

    let source = match HttpSource::new(&config.api.user_agent) {
        Ok(source) => Arc::new(source),
        Err(e) => {
            error!("Cannot build HTTP client: {:#}", e);
            aggregator.fail_all(&format!("{:#}", e)).await;
            return Ok(());
        }
    };
    let endpoints = config.endpoints();

    if !args.quiet {
        println!("📥 Fetching metrics for {}", endpoints.subject);
    }

    let progress = progress_bar(args.quiet, Metric::ALL.len() as u64);
    let (tasks, outcomes) = fetch::spawn_all(source, &endpoints);
    aggregator.collect(tasks, outcomes, &progress).await;

    let errors = &aggregator.snapshot().error;
    if !args.quiet {
        println!("\n📊 Summary:");
        println!("   Renders: {}", aggregator.renders());
        println!("   Failed lookups: {}", errors.len());
        if !errors.is_empty() {
            for entry in errors.entries() {
                println!("   - ⚠️  {}", entry);
            }
        }
        println!("   Duration: {:.1}s", start_time.elapsed().as_secs_f64());
        println!(
            "\n✅ Profile written to: {}",
            aggregator.output_path().display()
        );
    }

    Ok(())
}

fn progress_bar(quiet: bool, len: u64) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb
}
