//! Siteforge Runtime
//!
//! The entry point for the website builder CLI. Handles arguments,
//! configuration, logging, and dispatch to the wizard and catalog modes.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing::{info, warn, Level};

use siteforge::catalog::TemplateCatalog;
use siteforge::config::{load_config, resolve_path, save_config};
use siteforge::generate::HttpGenerationClient;
use siteforge::present::TerminalPresenter;
use siteforge::types::{default_config, BuilderConfig, LogLevel};
use siteforge::wizard::run_wizard;

const VERSION: &str = "0.1.0";

/// Siteforge -- AI Website Builder
#[derive(Parser, Debug)]
#[command(
    name = "siteforge",
    version = VERSION,
    about = "Siteforge -- AI Website Builder",
    long_about = "Assemble a website design step by step and send it to the generation service."
)]
struct Cli {
    /// Run the design wizard (the default when no mode is given)
    #[arg(long)]
    run: bool,

    /// Print the loaded template catalog
    #[arg(long)]
    list: bool,

    /// Show the effective configuration
    #[arg(long)]
    status: bool,

    /// Override the generation service URL for this invocation
    #[arg(long)]
    api_url: Option<String>,

    /// Override the templates directory for this invocation
    #[arg(long)]
    templates_dir: Option<String>,

    /// Override the output directory for downloaded sites
    #[arg(long)]
    output: Option<String>,
}

/// Config from disk (or defaults) with CLI overrides applied on top.
fn effective_config(cli: &Cli) -> BuilderConfig {
    let mut config = load_config().unwrap_or_else(default_config);

    if let Some(url) = &cli.api_url {
        config.api_url = url.trim_end_matches('/').to_string();
    }
    if let Some(dir) = &cli.templates_dir {
        config.templates_dir = dir.clone();
    }
    if let Some(dir) = &cli.output {
        config.output_dir = dir.clone();
    }

    config
}

fn init_logging(level: LogLevel) {
    let max_level = match level {
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Info => Level::INFO,
        LogLevel::Warn => Level::WARN,
        LogLevel::Error => Level::ERROR,
    };

    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_target(false)
        .init();
}

// ---- Status Command ---------------------------------------------------------

/// Display the effective configuration.
fn show_status(config: &BuilderConfig) {
    println!(
        r#"
=== SITEFORGE STATUS ===
Service:    {}
Templates:  {}
Output:     {}
Types:      {}
Timeout:    {}s
Version:    {}
========================
"#,
        config.api_url,
        resolve_path(&config.templates_dir),
        resolve_path(&config.output_dir),
        config.site_types.join(", "),
        config.request_timeout_secs,
        config.version,
    );
}

// ---- List Command -----------------------------------------------------------

/// Print every loaded site type with its pages, themes, and features.
async fn list_catalog(config: &BuilderConfig) {
    let templates_dir = resolve_path(&config.templates_dir);
    let catalog = TemplateCatalog::load(&templates_dir, &config.site_types).await;

    if catalog.is_empty() {
        println!(
            "{}",
            format!("No template descriptors could be loaded from {}.", templates_dir).yellow()
        );
        return;
    }

    for site_type in catalog.types() {
        let pages: Vec<String> = catalog
            .pages(site_type)
            .iter()
            .map(|p| {
                if p.default {
                    format!("{}*", p.name)
                } else {
                    p.name.clone()
                }
            })
            .collect();
        let themes: Vec<&str> = catalog
            .themes(site_type)
            .iter()
            .map(|t| t.label.as_str())
            .collect();
        let features: Vec<&str> = catalog
            .features(site_type)
            .iter()
            .map(|f| f.label.as_str())
            .collect();

        println!();
        println!("{}", format!("  {}", site_type).cyan().bold());
        println!("    pages:    {}", pages.join(", "));
        println!("    themes:   {}", themes.join(", "));
        println!("    features: {}", features.join(", "));
    }

    println!();
    println!("{}", "  (* included by default)".dimmed());
}

// ---- Main Run ---------------------------------------------------------------

/// The main run: load the catalog, then hand off to the wizard.
async fn run(config: &BuilderConfig) -> Result<()> {
    let now = chrono::Local::now().to_rfc3339();
    println!("[{}] Siteforge v{} starting...", now, VERSION);

    // First run: persist the effective config so later runs start from it.
    if load_config().is_none() {
        if let Err(e) = save_config(config) {
            warn!("Could not save config: {:#}", e);
        }
    }

    let templates_dir = resolve_path(&config.templates_dir);
    let catalog = TemplateCatalog::load(&templates_dir, &config.site_types).await;
    info!(
        "Loaded {} of {} template types from {}",
        catalog.types().len(),
        config.site_types.len(),
        templates_dir
    );

    let client = HttpGenerationClient::new(config.api_url.clone(), config.request_timeout_secs);
    let presenter = TerminalPresenter::new(config.api_url.clone(), resolve_path(&config.output_dir));

    run_wizard(&catalog, &client, &presenter).await
}

// ---- Entry Point ------------------------------------------------------------

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = effective_config(&cli);
    init_logging(config.log_level);

    if cli.status {
        show_status(&config);
    }

    if cli.list {
        list_catalog(&config).await;
    }

    // The wizard runs for --run, and by default when no mode is given.
    if cli.run || (!cli.status && !cli.list) {
        if let Err(e) = run(&config).await {
            eprintln!("Fatal: {:#}", e);
            std::process::exit(1);
        }
    }
}
