//! Creative Console - terminal front end for a creative-analysis service
//!
//! Uploads market data and creatives to the analysis service, renders the
//! returned markdown reports, scores them and exports the result as JSON.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error or a failed workflow step

mod api;
mod cli;
mod config;
mod console;
mod demo;
mod models;
mod report;
mod view;

use anyhow::{Context, Result};
use api::HttpApi;
use cli::Args;
use config::{Config, CONFIG_FILE_NAME};
use console::{session, Console, Outcome};
use tracing::{debug, error, info};
use tracing_subscriber::FmtSubscriber;
use view::{TerminalOptions, TerminalView, View};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Load configuration; CLI values win over the file
    let mut config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    // Initialize logging
    init_logging(&args, &config);

    info!("Creative Console v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    debug!("Configuration: {:?}", config);

    match run_console(args, config).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Console failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .creative-console.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to point at your analysis service and export directory.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args, config: &Config) {
    let level = if config.general.verbose && !args.quiet {
        tracing::Level::DEBUG
    } else {
        args.log_level()
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Build the console and run either the interactive session or the one-shot workflow.
async fn run_console(args: Args, config: Config) -> Result<i32> {
    let api = HttpApi::new(&config.api).context("Failed to set up the analysis client")?;
    let view = TerminalView::new(TerminalOptions {
        show_progress: !args.quiet,
        export_dir: config.export.directory.clone(),
        html_output: config.report.html_output.clone(),
    });
    let console = Console::new(api, view);

    if args.interactive {
        run_interactive(&console).await
    } else {
        Ok(run_once(&console, &args).await)
    }
}

/// Interactive mode: check for an existing benchmark, then read commands from stdin.
async fn run_interactive<V: View>(console: &Console<HttpApi, V>) -> Result<i32> {
    println!("🎬 Creative Console (type 'help' for commands)");
    console.check_existing_benchmark().await;

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let summary = session::run(console, stdin, true).await?;

    println!(
        "\n👋 Session ended: {} commands, {} failed.",
        summary.commands, summary.failures
    );
    Ok(0)
}

/// One-shot mode: market data, then one creative source, then export.
/// Stops at the first failed step.
async fn run_once<V: View>(console: &Console<HttpApi, V>, args: &Args) -> i32 {
    if let Some(ref market) = args.market {
        println!("📊 Uploading market data: {}", market.display());
        if !console.submit_market_file(market).await.is_success() {
            return 1;
        }
    }

    let outcome = if let Some(ref creative) = args.creative {
        println!("🎥 Analyzing creative: {}", creative.display());
        Some(console.analyze_creative_path(creative).await)
    } else if let Some(ref url) = args.url {
        println!("🔗 Analyzing creative URL: {}", url);
        Some(console.analyze_creative_url(url).await)
    } else if args.demo {
        println!("🧪 Loading demo analysis");
        Some(console.load_demo())
    } else {
        None
    };

    if outcome.is_some_and(|o| !o.is_success()) {
        return 1;
    }

    if args.export {
        if console.export() != Outcome::Completed {
            return 1;
        }
    } else if console.last_result().is_some() {
        debug!("Analysis not exported (pass --export to save it)");
    }

    println!("\n✅ Done.");
    0
}

/// Load configuration from file or use defaults.
///
/// Runs before logging is set up, so problems are reported on stderr directly.
fn load_config(args: &Args) -> Result<Config> {
    // An explicit config path must load
    if let Some(ref config_path) = args.config {
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => Ok(config),
        Ok(None) => Ok(Config::default()),
        Err(e) => {
            eprintln!("⚠️  Ignoring {}: {:#}", CONFIG_FILE_NAME, e);
            Ok(Config::default())
        }
    }
}
