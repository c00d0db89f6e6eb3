//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// Creative Console - terminal front end for the creative-analysis service
///
/// Upload competitor market data, benchmark a creative against the winning
/// DNA, read the report and export it as JSON.
///
/// Examples:
///   creative-console --market real-data.csv --creative my_new_ad_v1.mp4 --export
///   creative-console --url https://cdn.example.com/ad.mp4 --html report.html
///   creative-console --demo --export
///   creative-console --interactive
///   creative-console --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Base URL of the analysis service
    ///
    /// Defaults to the config file value, or http://localhost:8000.
    #[arg(long, value_name = "URL", env = "CREATIVE_CONSOLE_API_URL")]
    pub api_url: Option<String>,

    /// Competitor market data (CSV) to upload and analyse
    #[arg(short, long, value_name = "CSV")]
    pub market: Option<PathBuf>,

    /// Creative video file to benchmark
    #[arg(long, value_name = "FILE", conflicts_with_all = ["url", "demo"])]
    pub creative: Option<PathBuf>,

    /// URL of a hosted creative to benchmark
    #[arg(short, long, value_name = "URL", conflicts_with = "demo")]
    pub url: Option<String>,

    /// Render the built-in demo analysis instead of calling the service
    #[arg(long)]
    pub demo: bool,

    /// Export the analysis as Creative_Strategy_Analysis.json
    #[arg(short, long)]
    pub export: bool,

    /// Directory the export is written to
    #[arg(long, value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    /// Also write the rendered report as a standalone HTML page
    #[arg(long, value_name = "FILE")]
    pub html: Option<PathBuf>,

    /// Request timeout in seconds
    ///
    /// Requests wait indefinitely unless this or the config file sets one.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Start an interactive session
    #[arg(short, long)]
    pub interactive: bool,

    /// Path to configuration file
    ///
    /// If not specified, looks for .creative-console.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .creative-console.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Whether a one-shot run has anything to do.
    pub fn has_action(&self) -> bool {
        self.market.is_some()
            || self.creative.is_some()
            || self.url.is_some()
            || self.demo
            || self.export
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if !self.interactive && !self.has_action() {
            return Err(
                "Nothing to do: pass --market, --creative, --url, --demo or --interactive"
                    .to_string(),
            );
        }

        // Validate service URL format
        if let Some(ref url) = self.api_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err("API URL must start with 'http://' or 'https://'".to_string());
            }
        }

        let selected = [self.creative.is_some(), self.url.is_some(), self.demo]
            .iter()
            .filter(|s| **s)
            .count();
        if selected > 1 {
            return Err("Use only one of --creative, --url and --demo".to_string());
        }

        if let Some(ref url) = self.url {
            if url.trim().is_empty() {
                return Err("Creative URL must not be empty".to_string());
            }
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        // Validate timeout if provided
        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        for path in [&self.market, &self.creative].into_iter().flatten() {
            if !path.exists() {
                return Err(format!("File does not exist: {}", path.display()));
            }
            if !path.is_file() {
                return Err(format!("Path is not a file: {}", path.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            api_url: Some("http://localhost:8000".to_string()),
            market: None,
            creative: None,
            url: None,
            demo: true,
            export: false,
            export_dir: None,
            html: None,
            timeout: None,
            interactive: false,
            config: None,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_valid_demo_args() {
        assert!(make_args().validate().is_ok());
    }

    #[test]
    fn test_validation_nothing_to_do() {
        let mut args = make_args();
        args.demo = false;
        assert!(args.validate().is_err());

        args.interactive = true;
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_invalid_api_url() {
        let mut args = make_args();
        args.api_url = Some("localhost:8000".to_string());
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_exclusive_sources() {
        let mut args = make_args();
        args.url = Some("https://cdn.example.com/ad.mp4".to_string());
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_missing_market_file() {
        let mut args = make_args();
        args.market = Some(PathBuf::from("definitely/not/here.csv"));
        let err = args.validate().unwrap_err();
        assert!(err.contains("here.csv"));
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let mut args = make_args();
        args.timeout = Some(0);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_init_config_skips_validation() {
        let mut args = make_args();
        args.demo = false;
        args.init_config = true;
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }

    #[test]
    fn test_clap_parsing() {
        let args = Args::try_parse_from([
            "creative-console",
            "--market",
            "fixtures/market_data.csv",
            "--url",
            "https://cdn.example.com/ad.mp4",
            "--export",
        ])
        .unwrap();
        assert_eq!(args.market, Some(PathBuf::from("fixtures/market_data.csv")));
        assert!(args.export);

        assert!(Args::try_parse_from(["creative-console", "--demo", "--url", "https://x"]).is_err());
    }
}
