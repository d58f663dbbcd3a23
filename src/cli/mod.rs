//! CLI Module
//!
//! Command-line interface for Game Creator using Clap v4.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

use crate::config::Config;
use crate::logging;
use crate::sink::{JsonLinesSink, LogSink, SubmissionSink, TeeSink};
use crate::wizard::{
    CodeField, DeliveryOption, DetailField, FileHandle, Submission, SubmitOutcome, Wizard,
};

/// Game Creator - name a game and hand over its URL, code, or files
#[derive(Parser, Debug)]
#[command(name = "game-creator")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug mode (creates log files in .game-creator/logs/)
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the interactive wizard (default)
    Tui,

    /// Submit a game without the interactive UI
    Submit(SubmitArgs),

    /// Initialize configuration
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Show effective configuration
    Config,

    /// Log management operations
    Logs {
        #[command(subcommand)]
        operation: LogCommands,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct SubmitArgs {
    /// Game name
    #[arg(short, long)]
    pub name: String,

    /// URL of an already hosted game
    #[arg(long, conflicts_with_all = ["html", "css", "javascript", "files"])]
    pub url: Option<String>,

    /// Inline HTML
    #[arg(long)]
    pub html: Option<String>,

    /// Inline CSS
    #[arg(long)]
    pub css: Option<String>,

    /// Inline JavaScript
    #[arg(long, alias = "js")]
    pub javascript: Option<String>,

    /// Game file to upload (repeatable)
    #[arg(long = "file", conflicts_with_all = ["html", "css", "javascript"])]
    pub files: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

impl SubmitArgs {
    /// Delivery option implied by the flags given
    fn delivery_option(&self) -> Option<DeliveryOption> {
        if self.url.is_some() {
            Some(DeliveryOption::Url)
        } else if self.html.is_some() || self.css.is_some() || self.javascript.is_some() {
            Some(DeliveryOption::Code)
        } else if !self.files.is_empty() {
            Some(DeliveryOption::Upload)
        } else {
            None
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum LogCommands {
    /// Show log file location and status
    Status,
    /// View recent log entries (requires debug mode)
    View {
        /// Number of lines to show (default: 50)
        #[arg(short, long, default_value = "50")]
        lines: usize,
    },
    /// Clean up old log files
    Clean {
        /// Maximum age in days (default: 7)
        #[arg(short = 'a', long, default_value = "7")]
        days: u64,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Main CLI entry point
pub async fn run(cli: Cli, config: Config) -> Result<()> {
    if cli.debug {
        tracing::info!("Debug mode enabled");
    }

    match cli.command {
        None | Some(Commands::Tui) => cmd_tui(&config).await,
        Some(Commands::Submit(args)) => cmd_submit(&args),
        Some(Commands::Init { force }) => cmd_init(force),
        Some(Commands::Config) => cmd_config(&config),
        Some(Commands::Logs { operation }) => cmd_logs(operation),
    }
}

/// Load configuration from file or defaults
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config = if let Some(path) = config_path {
        tracing::info!("Loading configuration from custom path: {}", path);
        Config::load_from_path(path)?
    } else {
        tracing::debug!("Loading default configuration");
        Config::load()?
    };

    config.validate()?;

    Ok(config)
}

async fn cmd_tui(config: &Config) -> Result<()> {
    let submissions = crate::tui::run(config, Box::new(LogSink)).await?;

    if submissions.is_empty() {
        println!("No games submitted.");
    }
    for submission in &submissions {
        println!("✅ Submitted {}", submission);
    }
    Ok(())
}

fn cmd_submit(args: &SubmitArgs) -> Result<()> {
    match args.format {
        OutputFormat::Text => {
            let submission = submit_headless(args, &mut LogSink)?;
            println!("✅ Submitted {}", submission);
        }
        OutputFormat::Json => {
            let stdout = std::io::stdout();
            let mut sink = TeeSink::new(LogSink, JsonLinesSink::new(stdout.lock()));
            submit_headless(args, &mut sink)?;
        }
    }
    Ok(())
}

/// Drive the wizard through the same steps the UI would
pub fn submit_headless(args: &SubmitArgs, sink: &mut dyn SubmissionSink) -> Result<Submission> {
    let mut wizard = Wizard::new();
    wizard.open();

    wizard.set_game_name(&args.name);
    if !wizard.advance_from_naming() {
        anyhow::bail!("Game name must not be blank");
    }

    let option = args
        .delivery_option()
        .context("Provide --url, --html/--css/--javascript, or --file")?;
    wizard.select_delivery_option(option);

    match option {
        DeliveryOption::Url => {
            wizard.set_field(DetailField::Url, args.url.clone().unwrap_or_default());
        }
        DeliveryOption::Code => {
            let parts = [
                (CodeField::Html, &args.html),
                (CodeField::Css, &args.css),
                (CodeField::JavaScript, &args.javascript),
            ];
            for (field, value) in parts {
                if let Some(value) = value {
                    wizard.set_field(DetailField::Code(field), value.clone());
                }
            }
        }
        DeliveryOption::Upload => {
            wizard.set_uploaded_files(FileHandle::from_paths(&args.files));
        }
    }

    match wizard.submit(sink)? {
        SubmitOutcome::Submitted(submission) => Ok(submission),
        SubmitOutcome::Blocked => match option {
            DeliveryOption::Url => anyhow::bail!("URL must not be blank"),
            DeliveryOption::Code => anyhow::bail!("At least one code field must be non-blank"),
            DeliveryOption::Upload => anyhow::bail!("At least one file is required"),
        },
    }
}

/// Initialize configuration file
fn cmd_init(force: bool) -> Result<()> {
    let config_path = Config::system_config_path().context("Could not determine config directory")?;

    if config_path.exists() && !force {
        anyhow::bail!(
            "Configuration file already exists at: {}\nUse --force to overwrite",
            config_path.display()
        );
    }

    Config::default().save(&config_path)?;

    println!("✅ Configuration initialized at: {}", config_path.display());
    Ok(())
}

fn cmd_config(config: &Config) -> Result<()> {
    let toml_string =
        toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;
    println!("{}", toml_string);
    Ok(())
}

fn cmd_logs(operation: LogCommands) -> Result<()> {
    let log_dir = std::env::var("DEBUG_LOGS_LOCATION")
        .map(PathBuf::from)
        .unwrap_or_else(|_| logging::default_log_dir());

    match operation {
        LogCommands::Status => {
            println!("Log directory: {}", log_dir.display());
            let files = logging::list_log_files(&log_dir)?;
            if files.is_empty() {
                println!("Status: no logs found");
                println!("\nRun with -d to write debug logs:");
                println!("   game-creator -d");
            } else {
                let total_size: u64 = files
                    .iter()
                    .filter_map(|f| std::fs::metadata(f).ok())
                    .map(|m| m.len())
                    .sum();
                println!("Log files: {}", files.len());
                println!("Total size: {:.2} MB", total_size as f64 / (1024.0 * 1024.0));
                if let Some(latest) = files.last() {
                    println!("Latest log: {}", latest.display());
                }
            }
            Ok(())
        }
        LogCommands::View { lines } => {
            let files = logging::list_log_files(&log_dir)?;
            let Some(latest) = files.last() else {
                println!("No log files in {}", log_dir.display());
                return Ok(());
            };
            let contents = std::fs::read_to_string(latest)
                .with_context(|| format!("Failed to read log file: {}", latest.display()))?;
            let all: Vec<&str> = contents.lines().collect();
            let start = all.len().saturating_sub(lines);
            let mut out = std::io::stdout().lock();
            for line in &all[start..] {
                writeln!(out, "{}", line)?;
            }
            Ok(())
        }
        LogCommands::Clean { days } => {
            let removed = logging::cleanup_old_logs(&log_dir, days)?;
            println!("🧹 Removed {} log file(s) older than {} day(s)", removed, days);
            Ok(())
        }
    }
}
