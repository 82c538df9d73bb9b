use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use officeflow::cli::CommandContext;
use officeflow::cli::commands;

/// Parse a `YYYY-MM-DD` date
fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| format!("Invalid date '{}' (expected YYYY-MM-DD): {}", s, e))
}

#[derive(Parser)]
#[command(name = "officeflow")]
#[command(
    version,
    about = "Flatten wiki tables into spreadsheets and post-process leave reports"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, short, global = true, help = "Extra config file merged over global and project config")]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Export wiki pages linked from the driving spreadsheet
    Export {
        #[arg(long, short, help = "Driving spreadsheet (default: newest match of export.input_pattern)")]
        input: Option<PathBuf>,
        #[arg(long, short, help = "Output directory for page workbooks")]
        output: Option<PathBuf>,
        #[arg(long, help = "Maximum concurrent page fetches")]
        concurrency: Option<usize>,
    },

    /// Resolve one documentation link to a page id
    Resolve {
        #[arg(help = "Documentation link")]
        link: String,
    },

    /// Leave report post-processing
    Leave {
        #[command(subcommand)]
        action: LeaveAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum LeaveAction {
    /// Show the report date window
    Window {
        #[arg(long, value_parser = parse_date, help = "Reference date (default: today)")]
        date: Option<NaiveDate>,
    },
    /// Wait for the browser download and rename it
    Collect,
    /// Remove private columns into the processed directory
    Scrub {
        #[arg(help = "Report to scrub (default: newest renamed report)")]
        file: Option<PathBuf>,
    },
    /// Collect then scrub
    Run,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(
            short = 'f',
            long,
            default_value = "toml",
            help = "Output format: toml, json"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
    /// Initialize configuration
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mofficeflow encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Call default hook for backtrace (if RUST_BACKTRACE=1)
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Export {
            input,
            output,
            concurrency,
        } => {
            let ctx = CommandContext::load(config_path, cli.quiet)?;
            let options = commands::export::ExportOptions {
                input,
                output,
                concurrency,
            };
            let rt = Runtime::new()?;
            rt.block_on(commands::export::run(&ctx, options))?;
        }
        Commands::Resolve { link } => {
            let ctx = CommandContext::load(config_path, cli.quiet)?;
            let rt = Runtime::new()?;
            rt.block_on(commands::resolve::run(&ctx, &link))?;
        }
        Commands::Leave { action } => {
            let ctx = CommandContext::load(config_path, cli.quiet)?;
            match action {
                LeaveAction::Window { date } => {
                    commands::leave::window(&ctx, date)?;
                }
                LeaveAction::Collect => {
                    let rt = Runtime::new()?;
                    rt.block_on(commands::leave::collect(&ctx))?;
                }
                LeaveAction::Scrub { file } => {
                    commands::leave::scrub(&ctx, file)?;
                }
                LeaveAction::Run => {
                    let rt = Runtime::new()?;
                    rt.block_on(commands::leave::run(&ctx))?;
                }
            }
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { format } => {
                commands::config::show(config_path, &format)?;
            }
            ConfigAction::Path => {
                commands::config::path()?;
            }
            ConfigAction::Init { global, force } => {
                commands::config::init(global, force)?;
            }
        },
    }

    Ok(())
}
