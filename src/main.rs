use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sectorgen::cli::commands::{create::CreateOptions, edit::EditOptions};

#[derive(Parser)]
#[command(name = "sectorgen")]
#[command(version, about = "Generate and publish sector pages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new sector page
    Create {
        #[arg(long, help = "Company name")]
        company: String,
        #[arg(long, help = "Target sector label")]
        sector: String,
        #[arg(long, help = "Custom slug (derived from the company name when omitted)")]
        slug: Option<String>,
        #[arg(long, default_value = "", help = "Chat/context summary")]
        context: String,
        #[arg(long = "doc", help = "Path to a source document (repeatable)")]
        docs: Vec<PathBuf>,
        #[arg(long = "link", help = "Source link (repeatable)")]
        links: Vec<String>,
        #[arg(long, help = "Print the generated page instead of publishing it")]
        no_publish: bool,
    },

    /// Rewrite an existing sector page
    Edit {
        #[arg(long, help = "Slug of the page to edit")]
        slug: String,
        #[arg(long, help = "Target sector label")]
        sector: Option<String>,
        #[arg(long, default_value = "", help = "Editing instructions (defaults to --context)")]
        instructions: String,
        #[arg(long, default_value = "", help = "Chat/context summary")]
        context: String,
        #[arg(long = "doc", help = "Path to a source document (repeatable)")]
        docs: Vec<PathBuf>,
        #[arg(long = "link", help = "Source link (repeatable)")]
        links: Vec<String>,
        #[arg(long, help = "Print the edited page instead of publishing it")]
        no_publish: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
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
    /// Write the default project configuration
    Init {
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
        eprintln!("\x1b[31msectorgen encountered an unexpected error:\x1b[0m");
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

    // stdout carries the published URL or the generated JSON; logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Create {
            company,
            sector,
            slug,
            context,
            docs,
            links,
            no_publish,
        } => {
            let rt = Runtime::new()?;
            rt.block_on(sectorgen::cli::commands::create::run(CreateOptions {
                company,
                sector,
                slug,
                context,
                docs,
                links,
                no_publish,
            }))?;
        }
        Commands::Edit {
            slug,
            sector,
            instructions,
            context,
            docs,
            links,
            no_publish,
        } => {
            let rt = Runtime::new()?;
            rt.block_on(sectorgen::cli::commands::edit::run(EditOptions {
                slug,
                sector,
                instructions,
                context,
                docs,
                links,
                no_publish,
            }))?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { format } => {
                sectorgen::cli::commands::config::show(&format)?;
            }
            ConfigAction::Path => {
                sectorgen::cli::commands::config::path()?;
            }
            ConfigAction::Init { force } => {
                sectorgen::cli::commands::config::init(force)?;
            }
        },
    }

    Ok(())
}
