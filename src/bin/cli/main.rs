mod commands;
#[cfg(feature = "tui")]
mod tui;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::runtime::Runtime;

use mneme_lib::api::HttpStudyService;
use mneme_lib::config::ClientConfig;
use mneme_lib::models::CardType;

#[derive(Parser)]
#[command(name = "mneme", about = "Spaced repetition study client", version)]
struct Cli {
    /// Study service base URL (overrides the config file)
    #[arg(long, global = true)]
    server: Option<String>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// List flashcards
    Cards {
        /// Filter by card type (basic, reversible, cloze)
        #[arg(long)]
        card_type: Option<CardType>,
        /// Filter by tag (repeatable)
        #[arg(long)]
        tag: Vec<String>,
        /// Maximum cards per page
        #[arg(long, default_value = "20")]
        limit: usize,
        /// Page offset
        #[arg(long, default_value = "0")]
        offset: usize,
    },

    /// List cards currently due for review
    Due {
        /// Maximum cards
        #[arg(long, default_value = "50")]
        limit: usize,
    },

    /// List knowledge entries
    Entries {
        /// Filter by tag (repeatable)
        #[arg(long)]
        tag: Vec<String>,
        /// Maximum entries per page
        #[arg(long, default_value = "20")]
        limit: usize,
        /// Page offset
        #[arg(long, default_value = "0")]
        offset: usize,
    },

    /// Show a single entry
    Show {
        /// Entry id
        id: i64,
    },

    /// Capture a new knowledge entry
    Add {
        /// Entry text (use "-" to read from stdin)
        content: Option<String>,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },

    /// Show aggregate statistics
    Stats,

    /// Run an interactive review session
    #[cfg(feature = "tui")]
    Review,
}

/// Read content from stdin if piped, or resolve "-" as stdin
fn resolve_content(content: Option<String>) -> Option<String> {
    use std::io::{IsTerminal, Read};

    match content.as_deref() {
        Some("-") => {
            // Explicit stdin read
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).ok();
            Some(buf)
        }
        Some(_) => content,
        None => {
            // Auto-detect piped stdin
            if !std::io::stdin().is_terminal() {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf).ok();
                if buf.is_empty() {
                    None
                } else {
                    Some(buf)
                }
            } else {
                None
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let mut config = ClientConfig::load_default()?;
    if let Some(server) = cli.server {
        config.server_url = server;
    }
    let service = HttpStudyService::new(&config.server_url)?;

    // Current-thread runtime: at most one request is ever in flight.
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    match cli.command {
        None => {
            // No subcommand: start a review session
            run_review(rt, service, &config)?;
        }
        Some(Command::Cards {
            card_type,
            tag,
            limit,
            offset,
        }) => {
            rt.block_on(commands::cards::run(
                &service, card_type, tag, limit, offset, &cli.format,
            ))?;
        }
        Some(Command::Due { limit }) => {
            rt.block_on(commands::due::run(&service, limit, &cli.format))?;
        }
        Some(Command::Entries { tag, limit, offset }) => {
            rt.block_on(commands::entries::run(&service, tag, limit, offset, &cli.format))?;
        }
        Some(Command::Show { id }) => {
            rt.block_on(commands::show::run(&service, id, &cli.format))?;
        }
        Some(Command::Add { content, tags }) => {
            let content = resolve_content(content);
            rt.block_on(commands::add::run(
                &service,
                content.as_deref(),
                tags.as_deref(),
                &cli.format,
            ))?;
        }
        Some(Command::Stats) => {
            rt.block_on(commands::stats::run(&service, &cli.format))?;
        }
        #[cfg(feature = "tui")]
        Some(Command::Review) => {
            run_review(rt, service, &config)?;
        }
    }

    Ok(())
}

#[cfg(feature = "tui")]
fn run_review(rt: Runtime, service: HttpStudyService, config: &ClientConfig) -> Result<()> {
    tui::run(rt, service, config)
}

#[cfg(not(feature = "tui"))]
fn run_review(_rt: Runtime, _service: HttpStudyService, _config: &ClientConfig) -> Result<()> {
    eprintln!("Review TUI not available (built without 'tui' feature). Use a subcommand.");
    eprintln!("Run with --help for usage.");
    std::process::exit(1);
}
