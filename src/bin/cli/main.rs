mod app;
mod commands;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "flashdue-cli", about = "Review flashcards when they are due", version)]
struct Cli {
    /// Path to the study config (default: <config dir>/flashdue/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Review every card that is due now, then save the deck
    Quiz {
        /// Deck file (one card per line: due<TAB>front<TAB>back)
        deck: PathBuf,
    },

    /// List cards in due order
    List {
        /// Deck file
        deck: PathBuf,
        /// Show only cards that are due now
        #[arg(long)]
        due: bool,
    },

    /// Add a card to a deck
    Add {
        /// Deck file (created if missing)
        deck: PathBuf,
        /// Front (question) text
        front: String,
        /// Back (answer) text
        back: String,
        /// Due date, e.g. 2024-06-01T09:30 (defaults to now)
        #[arg(long)]
        due: Option<String>,
    },

    /// Interactive session with quiz, list, save and exit commands
    Repl {
        /// Deck file
        deck: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && atty_check();

    match cli.command {
        Command::Quiz { deck } => {
            let mut app = app::App::open(&deck, cli.config.as_deref())?;
            commands::quiz::run(&mut app, &cli.format, use_color)?;
        }
        Command::List { deck, due } => {
            let app = app::App::open(&deck, cli.config.as_deref())?;
            commands::list::run(&app, due, &cli.format, use_color)?;
        }
        Command::Add { deck, front, back, due } => {
            let mut app = app::App::open(&deck, cli.config.as_deref())?;
            commands::add::run(&mut app, &front, &back, due.as_deref(), &cli.format)?;
        }
        Command::Repl { deck } => {
            let mut app = app::App::open(&deck, cli.config.as_deref())?;
            commands::repl::run(&mut app, use_color)?;
        }
    }

    Ok(())
}

/// Check if stdout is a terminal (for color support)
fn atty_check() -> bool {
    use std::io::IsTerminal;
    std::io::stdout().is_terminal()
}
