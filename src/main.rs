mod cli;

use anyhow::Result;
use chatsensei::config::SenseiConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "chatsensei",
    version,
    about = "Chat with a Japanese sensei and keep the vocabulary"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Chat with the sensei (interactive unless --message is given)
    Chat {
        /// Conversation topic
        #[arg(short, long)]
        topic: Option<String>,
        /// Send a single message and exit
        #[arg(short, long)]
        message: Option<String>,
    },
    /// Show chat history, vocabulary, and flashcards
    Study,
    /// List saved vocabulary
    Vocab,
    /// List chat history
    History {
        /// Only show exchanges on this topic
        #[arg(short, long)]
        topic: Option<String>,
    },
    /// List flashcards
    Flashcards,
    /// Copy a vocabulary entry to the flashcards
    Flashcard {
        word: String,
    },
    /// Remove a word from the vocabulary (flashcards are kept)
    Forget {
        word: String,
    },
    /// Show record counts
    Stats,
    /// Export all records as JSON to stdout
    Export,
    /// Import records from a directory of vocab.json / chat_history.json / flashcards.json
    Import {
        dir: PathBuf,
    },
    /// Delete all records
    Reset,
    /// Check the SQLite database
    Doctor,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Pick up OPENAI_API_KEY and friends from ./.env before reading config
    let _ = dotenvy::dotenv();

    let config = SenseiConfig::load()?;

    // Log to stderr so stdout stays clean for command output.
    let filter = EnvFilter::try_new(&config.log.level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Chat { topic, message } => {
            cli::chat::chat(&config, topic, message).await?;
        }
        Command::Study => cli::study::study(&config)?,
        Command::Vocab => cli::study::vocab(&config)?,
        Command::History { topic } => cli::study::history(&config, topic.as_deref())?,
        Command::Flashcards => cli::study::flashcards(&config)?,
        Command::Flashcard { word } => cli::flashcard::promote(&config, &word)?,
        Command::Forget { word } => cli::flashcard::forget(&config, &word)?,
        Command::Stats => cli::stats::stats(&config)?,
        Command::Export => cli::export::export(&config)?,
        Command::Import { dir } => cli::import::import(&config, &dir)?,
        Command::Reset => cli::reset::reset(&config)?,
        Command::Doctor => cli::doctor::doctor(&config)?,
    }

    Ok(())
}
