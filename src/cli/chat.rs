//! CLI `chat` command: Talk to the sensei, auto-saving vocabulary.

use anyhow::Result;

use chatsensei::config::SenseiConfig;
use chatsensei::error::SenseiError;
use chatsensei::records::{self, RecordStore};
use chatsensei::sensei::{self, SenseiProvider};
use chatsensei::session::{ChatSession, ExchangeOutcome};

use super::prompt;

const HELP: &str = "Commands: /topic <topic> to change topic, /quit to leave. \
                    Anything else is sent to the sensei.";

/// One line typed at the REPL prompt.
#[derive(Debug, PartialEq, Eq)]
enum ReplInput<'a> {
    Empty,
    Quit,
    Help,
    Topic(&'a str),
    Message(&'a str),
}

fn parse_input(line: &str) -> ReplInput<'_> {
    let line = line.trim();
    match line {
        "" => ReplInput::Empty,
        "/quit" | "/exit" => ReplInput::Quit,
        "/help" => ReplInput::Help,
        _ => match line.strip_prefix("/topic") {
            Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => {
                ReplInput::Topic(rest.trim())
            }
            _ => ReplInput::Message(line),
        },
    }
}

/// Run a chat. With `message`, sends it once and exits; otherwise starts a REPL.
///
/// A missing API key or a wrong access secret is reported and the command
/// stops without touching the store.
pub async fn chat(
    config: &SenseiConfig,
    topic: Option<String>,
    message: Option<String>,
) -> Result<()> {
    let provider = match sensei::create_provider(config) {
        Ok(p) => p,
        Err(e) => match e.downcast_ref::<SenseiError>() {
            Some(SenseiError::MissingApiKey) => {
                eprintln!("Error: {e}");
                return Ok(());
            }
            _ => return Err(e),
        },
    };

    if config.gate_enabled() {
        let answer = prompt("Access secret: ")?.unwrap_or_default();
        if let Err(e) = config.check_access(&answer) {
            eprintln!("Error: {e}");
            return Ok(());
        }
    }

    let mut store = records::open_store(config)?;

    match message {
        Some(msg) => {
            let topic = match topic {
                Some(t) if !t.trim().is_empty() => t,
                _ => {
                    eprintln!("Error: {}", SenseiError::MissingTopic);
                    return Ok(());
                }
            };
            let mut session = ChatSession::new(topic);
            let outcome = session
                .exchange(provider.as_ref(), store.as_mut(), &msg)
                .await?;
            print_outcome(&outcome);
            Ok(())
        }
        None => repl(provider.as_ref(), store.as_mut(), topic).await,
    }
}

async fn repl(
    provider: &dyn SenseiProvider,
    store: &mut dyn RecordStore,
    topic: Option<String>,
) -> Result<()> {
    let topic = match topic {
        Some(t) => t,
        None => prompt("Enter the topic: ")?.unwrap_or_default(),
    };
    let mut session = ChatSession::new(topic.trim());

    println!("Chat with Sensei (topic: {})", session.topic());
    println!("{HELP}");

    loop {
        let Some(line) = prompt("You: ")? else {
            break;
        };

        let message = match parse_input(&line) {
            ReplInput::Empty => continue,
            ReplInput::Quit => break,
            ReplInput::Help => {
                println!("{HELP}");
                continue;
            }
            ReplInput::Topic(topic) => {
                session.set_topic(topic);
                println!("Topic: {}", session.topic());
                continue;
            }
            ReplInput::Message(message) => message,
        };

        match session.exchange(provider, store, message).await {
            Ok(outcome) => print_outcome(&outcome),
            Err(e) => match e.downcast_ref::<SenseiError>() {
                Some(err @ (SenseiError::MissingTopic | SenseiError::EmptyMessage)) => {
                    println!("{err}. Use /topic <topic>.");
                }
                _ => return Err(e),
            },
        }
    }

    Ok(())
}

fn print_outcome(outcome: &ExchangeOutcome) {
    println!("Sensei: {}", outcome.response);
    for entry in &outcome.saved_vocab {
        println!("  Auto-saved vocab: {} - {}", entry.word, entry.meaning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_command_needs_a_word_boundary() {
        assert_eq!(parse_input("/topic food"), ReplInput::Topic("food"));
        assert_eq!(parse_input("  /topic   weekend plans "), ReplInput::Topic("weekend plans"));
        assert_eq!(parse_input("/topic\tfood"), ReplInput::Topic("food"));
        assert_eq!(parse_input("/topic"), ReplInput::Topic(""));
        assert_eq!(parse_input("/topicfood"), ReplInput::Message("/topicfood"));
        assert_eq!(parse_input("/topics?"), ReplInput::Message("/topics?"));
    }

    #[test]
    fn other_commands_and_messages() {
        assert_eq!(parse_input("   "), ReplInput::Empty);
        assert_eq!(parse_input("/quit"), ReplInput::Quit);
        assert_eq!(parse_input("/exit\n"), ReplInput::Quit);
        assert_eq!(parse_input("/help"), ReplInput::Help);
        assert_eq!(parse_input(" 猫は何ですか "), ReplInput::Message("猫は何ですか"));
    }
}
