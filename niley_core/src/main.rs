//! Text front end for the assistant: one utterance per line in, one reply out.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use niley_core::{AssistantConfig, CommandDispatcher, Reply, Services, WebServices};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "niley", version, about = "Talk to the Niley assistant from the terminal")]
struct Cli {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the assistant's name
    #[arg(long)]
    assistant_name: Option<String>,

    /// Name to address the user by until they introduce themselves
    #[arg(long)]
    user_name: Option<String>,

    /// Seed for canned reply selection
    #[arg(long)]
    seed: Option<u64>,

    /// Utterances to answer in order; reads stdin when none are given
    utterances: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AssistantConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => AssistantConfig::default(),
    };
    if let Some(name) = cli.assistant_name {
        config.assistant_name = name;
    }
    if let Some(name) = cli.user_name {
        config.default_user_name = name;
    }

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let services = WebServices::new(config.services.clone());
    let mut assistant = CommandDispatcher::with_rng(services, &config, rng)
        .context("building the assistant")?;
    tracing::info!(assistant = assistant.assistant_name(), "assistant ready");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !cli.utterances.is_empty() {
        for utterance in &cli.utterances {
            if !answer(&mut assistant, utterance, &mut out)? {
                break;
            }
        }
        return Ok(());
    }

    for line in io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        if !answer(&mut assistant, &line, &mut out)? {
            break;
        }
    }
    Ok(())
}

/// Print the reply to one utterance. Returns `false` once the user asked to stop.
fn answer<S: Services>(
    assistant: &mut CommandDispatcher<S>,
    utterance: &str,
    out: &mut impl Write,
) -> Result<bool> {
    match assistant.process(utterance) {
        Some(Reply::Say(text)) => {
            writeln!(out, "{}: {text}", assistant.assistant_name())?;
            out.flush()?;
            Ok(true)
        }
        Some(Reply::Stop) => {
            tracing::info!(user = assistant.user_name(), "conversation ended");
            Ok(false)
        }
        None => Ok(true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Canned;

    impl Services for Canned {
        fn current_time_and_date(&self) -> String {
            "It is noon".to_string()
        }

        fn weather(&self, city: &str) -> String {
            format!("Weather in {city}: Clear")
        }

        fn news(&self) -> String {
            "No news".to_string()
        }

        fn web_search(&self, query: &str) -> String {
            format!("Results for {query}")
        }

        fn calculate(&self, expression: &str) -> String {
            niley_core::calculator::describe(expression)
        }

        fn joke(&self) -> String {
            "A joke".to_string()
        }
    }

    fn assistant() -> CommandDispatcher<Canned> {
        CommandDispatcher::with_rng(Canned, &AssistantConfig::default(), StdRng::seed_from_u64(5))
            .unwrap()
    }

    #[test]
    fn test_answer_prints_reply() {
        let mut assistant = assistant();
        let mut out = Vec::new();
        assert!(answer(&mut assistant, "calculate 6 * 7", &mut out).unwrap());
        assert_eq!(String::from_utf8(out).unwrap(), "Niley: The result is 42\n");
    }

    #[test]
    fn test_blank_line_prints_nothing() {
        let mut assistant = assistant();
        let mut out = Vec::new();
        assert!(answer(&mut assistant, "   ", &mut out).unwrap());
        assert!(out.is_empty());
    }

    #[test]
    fn test_stop_ends_conversation() {
        let mut assistant = assistant();
        let mut out = Vec::new();
        let mut answered = 0;
        for line in ["what time is it", "goodbye", "tell me a joke"] {
            if !answer(&mut assistant, line, &mut out).unwrap() {
                break;
            }
            answered += 1;
        }
        assert_eq!(answered, 1);
        assert_eq!(String::from_utf8(out).unwrap(), "Niley: It is noon\n");
    }
}
