//! Console front end for the story engine.
//!
//! Plays the bundled "Queen of the World" story over stdin/stdout: choices
//! are numbered 1..N, a typed number picks one, and the session runs until a
//! terminal node prints the final score.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Context;
use story_graph::source;
use story_session::{
    run_session, ChoiceInput, EndSummary, InvalidChoiceError, Presentation, Prompt, StorySession,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const QUEEN_OF_THE_WORLD: &str = include_str!("../stories/queen_of_the_world.toml");

/// Renders prompts and the final banner to stdout.
struct ConsolePresentation;

impl Presentation for ConsolePresentation {
    fn show_prompt(&mut self, prompt: &Prompt) {
        println!();
        println!("💄 {}", prompt.text);
        if prompt.is_terminal {
            return;
        }
        println!("✨ Current Slaytion: {}", prompt.score);
        for (number, label) in prompt.choices.iter().enumerate() {
            println!("{}: {}", number + 1, label);
        }
    }

    fn show_invalid_choice(&mut self, _error: &InvalidChoiceError) {
        println!("Invalid choice, try again!");
    }

    fn show_ending(&mut self, summary: &EndSummary) {
        println!("👑 FINAL SLAYTION SCORE: {}", summary.final_score);
        println!("💅 Thanks for playing Queen!");
    }
}

/// Reads 1-based choice numbers from a line source and maps them to the
/// zero-based indices the session expects.
struct LineInput<R> {
    reader: R,
}

impl<R: BufRead> ChoiceInput for LineInput<R> {
    fn next_choice(&mut self, _prompt: &Prompt) -> Option<usize> {
        loop {
            print!("> ");
            let _ = io::stdout().flush();

            let mut line = String::new();
            match self.reader.read_line(&mut line) {
                Ok(0) | Err(_) => return None,
                Ok(_) => {}
            }
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            // Out-of-range numbers still go through; the session rejects
            // them and the loop re-prompts.
            match trimmed.parse::<usize>() {
                Ok(number) if number >= 1 => return Some(number - 1),
                _ => println!("Invalid choice, try again!"),
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let graph = source::load_story(QUEEN_OF_THE_WORLD).context("failed to load bundled story")?;
    let mut session = StorySession::new(Arc::new(graph));
    let mut presentation = ConsolePresentation;
    let mut input = LineInput {
        reader: io::stdin().lock(),
    };

    if run_session(&mut session, &mut presentation, &mut input).is_none() {
        tracing::debug!("input closed before the story ended");
    }
    Ok(())
}
