//! Presentation and input ports, and the pull-based turn loop that wires a
//! session to them.
//!
//! The core never renders or reads anything itself. A driving mechanism
//! (blocking console loop, event-driven UI, scripted harness) implements
//! [`Presentation`] and [`ChoiceInput`] and hands them to [`run_session`].

use serde::{Deserialize, Serialize};

use crate::session::{InvalidChoiceError, Prompt, StorySession};

/// Final-score summary delivered once the session reaches a terminal node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndSummary {
    pub final_score: i64,
}

/// Render sink. Calls arrive in the order the session produces them.
pub trait Presentation {
    /// Show a node's text, the running score, and the numbered choices.
    fn show_prompt(&mut self, prompt: &Prompt);

    /// Report a rejected choice. The previous prompt is still the one to
    /// answer; the loop re-offers it without re-rendering.
    fn show_invalid_choice(&mut self, error: &InvalidChoiceError);

    /// Show the final-score summary. Last call of a finished session.
    fn show_ending(&mut self, summary: &EndSummary);
}

/// Choice source. Yields one zero-based index per turn.
///
/// Mapping raw player input (typed digits, button ids) onto a zero-based
/// index is the implementor's job; anything out of range will come back
/// through [`Presentation::show_invalid_choice`].
pub trait ChoiceInput {
    /// The next choice, or `None` when the source is exhausted.
    fn next_choice(&mut self, prompt: &Prompt) -> Option<usize>;
}

/// Drive a session to completion: render a prompt, await a choice, advance,
/// repeat until a terminal node is reached.
///
/// Invalid choices are reported and the same prompt is offered again; the
/// session state is untouched by them. Returns the final score, or `None`
/// when the input dried up first, leaving the session parked in progress.
pub fn run_session(
    session: &mut StorySession,
    presentation: &mut dyn Presentation,
    input: &mut dyn ChoiceInput,
) -> Option<i64> {
    let mut prompt = session.begin();
    presentation.show_prompt(&prompt);

    loop {
        if session.is_over() {
            let summary = EndSummary {
                final_score: session.score(),
            };
            presentation.show_ending(&summary);
            return Some(summary.final_score);
        }

        let Some(index) = input.next_choice(&prompt) else {
            tracing::debug!(session = %session.id(), "input exhausted, session parked");
            return None;
        };

        match session.advance(index) {
            Ok(_) => {
                prompt = session.current_prompt();
                presentation.show_prompt(&prompt);
            }
            Err(error) => presentation.show_invalid_choice(&error),
        }
    }
}
