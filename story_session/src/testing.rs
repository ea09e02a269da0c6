//! Scripted port implementations for driving sessions in tests.
//!
//! - [`ScriptedInput`] feeds a fixed choice sequence, then reports exhaustion
//! - [`RecordingPresentation`] records every render call, in order, for
//!   assertions on what a playthrough displayed

use std::collections::VecDeque;

use crate::ports::{ChoiceInput, EndSummary, Presentation};
use crate::session::{InvalidChoiceError, Prompt};

/// One render call observed by a [`RecordingPresentation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEvent {
    Prompt(Prompt),
    InvalidChoice(InvalidChoiceError),
    Ending(EndSummary),
}

/// A presentation that records everything it is asked to show.
#[derive(Debug, Default)]
pub struct RecordingPresentation {
    /// All render calls, in arrival order.
    pub events: Vec<RenderEvent>,
}

impl RecordingPresentation {
    pub fn new() -> Self {
        Self::default()
    }

    /// The prompts shown so far, in order.
    pub fn prompts(&self) -> impl Iterator<Item = &Prompt> {
        self.events.iter().filter_map(|event| match event {
            RenderEvent::Prompt(prompt) => Some(prompt),
            _ => None,
        })
    }

    /// The end summary, if the session finished.
    pub fn ending(&self) -> Option<&EndSummary> {
        self.events.iter().find_map(|event| match event {
            RenderEvent::Ending(summary) => Some(summary),
            _ => None,
        })
    }
}

impl Presentation for RecordingPresentation {
    fn show_prompt(&mut self, prompt: &Prompt) {
        self.events.push(RenderEvent::Prompt(prompt.clone()));
    }

    fn show_invalid_choice(&mut self, error: &InvalidChoiceError) {
        self.events.push(RenderEvent::InvalidChoice(*error));
    }

    fn show_ending(&mut self, summary: &EndSummary) {
        self.events.push(RenderEvent::Ending(*summary));
    }
}

/// An input that replays a fixed sequence of zero-based choice indices.
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    queue: VecDeque<usize>,
}

impl ScriptedInput {
    /// Script the given choices, to be yielded in order.
    pub fn new(choices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            queue: choices.into_iter().collect(),
        }
    }

    /// Choices not yet consumed.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl ChoiceInput for ScriptedInput {
    fn next_choice(&mut self, _prompt: &Prompt) -> Option<usize> {
        self.queue.pop_front()
    }
}
