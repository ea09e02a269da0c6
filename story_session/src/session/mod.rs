//! The playthrough state machine.
//!
//! A [`StorySession`] walks one immutable story graph: it tracks the current
//! node, accumulates the running score, and latches into `Ended` when a
//! terminal node is reached. Score accounting is a running sum over visit
//! events - every entry into a node applies its delta, the start node and
//! revisits under cycles included.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use story_graph::{NodeIndex, StoryGraph, StoryNode};

/// Unique identifier for playthrough sessions, used to correlate log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle states of a session. `Ended` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    InProgress,
    Ended,
}

/// Everything a driving loop needs to render one turn.
///
/// A pure snapshot: observing it never mutates the session, and two prompts
/// taken without an intervening [`StorySession::advance`] compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    /// Narrative text of the current node.
    pub text: String,

    /// Running score after entering the current node.
    pub score: i64,

    /// Choice labels in display/selection order. Empty when terminal.
    pub choices: Vec<String>,

    /// True when the current node ends the story.
    pub is_terminal: bool,
}

/// Result of a successful [`StorySession::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// Moved to a node with further choices.
    Continued,

    /// Moved to a terminal node; the session is over.
    Ended { final_score: i64 },
}

/// A rejected [`StorySession::advance`] call. The session is left exactly as
/// it was; the driving loop is expected to re-prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidChoiceError {
    #[error("the session is already over")]
    SessionOver,

    #[error("choice {index} is out of range ({available} available)")]
    OutOfRange { index: usize, available: usize },
}

/// One playthrough of a story graph.
///
/// Single-threaded by design: no internal synchronization, at most one
/// `advance` in flight per session by the turn-taking protocol. The shared
/// graph is immutable, so any number of sessions may walk it concurrently.
#[derive(Debug)]
pub struct StorySession {
    id: SessionId,
    graph: Arc<StoryGraph>,
    current: NodeIndex,
    score: i64,
    state: SessionState,
    begun: bool,
}

impl StorySession {
    /// Create a session positioned at the graph's start node.
    ///
    /// The start node's score delta is not applied until [`begin`].
    ///
    /// [`begin`]: StorySession::begin
    pub fn new(graph: Arc<StoryGraph>) -> Self {
        let id = SessionId::new();
        let current = graph.start();
        tracing::debug!(session = %id, start = %graph.start_node().id, "session created");
        Self {
            id,
            graph,
            current,
            score: 0,
            state: SessionState::InProgress,
            begun: false,
        }
    }

    /// Enter the playthrough: apply the start node's delta exactly once and
    /// return the initial prompt.
    ///
    /// A choiceless start node ends the session immediately. Calling `begin`
    /// again returns the current prompt without reapplying the delta.
    pub fn begin(&mut self) -> Prompt {
        self.enter_if_unbegun();
        self.current_prompt()
    }

    /// Snapshot of the current turn. Pure read; see [`Prompt`].
    pub fn current_prompt(&self) -> Prompt {
        let node = self.current_node();
        Prompt {
            text: node.text.clone(),
            score: self.score,
            choices: node.choices().iter().map(|c| c.label.clone()).collect(),
            is_terminal: node.is_terminal(),
        }
    }

    /// Follow the choice at `choice_index` out of the current node.
    ///
    /// On success the target node's delta is applied before the terminal
    /// check, so a prompt taken immediately afterwards reflects the
    /// post-entry score. Rejected calls leave the session untouched.
    pub fn advance(&mut self, choice_index: usize) -> Result<TurnOutcome, InvalidChoiceError> {
        // The start node's entry is owed before any transition.
        self.enter_if_unbegun();

        if self.state == SessionState::Ended {
            return Err(InvalidChoiceError::SessionOver);
        }

        let node = &self.graph[self.current];
        let available = node.choices().len();
        let Some(choice) = node.choices().get(choice_index) else {
            tracing::debug!(
                session = %self.id,
                node = %node.id,
                index = choice_index,
                available,
                "choice rejected"
            );
            return Err(InvalidChoiceError::OutOfRange {
                index: choice_index,
                available,
            });
        };

        self.current = choice.target();
        self.enter_current();

        match self.state {
            SessionState::Ended => Ok(TurnOutcome::Ended {
                final_score: self.score,
            }),
            SessionState::InProgress => Ok(TurnOutcome::Continued),
        }
    }

    /// Session identifier.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// True once a terminal node has been reached.
    pub fn is_over(&self) -> bool {
        self.state == SessionState::Ended
    }

    /// Running score so far.
    pub fn score(&self) -> i64 {
        self.score
    }

    /// The node the player currently occupies.
    pub fn current_node(&self) -> &StoryNode {
        &self.graph[self.current]
    }

    /// The final score, once the session is over.
    pub fn final_score(&self) -> Option<i64> {
        match self.state {
            SessionState::Ended => Some(self.score),
            SessionState::InProgress => None,
        }
    }

    fn enter_if_unbegun(&mut self) {
        if !self.begun {
            self.begun = true;
            self.enter_current();
        }
    }

    /// Account for entering the current node: apply its delta, then check
    /// for terminal. Delta application strictly precedes the terminal check.
    fn enter_current(&mut self) {
        let node = &self.graph[self.current];
        self.score += i64::from(node.score_delta);
        if node.is_terminal() {
            self.state = SessionState::Ended;
            tracing::info!(
                session = %self.id,
                node = %node.id,
                final_score = self.score,
                "session ended"
            );
        } else {
            tracing::debug!(
                session = %self.id,
                node = %node.id,
                score = self.score,
                "entered node"
            );
        }
    }
}
