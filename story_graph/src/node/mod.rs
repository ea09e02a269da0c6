//! Node identity, resolved nodes and choices, and the authoring values they
//! are built from.

use serde::{Deserialize, Serialize};

/// Unique identifier for a story node, supplied by the author.
///
/// Acts as the primary key within one graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub String);

impl NodeId {
    /// Create a node id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::borrow::Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position of a node inside one built graph.
///
/// Choices store these instead of owning their target, which keeps
/// convergent paths and cycles free of ownership knots. An index is only
/// meaningful for the graph that produced it, so resolved types serialize
/// for inspection but are never deserialized back; graphs are rebuilt from
/// authoring values instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NodeIndex(pub(crate) usize);

/// A resolved outgoing choice: the label shown to the player and the node
/// selecting it leads to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub label: String,
    pub(crate) target: NodeIndex,
}

impl Choice {
    /// Index of the node this choice leads to.
    pub fn target(&self) -> NodeIndex {
        self.target
    }
}

/// A resolved story node: narrative text, the score change applied on every
/// visit, and the ordered choices leading onward.
///
/// Insertion order of choices is display and selection order. A node with no
/// choices is terminal; reaching it ends the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoryNode {
    pub id: NodeId,
    pub text: String,
    pub score_delta: i32,
    pub(crate) choices: Vec<Choice>,
}

impl StoryNode {
    /// Ordered outgoing choices.
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    /// True when this node has no outgoing choices.
    pub fn is_terminal(&self) -> bool {
        self.choices.is_empty()
    }
}

/// An outgoing choice as authored: the target is still an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceDef {
    pub label: String,
    pub target: NodeId,
}

/// A story node as authored, before targets are resolved against the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDef {
    pub id: NodeId,
    pub text: String,
    pub score_delta: i32,
    pub choices: Vec<ChoiceDef>,
}

impl NodeDef {
    /// Create a node definition with the given id and narrative text.
    pub fn new(id: impl Into<NodeId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            score_delta: 0,
            choices: Vec::new(),
        }
    }

    /// Set the score change applied whenever the node is visited.
    pub fn with_score_delta(mut self, score_delta: i32) -> Self {
        self.score_delta = score_delta;
        self
    }

    /// Append an outgoing choice. Order of calls is display order.
    pub fn with_choice(mut self, label: impl Into<String>, target: impl Into<NodeId>) -> Self {
        self.choices.push(ChoiceDef {
            label: label.into(),
            target: target.into(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_display() {
        let id = NodeId::from("start");
        assert_eq!(id.to_string(), "start");
        assert_eq!(id.as_str(), "start");
    }

    #[test]
    fn test_node_def_defaults() {
        let def = NodeDef::new("start", "Welcome to the stage.");
        assert_eq!(def.id, NodeId::from("start"));
        assert_eq!(def.score_delta, 0);
        assert!(def.choices.is_empty());
    }

    #[test]
    fn test_node_def_builder_preserves_choice_order() {
        let def = NodeDef::new("start", "Welcome.")
            .with_score_delta(1)
            .with_choice("Go left.", "left")
            .with_choice("Go right.", "right");

        assert_eq!(def.score_delta, 1);
        assert_eq!(def.choices.len(), 2);
        assert_eq!(def.choices[0].label, "Go left.");
        assert_eq!(def.choices[0].target, NodeId::from("left"));
        assert_eq!(def.choices[1].label, "Go right.");
    }
}
