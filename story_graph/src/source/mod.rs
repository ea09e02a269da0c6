//! TOML authoring format for story graphs.
//!
//! A story document names its entry node and lists nodes with inline choice
//! tables:
//!
//! ```toml
//! start = "hall"
//!
//! [[node]]
//! id = "hall"
//! text = "A draughty hall."
//!
//! [[node.choice]]
//! label = "Take the stairs."
//! target = "cellar"
//!
//! [[node]]
//! id = "cellar"
//! text = "Pitch dark down here."
//! score_delta = -1
//! ```
//!
//! Documents funnel through [`GraphBuilder`], so a loaded story satisfies
//! exactly the same invariants as one built in code.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::graph::{GraphBuilder, GraphError, StoryGraph};
use crate::node::{NodeDef, NodeId};

/// Failures while loading a story document.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("invalid story document: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// A whole story document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryDoc {
    /// Id of the entry node.
    pub start: NodeId,

    /// Authored nodes, in definition order.
    #[serde(rename = "node", default)]
    pub nodes: Vec<NodeDoc>,
}

/// One authored node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDoc {
    pub id: NodeId,
    pub text: String,

    /// Score change applied on every visit. Defaults to 0.
    #[serde(default)]
    pub score_delta: i32,

    /// Outgoing choices in display order. Absent means terminal.
    #[serde(rename = "choice", default)]
    pub choices: Vec<ChoiceDoc>,
}

/// One authored choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceDoc {
    pub label: String,
    pub target: NodeId,
}

impl StoryDoc {
    /// Parse a document from TOML text.
    pub fn from_toml(input: &str) -> Result<Self, SourceError> {
        Ok(toml::from_str(input)?)
    }

    /// Resolve the document into a validated [`StoryGraph`].
    pub fn into_graph(self) -> Result<StoryGraph, GraphError> {
        let mut builder = GraphBuilder::new(self.start);
        for node in self.nodes {
            let mut def = NodeDef::new(node.id, node.text).with_score_delta(node.score_delta);
            for choice in node.choices {
                def = def.with_choice(choice.label, choice.target);
            }
            builder = builder.node(def);
        }
        builder.build()
    }
}

/// Parse and resolve a story document in one step.
pub fn load_story(input: &str) -> Result<StoryGraph, SourceError> {
    Ok(StoryDoc::from_toml(input)?.into_graph()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_ROOMS: &str = r#"
start = "hall"

[[node]]
id = "hall"
text = "A draughty hall."

[[node.choice]]
label = "Take the stairs."
target = "cellar"

[[node]]
id = "cellar"
text = "Pitch dark down here."
score_delta = -1
"#;

    #[test]
    fn test_load_story() {
        let graph = load_story(TWO_ROOMS).unwrap();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.start_node().id, NodeId::from("hall"));
        assert_eq!(graph.start_node().choices()[0].label, "Take the stairs.");

        let cellar = graph.node_by_id("cellar").unwrap();
        assert_eq!(cellar.score_delta, -1);
        assert!(cellar.is_terminal());
    }

    #[test]
    fn test_score_delta_defaults_to_zero() {
        let graph = load_story(TWO_ROOMS).unwrap();
        assert_eq!(graph.start_node().score_delta, 0);
    }

    #[test]
    fn test_malformed_document() {
        let err = load_story("start = ").unwrap_err();
        assert!(matches!(err, SourceError::Toml(_)));
    }

    #[test]
    fn test_dangling_target_surfaces_graph_error() {
        let doc = r#"
start = "hall"

[[node]]
id = "hall"
text = "A draughty hall."

[[node.choice]]
label = "Take the stairs."
target = "attic"
"#;
        let err = load_story(doc).unwrap_err();
        assert!(matches!(
            err,
            SourceError::Graph(GraphError::DanglingTarget { .. })
        ));
    }

    #[test]
    fn test_duplicate_id_surfaces_graph_error() {
        let doc = r#"
start = "hall"

[[node]]
id = "hall"
text = "First."

[[node]]
id = "hall"
text = "Second."
"#;
        let err = load_story(doc).unwrap_err();
        assert!(matches!(
            err,
            SourceError::Graph(GraphError::DuplicateId(_))
        ));
    }
}
