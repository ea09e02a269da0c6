//! The immutable story graph and its validating builder.
//!
//! A [`StoryGraph`] owns all nodes in a single arena. Construction goes
//! through [`GraphBuilder`], which checks every invariant once; nothing can
//! mutate the graph afterwards, so it is safe to share between any number of
//! concurrent sessions.

use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

use crate::node::{Choice, NodeDef, NodeId, NodeIndex, StoryNode};

/// Build-time graph violations. Any of these aborts construction; no
/// partially built graph is ever exposed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("duplicate node id `{0}`")]
    DuplicateId(NodeId),

    #[error("start node `{0}` is not defined")]
    UnknownStart(NodeId),

    #[error("choice `{label}` on node `{from}` targets unknown node `{target}`")]
    DanglingTarget {
        from: NodeId,
        label: String,
        target: NodeId,
    },
}

/// Lookup-by-id miss on the auxiliary [`StoryGraph::node_by_id`] API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no node with id `{0}`")]
pub struct NotFoundError(pub NodeId);

/// Collects node definitions and validates them into a [`StoryGraph`].
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    start: NodeId,
    defs: Vec<NodeDef>,
}

impl GraphBuilder {
    /// Start a builder with the designated entry node id.
    pub fn new(start: impl Into<NodeId>) -> Self {
        Self {
            start: start.into(),
            defs: Vec::new(),
        }
    }

    /// Add a node definition. Definition order fixes node indices.
    pub fn node(mut self, def: NodeDef) -> Self {
        self.defs.push(def);
        self
    }

    /// Validate and build the graph.
    ///
    /// Fails when two nodes share an id, the start id is undefined, or any
    /// choice targets an undefined id.
    pub fn build(self) -> Result<StoryGraph, GraphError> {
        let mut index_of: HashMap<NodeId, NodeIndex> = HashMap::with_capacity(self.defs.len());
        for (position, def) in self.defs.iter().enumerate() {
            if index_of
                .insert(def.id.clone(), NodeIndex(position))
                .is_some()
            {
                return Err(GraphError::DuplicateId(def.id.clone()));
            }
        }

        let start = *index_of
            .get(&self.start)
            .ok_or_else(|| GraphError::UnknownStart(self.start.clone()))?;

        let mut nodes = Vec::with_capacity(self.defs.len());
        for def in self.defs {
            let mut choices = Vec::with_capacity(def.choices.len());
            for choice in def.choices {
                let target = *index_of.get(&choice.target).ok_or_else(|| {
                    GraphError::DanglingTarget {
                        from: def.id.clone(),
                        label: choice.label.clone(),
                        target: choice.target.clone(),
                    }
                })?;
                choices.push(Choice {
                    label: choice.label,
                    target,
                });
            }
            nodes.push(StoryNode {
                id: def.id,
                text: def.text,
                score_delta: def.score_delta,
                choices,
            });
        }

        Ok(StoryGraph {
            nodes,
            index_of,
            start,
        })
    }
}

/// The immutable story graph: every node, keyed by id, with a designated
/// entry node.
///
/// Play-time navigation follows [`NodeIndex`] references held by choices;
/// [`StoryGraph::node_by_id`] exists for auxiliary lookups and tests only.
#[derive(Debug, Clone, Serialize)]
pub struct StoryGraph {
    nodes: Vec<StoryNode>,
    index_of: HashMap<NodeId, NodeIndex>,
    start: NodeIndex,
}

impl StoryGraph {
    /// Convenience for [`GraphBuilder::new`].
    pub fn builder(start: impl Into<NodeId>) -> GraphBuilder {
        GraphBuilder::new(start)
    }

    /// Index of the designated entry node.
    pub fn start(&self) -> NodeIndex {
        self.start
    }

    /// The designated entry node.
    pub fn start_node(&self) -> &StoryNode {
        &self.nodes[self.start.0]
    }

    /// Look a node up by id.
    pub fn node_by_id(&self, id: &str) -> Result<&StoryNode, NotFoundError> {
        self.index_of
            .get(id)
            .map(|index| &self.nodes[index.0])
            .ok_or_else(|| NotFoundError(NodeId::from(id)))
    }

    /// Number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Iterate over all nodes in definition order.
    pub fn nodes(&self) -> impl Iterator<Item = &StoryNode> {
        self.nodes.iter()
    }
}

impl std::ops::Index<NodeIndex> for StoryGraph {
    type Output = StoryNode;

    fn index(&self, index: NodeIndex) -> &StoryNode {
        &self.nodes[index.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_room_graph() -> StoryGraph {
        StoryGraph::builder("hall")
            .node(
                NodeDef::new("hall", "A draughty hall.")
                    .with_choice("Take the stairs.", "cellar")
                    .with_choice("Stay put.", "hall"),
            )
            .node(NodeDef::new("cellar", "Pitch dark down here.").with_score_delta(-1))
            .build()
            .unwrap()
    }

    #[test]
    fn test_build_and_lookup() {
        let graph = two_room_graph();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.start_node().id, NodeId::from("hall"));

        let cellar = graph.node_by_id("cellar").unwrap();
        assert_eq!(cellar.score_delta, -1);
        assert!(cellar.is_terminal());
    }

    #[test]
    fn test_node_by_id_miss() {
        let graph = two_room_graph();
        let err = graph.node_by_id("attic").unwrap_err();
        assert_eq!(err, NotFoundError(NodeId::from("attic")));
    }

    #[test]
    fn test_choices_resolve_in_order() {
        let graph = two_room_graph();
        let hall = graph.start_node();
        assert_eq!(hall.choices().len(), 2);
        assert_eq!(hall.choices()[0].label, "Take the stairs.");
        assert_eq!(graph[hall.choices()[0].target()].id, NodeId::from("cellar"));
        // Second choice loops back onto the hall itself.
        assert_eq!(graph[hall.choices()[1].target()].id, NodeId::from("hall"));
    }

    #[test]
    fn test_convergent_targets_are_legal() {
        let graph = StoryGraph::builder("fork")
            .node(
                NodeDef::new("fork", "Two paths, one clearing.")
                    .with_choice("Left.", "clearing")
                    .with_choice("Right.", "clearing"),
            )
            .node(NodeDef::new("clearing", "Both paths end here."))
            .build()
            .unwrap();

        let fork = graph.start_node();
        assert_eq!(fork.choices()[0].target(), fork.choices()[1].target());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let err = StoryGraph::builder("a")
            .node(NodeDef::new("a", "First."))
            .node(NodeDef::new("a", "Second."))
            .build()
            .unwrap_err();
        assert_eq!(err, GraphError::DuplicateId(NodeId::from("a")));
    }

    #[test]
    fn test_unknown_start_rejected() {
        let err = StoryGraph::builder("missing")
            .node(NodeDef::new("a", "Only node."))
            .build()
            .unwrap_err();
        assert_eq!(err, GraphError::UnknownStart(NodeId::from("missing")));
    }

    #[test]
    fn test_empty_graph_rejected() {
        let err = StoryGraph::builder("start").build().unwrap_err();
        assert_eq!(err, GraphError::UnknownStart(NodeId::from("start")));
    }

    #[test]
    fn test_dangling_target_rejected() {
        let err = StoryGraph::builder("a")
            .node(NodeDef::new("a", "Somewhere.").with_choice("Jump.", "void"))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            GraphError::DanglingTarget {
                from: NodeId::from("a"),
                label: "Jump.".to_owned(),
                target: NodeId::from("void"),
            }
        );
    }
}
