//! # Story Graph
//!
//! The "script" crate - story nodes, the choices connecting them, and the
//! immutable graph a playthrough walks. This crate is the single source of
//! truth for story structure and contains no traversal or session logic.
//!
//! ## Core Components
//!
//! - **node**: Node identity, resolved nodes/choices, and authoring values
//! - **graph**: The validating builder and the immutable [`StoryGraph`]
//! - **source**: The TOML authoring format and its loader
//!
//! ## Design Philosophy
//!
//! - **Build once, read forever**: all invariants (unique ids, resolvable
//!   choice targets, a defined start node) are checked at construction; the
//!   built graph is immutable and freely shared between sessions
//! - **Arena ownership**: the graph owns every node; choices refer to their
//!   targets by index, so convergent paths and cycles need no shared ownership

pub mod graph;
pub mod node;
pub mod source;

pub use graph::*;
pub use node::*;
pub use source::*;
