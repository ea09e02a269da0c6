//! # Story Session
//!
//! The "stage" crate - turn-based traversal and scoring over a
//! [`story_graph::StoryGraph`]. This crate owns the playthrough state
//! machine and the ports a driving loop plugs into.
//!
//! ## Core Components
//!
//! - **session**: The [`StorySession`] state machine, prompts, and outcomes
//! - **ports**: Presentation/input traits and the pull-based turn loop
//! - **testing**: Scripted port implementations for driving sessions in tests
//!
//! ## Design Philosophy
//!
//! - **Pull-based turns**: the session never blocks or schedules; a driving
//!   loop asks for the current prompt, supplies a choice, and advances
//! - **Atomic operations**: every call either fully succeeds or leaves the
//!   session untouched; a rejected choice never corrupts score or position
//! - **Driver-agnostic**: a blocking console loop, an event-driven UI, and a
//!   scripted test harness all drive the same core unchanged

pub mod ports;
pub mod session;
pub mod testing;

pub use ports::*;
pub use session::*;
pub use testing::*;
