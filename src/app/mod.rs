//! Editor-facing application layer.
//!
//! This module owns the interactive state of one editing session: which rows
//! are selected, how the working copy is reordered, the staged name edits,
//! and the save lifecycle. It is driven by abstract input events so it is
//! testable without any rendering surface.
//!
//! # Organization
//!
//! - [`selection`]: Selection flags, range anchor, keyboard range growth
//! - [`state`]: The [`state::EditorState`] container and bulk edit surface
//! - [`reorder`]: Drag, keyboard-step, boundary, and sort reordering
//! - [`handler`]: Event-to-action dispatch over an [`state::EditorState`]
//! - [`actions`]: Side effects the handler asks the caller to perform

pub mod actions;
pub mod handler;
pub mod reorder;
pub mod selection;
pub mod state;

pub use actions::{Action, CountKind};
pub use handler::{handle_event, Event};
pub use reorder::DropHalf;
pub use selection::{BulkScope, SelectionController};
pub use state::EditorState;

/// Vertical direction for keyboard-driven movement and range growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// Toward index 0.
    Up,
    /// Toward the end of the list.
    Down,
}

/// A list end, target of a boundary move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Edge {
    /// The start of the list.
    Top,
    /// The end of the list.
    Bottom,
}
