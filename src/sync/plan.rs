//! Operation plan types produced by the planner and consumed by the executor.
//!
//! A plan is four ordered phases — Create, Update, Move, Disable — executed
//! strictly in that order. Operations are never reordered across phases: a
//! Move anchor may reference an option a Create in the same plan introduces,
//! and a Disable must not run before the moves whose anchors it could
//! otherwise perturb.

use crate::domain::{Color, OptionId};
use serde::{Deserialize, Serialize};

/// The four plan phases, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    /// New options are created remotely.
    Create,
    /// Changed names/colors of existing options are written.
    Update,
    /// Options are repositioned via relative inserts.
    Move,
    /// Soft-deleted options are disabled, last.
    Disable,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Move => "move",
            Self::Disable => "disable",
        };
        f.write_str(name)
    }
}

/// The relative-position reference a Move operation hands to the remote
/// collaborator's insert primitive.
///
/// Exactly one of the two variants is ever present; the remote API has no
/// absolute-index move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveAnchor {
    /// Insert the moved option immediately before this one.
    Before(OptionId),
    /// Insert the moved option immediately after this one.
    After(OptionId),
}

/// Creates a new option remotely.
///
/// The pending sequence number ties the returned real id back to the working
/// copy entry that requested the creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOp {
    /// Pending placeholder this create resolves.
    pub pending: u64,
    /// Name for the new option.
    pub name: String,
    /// Color for the new option.
    pub color: Color,
}

/// Updates the changed field(s) of an existing option.
///
/// Carries only the fields that differ from the snapshot; at least one of
/// `name`/`color` is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOp {
    /// Remote id of the option to update.
    pub id: String,
    /// New name, if it changed.
    pub name: Option<String>,
    /// New color, if it changed.
    pub color: Option<Color>,
}

/// Repositions an option relative to an anchor.
///
/// Both the moved id and the anchor id may still be pending when the plan is
/// computed; the executor substitutes real ids after the corresponding
/// creates succeed, before this operation is dispatched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOp {
    /// Id of the option to move.
    pub id: OptionId,
    /// Where to put it.
    pub anchor: MoveAnchor,
}

/// Soft-disables an existing option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisableOp {
    /// Remote id of the option to disable.
    pub id: String,
}

/// The full phased operation plan for one save attempt.
///
/// An empty plan means the working copy already matches the snapshot; a
/// repeated save after success therefore becomes a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationPlan {
    /// Create phase, dispatched first.
    pub creates: Vec<CreateOp>,
    /// Update phase.
    pub updates: Vec<UpdateOp>,
    /// Move phase.
    pub moves: Vec<MoveOp>,
    /// Disable phase, dispatched last.
    pub disables: Vec<DisableOp>,
}

impl OperationPlan {
    /// Returns `true` when every phase is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.creates.is_empty()
            && self.updates.is_empty()
            && self.moves.is_empty()
            && self.disables.is_empty()
    }

    /// Total number of remote calls this plan will issue.
    #[must_use]
    pub fn len(&self) -> usize {
        self.creates.len() + self.updates.len() + self.moves.len() + self.disables.len()
    }
}
