//! Actions representing side effects to be executed by the hosting surface.
//!
//! This module defines the [`Action`] type, the imperative commands the event
//! handler produces after processing user input. Actions bridge pure state
//! transformations and effectful operations like dispatching a plan to the
//! remote collaborator or surfacing a result count to the user.
//!
//! # Architecture
//!
//! The event handler returns a `Vec<Action>` after processing each event; the
//! hosting surface executes them in sequence. Plan execution in particular is
//! the host's job: the handler never touches the remote collaborator itself,
//! it only hands over the computed plan.

use crate::sync::OperationPlan;

/// What a reported count is counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountKind {
    /// New options appended by an add batch.
    Added,
    /// Rows matched by a find.
    Matched,
    /// Rows rewritten by a replace.
    Rewritten,
}

/// Commands representing side effects to be executed by the hosting surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Runs the plan against the remote collaborator.
    ///
    /// The host must report back by calling `complete_save` with the
    /// execution report on success, or `abort_save` on failure; the state
    /// refuses further saves until it does.
    ExecutePlan(OperationPlan),

    /// Surfaces an operation's result count to the user.
    ReportCount {
        /// What was counted.
        kind: CountKind,
        /// How many.
        count: usize,
    },
}
