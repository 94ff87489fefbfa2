//! Reconciliation between the local working copy and the remote collaborator.
//!
//! Saving is a two-step pipeline: the planner diffs `(Snapshot, WorkingCopy)`
//! into a phased [`plan::OperationPlan`], and the executor dispatches that
//! plan against the remote collaborator under rate-limit pacing. Planning is
//! pure and side-effect free; all remote traffic lives in the executor.
//!
//! # Organization
//!
//! - [`plan`]: Plan and operation types
//! - [`planner`]: Diff computation and name validation
//! - [`executor`]: Paced sequential dispatch and pending-id substitution

pub mod executor;
pub mod plan;
pub mod planner;

pub use executor::{
    DelayPacer, ExecutionError, ExecutionReport, Pacer, PlanExecutor, DEFAULT_CALL_DELAY,
};
pub use plan::{CreateOp, DisableOp, MoveAnchor, MoveOp, OperationPlan, Phase, UpdateOp};
pub use planner::{compute_plan, validate_names};
