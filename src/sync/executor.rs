//! Rate-limited, strictly sequential plan execution.
//!
//! The remote collaborator enforces a request budget (1500 requests per
//! minute), so the executor never pipelines: every call completes before the
//! next is dispatched, and a pacing pause precedes every call except the
//! first. Execution is fail-fast and non-transactional: the first remote
//! error aborts the run mid-plan, already-applied operations stay applied,
//! and recovery is a re-plan from fresh remote state rather than a rollback.

use crate::domain::{OptioneerError, OptionId};
use crate::remote::{InsertPosition, RemoteCollaborator};
use crate::sync::plan::{MoveAnchor, OperationPlan, Phase};
use std::time::Duration;

/// Delay inserted before every remote call except the first, derived from the
/// 1500 requests/minute budget.
pub const DEFAULT_CALL_DELAY: Duration = Duration::from_millis(40);

/// An execution failure, tagged with the phase that was running.
///
/// The phase tag is what lets a caller report "save failed while moving
/// options" instead of a bare transport error.
#[derive(Debug, thiserror::Error)]
#[error("{phase} phase failed: {source}")]
pub struct ExecutionError {
    /// Phase during which the failing call was dispatched.
    pub phase: Phase,
    /// The underlying failure.
    #[source]
    pub source: OptioneerError,
}

/// Outcome of a fully successful plan run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionReport {
    /// Pending sequence numbers paired with the remote ids their Create
    /// calls returned, in dispatch order.
    pub created: Vec<(u64, String)>,
    /// Total remote calls dispatched.
    pub dispatched: usize,
}

/// Spacing strategy between consecutive remote calls.
///
/// Seam for tests: production uses [`DelayPacer`], tests substitute a
/// counting pacer to assert pause placement without real sleeps.
pub trait Pacer {
    /// Blocks for one inter-call gap.
    fn pause(&mut self);
}

/// Wall-clock pacer sleeping a fixed delay between calls.
#[derive(Debug, Clone)]
pub struct DelayPacer {
    delay: Duration,
}

impl DelayPacer {
    /// Creates a pacer with the given inter-call delay.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for DelayPacer {
    fn default() -> Self {
        Self::new(DEFAULT_CALL_DELAY)
    }
}

impl Pacer for DelayPacer {
    fn pause(&mut self) {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
    }
}

/// Executes one [`OperationPlan`] against a remote collaborator.
///
/// The executor owns the in-run bookkeeping: call counting for pacing and the
/// pending-to-real id substitution that rewrites not-yet-dispatched Move
/// operations after each Create succeeds.
pub struct PlanExecutor<'a> {
    remote: &'a mut dyn RemoteCollaborator,
    pacer: &'a mut dyn Pacer,
    dispatched: usize,
}

impl<'a> PlanExecutor<'a> {
    /// Creates an executor over the given collaborator and pacer.
    pub fn new(remote: &'a mut dyn RemoteCollaborator, pacer: &'a mut dyn Pacer) -> Self {
        Self {
            remote,
            pacer,
            dispatched: 0,
        }
    }

    /// Runs the plan to completion or to its first failure.
    ///
    /// Phases run strictly in order: creates, updates, moves, disables. After
    /// each successful create, the returned id replaces the corresponding
    /// pending placeholder in every remaining Move operation, so moves always
    /// reach the wire with real ids.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError`] carrying the failed phase and the first
    /// remote error. Calls already dispatched are not undone.
    pub fn execute(mut self, plan: OperationPlan) -> Result<ExecutionReport, ExecutionError> {
        let _span = tracing::debug_span!("execute_plan", calls = plan.len()).entered();

        let mut plan = plan;
        let mut created: Vec<(u64, String)> = Vec::new();

        let creates = std::mem::take(&mut plan.creates);
        for op in creates {
            self.pace();
            tracing::debug!(pending = op.pending, name = %op.name, "dispatching create");
            let id = self
                .remote
                .create(&op.name, op.color)
                .map_err(fail(Phase::Create))?;
            substitute_pending(&mut plan.moves, op.pending, &id);
            created.push((op.pending, id));
        }

        for op in &plan.updates {
            self.pace();
            tracing::debug!(id = %op.id, "dispatching update");
            self.remote
                .update(&op.id, op.name.as_deref(), op.color)
                .map_err(fail(Phase::Update))?;
        }

        for op in &plan.moves {
            self.pace();
            let id = resolved(&op.id).map_err(fail(Phase::Move))?;
            let position = match &op.anchor {
                MoveAnchor::Before(anchor) => {
                    InsertPosition::Before(resolved(anchor).map_err(fail(Phase::Move))?)
                }
                MoveAnchor::After(anchor) => {
                    InsertPosition::After(resolved(anchor).map_err(fail(Phase::Move))?)
                }
            };
            tracing::debug!(id = %id, "dispatching move");
            self.remote
                .insert_relative(&id, position)
                .map_err(fail(Phase::Move))?;
        }

        for op in &plan.disables {
            self.pace();
            tracing::debug!(id = %op.id, "dispatching disable");
            self.remote.disable(&op.id).map_err(fail(Phase::Disable))?;
        }

        tracing::debug!(dispatched = self.dispatched, "plan executed");

        Ok(ExecutionReport {
            created,
            dispatched: self.dispatched,
        })
    }

    fn pace(&mut self) {
        if self.dispatched > 0 {
            self.pacer.pause();
        }
        self.dispatched += 1;
    }
}

fn fail(phase: Phase) -> impl Fn(OptioneerError) -> ExecutionError {
    move |source| ExecutionError { phase, source }
}

/// Extracts the remote id, rejecting placeholders that survived to dispatch.
fn resolved(id: &OptionId) -> Result<String, OptioneerError> {
    id.as_remote().map(str::to_owned).ok_or_else(|| {
        OptioneerError::PlanIntegrity(format!("unresolved pending id {id} at dispatch time"))
    })
}

/// Rewrites every occurrence of a pending placeholder, as moved id or as
/// anchor, to the real id its Create call returned.
fn substitute_pending(moves: &mut [crate::sync::plan::MoveOp], pending: u64, real: &str) {
    let target = OptionId::Pending(pending);
    let replacement = OptionId::Remote(real.to_owned());

    for mv in moves {
        if mv.id == target {
            mv.id = replacement.clone();
        }
        let anchor_id = match &mut mv.anchor {
            MoveAnchor::Before(id) | MoveAnchor::After(id) => id,
        };
        if *anchor_id == target {
            *anchor_id = replacement.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Color, EnumOption, Result as DomainResult};
    use crate::sync::plan::{CreateOp, DisableOp, MoveOp, UpdateOp};

    /// Records every call as a string; optionally fails on a verb.
    struct ScriptedRemote {
        calls: Vec<String>,
        fail_on: Option<&'static str>,
        next_id: u64,
    }

    impl ScriptedRemote {
        fn new() -> Self {
            Self {
                calls: Vec::new(),
                fail_on: None,
                next_id: 100,
            }
        }

        fn failing_on(verb: &'static str) -> Self {
            Self {
                fail_on: Some(verb),
                ..Self::new()
            }
        }

        fn check(&self, verb: &str) -> DomainResult<()> {
            if self.fail_on == Some(verb) {
                return Err(OptioneerError::Remote(format!("{verb} rejected")));
            }
            Ok(())
        }
    }

    impl RemoteCollaborator for ScriptedRemote {
        fn list(&mut self) -> DomainResult<Vec<EnumOption>> {
            self.calls.push("list".into());
            Ok(Vec::new())
        }

        fn create(&mut self, name: &str, _color: Color) -> DomainResult<String> {
            self.check("create")?;
            let id = format!("real-{}", self.next_id);
            self.next_id += 1;
            self.calls.push(format!("create {name} -> {id}"));
            Ok(id)
        }

        fn update(&mut self, id: &str, _name: Option<&str>, _color: Option<Color>) -> DomainResult<()> {
            self.check("update")?;
            self.calls.push(format!("update {id}"));
            Ok(())
        }

        fn insert_relative(&mut self, id: &str, position: InsertPosition) -> DomainResult<()> {
            self.check("move")?;
            let pos = match position {
                InsertPosition::Before(a) => format!("before {a}"),
                InsertPosition::After(a) => format!("after {a}"),
            };
            self.calls.push(format!("move {id} {pos}"));
            Ok(())
        }

        fn disable(&mut self, id: &str) -> DomainResult<()> {
            self.check("disable")?;
            self.calls.push(format!("disable {id}"));
            Ok(())
        }
    }

    struct CountingPacer {
        pauses: usize,
    }

    impl Pacer for CountingPacer {
        fn pause(&mut self) {
            self.pauses += 1;
        }
    }

    fn plan_with(
        creates: Vec<CreateOp>,
        updates: Vec<UpdateOp>,
        moves: Vec<MoveOp>,
        disables: Vec<DisableOp>,
    ) -> OperationPlan {
        OperationPlan {
            creates,
            updates,
            moves,
            disables,
        }
    }

    #[test]
    fn pauses_once_between_each_pair_of_calls() {
        let mut remote = ScriptedRemote::new();
        let mut pacer = CountingPacer { pauses: 0 };
        let plan = plan_with(
            vec![CreateOp {
                pending: 1,
                name: "X".into(),
                color: Color::None,
            }],
            vec![UpdateOp {
                id: "a".into(),
                name: Some("A2".into()),
                color: None,
            }],
            vec![],
            vec![DisableOp { id: "b".into() }],
        );

        let report = PlanExecutor::new(&mut remote, &mut pacer)
            .execute(plan)
            .unwrap();

        assert_eq!(report.dispatched, 3);
        assert_eq!(pacer.pauses, 2, "n calls need n-1 pauses");
    }

    #[test]
    fn empty_plan_dispatches_nothing() {
        let mut remote = ScriptedRemote::new();
        let mut pacer = CountingPacer { pauses: 0 };

        let report = PlanExecutor::new(&mut remote, &mut pacer)
            .execute(OperationPlan::default())
            .unwrap();

        assert_eq!(report.dispatched, 0);
        assert_eq!(pacer.pauses, 0);
        assert!(remote.calls.is_empty());
    }

    #[test]
    fn created_ids_replace_pending_placeholders_in_moves() {
        let mut remote = ScriptedRemote::new();
        let mut pacer = CountingPacer { pauses: 0 };
        let plan = plan_with(
            vec![CreateOp {
                pending: 7,
                name: "NewX".into(),
                color: Color::Blue,
            }],
            vec![],
            vec![MoveOp {
                id: OptionId::Pending(7),
                anchor: MoveAnchor::After(OptionId::Remote("a".into())),
            }],
            vec![],
        );

        let report = PlanExecutor::new(&mut remote, &mut pacer)
            .execute(plan)
            .unwrap();

        assert_eq!(report.created, vec![(7, "real-100".to_string())]);
        assert_eq!(
            remote.calls,
            vec!["create NewX -> real-100", "move real-100 after a"]
        );
    }

    #[test]
    fn pending_anchor_is_substituted_too() {
        let mut remote = ScriptedRemote::new();
        let mut pacer = CountingPacer { pauses: 0 };
        let plan = plan_with(
            vec![CreateOp {
                pending: 3,
                name: "NewX".into(),
                color: Color::None,
            }],
            vec![],
            vec![MoveOp {
                id: OptionId::Remote("b".into()),
                anchor: MoveAnchor::Before(OptionId::Pending(3)),
            }],
            vec![],
        );

        PlanExecutor::new(&mut remote, &mut pacer)
            .execute(plan)
            .unwrap();

        assert_eq!(remote.calls[1], "move b before real-100");
    }

    #[test]
    fn first_failure_aborts_and_names_the_phase() {
        let mut remote = ScriptedRemote::failing_on("update");
        let mut pacer = CountingPacer { pauses: 0 };
        let plan = plan_with(
            vec![],
            vec![UpdateOp {
                id: "a".into(),
                name: Some("A2".into()),
                color: None,
            }],
            vec![MoveOp {
                id: OptionId::Remote("b".into()),
                anchor: MoveAnchor::After(OptionId::Remote("a".into())),
            }],
            vec![DisableOp { id: "c".into() }],
        );

        let err = PlanExecutor::new(&mut remote, &mut pacer)
            .execute(plan)
            .unwrap_err();

        assert_eq!(err.phase, Phase::Update);
        assert!(
            remote.calls.is_empty(),
            "nothing after the failed call may dispatch: {:?}",
            remote.calls
        );
    }

    #[test]
    fn unresolved_pending_move_is_a_plan_integrity_error() {
        let mut remote = ScriptedRemote::new();
        let mut pacer = CountingPacer { pauses: 0 };
        // A pending move with no matching create cannot be dispatched.
        let plan = plan_with(
            vec![],
            vec![],
            vec![MoveOp {
                id: OptionId::Pending(42),
                anchor: MoveAnchor::After(OptionId::Remote("a".into())),
            }],
            vec![],
        );

        let err = PlanExecutor::new(&mut remote, &mut pacer)
            .execute(plan)
            .unwrap_err();

        assert_eq!(err.phase, Phase::Move);
        assert!(matches!(err.source, OptioneerError::PlanIntegrity(_)));
    }
}
