//! Diff planning: comparing the working copy against the snapshot.
//!
//! [`compute_plan`] turns a `(Snapshot, WorkingCopy)` pair into a phased
//! [`OperationPlan`]. The remote collaborator only offers per-item create,
//! field update, relative-position insert, and soft-disable — no absolute
//! move and no batch call — so reordering is expressed as a sequence of
//! relative inserts computed against a live simulation of the remote order.
//!
//! # Move computation
//!
//! The simulation starts as the snapshot order with created entries appended
//! (modeling "once creates land, before any move runs"). The walk visits the
//! working copy's target order; whenever an entry's desired predecessor
//! differs from its predecessor in the simulation, a move is emitted and
//! applied to the simulation immediately. Committing each move before
//! continuing is what makes a single pass sufficient: every later comparison
//! already sees the effect of every earlier move, so no emitted move is
//! redundant and no second pass is needed.

use crate::domain::{EnumOption, OptioneerError, OptionId, Result};
use crate::sync::plan::{CreateOp, DisableOp, MoveAnchor, MoveOp, OperationPlan, UpdateOp};
use std::collections::{HashMap, HashSet};

/// Validates the working copy's enabled names.
///
/// Every enabled option must have a non-empty name, and names must be unique
/// among enabled options. Disabled options are exempt: they are on their way
/// out and never conflict.
///
/// # Errors
///
/// Returns [`OptioneerError::Validation`] naming the offending entry.
pub fn validate_names(options: &[EnumOption]) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::new();

    for opt in options.iter().filter(|o| o.enabled) {
        if opt.name.trim().is_empty() {
            return Err(OptioneerError::Validation(format!(
                "option {} has an empty name",
                opt.id
            )));
        }
        if !seen.insert(opt.name.as_str()) {
            return Err(OptioneerError::Validation(format!(
                "duplicate option name \"{}\"",
                opt.name
            )));
        }
    }

    Ok(())
}

/// Computes the phased operation plan transforming `snapshot` into `working`.
///
/// Phases are emitted in execution order: creates, then field updates, then
/// relative-position moves, then disables. Running disables last keeps them
/// from perturbing anchor computations for not-yet-processed moves.
///
/// The result is deterministic for a given input pair. The move count is
/// bounded by the number of entries whose relative predecessor changed; it is
/// not claimed to be the global minimum across all valid reorderings.
///
/// An option added locally and disabled before ever being saved has no remote
/// counterpart and never will; it is skipped entirely.
///
/// # Errors
///
/// Returns [`OptioneerError::Validation`] if the working copy fails
/// [`validate_names`]; no plan is produced and no remote call may be issued.
///
/// # Examples
///
/// ```
/// use optioneer::domain::{Color, EnumOption};
/// use optioneer::sync::compute_plan;
///
/// let snapshot = vec![EnumOption::remote("a", "Alpha", Color::None)];
/// let plan = compute_plan(&snapshot, &snapshot).unwrap();
/// assert!(plan.is_empty());
/// ```
pub fn compute_plan(snapshot: &[EnumOption], working: &[EnumOption]) -> Result<OperationPlan> {
    let _span = tracing::debug_span!(
        "compute_plan",
        snapshot_len = snapshot.len(),
        working_len = working.len()
    )
    .entered();

    validate_names(working)?;

    let snapshot_by_id: HashMap<&str, &EnumOption> = snapshot
        .iter()
        .filter_map(|opt| opt.id.as_remote().map(|id| (id, opt)))
        .collect();

    let mut plan = OperationPlan::default();

    // Created = pending id. A pending entry already disabled is skipped: it
    // never existed remotely, so creating it would waste a rate-limited call.
    for opt in working {
        if let OptionId::Pending(seq) = opt.id {
            if opt.enabled {
                plan.creates.push(CreateOp {
                    pending: seq,
                    name: opt.name.clone(),
                    color: opt.color,
                });
            }
        }
    }

    for opt in working {
        let Some(remote_id) = opt.id.as_remote() else {
            continue;
        };
        let Some(original) = snapshot_by_id.get(remote_id) else {
            tracing::debug!(id = %opt.id, "working entry has no snapshot counterpart, skipping");
            continue;
        };

        let name = (opt.name != original.name).then(|| opt.name.clone());
        let color = (opt.color != original.color).then_some(opt.color);
        if name.is_some() || color.is_some() {
            plan.updates.push(UpdateOp {
                id: remote_id.to_string(),
                name,
                color,
            });
        }
    }

    compute_moves(snapshot, working, &snapshot_by_id, &mut plan);

    for opt in working {
        if let Some(remote_id) = opt.id.as_remote() {
            if let Some(original) = snapshot_by_id.get(remote_id) {
                if original.enabled && !opt.enabled {
                    plan.disables.push(DisableOp {
                        id: remote_id.to_string(),
                    });
                }
            }
        }
    }

    tracing::debug!(
        creates = plan.creates.len(),
        updates = plan.updates.len(),
        moves = plan.moves.len(),
        disables = plan.disables.len(),
        "plan computed"
    );

    Ok(plan)
}

/// Walks the target order against a live simulation and appends the required
/// moves to `plan`.
fn compute_moves(
    snapshot: &[EnumOption],
    working: &[EnumOption],
    snapshot_by_id: &HashMap<&str, &EnumOption>,
    plan: &mut OperationPlan,
) {
    // Snapshot order first, then creates in their working-copy relative order.
    let mut simulated: Vec<OptionId> = snapshot.iter().map(|opt| opt.id.clone()).collect();
    simulated.extend(plan.creates.iter().map(|c| OptionId::Pending(c.pending)));

    let created: HashSet<u64> = plan.creates.iter().map(|c| c.pending).collect();

    // Entries that exist in the simulation: snapshot members plus creates.
    // Pending-and-disabled entries and unknown remote ids are invisible here.
    let target: Vec<&OptionId> = working
        .iter()
        .filter(|opt| match &opt.id {
            OptionId::Remote(id) => snapshot_by_id.contains_key(id.as_str()),
            OptionId::Pending(seq) => created.contains(seq),
        })
        .map(|opt| &opt.id)
        .collect();

    let mut desired_prev: Option<OptionId> = None;
    for id in target {
        // Target entries are in the simulation by construction.
        let Some(current_index) = simulated.iter().position(|sim| sim == id) else {
            continue;
        };
        let current_prev = (current_index > 0).then(|| simulated[current_index - 1].clone());

        if desired_prev != current_prev {
            let anchor = match &desired_prev {
                None => MoveAnchor::Before(simulated[0].clone()),
                Some(prev) => MoveAnchor::After(prev.clone()),
            };
            plan.moves.push(MoveOp {
                id: id.clone(),
                anchor,
            });

            // Commit to the live simulation before continuing the walk. The
            // desired predecessor was itself walked already, so it is present.
            simulated.remove(current_index);
            match &desired_prev {
                None => simulated.insert(0, id.clone()),
                Some(prev) => {
                    let insert_at = simulated
                        .iter()
                        .position(|sim| sim == prev)
                        .map_or(simulated.len(), |i| i + 1);
                    simulated.insert(insert_at, id.clone());
                }
            }
        }

        desired_prev = Some(id.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Color;

    fn remote(id: &str, name: &str) -> EnumOption {
        EnumOption::remote(id, name, Color::None)
    }

    fn ids(moves: &[MoveOp]) -> Vec<String> {
        moves.iter().map(|m| m.id.to_string()).collect()
    }

    #[test]
    fn identical_inputs_yield_an_empty_plan() {
        let snapshot = vec![remote("a", "Alpha"), remote("b", "Beta"), remote("c", "Gamma")];
        let plan = compute_plan(&snapshot, &snapshot).unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.len(), 0);
    }

    #[test]
    fn rotating_the_head_to_front_is_a_single_move_before() {
        let snapshot = vec![remote("a", "A"), remote("b", "B"), remote("c", "C")];
        let working = vec![remote("c", "C"), remote("a", "A"), remote("b", "B")];

        let plan = compute_plan(&snapshot, &working).unwrap();

        assert!(plan.creates.is_empty());
        assert!(plan.updates.is_empty());
        assert!(plan.disables.is_empty());
        assert_eq!(plan.moves.len(), 1);
        assert_eq!(plan.moves[0].id, OptionId::Remote("c".into()));
        assert_eq!(
            plan.moves[0].anchor,
            MoveAnchor::Before(OptionId::Remote("a".into()))
        );
    }

    #[test]
    fn appended_pending_entry_creates_without_moving() {
        let snapshot = vec![remote("a", "A"), remote("b", "B")];
        let mut working = snapshot.clone();
        working.push(EnumOption::pending(1, "NewX", Color::Blue));

        let plan = compute_plan(&snapshot, &working).unwrap();

        assert_eq!(plan.creates.len(), 1);
        assert_eq!(plan.creates[0].pending, 1);
        assert_eq!(plan.creates[0].name, "NewX");
        assert!(plan.moves.is_empty(), "new tail entry needs no move: {:?}", plan.moves);
        assert!(plan.updates.is_empty());
        assert!(plan.disables.is_empty());
    }

    #[test]
    fn pending_entry_inserted_mid_list_is_created_then_moved() {
        let snapshot = vec![remote("a", "A"), remote("b", "B")];
        let working = vec![
            remote("a", "A"),
            EnumOption::pending(1, "NewX", Color::None),
            remote("b", "B"),
        ];

        let plan = compute_plan(&snapshot, &working).unwrap();

        assert_eq!(plan.creates.len(), 1);
        assert_eq!(ids(&plan.moves), vec!["pending-1"]);
        assert_eq!(
            plan.moves[0].anchor,
            MoveAnchor::After(OptionId::Remote("a".into()))
        );
    }

    #[test]
    fn update_carries_only_the_changed_fields() {
        let snapshot = vec![
            EnumOption::remote("a", "Alpha", Color::Red),
            EnumOption::remote("b", "Beta", Color::Blue),
        ];
        let working = vec![
            EnumOption::remote("a", "Alpha Prime", Color::Red),
            EnumOption::remote("b", "Beta", Color::Green),
        ];

        let plan = compute_plan(&snapshot, &working).unwrap();

        assert_eq!(plan.updates.len(), 2);
        assert_eq!(plan.updates[0].name.as_deref(), Some("Alpha Prime"));
        assert_eq!(plan.updates[0].color, None);
        assert_eq!(plan.updates[1].name, None);
        assert_eq!(plan.updates[1].color, Some(Color::Green));
        assert!(plan.moves.is_empty());
    }

    #[test]
    fn disable_is_emitted_for_soft_deleted_existing_entries() {
        let snapshot = vec![remote("a", "A"), remote("b", "B")];
        let mut working = snapshot.clone();
        working[1].enabled = false;

        let plan = compute_plan(&snapshot, &working).unwrap();

        assert_eq!(plan.disables.len(), 1);
        assert_eq!(plan.disables[0].id, "b");
        assert!(plan.creates.is_empty());
        assert!(plan.updates.is_empty());
        assert!(plan.moves.is_empty());
    }

    #[test]
    fn pending_then_disabled_entry_is_skipped_entirely() {
        let snapshot = vec![remote("a", "A")];
        let mut working = snapshot.clone();
        let mut ghost = EnumOption::pending(9, "Ghost", Color::None);
        ghost.enabled = false;
        working.push(ghost);

        let plan = compute_plan(&snapshot, &working).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn duplicate_enabled_names_block_planning() {
        let snapshot = vec![remote("a", "Red"), remote("b", "Blue")];
        let working = vec![remote("a", "Red"), remote("b", "Red")];

        let err = compute_plan(&snapshot, &working).unwrap_err();
        assert!(matches!(err, OptioneerError::Validation(_)), "{err}");
    }

    #[test]
    fn duplicate_names_are_tolerated_when_one_side_is_disabled() {
        let snapshot = vec![remote("a", "Red"), remote("b", "Blue")];
        let mut working = vec![remote("a", "Red"), remote("b", "Red")];
        working[1].enabled = false;

        let plan = compute_plan(&snapshot, &working).unwrap();
        assert_eq!(plan.disables.len(), 1);
    }

    #[test]
    fn empty_enabled_name_blocks_planning() {
        let snapshot = vec![remote("a", "A")];
        let working = vec![remote("a", "   ")];

        let err = compute_plan(&snapshot, &working).unwrap_err();
        assert!(matches!(err, OptioneerError::Validation(_)));
    }

    #[test]
    fn move_count_is_bounded_by_changed_predecessors() {
        let snapshot = vec![
            remote("a", "A"),
            remote("b", "B"),
            remote("c", "C"),
            remote("d", "D"),
            remote("e", "E"),
        ];
        // Swap b and c: three entries change their immediate predecessor
        // (c, b, d), so the plan must hold at most three moves.
        let working = vec![
            remote("a", "A"),
            remote("c", "C"),
            remote("b", "B"),
            remote("d", "D"),
            remote("e", "E"),
        ];

        let plan = compute_plan(&snapshot, &working).unwrap();
        assert!(plan.moves.len() <= 3, "moves: {:?}", ids(&plan.moves));
        assert!(plan.creates.is_empty());
        assert!(plan.updates.is_empty());
        assert!(plan.disables.is_empty());
    }

    #[test]
    fn full_reversal_converges_in_one_pass() {
        let snapshot: Vec<EnumOption> = (0..6)
            .map(|i| remote(&format!("id{i}"), &format!("N{i}")))
            .collect();
        let working: Vec<EnumOption> = snapshot.iter().rev().cloned().collect();

        let plan = compute_plan(&snapshot, &working).unwrap();

        // Replay the moves against the snapshot order and confirm the walk's
        // simulation semantics realize the target order.
        let mut order: Vec<OptionId> = snapshot.iter().map(|o| o.id.clone()).collect();
        for mv in &plan.moves {
            let from = order.iter().position(|id| *id == mv.id).unwrap();
            order.remove(from);
            match &mv.anchor {
                MoveAnchor::Before(anchor) => {
                    let to = order.iter().position(|id| id == anchor).unwrap();
                    order.insert(to, mv.id.clone());
                }
                MoveAnchor::After(anchor) => {
                    let to = order.iter().position(|id| id == anchor).unwrap();
                    order.insert(to + 1, mv.id.clone());
                }
            }
        }
        let target: Vec<OptionId> = working.iter().map(|o| o.id.clone()).collect();
        assert_eq!(order, target);
    }
}
