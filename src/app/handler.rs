//! Event handling and state transition logic.
//!
//! This module implements the event handler that processes abstract input
//! events, translating them into editor-state changes and action sequences.
//! Events are deliberately decoupled from any rendering technology: a pointer
//! gesture arrives as a row index plus a [`DropHalf`], never as coordinates,
//! so the whole surface is testable without a display.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the hosting surface
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `EditorState` methods
//! 4. Actions are collected and returned for execution

use crate::app::actions::{Action, CountKind};
use crate::app::reorder::DropHalf;
use crate::app::state::EditorState;
use crate::app::{Direction, Edge};
use crate::domain::error::Result;
use crate::domain::{Color, ColorPattern};

/// Events triggered by user input over the editing surface.
///
/// Each event represents a discrete occurrence that may cause state changes
/// and action emissions. The handler processes these sequentially, ensuring
/// deterministic state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Toggles the row's selection flag and makes it the range anchor.
    PointerToggle {
        /// Row the pointer hit.
        index: usize,
    },
    /// Selects the span from the anchor to this row (shift-click).
    PointerRange {
        /// Row the pointer hit.
        index: usize,
    },
    /// Selects every row.
    SelectAll,
    /// Clears the selection.
    DeselectAll,
    /// Grows or shrinks the selection by one row (shift+arrow).
    ExtendSelection {
        /// Which way the range end moves.
        direction: Direction,
    },

    /// Drops the dragged set before or after a target row.
    DragDrop {
        /// Row the drag started on.
        dragged: usize,
        /// Row the pointer released over.
        target: usize,
        /// Which half of the target row was hit.
        half: DropHalf,
    },
    /// Moves the selection one slot up or down.
    StepMove {
        /// Which way the selection moves.
        direction: Direction,
    },
    /// Moves the selection to the top or bottom of the list.
    BoundaryMove {
        /// Which list end.
        edge: Edge,
    },
    /// Sorts rows by name (selected rows only, under a partial selection).
    SortByName,

    /// Records in-progress name text for a row without committing it.
    StageName {
        /// Row being edited.
        index: usize,
        /// Current input text.
        text: String,
    },
    /// Recolors a row, or the whole selection when the row is selected.
    RecolorRow {
        /// Row the gesture started on.
        index: usize,
        /// Color to apply.
        color: Color,
    },
    /// Recolors the selection, or every row when nothing is selected.
    RecolorBulk {
        /// Color to apply.
        color: Color,
    },
    /// Applies a color pattern cyclically across the bulk target rows.
    ApplyPattern {
        /// Pattern to cycle.
        pattern: ColorPattern,
    },
    /// Appends a newline-separated batch of new options.
    AddOptions {
        /// Raw batch text, one name per line.
        batch: String,
        /// Color for every added option.
        color: Color,
    },
    /// Disables a row, or the whole selection when the row is selected.
    DisableRow {
        /// Row the gesture started on.
        index: usize,
    },

    /// Selects rows whose names match the query.
    Find {
        /// Substring or regex pattern.
        query: String,
        /// Treat the query as a regular expression.
        regex: bool,
    },
    /// Finds matching rows, then rewrites the matched text in their names.
    Replace {
        /// Substring or regex pattern.
        query: String,
        /// Replacement text; `$n` capture references under `regex`.
        replacement: String,
        /// Treat the query as a regular expression.
        regex: bool,
    },

    /// Commits the working copy: validate, plan, and hand the plan off.
    Save,
}

/// Processes an event, mutates editor state, and returns actions to execute.
///
/// # Parameters
///
/// * `state` - Mutable reference to the editor state
/// * `event` - Event to process
///
/// # Returns
///
/// `(redraw, actions)`: whether the visible surface changed, plus the side
/// effects to execute in sequence.
///
/// # Errors
///
/// Returns validation errors from add/find/replace/save, and
/// [`crate::domain::OptioneerError::SaveInProgress`] when a save is already
/// outstanding. State is left consistent on every error path.
///
/// # Examples
///
/// ```
/// use optioneer::app::{handle_event, EditorState, Event};
/// use optioneer::domain::{Color, EnumOption};
///
/// let mut state = EditorState::from_snapshot(vec![
///     EnumOption::remote("a", "Todo", Color::None),
/// ]);
/// let (redraw, actions) = handle_event(&mut state, &Event::SelectAll)?;
/// assert!(redraw);
/// assert!(actions.is_empty());
/// # Ok::<(), optioneer::domain::OptioneerError>(())
/// ```
pub fn handle_event(state: &mut EditorState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::PointerToggle { index } => {
            state.selection.toggle_single(*index);
            Ok((true, vec![]))
        }
        Event::PointerRange { index } => {
            state.selection.select_range(*index);
            Ok((true, vec![]))
        }
        Event::SelectAll => {
            state.selection.select_all();
            Ok((true, vec![]))
        }
        Event::DeselectAll => {
            state.selection.deselect_all();
            Ok((true, vec![]))
        }
        Event::ExtendSelection { direction } => {
            state.selection.extend_by_one(*direction);
            Ok((true, vec![]))
        }
        Event::DragDrop {
            dragged,
            target,
            half,
        } => {
            state.drag_move(*dragged, *target, *half);
            Ok((true, vec![]))
        }
        Event::StepMove { direction } => {
            state.step_move(*direction);
            Ok((true, vec![]))
        }
        Event::BoundaryMove { edge } => {
            state.boundary_move(*edge);
            Ok((true, vec![]))
        }
        Event::SortByName => {
            state.sort_by_name();
            Ok((true, vec![]))
        }
        Event::StageName { index, text } => {
            // The input surface already shows the text; nothing to redraw.
            state.stage_name(*index, text.clone());
            Ok((false, vec![]))
        }
        Event::RecolorRow { index, color } => {
            state.recolor_row_gesture(*index, *color);
            Ok((true, vec![]))
        }
        Event::RecolorBulk { color } => {
            state.recolor_bulk(*color);
            Ok((true, vec![]))
        }
        Event::ApplyPattern { pattern } => {
            state.apply_pattern(*pattern);
            Ok((true, vec![]))
        }
        Event::AddOptions { batch, color } => {
            let count = state.add_options(batch, *color)?;
            Ok((
                true,
                vec![Action::ReportCount {
                    kind: CountKind::Added,
                    count,
                }],
            ))
        }
        Event::DisableRow { index } => {
            state.disable_row_gesture(*index);
            Ok((true, vec![]))
        }
        Event::Find { query, regex } => {
            let count = state.find(query, *regex)?;
            Ok((
                true,
                vec![Action::ReportCount {
                    kind: CountKind::Matched,
                    count,
                }],
            ))
        }
        Event::Replace {
            query,
            replacement,
            regex,
        } => {
            let count = state.replace(query, replacement, *regex)?;
            Ok((
                true,
                vec![Action::ReportCount {
                    kind: CountKind::Rewritten,
                    count,
                }],
            ))
        }
        Event::Save => {
            let plan = state.begin_save()?;
            if plan.is_empty() {
                tracing::debug!("nothing to save");
                return Ok((false, vec![]));
            }
            tracing::debug!(calls = plan.len(), "plan handed off for execution");
            Ok((false, vec![Action::ExecutePlan(plan)]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EnumOption;

    fn seeded() -> EditorState {
        EditorState::from_snapshot(vec![
            EnumOption::remote("a", "Todo", Color::None),
            EnumOption::remote("b", "Doing", Color::Blue),
            EnumOption::remote("c", "Done", Color::Green),
        ])
    }

    #[test]
    fn selection_events_redraw_without_actions() {
        let mut state = seeded();
        let (redraw, actions) =
            handle_event(&mut state, &Event::PointerToggle { index: 1 }).unwrap();
        assert!(redraw);
        assert!(actions.is_empty());
        assert!(state.selection.is_selected(1));
    }

    #[test]
    fn staging_a_name_does_not_redraw() {
        let mut state = seeded();
        let (redraw, _) = handle_event(
            &mut state,
            &Event::StageName {
                index: 0,
                text: "Icebox".into(),
            },
        )
        .unwrap();
        assert!(!redraw);
        assert_eq!(state.working[0].name, "Todo", "not yet flushed");
    }

    #[test]
    fn save_with_changes_emits_an_execute_plan_action() {
        let mut state = seeded();
        handle_event(
            &mut state,
            &Event::RecolorRow {
                index: 0,
                color: Color::Red,
            },
        )
        .unwrap();

        let (redraw, actions) = handle_event(&mut state, &Event::Save).unwrap();
        assert!(!redraw);
        assert_eq!(actions.len(), 1);
        let Action::ExecutePlan(plan) = &actions[0] else {
            panic!("expected a plan, got {actions:?}");
        };
        assert_eq!(plan.updates.len(), 1);
        assert!(state.save_in_flight);
    }

    #[test]
    fn save_without_changes_is_a_no_op() {
        let mut state = seeded();
        let (redraw, actions) = handle_event(&mut state, &Event::Save).unwrap();
        assert!(!redraw);
        assert!(actions.is_empty());
        assert!(!state.save_in_flight);
    }

    #[test]
    fn find_reports_its_match_count() {
        let mut state = seeded();
        let (_, actions) = handle_event(
            &mut state,
            &Event::Find {
                query: "do".into(),
                regex: false,
            },
        )
        .unwrap();
        assert_eq!(
            actions,
            vec![Action::ReportCount {
                kind: CountKind::Matched,
                count: 3,
            }]
        );
    }

    #[test]
    fn add_options_validation_errors_propagate() {
        let mut state = seeded();
        let err = handle_event(
            &mut state,
            &Event::AddOptions {
                batch: "Done".into(),
                color: Color::None,
            },
        )
        .unwrap_err();
        assert!(matches!(err, crate::domain::OptioneerError::Validation(_)));
    }
}
