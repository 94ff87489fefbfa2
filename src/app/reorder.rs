//! Reordering operations over the working copy.
//!
//! Four gestures mutate row order: drag-and-drop, keyboard step moves,
//! boundary moves, and name sort. Each flushes staged name edits first (a
//! pending rename must survive the reorder) and remaps the selection to the
//! moved rows' new indices afterwards, which also resets keyboard-extension
//! state.

use crate::app::state::EditorState;
use crate::app::{Direction, Edge};
use crate::domain::{EnumOption, OptionId};
use std::collections::HashSet;

/// Which half of a drop-target row the pointer released over.
///
/// Computed by the rendering surface from pointer geometry against the row's
/// vertical midpoint; the engine itself never sees coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DropHalf {
    /// Upper half: the moved rows land before the target.
    Above,
    /// Lower half: the moved rows land after the target.
    Below,
}

impl EditorState {
    /// Rows a drag starting on `index` carries: the whole selection when the
    /// dragged row is selected, otherwise just that row.
    #[must_use]
    pub fn drag_set(&self, index: usize) -> Vec<usize> {
        if self.selection.is_selected(index) {
            self.selection.indices()
        } else {
            vec![index]
        }
    }

    /// Relocates the dragged set before or after the drop-target row.
    ///
    /// Dropping onto a row that is itself being moved is a no-op, as is any
    /// out-of-range index.
    pub fn drag_move(&mut self, dragged: usize, target: usize, half: DropHalf) {
        self.flush_staged_edits();
        if dragged >= self.working.len() || target >= self.working.len() {
            return;
        }

        let moving = self.drag_set(dragged);
        if moving.contains(&target) {
            return;
        }
        let target_id = self.working[target].id.clone();

        let moving_set: HashSet<usize> = moving.iter().copied().collect();
        let mut moved: Vec<EnumOption> = Vec::with_capacity(moving.len());
        let mut remaining: Vec<EnumOption> = Vec::with_capacity(self.working.len());
        for (index, opt) in self.working.drain(..).enumerate() {
            if moving_set.contains(&index) {
                moved.push(opt);
            } else {
                remaining.push(opt);
            }
        }

        // The target is not in the moving set, so it is in `remaining`.
        let Some(anchor) = remaining.iter().position(|opt| opt.id == target_id) else {
            self.working = remaining;
            return;
        };
        let insert_at = match half {
            DropHalf::Above => anchor,
            DropHalf::Below => anchor + 1,
        };

        let moved_len = moved.len();
        remaining.splice(insert_at..insert_at, moved);
        self.working = remaining;
        self.selection.replace(insert_at..insert_at + moved_len);

        tracing::debug!(rows = moved_len, insert_at, "drag move");
    }

    /// Moves the selection one slot in `direction`.
    ///
    /// Each selected row swaps with its nearest non-selected neighbor. The
    /// pass runs top-to-bottom for up and bottom-to-top for down so a moving
    /// row never swaps against another moving row mid-pass; rows already
    /// packed against the list end stay put.
    pub fn step_move(&mut self, direction: Direction) {
        self.flush_staged_edits();
        if self.selection.is_empty() {
            return;
        }

        let len = self.working.len();
        let mut flags = vec![false; len];
        for index in self.selection.indices() {
            flags[index] = true;
        }

        match direction {
            Direction::Up => {
                for i in 1..len {
                    if flags[i] && !flags[i - 1] {
                        self.working.swap(i, i - 1);
                        flags.swap(i, i - 1);
                    }
                }
            }
            Direction::Down => {
                for i in (0..len.saturating_sub(1)).rev() {
                    if flags[i] && !flags[i + 1] {
                        self.working.swap(i, i + 1);
                        flags.swap(i, i + 1);
                    }
                }
            }
        }

        let remapped = flags
            .iter()
            .enumerate()
            .filter(|(_, &on)| on)
            .map(|(i, _)| i);
        self.selection.replace(remapped);
    }

    /// Moves the selection en bloc to the top or bottom of the list.
    ///
    /// Relative order is preserved on both sides of the partition.
    pub fn boundary_move(&mut self, edge: Edge) {
        self.flush_staged_edits();
        if self.selection.is_empty() {
            return;
        }

        let flags: HashSet<usize> = self.selection.indices().into_iter().collect();
        let mut chosen: Vec<EnumOption> = Vec::with_capacity(flags.len());
        let mut rest: Vec<EnumOption> = Vec::with_capacity(self.working.len() - flags.len());
        for (index, opt) in self.working.drain(..).enumerate() {
            if flags.contains(&index) {
                chosen.push(opt);
            } else {
                rest.push(opt);
            }
        }

        let count = chosen.len();
        let (working, range) = match edge {
            Edge::Top => {
                chosen.extend(rest);
                (chosen, 0..count)
            }
            Edge::Bottom => {
                let start = rest.len();
                rest.extend(chosen);
                (rest, start..start + count)
            }
        };
        self.working = working;
        self.selection.replace(range);
    }

    /// Sorts rows ascending by name, case-insensitively.
    ///
    /// With a partial selection, only the selected rows are sorted among
    /// themselves and written back into their original slots; unselected
    /// rows keep theirs. With no or full selection the whole list is sorted.
    /// The selection survives the sort, re-resolved by id.
    pub fn sort_by_name(&mut self) {
        self.flush_staged_edits();

        let selected_ids: HashSet<OptionId> = self
            .selection
            .indices()
            .into_iter()
            .filter_map(|i| self.working.get(i).map(|opt| opt.id.clone()))
            .collect();

        let count = selected_ids.len();
        if count > 0 && count < self.working.len() {
            let slots = self.selection.indices();
            let mut chosen: Vec<EnumOption> =
                slots.iter().map(|&i| self.working[i].clone()).collect();
            chosen.sort_by(compare_names);
            for (slot, opt) in slots.into_iter().zip(chosen) {
                self.working[slot] = opt;
            }
        } else {
            self.working.sort_by(compare_names);
        }

        let remapped: Vec<usize> = self
            .working
            .iter()
            .enumerate()
            .filter(|(_, opt)| selected_ids.contains(&opt.id))
            .map(|(i, _)| i)
            .collect();
        self.selection.replace(remapped);
    }
}

fn compare_names(a: &EnumOption, b: &EnumOption) -> std::cmp::Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Color;

    fn state_with(names: &[&str]) -> EditorState {
        EditorState::from_snapshot(
            names
                .iter()
                .enumerate()
                .map(|(i, name)| EnumOption::remote(format!("id{i}"), *name, Color::None))
                .collect(),
        )
    }

    fn names(state: &EditorState) -> Vec<&str> {
        state.working.iter().map(|o| o.name.as_str()).collect()
    }

    #[test]
    fn drag_single_row_above_a_target() {
        let mut state = state_with(&["A", "B", "C", "D"]);
        state.drag_move(3, 1, DropHalf::Above);
        assert_eq!(names(&state), vec!["A", "D", "B", "C"]);
        assert_eq!(state.selection.indices(), vec![1]);
    }

    #[test]
    fn drag_single_row_below_a_target() {
        let mut state = state_with(&["A", "B", "C", "D"]);
        state.drag_move(0, 2, DropHalf::Below);
        assert_eq!(names(&state), vec!["B", "C", "A", "D"]);
    }

    #[test]
    fn dragging_a_selected_row_carries_the_whole_selection() {
        let mut state = state_with(&["A", "B", "C", "D", "E"]);
        state.selection.toggle_single(0);
        state.selection.toggle_single(2);

        state.drag_move(2, 4, DropHalf::Below);

        assert_eq!(names(&state), vec!["B", "D", "E", "A", "C"]);
        assert_eq!(state.selection.indices(), vec![3, 4]);
    }

    #[test]
    fn dropping_onto_a_moving_row_is_a_no_op() {
        let mut state = state_with(&["A", "B", "C"]);
        state.selection.toggle_single(0);
        state.selection.toggle_single(1);
        state.drag_move(0, 1, DropHalf::Below);
        assert_eq!(names(&state), vec!["A", "B", "C"]);
    }

    #[test]
    fn drag_flushes_staged_edits_first() {
        let mut state = state_with(&["A", "B", "C"]);
        state.stage_name(2, "Gamma");
        state.drag_move(2, 0, DropHalf::Above);
        assert_eq!(names(&state), vec!["Gamma", "A", "B"]);
    }

    #[test]
    fn step_up_swaps_against_the_nearest_unselected_neighbor() {
        let mut state = state_with(&["A", "B", "C", "D"]);
        state.selection.toggle_single(1);
        state.selection.toggle_single(3);

        state.step_move(Direction::Up);

        assert_eq!(names(&state), vec!["B", "A", "D", "C"]);
        assert_eq!(state.selection.indices(), vec![0, 2]);
    }

    #[test]
    fn step_down_processes_bottom_to_top() {
        let mut state = state_with(&["A", "B", "C", "D"]);
        state.selection.toggle_single(0);
        state.selection.toggle_single(1);

        state.step_move(Direction::Down);

        // Adjacent moving rows must not swap against each other.
        assert_eq!(names(&state), vec!["C", "A", "B", "D"]);
        assert_eq!(state.selection.indices(), vec![1, 2]);
    }

    #[test]
    fn step_blocks_at_the_list_end() {
        let mut state = state_with(&["A", "B", "C"]);
        state.selection.toggle_single(0);
        state.selection.toggle_single(1);
        state.step_move(Direction::Up);
        assert_eq!(names(&state), vec!["A", "B", "C"]);
    }

    #[test]
    fn boundary_move_packs_the_selection_at_an_end() {
        let mut state = state_with(&["A", "B", "C", "D", "E"]);
        state.selection.toggle_single(1);
        state.selection.toggle_single(3);

        state.boundary_move(Edge::Bottom);
        assert_eq!(names(&state), vec!["A", "C", "E", "B", "D"]);
        assert_eq!(state.selection.indices(), vec![3, 4]);

        state.boundary_move(Edge::Top);
        assert_eq!(names(&state), vec!["B", "D", "A", "C", "E"]);
        assert_eq!(state.selection.indices(), vec![0, 1]);
    }

    #[test]
    fn full_sort_is_case_insensitive() {
        let mut state = state_with(&["banana", "Apple", "cherry", "aardvark"]);
        state.sort_by_name();
        assert_eq!(names(&state), vec!["aardvark", "Apple", "banana", "cherry"]);
    }

    #[test]
    fn partial_sort_rearranges_only_the_selected_slots() {
        let mut state = state_with(&["D", "Z", "B", "Y", "A"]);
        state.selection.toggle_single(0);
        state.selection.toggle_single(2);
        state.selection.toggle_single(4);

        state.sort_by_name();

        // Selected {D, B, A} sort into slots {0, 2, 4}; Z and Y keep theirs.
        assert_eq!(names(&state), vec!["A", "Z", "B", "Y", "D"]);
        assert_eq!(state.selection.indices(), vec![0, 2, 4]);
    }

    #[test]
    fn sort_flushes_staged_edits_first() {
        let mut state = state_with(&["B", "C", "A"]);
        state.stage_name(0, "Zed");
        state.sort_by_name();
        assert_eq!(names(&state), vec!["A", "C", "Zed"]);
    }
}
