//! The editor state container.
//!
//! [`EditorState`] owns everything one editing session needs: the snapshot
//! last confirmed from the remote collaborator, the mutable working copy, the
//! selection controller, the staged-edit buffer for in-progress renames, the
//! pending-id counter, and the save-in-flight flag. It is an explicit value
//! threaded through the handler; there are no module-level singletons.

use crate::app::selection::SelectionController;
use crate::domain::{Color, ColorPattern, EnumOption, OptioneerError, OptionId, Result};
use crate::sync::{compute_plan, ExecutionReport, OperationPlan};
use regex::RegexBuilder;
use std::collections::{BTreeMap, HashSet};

/// Interactive state of one option-set editing session.
///
/// Fields are public: the handler and reorder operations manipulate them
/// directly, and a rendering surface reads them to draw rows.
#[derive(Debug, Clone)]
pub struct EditorState {
    /// Last confirmed remote state, replaced only atomically on full save
    /// success.
    pub snapshot: Vec<EnumOption>,

    /// Locally edited, possibly divergent copy awaiting reconciliation.
    pub working: Vec<EnumOption>,

    /// Selection flags, range anchor, and keyboard-extension state.
    pub selection: SelectionController,

    /// Uncommitted per-row name text, keyed by current row index. Flushed
    /// into the working copy before any operation that reads names.
    pub staged_names: BTreeMap<usize, String>,

    /// Monotonic counter backing pending-id generation.
    pub next_pending: u64,

    /// Set while a save pipeline is outstanding; a second save is refused.
    pub save_in_flight: bool,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    /// Creates an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            snapshot: Vec::new(),
            working: Vec::new(),
            selection: SelectionController::new(0),
            staged_names: BTreeMap::new(),
            next_pending: 0,
            save_in_flight: false,
        }
    }

    /// Seeds the session from a freshly listed remote option set.
    ///
    /// Both copies start identical; selection and staged edits are reset.
    #[must_use]
    pub fn from_snapshot(options: Vec<EnumOption>) -> Self {
        let mut state = Self::new();
        state.load_snapshot(options);
        state
    }

    /// Replaces both copies with a freshly listed remote option set.
    pub fn load_snapshot(&mut self, options: Vec<EnumOption>) {
        self.snapshot = options.clone();
        self.working = options;
        self.selection = SelectionController::new(self.working.len());
        self.staged_names.clear();
    }

    /// Number of rows in the working copy.
    #[must_use]
    pub fn len(&self) -> usize {
        self.working.len()
    }

    /// Returns `true` when the working copy holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.working.is_empty()
    }

    /// Returns `true` when unsaved changes exist.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.staged_names.is_empty() || self.working != self.snapshot
    }

    /// Records in-progress name text for a row without committing it.
    pub fn stage_name(&mut self, index: usize, text: impl Into<String>) {
        if index < self.working.len() {
            self.staged_names.insert(index, text.into());
        }
    }

    /// Writes every staged name into the working copy and clears the buffer.
    ///
    /// Reorder, sort, add, and save all call this first so a pending rename
    /// is never silently discarded.
    pub fn flush_staged_edits(&mut self) {
        for (index, name) in std::mem::take(&mut self.staged_names) {
            if let Some(opt) = self.working.get_mut(index) {
                opt.name = name;
            }
        }
    }

    /// Sets one row's color directly.
    pub fn set_color(&mut self, index: usize, color: Color) {
        if let Some(opt) = self.working.get_mut(index) {
            opt.color = color;
        }
    }

    /// Allocates the next pending placeholder sequence number.
    pub fn next_pending_seq(&mut self) -> u64 {
        self.next_pending += 1;
        self.next_pending
    }

    /// Appends a newline-separated batch of new options, all with `color`.
    ///
    /// Lines are trimmed and blank lines dropped. The whole batch is rejected
    /// when a name collides with an existing enabled name or repeats within
    /// the batch; on success pending-id entries are appended in input order
    /// and the added count is returned.
    ///
    /// # Errors
    ///
    /// Returns [`OptioneerError::Validation`] naming the colliding entry.
    pub fn add_options(&mut self, batch: &str, color: Color) -> Result<usize> {
        self.flush_staged_edits();

        let names: Vec<&str> = batch
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let mut taken: HashSet<&str> = self
            .working
            .iter()
            .filter(|opt| opt.enabled)
            .map(|opt| opt.name.as_str())
            .collect();
        for name in &names {
            if !taken.insert(*name) {
                return Err(OptioneerError::Validation(format!(
                    "option name \"{name}\" already exists"
                )));
            }
        }

        for name in &names {
            let seq = self.next_pending_seq();
            self.working.push(EnumOption::pending(seq, *name, color));
        }
        self.selection.set_total(self.working.len());

        tracing::debug!(added = names.len(), "options added");
        Ok(names.len())
    }

    /// Indices a row-triggered bulk gesture acts on: the whole selection when
    /// the row is selected, otherwise just that row.
    #[must_use]
    pub fn gesture_targets(&self, index: usize) -> Vec<usize> {
        if self.selection.is_selected(index) {
            self.selection.indices()
        } else {
            vec![index]
        }
    }

    /// Indices a bulk-control operation acts on: the selection when one
    /// exists, otherwise every row.
    #[must_use]
    pub fn bulk_targets(&self) -> Vec<usize> {
        if self.selection.is_empty() {
            (0..self.working.len()).collect()
        } else {
            self.selection.indices()
        }
    }

    /// Recolors the rows a gesture on `index` resolves to.
    pub fn recolor_row_gesture(&mut self, index: usize, color: Color) {
        for target in self.gesture_targets(index) {
            self.set_color(target, color);
        }
    }

    /// Recolors the selection, or every row when nothing is selected.
    pub fn recolor_bulk(&mut self, color: Color) {
        for target in self.bulk_targets() {
            self.set_color(target, color);
        }
    }

    /// Applies a color pattern cyclically across the bulk target rows in
    /// display order.
    pub fn apply_pattern(&mut self, pattern: ColorPattern) {
        let colors = pattern.colors();
        for (offset, target) in self.bulk_targets().into_iter().enumerate() {
            self.set_color(target, colors[offset % colors.len()]);
        }
    }

    /// Disables the rows a gesture on `index` resolves to.
    ///
    /// Disabled rows stay visible (and re-plannable) until the next
    /// successful save removes them.
    pub fn disable_row_gesture(&mut self, index: usize) {
        for target in self.gesture_targets(index) {
            if let Some(opt) = self.working.get_mut(target) {
                opt.enabled = false;
            }
        }
    }

    /// Selects rows whose names match `query`.
    ///
    /// Matching is a case-insensitive substring test, or a case-insensitive
    /// regular expression when `use_regex` is set. With a pre-existing
    /// selection the result is the matching members of that selection; rows
    /// outside it stay untouched. With no selection, exactly the matching
    /// rows become selected. Returns the resulting match count.
    ///
    /// # Errors
    ///
    /// Returns [`OptioneerError::Validation`] for an invalid regex pattern.
    pub fn find(&mut self, query: &str, use_regex: bool) -> Result<usize> {
        self.flush_staged_edits();
        let matcher = build_matcher(query, use_regex)?;

        let scope: Vec<usize> = if self.selection.is_empty() {
            (0..self.working.len()).collect()
        } else {
            self.selection.indices()
        };

        let matches: Vec<usize> = scope
            .into_iter()
            .filter(|&i| matcher.is_match(&self.working[i].name))
            .collect();
        let count = matches.len();
        self.selection.replace(matches);

        tracing::debug!(query, use_regex, matched = count, "find");
        Ok(count)
    }

    /// Finds matching rows, then rewrites every occurrence of `query` in
    /// their names.
    ///
    /// Replacement is case-insensitive; with `use_regex` the replacement text
    /// may reference capture groups (`$1`), otherwise it is inserted
    /// literally. Returns the number of rows rewritten.
    ///
    /// # Errors
    ///
    /// Returns [`OptioneerError::Validation`] for an invalid regex pattern.
    pub fn replace(&mut self, query: &str, replacement: &str, use_regex: bool) -> Result<usize> {
        self.find(query, use_regex)?;
        let matcher = build_matcher(query, use_regex)?;

        let mut rewritten = 0;
        for index in self.selection.indices() {
            let Some(opt) = self.working.get_mut(index) else {
                continue;
            };
            let next = if use_regex {
                matcher.replace_all(&opt.name, replacement).into_owned()
            } else {
                matcher
                    .replace_all(&opt.name, regex::NoExpand(replacement))
                    .into_owned()
            };
            if next != opt.name {
                opt.name = next;
                rewritten += 1;
            }
        }

        tracing::debug!(query, rewritten, "replace");
        Ok(rewritten)
    }

    /// Starts a save: flushes staged edits, validates, and computes the plan.
    ///
    /// A non-empty plan marks the save as in flight; the caller must follow
    /// with [`Self::complete_save`] or [`Self::abort_save`]. An empty plan
    /// (nothing to do) leaves the state idle.
    ///
    /// # Errors
    ///
    /// Returns [`OptioneerError::SaveInProgress`] when a save is already
    /// outstanding, or [`OptioneerError::Validation`] when the working copy
    /// fails name validation.
    pub fn begin_save(&mut self) -> Result<OperationPlan> {
        let _span = tracing::debug_span!("begin_save", rows = self.working.len()).entered();

        if self.save_in_flight {
            return Err(OptioneerError::SaveInProgress);
        }
        self.flush_staged_edits();

        let plan = compute_plan(&self.snapshot, &self.working)?;
        if !plan.is_empty() {
            self.save_in_flight = true;
        }
        Ok(plan)
    }

    /// Finishes a successful save.
    ///
    /// Pending ids are rewritten to the real ids their Create calls returned,
    /// disabled rows leave the visible surface, the selection is remapped by
    /// id, and the snapshot is promoted to match the working copy.
    pub fn complete_save(&mut self, report: &ExecutionReport) {
        let _span = tracing::debug_span!("complete_save", created = report.created.len()).entered();

        for (pending, real) in &report.created {
            let target = OptionId::Pending(*pending);
            for opt in &mut self.working {
                if opt.id == target {
                    opt.id = OptionId::Remote(real.clone());
                }
            }
        }

        let selected_ids: HashSet<OptionId> = self
            .selection
            .indices()
            .into_iter()
            .filter_map(|i| self.working.get(i).map(|opt| opt.id.clone()))
            .collect();

        self.working.retain(|opt| opt.enabled);
        self.snapshot = self.working.clone();

        self.selection.set_total(self.working.len());
        let remapped: Vec<usize> = self
            .working
            .iter()
            .enumerate()
            .filter(|(_, opt)| selected_ids.contains(&opt.id))
            .map(|(i, _)| i)
            .collect();
        self.selection.replace(remapped);

        self.save_in_flight = false;
    }

    /// Abandons a failed save attempt.
    ///
    /// The working copy keeps its edits (including any effects the remote
    /// already applied); a retried save re-plans from the unchanged snapshot.
    pub fn abort_save(&mut self) {
        self.save_in_flight = false;
    }
}

/// Builds the case-insensitive matcher both find and replace share.
fn build_matcher(query: &str, use_regex: bool) -> Result<regex::Regex> {
    let pattern = if use_regex {
        query.to_owned()
    } else {
        regex::escape(query)
    };
    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .map_err(|err| OptioneerError::Validation(format!("invalid pattern \"{query}\": {err}")))
}
