//! The remote collaborator seam.
//!
//! [`RemoteCollaborator`] is the narrow surface the sync layer dispatches
//! against. It deliberately mirrors the remote vendor's primitives: per-item
//! create, field update, relative-position insert, and soft-disable. There is
//! no batch call and no absolute-index move, which is exactly why the planner
//! has to express reordering as a chain of relative inserts.

use crate::domain::{Color, EnumOption, Result};
use serde::{Deserialize, Serialize};

/// Relative placement for [`RemoteCollaborator::insert_relative`].
///
/// Exactly one anchor is ever supplied; the two variants are mutually
/// exclusive by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsertPosition {
    /// Place the option immediately before the named one.
    Before(String),
    /// Place the option immediately after the named one.
    After(String),
}

/// The operations the remote collaborator offers, one option per call.
///
/// Implementations are expected to apply each call atomically in arrival
/// order. The executor guarantees strictly sequential dispatch, so an
/// implementation never sees two in-flight calls at once.
pub trait RemoteCollaborator {
    /// Fetches the current option set in remote display order.
    ///
    /// Disabled options are not returned; the remote surface only reports
    /// live entries.
    fn list(&mut self) -> Result<Vec<EnumOption>>;

    /// Creates a new option appended to the end of the remote order and
    /// returns its assigned id.
    fn create(&mut self, name: &str, color: Color) -> Result<String>;

    /// Writes the supplied fields of an existing option. `None` fields are
    /// left untouched.
    fn update(&mut self, id: &str, name: Option<&str>, color: Option<Color>) -> Result<()>;

    /// Repositions an existing option relative to another.
    fn insert_relative(&mut self, id: &str, position: InsertPosition) -> Result<()>;

    /// Soft-disables an option; it stops appearing in [`Self::list`] output.
    fn disable(&mut self, id: &str) -> Result<()>;
}
