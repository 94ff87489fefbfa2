//! The option entity shared by Snapshot and WorkingCopy.
//!
//! An [`EnumOption`] is a named, colored, orderable value in the set being
//! edited. Its position is implicit: the index within the containing ordered
//! sequence. Identity is an [`OptionId`], which distinguishes options the
//! remote collaborator already knows from locally added ones that are still
//! awaiting their Create call.

use crate::domain::Color;
use serde::{Deserialize, Serialize};

/// Identity of an option: remote-confirmed or locally pending.
///
/// A pending id is a placeholder assigned by the editor when the user adds an
/// option; it must be replaced by the id returned from the option's Create
/// call before any Move operation referencing it is issued. Pending ids are
/// drawn from a monotonic per-editor counter, so they are unique within a
/// session by construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionId {
    /// A stable identifier confirmed by the remote collaborator.
    Remote(String),

    /// A locally generated placeholder for a not-yet-created option.
    Pending(u64),
}

impl OptionId {
    /// Returns `true` if this id is a local placeholder awaiting creation.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// Returns the remote identifier, or `None` for a pending id.
    #[must_use]
    pub fn as_remote(&self) -> Option<&str> {
        match self {
            Self::Remote(id) => Some(id),
            Self::Pending(_) => None,
        }
    }
}

impl std::fmt::Display for OptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Remote(id) => write!(f, "{id}"),
            Self::Pending(seq) => write!(f, "pending-{seq}"),
        }
    }
}

/// A single selectable value in the option set being edited.
///
/// Options are never destroyed locally: `enabled = false` marks a soft
/// delete, and a disabled entry only leaves the visible surface after its
/// Disable call against the remote collaborator succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumOption {
    /// Identity: remote id or pending placeholder.
    pub id: OptionId,

    /// Display name. Must be non-empty and unique among enabled options.
    pub name: String,

    /// Palette color.
    pub color: Color,

    /// Soft-delete flag. `false` marks the option for disabling on the next
    /// successful save.
    pub enabled: bool,
}

impl EnumOption {
    /// Creates an option as confirmed by the remote collaborator.
    #[must_use]
    pub fn remote(id: impl Into<String>, name: impl Into<String>, color: Color) -> Self {
        Self {
            id: OptionId::Remote(id.into()),
            name: name.into(),
            color,
            enabled: true,
        }
    }

    /// Creates a locally added option with a pending placeholder id.
    #[must_use]
    pub fn pending(seq: u64, name: impl Into<String>, color: Color) -> Self {
        Self {
            id: OptionId::Pending(seq),
            name: name.into(),
            color,
            enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_ids_are_flagged() {
        let opt = EnumOption::pending(7, "Backlog", Color::None);
        assert!(opt.id.is_pending());
        assert_eq!(opt.id.as_remote(), None);
        assert!(opt.enabled);
    }

    #[test]
    fn remote_ids_expose_their_identifier() {
        let opt = EnumOption::remote("opt-1", "Done", Color::Green);
        assert!(!opt.id.is_pending());
        assert_eq!(opt.id.as_remote(), Some("opt-1"));
    }
}
