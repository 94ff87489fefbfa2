//! Request and response message types for the remote port.
//!
//! This module defines the typed method-call protocol between the editor core
//! and whatever transport carries calls to the remote collaborator. Each
//! request names one remote primitive with its parameters; each response is
//! the matching result or a carried error. Messages are serde-serializable so
//! a transport may ship them as JSON.

use crate::domain::{Color, EnumOption};
use serde::{Deserialize, Serialize};

/// A single remote method call.
///
/// `InsertRelative` must carry exactly one of `before_id`/`after_id`; the
/// port rejects zero or two anchors before anything reaches the collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "kebab-case")]
pub enum ApiRequest {
    /// Fetch the current option set in remote display order.
    List,

    /// Create a new option appended to the end of the remote order.
    Create {
        /// Name for the new option.
        name: String,

        /// Palette color for the new option.
        color: Color,
    },

    /// Write the supplied fields of an existing option.
    Update {
        /// Remote id of the option to update.
        id: String,

        /// New name, when the name changed.
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,

        /// New color, when the color changed.
        #[serde(skip_serializing_if = "Option::is_none")]
        color: Option<Color>,
    },

    /// Reposition an existing option relative to another.
    InsertRelative {
        /// Remote id of the option to move.
        id: String,

        /// Anchor to insert before. Mutually exclusive with `after_id`.
        #[serde(skip_serializing_if = "Option::is_none")]
        before_id: Option<String>,

        /// Anchor to insert after. Mutually exclusive with `before_id`.
        #[serde(skip_serializing_if = "Option::is_none")]
        after_id: Option<String>,
    },

    /// Soft-disable an existing option.
    Disable {
        /// Remote id of the option to disable.
        id: String,
    },
}

/// The result of one [`ApiRequest`], or a carried error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "kebab-case")]
pub enum ApiResponse {
    /// The current option set, in remote display order.
    Listing {
        /// Live (enabled) options as the remote reports them.
        records: Vec<EnumOption>,
    },

    /// A create succeeded.
    Created {
        /// Id the remote assigned to the new option.
        id: String,
    },

    /// An update succeeded.
    Updated,

    /// A relative insert succeeded.
    Inserted,

    /// A disable succeeded.
    Disabled,

    /// The request failed.
    Error {
        /// Human-readable failure message.
        message: String,
    },
}
