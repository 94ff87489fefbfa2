//! The remote collaborator boundary.
//!
//! Everything that crosses the network sits behind this module: the
//! [`RemoteCollaborator`] trait the executor dispatches against, the typed
//! request/response message protocol, the port that connects the two, and an
//! in-memory store for tests and simulated runs.
//!
//! # Organization
//!
//! - [`collaborator`]: The trait and relative-insert position type
//! - [`messages`]: Serializable request/response message types
//! - [`port`]: Server-side dispatcher and client-side trait adapter
//! - [`memory`]: In-memory simulated store

pub mod collaborator;
pub mod memory;
pub mod messages;
pub mod port;

pub use collaborator::{InsertPosition, RemoteCollaborator};
pub use memory::InMemoryRemote;
pub use messages::{ApiRequest, ApiResponse};
pub use port::{PortClient, RemotePort};
