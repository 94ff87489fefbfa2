//! Optioneer: a reconciliation core for ordered, named, colored option sets.
//!
//! Optioneer lets a caller build a local working copy of an option set (the
//! selectable values of a custom field) and later synchronize it to a remote
//! store whose only mutation primitives are per-item create, field update,
//! relative-position insert, and soft-disable. There is no absolute-index
//! move and no batch API on the remote side, so the crate's job is:
//! - computing a deterministic, convergent, phased plan of remote operations
//!   that transforms the remote state into the edited target state, and
//! - executing that plan strictly one call at a time under a rate limit,
//!   fail-fast and without rollback, together with
//! - the selection/reorder state machine that produces the edited target
//!   state in the first place.
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Hosting surface (UI / session layer, out of scope) │
//! └─────────────────────────────────────────────────────┘
//!                        │ events in, actions out
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - EditorState: snapshot, working copy, selection   │
//! │  - Reorder engine, bulk edits, save lifecycle       │
//! │  - handle_event: event → state change + actions     │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Sync Layer (sync/)                                 │
//! │  - Planner: (snapshot, working) → OperationPlan     │
//! │  - Executor: paced, sequential, fail-fast dispatch  │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Remote Boundary (remote/)                          │
//! │  - RemoteCollaborator trait                         │
//! │  - Request/response port + in-memory store          │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Observability (domain/, observability/)   │
//! │  - Option model, colors, errors; tracing setup      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Editor state machine with event/action model
//! - [`domain`]: Core domain types (options, colors, errors)
//! - [`sync`]: Diff planning and rate-limited plan execution
//! - [`remote`]: The remote collaborator seam, message port, test store
//! - [`observability`]: Tracing subscriber setup
//!
//! # Examples
//!
//! Edit locally, plan, execute, converge:
//!
//! ```
//! use optioneer::app::{handle_event, Action, EditorState, Event};
//! use optioneer::domain::Color;
//! use optioneer::remote::{InMemoryRemote, RemoteCollaborator};
//! use optioneer::sync::{DelayPacer, PlanExecutor};
//!
//! let mut remote = InMemoryRemote::seeded(&[("Todo", Color::None), ("Done", Color::Green)]);
//! let mut state = EditorState::from_snapshot(remote.list()?);
//!
//! handle_event(
//!     &mut state,
//!     &Event::AddOptions { batch: "Blocked".into(), color: Color::Red },
//! )?;
//! let (_, actions) = handle_event(&mut state, &Event::Save)?;
//!
//! if let Some(Action::ExecutePlan(plan)) = actions.into_iter().next() {
//!     let mut pacer = DelayPacer::new(std::time::Duration::ZERO);
//!     match PlanExecutor::new(&mut remote, &mut pacer).execute(plan) {
//!         Ok(report) => state.complete_save(&report),
//!         Err(_) => state.abort_save(),
//!     }
//! }
//!
//! assert_eq!(state.snapshot, state.working);
//! # Ok::<(), optioneer::domain::OptioneerError>(())
//! ```

pub mod app;
pub mod domain;
pub mod observability;
pub mod remote;
pub mod sync;

pub use app::{handle_event, Action, EditorState, Event};
pub use domain::{Color, EnumOption, OptioneerError, OptionId, Result};
pub use sync::{OperationPlan, PlanExecutor};

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Crate configuration, parsed from TOML.
///
/// # Example
///
/// ```toml
/// # optioneer.toml
/// min_call_delay_ms = 40
/// trace_level = "debug"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Minimum delay between consecutive remote calls, in milliseconds.
    ///
    /// The default of 40 ms is derived from a 1500 requests/minute budget.
    pub min_call_delay_ms: u64,

    /// Tracing level directive for the subscriber.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`, or any `EnvFilter`
    /// directive string. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_call_delay_ms: 40,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from a TOML string.
    ///
    /// Missing keys take their defaults; unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`OptioneerError::Config`] on malformed TOML.
    ///
    /// # Example
    ///
    /// ```
    /// use optioneer::Config;
    ///
    /// let config = Config::from_toml_str("min_call_delay_ms = 100")?;
    /// assert_eq!(config.min_call_delay_ms, 100);
    /// # Ok::<(), optioneer::OptioneerError>(())
    /// ```
    pub fn from_toml_str(input: &str) -> Result<Self> {
        toml::from_str(input).map_err(|err| OptioneerError::Config(err.to_string()))
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`OptioneerError::Io`] when the file cannot be read and
    /// [`OptioneerError::Config`] on malformed TOML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let input = std::fs::read_to_string(path)?;
        Self::from_toml_str(&input)
    }

    /// The configured minimum inter-call delay, ready to feed a
    /// [`DelayPacer`](sync::DelayPacer).
    #[must_use]
    pub const fn min_call_delay(&self) -> Duration {
        Duration::from_millis(self.min_call_delay_ms)
    }
}

/// Initializes the library with configuration.
///
/// Sets up the tracing subscriber (idempotent) and returns an empty
/// [`EditorState`] ready to be seeded from a remote listing.
///
/// # Example
///
/// ```
/// use optioneer::{initialize, Config};
///
/// let state = initialize(&Config::default());
/// assert!(state.is_empty());
/// ```
#[must_use]
pub fn initialize(config: &Config) -> EditorState {
    observability::init_tracing(config);
    tracing::debug!(
        min_call_delay_ms = config.min_call_delay_ms,
        "initializing optioneer"
    );
    EditorState::new()
}
