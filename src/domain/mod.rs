//! Domain layer for the Optioneer core.
//!
//! This module contains the core domain types for the option set being
//! edited, independent of the remote collaborator or any rendering surface.
//! It keeps the entity model isolated from planning and execution concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`color`]: The fixed color palette and recolor patterns
//! - [`option`]: The option entity and its identity model
//!
//! # Examples
//!
//! ```
//! use optioneer::domain::{Color, EnumOption};
//!
//! let opt = EnumOption::remote("opt-1", "In Progress", Color::Blue);
//! assert!(opt.enabled);
//! ```

pub mod color;
pub mod error;
pub mod option;

pub use color::{Color, ColorPattern};
pub use error::{OptioneerError, Result};
pub use option::{EnumOption, OptionId};
