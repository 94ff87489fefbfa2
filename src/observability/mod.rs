//! Tracing setup.
//!
//! # Organization
//!
//! - [`init`]: Subscriber initialization from configuration

pub mod init;

pub use init::init_tracing;
