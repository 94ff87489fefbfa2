//! Tracing initialization and subscriber setup.
//!
//! This module configures the tracing subscriber that receives the spans the
//! planner, executor, and event handler emit.

use crate::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the tracing subscriber from configuration.
///
/// # Trace Level Resolution
///
/// Level is determined by:
/// 1. `config.trace_level` if set (any `EnvFilter` directive string)
/// 2. Default: `"info"`
///
/// # Initialization Behavior
///
/// Idempotent: safe to call multiple times, only the first call takes effect.
/// A hosting surface that installs its own subscriber can simply skip this.
///
/// # Example
///
/// ```
/// use optioneer::observability::init_tracing;
/// use optioneer::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
///
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(tracing_subscriber::fmt::layer().with_target(true));

    let _ = subscriber.try_init();
}
