//! Structured logging.
//!
//! # Design Decisions
//! - Uses the tracing crate for structured log events
//! - Level filter from `RUST_LOG`, falling back to the given directive
//! - Logs go to stderr; stdout is reserved for command output

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVE: &str = "config_registry=info";

/// Install the global tracing subscriber.
pub fn init(default_directive: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
