//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! loader / registry / audit / startup
//!     → tracing events (debug: loading, warn: audit findings,
//!       error: fatal configuration errors)
//!     → logging.rs subscriber → stderr
//! ```

pub mod logging;
