//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Init registry → Read config file → Build Settings → Audit
//!
//! Global (global.rs):
//!     Process-wide handle for code that cannot receive the registry
//!
//! Shutdown:
//!     global::finish() → all parameters released
//! ```
//!
//! # Design Decisions
//! - The registry is an explicit value; the global slot is a thin shim
//! - Fail fast: malformed numbers and booleans abort startup
//! - Only the binary terminates the process (`report_fatal`)

pub mod global;
pub mod startup;

pub use startup::{report_fatal, Settings};
