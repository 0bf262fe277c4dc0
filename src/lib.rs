//! Typed configuration registry.
//!
//! Parameters parsed from a configuration file are stored per option
//! identifier, read through typed accessors with default fallback, and
//! audited afterwards for block parameters nothing consulted.

pub mod config;
pub mod lifecycle;
pub mod observability;

pub use config::{ConfigError, ConfigOption, ConfigParam, ConfigRegistry, OptionKey};
pub use lifecycle::Settings;
