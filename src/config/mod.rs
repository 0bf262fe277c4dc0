//! Configuration registry subsystem.
//!
//! # Data Flow
//! ```text
//! config file
//!     → loader.rs (tokenize, append records in file order)
//!     → ConfigRegistry (one slot per option identifier)
//!     → typed accessors / cursor walk (mark entries used)
//!     → audit.rs (report unused block parameters)
//! ```
//!
//! # Design Decisions
//! - Options are a closed enumeration (`OptionKey`), not string keys
//! - Registry data is immutable after loading except for used flags
//! - Absent options fall back to defaults; malformed ones are errors
//! - Path values go through a pluggable `PathNormalizer`

pub mod audit;
pub mod error;
pub mod loader;
pub mod option;
pub mod param;
pub mod path;
pub mod registry;
pub mod value;

pub use audit::UnusedBlockParam;
pub use error::ConfigError;
pub use option::{ConfigOption, OptionKey, UnknownOptionName};
pub use param::{BlockParam, ConfigParam};
pub use path::{PathError, PathNormalizer, TildeNormalizer};
pub use registry::{ConfigRegistry, ParamCursor, ParamRef};
