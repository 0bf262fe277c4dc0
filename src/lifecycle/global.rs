//! Process-wide registry slot.
//!
//! Loading happens once at startup, before any reader calls [`get`].
//! Readers receive an `Arc` and keep it for as long as they need it.

use std::path::Path;
use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::config::audit::UnusedBlockParam;
use crate::config::error::{ConfigError, Result};
use crate::config::loader;
use crate::config::option::ConfigOption;
use crate::config::registry::ConfigRegistry;

static GLOBAL: ArcSwapOption<ConfigRegistry> = ArcSwapOption::const_empty();

/// Install an empty registry.
pub fn init() {
    GLOBAL.store(Some(Arc::new(ConfigRegistry::new())));
}

/// Parse `path` into the installed registry (or a new one if none is
/// installed).
///
/// Fails with [`ConfigError::InUse`] once a reader holds the registry from
/// [`get`]; the installed registry is left as it was. A parse error also
/// leaves it unchanged, since the loader appends nothing on failure.
pub fn read_config_file(path: &Path) -> Result<()> {
    let mut registry = match GLOBAL.swap(None) {
        Some(shared) => match Arc::try_unwrap(shared) {
            Ok(registry) => registry,
            Err(shared) => {
                let readers = Arc::strong_count(&shared) - 1;
                GLOBAL.store(Some(shared));
                return Err(ConfigError::InUse { readers });
            }
        },
        None => ConfigRegistry::new(),
    };

    let result = loader::read_config_file(&mut registry, path);
    GLOBAL.store(Some(Arc::new(registry)));
    result
}

/// Shared handle to the installed registry.
pub fn get() -> Option<Arc<ConfigRegistry>> {
    GLOBAL.load_full()
}

/// Run the usage audit on the installed registry.
pub fn check() -> Vec<UnusedBlockParam<ConfigOption>> {
    match GLOBAL.load_full() {
        Some(registry) => registry.check(),
        None => Vec::new(),
    }
}

/// Remove the installed registry and release its parameters.
pub fn finish() {
    let Some(shared) = GLOBAL.swap(None) else {
        return;
    };
    match Arc::try_unwrap(shared) {
        Ok(mut registry) => registry.finish(),
        Err(shared) => {
            tracing::warn!(
                references = Arc::strong_count(&shared),
                "configuration still referenced at shutdown"
            );
        }
    }
}
