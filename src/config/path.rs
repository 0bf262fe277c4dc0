//! Path normalization for path-valued options.
//!
//! # Rules (TildeNormalizer)
//! - `~` and `~/rest` expand to the current user's home directory
//! - `~user/rest` is rejected (no passwd lookup)
//! - the expanded result must be absolute

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Reasons a raw path string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("path is empty")]
    Empty,

    #[error("failed to get home directory")]
    NoHome,

    #[error("expanding '~{0}' is not supported")]
    UserHome(String),

    #[error("not an absolute path: {0}")]
    NotAbsolute(String),
}

/// Turns a raw option value into a filesystem path.
pub trait PathNormalizer {
    fn normalize(&self, raw: &str) -> Result<PathBuf, PathError>;
}

/// Default normalizer: tilde expansion plus an absoluteness check.
#[derive(Debug, Clone, Default)]
pub struct TildeNormalizer {
    home: Option<PathBuf>,
}

impl TildeNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed home directory instead of the environment.
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            home: Some(home.into()),
        }
    }

    fn home_dir(&self) -> Option<String> {
        match &self.home {
            Some(home) => Some(home.to_string_lossy().into_owned()),
            None => std::env::var("HOME").ok().filter(|h| !h.is_empty()),
        }
    }
}

impl PathNormalizer for TildeNormalizer {
    fn normalize(&self, raw: &str) -> Result<PathBuf, PathError> {
        if raw.is_empty() {
            return Err(PathError::Empty);
        }

        if let Some(rest) = raw.strip_prefix('~') {
            if !rest.is_empty() && !rest.starts_with('/') {
                let user = rest.split('/').next().unwrap_or(rest);
                return Err(PathError::UserHome(user.to_string()));
            }
            let home = self.home_dir().ok_or(PathError::NoHome)?;
            let expanded = shellexpand::tilde_with_context(raw, || Some(home.as_str()));
            return absolute(Path::new(expanded.as_ref()), raw);
        }

        absolute(Path::new(raw), raw)
    }
}

fn absolute(path: &Path, raw: &str) -> Result<PathBuf, PathError> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Err(PathError::NotAbsolute(raw.to_string()))
    }
}
