//! Parsed configuration entries.
//!
//! # Used flags
//! Every [`ConfigParam`] and [`BlockParam`] carries a `used` flag that
//! lookups flip from `false` to `true`. It is the only state that changes
//! after the registry is populated, so it lives in an `AtomicBool`: lookups
//! take `&self`, and concurrent first lookups of the same entry cannot
//! lose an update. The flag is never reset.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::error::{ConfigError, Result};
use crate::config::path::PathNormalizer;
use crate::config::value::{parse_bool, parse_unsigned};

/// A `name "value"` pair nested inside a block option.
#[derive(Debug)]
pub struct BlockParam {
    pub name: String,
    pub value: String,
    pub line: u32,
    used: AtomicBool,
}

impl BlockParam {
    pub fn new(name: impl Into<String>, value: impl Into<String>, line: u32) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            line,
            used: AtomicBool::new(false),
        }
    }

    pub fn is_used(&self) -> bool {
        self.used.load(Ordering::Relaxed)
    }

    pub(crate) fn mark_used(&self) {
        self.used.store(true, Ordering::Relaxed);
    }
}

/// One occurrence of an option in the configuration file.
#[derive(Debug)]
pub struct ConfigParam {
    pub value: String,
    pub line: u32,
    used: AtomicBool,
    block_params: Vec<BlockParam>,
}

impl ConfigParam {
    pub fn new(value: impl Into<String>, line: u32) -> Self {
        Self {
            value: value.into(),
            line,
            used: AtomicBool::new(false),
            block_params: Vec::new(),
        }
    }

    /// Append a block parameter. Duplicate names are kept in order.
    pub fn add_block_param(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        line: u32,
    ) {
        self.block_params.push(BlockParam::new(name, value, line));
    }

    /// Builder form of [`add_block_param`](Self::add_block_param).
    pub fn with_block_param(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        line: u32,
    ) -> Self {
        self.add_block_param(name, value, line);
        self
    }

    pub fn is_used(&self) -> bool {
        self.used.load(Ordering::Relaxed)
    }

    pub(crate) fn mark_used(&self) {
        self.used.store(true, Ordering::Relaxed);
    }

    /// Block parameters in file order, without marking anything used.
    pub fn block_params(&self) -> &[BlockParam] {
        &self.block_params
    }

    /// First block parameter called `name`; marks it used.
    pub fn get_block_param(&self, name: &str) -> Option<&BlockParam> {
        let bp = self.block_params.iter().find(|bp| bp.name == name)?;
        bp.mark_used();
        Some(bp)
    }

    pub fn get_block_string<'a>(&'a self, name: &str, default_value: &'a str) -> &'a str {
        match self.get_block_param(name) {
            Some(bp) => &bp.value,
            None => default_value,
        }
    }

    pub fn get_block_unsigned(&self, name: &str, default_value: u32) -> Result<u32> {
        let Some(bp) = self.get_block_param(name) else {
            return Ok(default_value);
        };
        parse_unsigned(&bp.value).ok_or(ConfigError::InvalidUnsigned { line: bp.line })
    }

    pub fn get_block_bool(&self, name: &str, default_value: bool) -> Result<bool> {
        let Some(bp) = self.get_block_param(name) else {
            return Ok(default_value);
        };
        parse_bool(&bp.value).ok_or(ConfigError::InvalidBool { line: bp.line })
    }

    /// Normalized path from a block parameter; `Ok(None)` if absent.
    pub fn dup_block_path(
        &self,
        name: &str,
        normalizer: &dyn PathNormalizer,
    ) -> Result<Option<PathBuf>> {
        let Some(bp) = self.get_block_param(name) else {
            return Ok(None);
        };
        normalizer
            .normalize(&bp.value)
            .map(Some)
            .map_err(|source| ConfigError::InvalidPath { line: bp.line, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::path::TildeNormalizer;

    fn output() -> ConfigParam {
        ConfigParam::new("", 10)
            .with_block_param("type", "alsa", 11)
            .with_block_param("name", "speakers", 12)
            .with_block_param("enabled", "no", 13)
            .with_block_param("name", "duplicate", 14)
    }

    #[test]
    fn test_block_lookup_marks_only_that_entry() {
        let param = output();
        assert_eq!(param.get_block_string("type", "null"), "alsa");

        let used: Vec<bool> = param.block_params().iter().map(BlockParam::is_used).collect();
        assert_eq!(used, vec![true, false, false, false]);
        assert!(!param.is_used());
    }

    #[test]
    fn test_first_duplicate_wins() {
        let param = output();
        let bp = param.get_block_param("name").unwrap();
        assert_eq!(bp.value, "speakers");
        assert_eq!(bp.line, 12);
        assert!(!param.block_params()[3].is_used());
    }

    #[test]
    fn test_block_defaults() {
        let param = output();
        assert_eq!(param.get_block_string("device", "hw:0"), "hw:0");
        assert_eq!(param.get_block_unsigned("buffer", 4096).unwrap(), 4096);
        assert!(param.get_block_bool("always_on", true).unwrap());
        assert!(param.dup_block_path("path", &TildeNormalizer::new()).unwrap().is_none());
    }

    #[test]
    fn test_block_conversions() {
        let param = output().with_block_param("mixer_index", "0x10", 15);
        assert!(!param.get_block_bool("enabled", true).unwrap());
        assert_eq!(param.get_block_unsigned("mixer_index", 0).unwrap(), 16);

        match param.get_block_bool("type", false) {
            Err(ConfigError::InvalidBool { line }) => assert_eq!(line, 11),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_block_path_error_carries_line() {
        let param = ConfigParam::new("", 1).with_block_param("path", "relative", 2);
        let err = param
            .dup_block_path("path", &TildeNormalizer::with_home("/root"))
            .unwrap_err();
        assert_eq!(err.line(), Some(2));
        assert!(err.to_string().starts_with("Invalid path at line 2: "));
    }
}
