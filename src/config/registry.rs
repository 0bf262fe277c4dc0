//! Option-indexed storage of parsed parameters.
//!
//! # Lookup protocol
//! ```text
//! get_next_param(opt, None)      → first entry (or None)
//! get_next_param(opt, Some(c1))  → entry after c1 (or None)
//! ...
//! ```
//! Every returned entry is marked used. Cursors are plain handles
//! (registry id, generation, slot, position) so they stay valid however
//! the backing vectors move; a cursor that does not belong to the slot
//! being queried ends the walk instead of panicking.
//!
//! # Design Decisions
//! - One slot per option identifier, always present (possibly empty)
//! - Insertion order is file order; nothing is reordered or deduplicated
//! - Typed accessors only ever see the first entry of an option
//! - Malformed numbers and booleans are returned as errors; the caller
//!   decides whether to abort

use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::error::{ConfigError, Result};
use crate::config::option::{ConfigOption, OptionKey};
use crate::config::param::ConfigParam;
use crate::config::path::PathNormalizer;
use crate::config::value::{parse_bool, parse_integer, parse_unsigned};

static NEXT_REGISTRY_ID: AtomicU64 = AtomicU64::new(1);

/// Position of an entry previously returned by
/// [`ConfigRegistry::get_next_param`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamCursor {
    registry: u64,
    generation: u64,
    slot: usize,
    position: usize,
}

/// A borrowed parameter together with its cursor.
#[derive(Clone, Copy)]
pub struct ParamRef<'a> {
    cursor: ParamCursor,
    param: &'a ConfigParam,
}

impl<'a> ParamRef<'a> {
    pub fn cursor(&self) -> ParamCursor {
        self.cursor
    }

    pub fn param(&self) -> &'a ConfigParam {
        self.param
    }
}

impl Deref for ParamRef<'_> {
    type Target = ConfigParam;

    fn deref(&self) -> &ConfigParam {
        self.param
    }
}

impl fmt::Debug for ParamRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamRef")
            .field("line", &self.param.line)
            .field("value", &self.param.value)
            .finish()
    }
}

/// Process-wide configuration store.
///
/// Populated once at startup, then shared read-only (behind `Arc` if
/// needed); the used flags are the only post-startup mutation. `finish`
/// and `init` take `&mut self`, so teardown cannot overlap a lookup.
pub struct ConfigRegistry<O: OptionKey = ConfigOption> {
    id: u64,
    generation: u64,
    params: Vec<Vec<ConfigParam>>,
    _option: PhantomData<O>,
}

impl<O: OptionKey> ConfigRegistry<O> {
    /// Create a registry with an empty slot for every option.
    pub fn new() -> Self {
        Self {
            id: NEXT_REGISTRY_ID.fetch_add(1, Ordering::Relaxed),
            generation: 0,
            params: empty_slots::<O>(),
            _option: PhantomData,
        }
    }

    /// Re-establish an empty slot for every option.
    ///
    /// Cursors handed out before this call no longer match anything.
    pub fn init(&mut self) {
        self.params = empty_slots::<O>();
        self.generation += 1;
    }

    /// Release every parameter, leaving all slots empty.
    pub fn finish(&mut self) {
        let released: usize = self.params.iter().map(Vec::len).sum();
        for slot in &mut self.params {
            slot.clear();
        }
        self.generation += 1;
        tracing::debug!(released, "configuration released");
    }

    /// Append a parsed entry; used by the file loader.
    pub fn append(&mut self, option: O, param: ConfigParam) {
        self.params[option.index()].push(param);
    }

    /// Number of entries configured for `option`.
    pub fn len(&self, option: O) -> usize {
        self.params[option.index()].len()
    }

    /// True when no option has any entry.
    pub fn is_empty(&self) -> bool {
        self.params.iter().all(Vec::is_empty)
    }

    /// Source lines of every entry for `option`. Does not mark anything used.
    pub fn param_lines(&self, option: O) -> Vec<u32> {
        self.params[option.index()].iter().map(|p| p.line).collect()
    }

    /// Entries of `option` in file order. Does not mark anything used.
    pub(crate) fn slot(&self, option: O) -> &[ConfigParam] {
        &self.params[option.index()]
    }

    /// Return the entry following `last`, or the first entry if `last` is
    /// `None`. Marks the returned entry used.
    pub fn get_next_param(&self, option: O, last: Option<ParamCursor>) -> Option<ParamRef<'_>> {
        let slot = option.index();
        let position = match last {
            None => 0,
            Some(cursor) => {
                if !self.owns(cursor, slot) {
                    return None;
                }
                cursor.position + 1
            }
        };

        let param = self.params[slot].get(position)?;
        param.mark_used();
        Some(ParamRef {
            cursor: ParamCursor {
                registry: self.id,
                generation: self.generation,
                slot,
                position,
            },
            param,
        })
    }

    /// First entry of `option`. Marks it used.
    pub fn get_param(&self, option: O) -> Option<ParamRef<'_>> {
        self.get_next_param(option, None)
    }

    fn owns(&self, cursor: ParamCursor, slot: usize) -> bool {
        cursor.registry == self.id
            && cursor.generation == self.generation
            && cursor.slot == slot
            && cursor.position < self.params[slot].len()
    }

    pub fn get_string<'a>(&'a self, option: O, default_value: &'a str) -> &'a str {
        match self.get_param(option) {
            Some(param) => &param.param().value,
            None => default_value,
        }
    }

    pub fn get_bool(&self, option: O, default_value: bool) -> Result<bool> {
        let Some(param) = self.get_param(option) else {
            return Ok(default_value);
        };
        parse_bool(&param.value).ok_or(ConfigError::InvalidBool { line: param.line })
    }

    /// Non-negative integer; hex and octal prefixes are accepted.
    pub fn get_unsigned(&self, option: O, default_value: u32) -> Result<u32> {
        let Some(param) = self.get_param(option) else {
            return Ok(default_value);
        };
        parse_unsigned(&param.value).ok_or(ConfigError::InvalidUnsigned { line: param.line })
    }

    /// Strictly positive integer; hex and octal prefixes are accepted.
    pub fn get_positive(&self, option: O, default_value: u32) -> Result<u32> {
        let Some(param) = self.get_param(option) else {
            return Ok(default_value);
        };
        let value =
            parse_integer(&param.value).ok_or(ConfigError::InvalidNumber { line: param.line })?;
        if value <= 0 {
            return Err(ConfigError::NotPositive { line: param.line });
        }
        u32::try_from(value).map_err(|_| ConfigError::InvalidNumber { line: param.line })
    }

    /// Normalized path for `option`; `Ok(None)` when it is not configured.
    pub fn dup_path(&self, option: O, normalizer: &dyn PathNormalizer) -> Result<Option<PathBuf>> {
        let Some(param) = self.get_param(option) else {
            return Ok(None);
        };
        normalizer
            .normalize(&param.value)
            .map(Some)
            .map_err(|source| ConfigError::InvalidPath {
                line: param.line,
                source,
            })
    }
}

impl<O: OptionKey> Default for ConfigRegistry<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: OptionKey> fmt::Debug for ConfigRegistry<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for option in O::ALL {
            let slot = &self.params[option.index()];
            if !slot.is_empty() {
                map.entry(&option.name(), &slot.len());
            }
        }
        map.finish()
    }
}

fn empty_slots<O: OptionKey>() -> Vec<Vec<ConfigParam>> {
    O::ALL.iter().map(|_| Vec::new()).collect()
}
