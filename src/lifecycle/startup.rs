//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve the daemon settings from a loaded registry
//! - Abort with a diagnostic on malformed operational values
//!
//! # Design Decisions
//! - Fail fast: a bad number or boolean is fatal
//! - A bad path is logged and the setting left unset
//! - Absent options take their built-in defaults

use std::path::PathBuf;

use serde::Serialize;

use crate::config::error::{ConfigError, Result};
use crate::config::option::ConfigOption;
use crate::config::path::PathNormalizer;
use crate::config::registry::ConfigRegistry;

pub const DEFAULT_PORT: u32 = 6600;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_CONNECTION_TIMEOUT_SECS: u32 = 60;
pub const DEFAULT_MAX_PLAYLIST_LENGTH: u32 = 16 * 1024;
pub const DEFAULT_MAX_COMMAND_LIST_KIB: u32 = 2048;
pub const DEFAULT_MAX_OUTPUT_BUFFER_KIB: u32 = 8192;
pub const DEFAULT_AUDIO_BUFFER_KIB: u32 = 4096;

/// Log a fatal configuration error and terminate the process.
pub fn report_fatal(err: &ConfigError) -> ! {
    tracing::error!(line = ?err.line(), "{}", err);
    std::process::exit(1)
}

/// One `audio_output { ... }` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudioOutputSettings {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub enabled: bool,
    pub always_on: bool,
    pub mixer_type: String,
    pub line: u32,
}

/// Daemon settings resolved from the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub bind_addresses: Vec<String>,
    pub port: u32,
    pub max_connections: u32,
    pub connection_timeout_secs: u32,
    pub max_playlist_length: u32,
    pub max_command_list_kib: u32,
    pub max_output_buffer_kib: u32,
    pub audio_buffer_kib: u32,
    pub log_level: String,
    pub zeroconf_enabled: bool,
    pub zeroconf_name: String,
    pub auto_update: bool,
    pub auto_update_depth: u32,
    pub follow_inside_symlinks: bool,
    pub follow_outside_symlinks: bool,
    pub music_directory: Option<PathBuf>,
    pub playlist_directory: Option<PathBuf>,
    pub db_file: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub pid_file: Option<PathBuf>,
    pub state_file: Option<PathBuf>,
    pub audio_outputs: Vec<AudioOutputSettings>,
}

impl Settings {
    /// Read every daemon option from `registry`.
    ///
    /// Returns the first malformed value as an error; path failures are
    /// logged and the path left unset.
    pub fn from_registry(
        registry: &ConfigRegistry,
        normalizer: &dyn PathNormalizer,
    ) -> Result<Self> {
        let path = |option| optional_path(registry, option, normalizer);

        let settings = Self {
            bind_addresses: bind_addresses(registry),
            port: registry.get_positive(ConfigOption::Port, DEFAULT_PORT)?,
            max_connections: registry
                .get_positive(ConfigOption::MaxConnections, DEFAULT_MAX_CONNECTIONS)?,
            connection_timeout_secs: registry
                .get_positive(ConfigOption::ConnectionTimeout, DEFAULT_CONNECTION_TIMEOUT_SECS)?,
            max_playlist_length: registry
                .get_positive(ConfigOption::MaxPlaylistLength, DEFAULT_MAX_PLAYLIST_LENGTH)?,
            max_command_list_kib: registry
                .get_positive(ConfigOption::MaxCommandListSize, DEFAULT_MAX_COMMAND_LIST_KIB)?,
            max_output_buffer_kib: registry
                .get_positive(ConfigOption::MaxOutputBufferSize, DEFAULT_MAX_OUTPUT_BUFFER_KIB)?,
            audio_buffer_kib: registry
                .get_positive(ConfigOption::AudioBufferSize, DEFAULT_AUDIO_BUFFER_KIB)?,
            log_level: registry.get_string(ConfigOption::LogLevel, "default").to_string(),
            zeroconf_enabled: registry.get_bool(ConfigOption::ZeroconfEnabled, true)?,
            zeroconf_name: registry
                .get_string(ConfigOption::ZeroconfName, "Music Player")
                .to_string(),
            auto_update: registry.get_bool(ConfigOption::AutoUpdate, false)?,
            auto_update_depth: registry.get_unsigned(ConfigOption::AutoUpdateDepth, u32::MAX)?,
            follow_inside_symlinks: registry.get_bool(ConfigOption::FollowInsideSymlinks, true)?,
            follow_outside_symlinks: registry.get_bool(ConfigOption::FollowOutsideSymlinks, true)?,
            music_directory: path(ConfigOption::MusicDir),
            playlist_directory: path(ConfigOption::PlaylistDir),
            db_file: path(ConfigOption::DbFile),
            log_file: path(ConfigOption::LogFile),
            pid_file: path(ConfigOption::PidFile),
            state_file: path(ConfigOption::StateFile),
            audio_outputs: audio_outputs(registry)?,
        };

        tracing::info!(
            port = settings.port,
            bind_addresses = settings.bind_addresses.len(),
            audio_outputs = settings.audio_outputs.len(),
            "Configuration loaded"
        );
        Ok(settings)
    }
}

fn bind_addresses(registry: &ConfigRegistry) -> Vec<String> {
    let mut addresses = Vec::new();
    let mut last = None;
    while let Some(param) = registry.get_next_param(ConfigOption::BindToAddress, last) {
        addresses.push(param.value.clone());
        last = Some(param.cursor());
    }
    if addresses.is_empty() {
        addresses.push("any".to_string());
    }
    addresses
}

fn optional_path(
    registry: &ConfigRegistry,
    option: ConfigOption,
    normalizer: &dyn PathNormalizer,
) -> Option<PathBuf> {
    match registry.dup_path(option, normalizer) {
        Ok(path) => path,
        Err(e) => {
            tracing::warn!(option = %option, "{}", e);
            None
        }
    }
}

fn audio_outputs(registry: &ConfigRegistry) -> Result<Vec<AudioOutputSettings>> {
    let mut outputs = Vec::new();
    let mut last = None;

    while let Some(param) = registry.get_next_param(ConfigOption::AudioOutput, last) {
        let required = |name: &'static str| {
            param
                .get_block_param(name)
                .map(|bp| bp.value.clone())
                .ok_or(ConfigError::MissingBlockParam { name, line: param.line })
        };

        outputs.push(AudioOutputSettings {
            name: required("name")?,
            kind: required("type")?,
            enabled: param.get_block_bool("enabled", true)?,
            always_on: param.get_block_bool("always_on", false)?,
            mixer_type: param.get_block_string("mixer_type", "hardware").to_string(),
            line: param.line,
        });
        last = Some(param.cursor());
    }

    Ok(outputs)
}
