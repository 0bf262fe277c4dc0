//! Option identifiers.
//!
//! The registry is keyed by a closed enumeration rather than strings so
//! that every slot is known at compile time and lookup is an index.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// A name that is not a known option.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown option '{0}'")]
pub struct UnknownOptionName(pub String);

/// A closed, densely indexed set of option identifiers.
pub trait OptionKey: Copy + Eq + fmt::Debug + 'static {
    /// Every identifier, ordered by [`index`](Self::index).
    const ALL: &'static [Self];

    /// Position of this identifier in [`ALL`](Self::ALL).
    fn index(self) -> usize;

    /// Name as written in the configuration file.
    fn name(self) -> &'static str;

    fn from_name(name: &str) -> Option<Self>;

    /// May the option appear more than once?
    fn is_repeatable(self) -> bool;

    /// Does the option carry a `{ ... }` block instead of a scalar?
    fn is_block(self) -> bool;
}

/// Options understood by the daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigOption {
    MusicDir,
    PlaylistDir,
    FollowInsideSymlinks,
    FollowOutsideSymlinks,
    DbFile,
    StickerFile,
    LogFile,
    PidFile,
    StateFile,
    User,
    Group,
    BindToAddress,
    Port,
    LogLevel,
    ZeroconfName,
    ZeroconfEnabled,
    Password,
    DefaultPermissions,
    AudioOutput,
    AudioOutputFormat,
    Mixer,
    ReplayGain,
    AudioBufferSize,
    BufferBeforePlay,
    HttpProxyHost,
    HttpProxyPort,
    ConnectionTimeout,
    MaxConnections,
    MaxPlaylistLength,
    MaxCommandListSize,
    MaxOutputBufferSize,
    FsCharset,
    SaveAbsolutePaths,
    AutoUpdate,
    AutoUpdateDepth,
    Input,
    Decoder,
    Playlist,
}

impl ConfigOption {
    // (identifier, name, repeatable, block)
    const TABLE: &'static [(ConfigOption, &'static str, bool, bool)] = &[
        (ConfigOption::MusicDir, "music_directory", false, false),
        (ConfigOption::PlaylistDir, "playlist_directory", false, false),
        (ConfigOption::FollowInsideSymlinks, "follow_inside_symlinks", false, false),
        (ConfigOption::FollowOutsideSymlinks, "follow_outside_symlinks", false, false),
        (ConfigOption::DbFile, "db_file", false, false),
        (ConfigOption::StickerFile, "sticker_file", false, false),
        (ConfigOption::LogFile, "log_file", false, false),
        (ConfigOption::PidFile, "pid_file", false, false),
        (ConfigOption::StateFile, "state_file", false, false),
        (ConfigOption::User, "user", false, false),
        (ConfigOption::Group, "group", false, false),
        (ConfigOption::BindToAddress, "bind_to_address", true, false),
        (ConfigOption::Port, "port", false, false),
        (ConfigOption::LogLevel, "log_level", false, false),
        (ConfigOption::ZeroconfName, "zeroconf_name", false, false),
        (ConfigOption::ZeroconfEnabled, "zeroconf_enabled", false, false),
        (ConfigOption::Password, "password", true, false),
        (ConfigOption::DefaultPermissions, "default_permissions", false, false),
        (ConfigOption::AudioOutput, "audio_output", true, true),
        (ConfigOption::AudioOutputFormat, "audio_output_format", false, false),
        (ConfigOption::Mixer, "mixer_type", false, false),
        (ConfigOption::ReplayGain, "replaygain", false, false),
        (ConfigOption::AudioBufferSize, "audio_buffer_size", false, false),
        (ConfigOption::BufferBeforePlay, "buffer_before_play", false, false),
        (ConfigOption::HttpProxyHost, "http_proxy_host", false, false),
        (ConfigOption::HttpProxyPort, "http_proxy_port", false, false),
        (ConfigOption::ConnectionTimeout, "connection_timeout", false, false),
        (ConfigOption::MaxConnections, "max_connections", false, false),
        (ConfigOption::MaxPlaylistLength, "max_playlist_length", false, false),
        (ConfigOption::MaxCommandListSize, "max_command_list_size", false, false),
        (ConfigOption::MaxOutputBufferSize, "max_output_buffer_size", false, false),
        (ConfigOption::FsCharset, "filesystem_charset", false, false),
        (ConfigOption::SaveAbsolutePaths, "save_absolute_paths_in_playlists", false, false),
        (ConfigOption::AutoUpdate, "auto_update", false, false),
        (ConfigOption::AutoUpdateDepth, "auto_update_depth", false, false),
        (ConfigOption::Input, "input", true, true),
        (ConfigOption::Decoder, "decoder", true, true),
        (ConfigOption::Playlist, "playlist_plugin", true, true),
    ];

    fn entry(self) -> &'static (ConfigOption, &'static str, bool, bool) {
        &Self::TABLE[self as usize]
    }
}

impl OptionKey for ConfigOption {
    const ALL: &'static [Self] = &[
        ConfigOption::MusicDir,
        ConfigOption::PlaylistDir,
        ConfigOption::FollowInsideSymlinks,
        ConfigOption::FollowOutsideSymlinks,
        ConfigOption::DbFile,
        ConfigOption::StickerFile,
        ConfigOption::LogFile,
        ConfigOption::PidFile,
        ConfigOption::StateFile,
        ConfigOption::User,
        ConfigOption::Group,
        ConfigOption::BindToAddress,
        ConfigOption::Port,
        ConfigOption::LogLevel,
        ConfigOption::ZeroconfName,
        ConfigOption::ZeroconfEnabled,
        ConfigOption::Password,
        ConfigOption::DefaultPermissions,
        ConfigOption::AudioOutput,
        ConfigOption::AudioOutputFormat,
        ConfigOption::Mixer,
        ConfigOption::ReplayGain,
        ConfigOption::AudioBufferSize,
        ConfigOption::BufferBeforePlay,
        ConfigOption::HttpProxyHost,
        ConfigOption::HttpProxyPort,
        ConfigOption::ConnectionTimeout,
        ConfigOption::MaxConnections,
        ConfigOption::MaxPlaylistLength,
        ConfigOption::MaxCommandListSize,
        ConfigOption::MaxOutputBufferSize,
        ConfigOption::FsCharset,
        ConfigOption::SaveAbsolutePaths,
        ConfigOption::AutoUpdate,
        ConfigOption::AutoUpdateDepth,
        ConfigOption::Input,
        ConfigOption::Decoder,
        ConfigOption::Playlist,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        self.entry().1
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::TABLE
            .iter()
            .find(|(_, n, _, _)| *n == name)
            .map(|(option, _, _, _)| *option)
    }

    fn is_repeatable(self) -> bool {
        self.entry().2
    }

    fn is_block(self) -> bool {
        self.entry().3
    }
}

impl fmt::Display for ConfigOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConfigOption {
    type Err = UnknownOptionName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownOptionName(s.to_string()))
    }
}

impl Serialize for ConfigOption {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
