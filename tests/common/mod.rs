//! Shared utilities for integration tests.

use std::io::Write;

use tempfile::NamedTempFile;

/// Sample configuration touching scalar, repeated and block options.
#[allow(dead_code)]
pub const SAMPLE_CONFIG: &str = r#"# sample daemon configuration
music_directory     "/srv/music"
db_file             "/var/lib/mpd/database"
bind_to_address     "localhost"
bind_to_address     "/run/mpd/socket"
port                "0x1A00"
max_connections     "10"
zeroconf_enabled    "yes"
auto_update         "no"
filesystem_charset  "UTF-8"

audio_output {
    type        "alsa"
    name        "speakers"
    mixer_type  "software"
    devcie      "hw:0"
}

input {
    plugin  "curl"
    proxy   "proxy.local"
}
"#;

/// Write `content` to a temporary file that lives as long as the handle.
pub fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
