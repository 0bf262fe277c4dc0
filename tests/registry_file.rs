//! End-to-end tests: load a file, query it, audit it.

use std::path::PathBuf;

use config_registry::config::loader::read_config_file;
use config_registry::config::{
    ConfigError, ConfigOption, ConfigRegistry, TildeNormalizer, UnusedBlockParam,
};
use config_registry::lifecycle::Settings;
use config_registry::OptionKey;

mod common;

fn load(content: &str) -> ConfigRegistry {
    let file = common::write_config(content);
    let mut registry = ConfigRegistry::new();
    read_config_file(&mut registry, file.path()).unwrap();
    registry
}

#[test]
fn test_unpopulated_options_keep_defaults_and_stay_unused() {
    let registry = load("port \"6600\"\n");

    assert_eq!(registry.get_string(ConfigOption::LogLevel, "default"), "default");
    assert_eq!(registry.get_unsigned(ConfigOption::MaxPlaylistLength, 7).unwrap(), 7);
    assert!(!registry.get_bool(ConfigOption::AutoUpdate, false).unwrap());

    // nothing was looked up for port, so nothing is reported either way
    assert!(registry.check().is_empty());
}

#[test]
fn test_cursor_walk_over_repeated_option() {
    let registry = load(common::SAMPLE_CONFIG);

    let first = registry.get_next_param(ConfigOption::BindToAddress, None).unwrap();
    let second = registry
        .get_next_param(ConfigOption::BindToAddress, Some(first.cursor()))
        .unwrap();
    assert_eq!(first.value, "localhost");
    assert_eq!(second.value, "/run/mpd/socket");
    assert!(first.line < second.line);
    assert!(registry
        .get_next_param(ConfigOption::BindToAddress, Some(second.cursor()))
        .is_none());

    // a cursor from another option does not continue this walk
    let port = registry.get_param(ConfigOption::Port).unwrap();
    assert!(registry
        .get_next_param(ConfigOption::BindToAddress, Some(port.cursor()))
        .is_none());
}

#[test]
fn test_hex_port_and_paths() {
    let registry = load(common::SAMPLE_CONFIG);
    assert_eq!(registry.get_positive(ConfigOption::Port, 6600).unwrap(), 0x1A00);

    let normalizer = TildeNormalizer::with_home("/home/alice");
    assert_eq!(
        registry.dup_path(ConfigOption::MusicDir, &normalizer).unwrap(),
        Some(PathBuf::from("/srv/music"))
    );
    assert_eq!(registry.dup_path(ConfigOption::StateFile, &normalizer).unwrap(), None);
}

#[test]
fn test_settings_then_audit_reports_typo() {
    let registry = load(common::SAMPLE_CONFIG);
    let normalizer = TildeNormalizer::with_home("/home/alice");
    let settings = Settings::from_registry(&registry, &normalizer).unwrap();

    assert_eq!(settings.bind_addresses, vec!["localhost", "/run/mpd/socket"]);
    assert_eq!(settings.max_connections, 10);
    assert_eq!(settings.audio_outputs[0].mixer_type, "software");

    // the input block was never looked at, so its keys are not reported
    let unused = registry.check();
    assert_eq!(
        unused,
        vec![UnusedBlockParam {
            option: ConfigOption::AudioOutput,
            name: "devcie".to_string(),
            line: 16,
        }]
    );
}

#[test]
fn test_malformed_values_surface_as_errors() {
    let registry = load("max_connections \"0\"\nauto_update \"maybe\"\nport \"-1\"\n");

    assert!(matches!(
        registry.get_positive(ConfigOption::MaxConnections, 5),
        Err(ConfigError::NotPositive { line: 1 })
    ));
    assert!(matches!(
        registry.get_bool(ConfigOption::AutoUpdate, false),
        Err(ConfigError::InvalidBool { line: 2 })
    ));
    let err = registry.get_unsigned(ConfigOption::Port, 6600).unwrap_err();
    assert_eq!(err.to_string(), "Not a valid non-negative number in line 3");
}

#[test]
fn test_finish_empties_every_slot() {
    let mut registry = load(common::SAMPLE_CONFIG);
    assert!(!registry.is_empty());

    registry.finish();
    for option in ConfigOption::ALL {
        assert_eq!(registry.len(*option), 0, "{option}");
    }

    registry.init();
    assert!(registry.get_param(ConfigOption::AudioOutput).is_none());
}
