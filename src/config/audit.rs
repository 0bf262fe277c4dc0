//! Usage audit: find block parameters nobody asked for.
//!
//! A top-level parameter that was never looked up is assumed to belong to
//! a feature that is disabled, and is skipped silently. A block parameter
//! left unused under a parent that *was* looked up is most likely a typo
//! or an obsolete key, and is reported.

use serde::Serialize;

use crate::config::option::OptionKey;
use crate::config::registry::ConfigRegistry;

/// A block parameter that was present in the file but never consulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnusedBlockParam<O> {
    pub option: O,
    pub name: String,
    pub line: u32,
}

impl<O: OptionKey> ConfigRegistry<O> {
    /// Log a warning for every unused block parameter of a used entry.
    ///
    /// Read-only; may be called any number of times.
    pub fn check(&self) -> Vec<UnusedBlockParam<O>> {
        let mut unused = Vec::new();

        for option in O::ALL {
            for param in self.slot(*option).iter().filter(|p| p.is_used()) {
                for bp in param.block_params().iter().filter(|bp| !bp.is_used()) {
                    tracing::warn!(
                        option = option.name(),
                        "option '{}' on line {} was not recognized",
                        bp.name,
                        bp.line
                    );
                    unused.push(UnusedBlockParam {
                        option: *option,
                        name: bp.name.clone(),
                        line: bp.line,
                    });
                }
            }
        }

        unused
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::option::ConfigOption;
    use crate::config::param::ConfigParam;

    fn output(line: u32) -> ConfigParam {
        ConfigParam::new("", line)
            .with_block_param("type", "alsa", line + 1)
            .with_block_param("nmae", "typo", line + 2)
    }

    #[test]
    fn test_unused_parent_is_silent() {
        let mut registry: ConfigRegistry = ConfigRegistry::new();
        registry.append(ConfigOption::AudioOutput, output(1));
        assert!(registry.check().is_empty());
    }

    #[test]
    fn test_reports_unused_block_param_of_used_parent() {
        let mut registry: ConfigRegistry = ConfigRegistry::new();
        registry.append(ConfigOption::AudioOutput, output(1));

        let param = registry.get_param(ConfigOption::AudioOutput).unwrap();
        assert_eq!(param.get_block_string("type", "null"), "alsa");

        let unused = registry.check();
        assert_eq!(
            unused,
            vec![UnusedBlockParam {
                option: ConfigOption::AudioOutput,
                name: "nmae".into(),
                line: 3,
            }]
        );
        // repeatable and side-effect free
        assert_eq!(registry.check(), unused);
    }

    #[test]
    fn test_fully_consumed_block_is_clean() {
        let mut registry: ConfigRegistry = ConfigRegistry::new();
        registry.append(ConfigOption::Port, ConfigParam::new("6600", 1));
        registry.append(ConfigOption::AudioOutput, output(2));

        let param = registry.get_param(ConfigOption::AudioOutput).unwrap();
        param.get_block_param("type");
        param.get_block_param("nmae");
        registry.get_param(ConfigOption::Port);

        assert!(registry.check().is_empty());
    }
}
