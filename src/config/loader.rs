//! Configuration loading from disk.
//!
//! # Format
//! ```text
//! # comment
//! port            "6600"
//! bind_to_address "localhost"
//! audio_output {
//!     type "alsa"
//!     name "speakers"
//! }
//! ```
//! One statement per line. Values are double-quoted with `\"` and `\\`
//! escapes. Block options open with `{` on the option line and close with
//! a line holding only `}`.

use std::fs;
use std::path::Path;

use crate::config::error::{ConfigError, Result};
use crate::config::option::OptionKey;
use crate::config::param::ConfigParam;
use crate::config::registry::ConfigRegistry;

/// Read `path` and append its parameters to `registry`.
pub fn read_config_file<O: OptionKey>(
    registry: &mut ConfigRegistry<O>,
    path: &Path,
) -> Result<()> {
    tracing::debug!(path = %path.display(), "loading config file");

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(registry, &content)
}

/// Parse configuration text and append its parameters to `registry`.
///
/// Nothing is appended unless the whole input parses.
pub fn parse_config_str<O: OptionKey>(
    registry: &mut ConfigRegistry<O>,
    content: &str,
) -> Result<()> {
    let mut parsed: Vec<(O, ConfigParam)> = Vec::new();
    let mut lines = content.lines().zip(1u32..);

    while let Some((raw, line)) = lines.next() {
        let mut tokens = Tokenizer::new(raw.trim());
        if tokens.at_end() {
            continue;
        }

        let name = tokens.word().ok_or_else(|| ConfigError::syntax(line, "Key expected"))?;
        let option = O::from_name(name).ok_or_else(|| ConfigError::UnknownOption {
            name: name.to_string(),
            line,
        })?;

        if !option.is_repeatable() {
            let earlier = registry
                .param_lines(option)
                .into_iter()
                .chain(parsed.iter().filter(|(o, _)| *o == option).map(|(_, p)| p.line))
                .next();
            if let Some(first) = earlier {
                return Err(ConfigError::Redefined {
                    name: option.name(),
                    first,
                    line,
                });
            }
        }

        let param = if option.is_block() {
            if !tokens.skip_char('{') {
                return Err(ConfigError::syntax(line, "'{' expected"));
            }
            tokens.expect_end(line)?;
            parse_block(&mut lines, line)?
        } else {
            let value = tokens.quoted(line)?;
            tokens.expect_end(line)?;
            ConfigParam::new(value, line)
        };

        parsed.push((option, param));
    }

    let count = parsed.len();
    for (option, param) in parsed {
        registry.append(option, param);
    }
    tracing::debug!(count, "configuration parsed");
    Ok(())
}

fn parse_block<'a>(
    lines: &mut impl Iterator<Item = (&'a str, u32)>,
    start: u32,
) -> Result<ConfigParam> {
    let mut param = ConfigParam::new("", start);

    for (raw, line) in lines {
        let mut tokens = Tokenizer::new(raw.trim());
        if tokens.at_end() {
            continue;
        }

        if tokens.skip_char('}') {
            tokens.expect_end(line)?;
            return Ok(param);
        }

        let name = tokens.word().ok_or_else(|| ConfigError::syntax(line, "Name expected"))?;
        let value = tokens.quoted(line)?;
        tokens.expect_end(line)?;
        param.add_block_param(name, value, line);
    }

    Err(ConfigError::syntax(start, "Expected '}' before end-of-file for block starting"))
}

/// Cursor over one trimmed line.
struct Tokenizer<'a> {
    rest: &'a str,
}

impl<'a> Tokenizer<'a> {
    fn new(line: &'a str) -> Self {
        Self { rest: line }
    }

    /// True at end of line or at a comment.
    fn at_end(&self) -> bool {
        self.rest.is_empty() || self.rest.starts_with('#')
    }

    fn skip_whitespace(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn word(&mut self) -> Option<&'a str> {
        let end = self
            .rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(self.rest.len());
        if end == 0 {
            return None;
        }
        let (word, rest) = self.rest.split_at(end);
        self.rest = rest;
        self.skip_whitespace();
        Some(word)
    }

    fn skip_char(&mut self, ch: char) -> bool {
        match self.rest.strip_prefix(ch) {
            Some(rest) => {
                self.rest = rest;
                self.skip_whitespace();
                true
            }
            None => false,
        }
    }

    fn quoted(&mut self, line: u32) -> Result<String> {
        let Some(body) = self.rest.strip_prefix('"') else {
            return Err(ConfigError::syntax(line, "Quoted value expected"));
        };

        let mut value = String::new();
        let mut chars = body.char_indices();
        while let Some((i, c)) = chars.next() {
            match c {
                '"' => {
                    self.rest = &body[i + 1..];
                    if !self.rest.is_empty() && !self.rest.starts_with(char::is_whitespace) {
                        return Err(ConfigError::syntax(
                            line,
                            "Space expected after closing '\"'",
                        ));
                    }
                    self.skip_whitespace();
                    return Ok(value);
                }
                '\\' => match chars.next() {
                    Some((_, escaped)) => value.push(escaped),
                    None => break,
                },
                other => value.push(other),
            }
        }

        Err(ConfigError::syntax(line, "Closing '\"' expected"))
    }

    fn expect_end(&self, line: u32) -> Result<()> {
        if self.at_end() {
            Ok(())
        } else {
            Err(ConfigError::syntax(line, "Line not terminated properly"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::option::ConfigOption;

    fn parse(content: &str) -> Result<ConfigRegistry> {
        let mut registry = ConfigRegistry::new();
        parse_config_str(&mut registry, content)?;
        Ok(registry)
    }

    #[test]
    fn test_scalars_comments_and_blanks() {
        let registry = parse(
            "# daemon settings\n\
             \n\
             port \"6600\"   # default\n\
             bind_to_address \"localhost\"\n\
             bind_to_address \"/run/mpd/socket\"\n",
        )
        .unwrap();

        assert_eq!(registry.param_lines(ConfigOption::Port), vec![3]);
        assert_eq!(registry.param_lines(ConfigOption::BindToAddress), vec![4, 5]);
        assert_eq!(registry.get_string(ConfigOption::Port, ""), "6600");
    }

    #[test]
    fn test_block() {
        let registry = parse(
            "audio_output {\n\
             \ttype \"alsa\"\n\
             \n\
             \tname \"My \\\"DAC\\\"\"\n\
             }\n",
        )
        .unwrap();

        let output = registry.get_param(ConfigOption::AudioOutput).unwrap();
        assert_eq!(output.line, 1);
        let names: Vec<&str> = output
            .block_params()
            .iter()
            .map(|bp| bp.name.as_str())
            .collect();
        assert_eq!(names, vec!["type", "name"]);
        assert_eq!(output.block_params()[1].value, "My \"DAC\"");
        assert_eq!(output.block_params()[1].line, 4);
    }

    #[test]
    fn test_unknown_option() {
        let err = parse("prot \"6600\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownOption { ref name, line: 1 } if name == "prot"));
    }

    #[test]
    fn test_redefinition() {
        let err = parse("port \"1\"\n\nport \"2\"\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "config parameter 'port' is first defined on line 1 and redefined on line 3"
        );
    }

    #[test]
    fn test_redefinition_across_files() {
        let mut registry: ConfigRegistry = ConfigRegistry::new();
        parse_config_str(&mut registry, "port \"1\"\n").unwrap();
        assert!(matches!(
            parse_config_str(&mut registry, "port \"2\"\n"),
            Err(ConfigError::Redefined { first: 1, line: 1, .. })
        ));
    }

    #[test]
    fn test_syntax_errors() {
        for (input, line) in [
            ("port 6600\n", 1),
            ("port \"6600\n", 1),
            ("port \"6600\" extra\n", 1),
            ("port \"6600\"x\n", 1),
            ("\"port\"\n", 1),
            ("audio_output \"alsa\"\n", 1),
            ("port \"1\"\naudio_output {\ntype alsa\n}\n", 3),
            ("audio_output {\ntype \"alsa\"\n", 1),
        ] {
            let err = parse(input).unwrap_err();
            assert!(matches!(err, ConfigError::Syntax { .. }), "{input:?}: {err}");
            assert_eq!(err.line(), Some(line), "{input:?}");
        }
    }

    #[test]
    fn test_failed_parse_appends_nothing() {
        let mut registry: ConfigRegistry = ConfigRegistry::new();
        assert!(parse_config_str(&mut registry, "port \"1\"\nbogus \"x\"\n").is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let mut registry: ConfigRegistry = ConfigRegistry::new();
        let err =
            read_config_file(&mut registry, Path::new("/nonexistent/mpd.conf")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert_eq!(err.line(), None);
    }
}
