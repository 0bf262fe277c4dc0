//! Configuration registry command-line front end.
//!
//! ```text
//! config file ─▶ global::read_config_file ─▶ ConfigRegistry
//!                                               │
//!              show / get / check ◀─────────────┘
//!                                               │
//!                                  usage audit ─┘ (warnings on stderr)
//! ```
//!
//! Malformed numeric and boolean values are fatal: they are logged and the
//! process exits with status 1.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use config_registry::config::{ConfigOption, ConfigRegistry, TildeNormalizer};
use config_registry::lifecycle::{global, report_fatal, Settings};
use config_registry::observability::logging;

#[derive(Parser)]
#[command(name = "config-registry")]
#[command(about = "Load, query and audit a daemon configuration file", long_about = None)]
struct Cli {
    /// Configuration file to load.
    config: PathBuf,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = logging::DEFAULT_DIRECTIVE)]
    log: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved daemon settings
    Show,
    /// Print every entry configured for one option
    Get {
        /// Option name as written in the file (e.g. bind_to_address)
        option: ConfigOption,
    },
    /// Resolve the settings and report unused block parameters (default)
    Check,
}

#[derive(Serialize)]
struct EntryView<'a> {
    line: u32,
    value: &'a str,
    block: Vec<BlockView<'a>>,
}

#[derive(Serialize)]
struct BlockView<'a> {
    line: u32,
    name: &'a str,
    value: &'a str,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(&cli.log);

    global::init();
    if let Err(e) = global::read_config_file(&cli.config) {
        report_fatal(&e);
    }
    let registry = global::get().ok_or("configuration registry not installed")?;

    match cli.command.unwrap_or(Commands::Check) {
        Commands::Show => {
            let settings = resolve(&registry);
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        Commands::Get { option } => {
            let entries = entries(&registry, option);
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        Commands::Check => {
            resolve(&registry);
            let unused = registry.check();
            println!("{}", serde_json::to_string_pretty(&unused)?);
        }
    }

    drop(registry);
    global::finish();
    Ok(())
}

fn resolve(registry: &ConfigRegistry) -> Settings {
    Settings::from_registry(registry, &TildeNormalizer::new()).unwrap_or_else(|e| report_fatal(&e))
}

fn entries(registry: &ConfigRegistry, option: ConfigOption) -> Vec<EntryView<'_>> {
    let mut entries = Vec::new();
    let mut last = None;

    while let Some(param) = registry.get_next_param(option, last) {
        let param_ref = param.param();
        entries.push(EntryView {
            line: param_ref.line,
            value: &param_ref.value,
            block: param_ref
                .block_params()
                .iter()
                .map(|bp| BlockView {
                    line: bp.line,
                    name: &bp.name,
                    value: &bp.value,
                })
                .collect(),
        });
        last = Some(param.cursor());
    }

    entries
}
