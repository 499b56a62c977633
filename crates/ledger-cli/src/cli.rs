//! CLI argument definitions for the ledger field mapper.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use ledger_cli::overrides::MappingOverride;

#[derive(Parser)]
#[command(
    name = "ledger-map",
    version,
    about = "Map general-ledger import columns onto catalog fields",
    long_about = "Map the column headers of a general-ledger (libro diario) export\n\
                  onto the fields of a destination catalog.\n\n\
                  Known ERP headers are mapped automatically from the catalog's alias table."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the destination fields of a catalog.
    Fields(FieldsArgs),

    /// Map column headers onto catalog fields.
    Map(MapArgs),

    /// Validate a catalog document.
    Check(CheckArgs),
}

#[derive(Parser)]
pub struct FieldsArgs {
    /// Catalog document to use instead of the built-in one.
    #[arg(long = "catalog", value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Only show fields whose key or label contains this text.
    #[arg(long = "search", value_name = "TERM")]
    pub search: Option<String>,
}

#[derive(Parser)]
pub struct MapArgs {
    /// Column headers of the import, in file order.
    #[arg(value_name = "HEADER", required = true)]
    pub headers: Vec<String>,

    /// Catalog document to use instead of the built-in one.
    #[arg(long = "catalog", value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Manual assignment applied after automatic mapping (repeatable).
    ///
    /// `--set "Moneda=currency"` maps a column; `--set "Moneda="` unmaps it.
    #[arg(long = "set", value_name = "SOURCE=KEY")]
    pub overrides: Vec<MappingOverride>,

    /// Start from an empty mapping instead of the alias table.
    #[arg(long = "no-auto")]
    pub no_auto: bool,

    /// Print the mapping as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Catalog document to validate.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn json_flag_describes_the_mapping() {
        let command = Cli::command();
        command.clone().debug_assert();
        let map = command.find_subcommand("map").expect("map subcommand");
        let json = map
            .get_arguments()
            .find(|arg| arg.get_id() == "json")
            .expect("json flag");
        let help = json.get_help().map(ToString::to_string).unwrap_or_default();
        assert!(help.contains("mapping as JSON"));
        assert!(!help.contains("applied"));
    }
}
