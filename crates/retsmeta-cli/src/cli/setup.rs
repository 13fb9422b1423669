use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "retsmeta",
    bin_name = "retsmeta",
    version,
    disable_help_subcommand = true
)]
#[command(about = "RETS metadata formatter and DMQL compiler", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file, layered over the user config
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Format a JSON metadata document
    #[command(alias = "f", display_order = 1)]
    Format(FormatArgs),

    /// List the declared attributes of a metadata kind
    #[command(alias = "cols", display_order = 2)]
    Columns {
        /// Kind name (e.g. Class, LookupType, METADATA wire name)
        kind: String,

        /// Show the strict attribute map
        #[arg(long)]
        strict: bool,
    },

    /// Compile a JSON clause tree to SQL
    #[command(display_order = 3)]
    Sql {
        /// Path to the clause JSON
        clause: PathBuf,
    },

    /// Watch a file and report modifications
    #[command(display_order = 4)]
    Watch {
        /// File to watch
        file: PathBuf,

        /// Seconds between checks (defaults to poll_interval_secs)
        #[arg(long, short = 'i')]
        interval: Option<u64>,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct FormatArgs {
    /// Path to the metadata document
    pub document: PathBuf,

    /// Output mode: compact or standard-xml (defaults to the configured format)
    #[arg(long, short = 'm')]
    pub mode: Option<String>,

    /// Version stamped into headers (defaults to metadata_version)
    #[arg(long = "metadata-version", value_name = "VERSION")]
    pub metadata_version: Option<String>,

    /// RFC 3339 date stamped into headers (defaults to now)
    #[arg(long)]
    pub date: Option<String>,

    /// Resource header value for top-level sections
    #[arg(long)]
    pub resource: Option<String>,

    /// Class header value for top-level sections
    #[arg(long)]
    pub class: Option<String>,

    /// Lookup header value for top-level sections
    #[arg(long)]
    pub lookup: Option<String>,

    /// Fail on attribute values that violate their grammar
    #[arg(long)]
    pub strict: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_format_flags() {
        let cli = Cli::parse_from([
            "retsmeta",
            "format",
            "doc.json",
            "--mode",
            "standard-xml",
            "--metadata-version",
            "1.00.001",
            "--resource",
            "Property",
            "-v",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Format(args) => {
                assert_eq!(args.document, PathBuf::from("doc.json"));
                assert_eq!(args.mode.as_deref(), Some("standard-xml"));
                assert_eq!(args.metadata_version.as_deref(), Some("1.00.001"));
                assert_eq!(args.resource.as_deref(), Some("Property"));
                assert!(!args.strict);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::parse_from(["retsmeta", "columns", "Class", "--config", "my.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("my.toml")));
        assert!(matches!(cli.command, Commands::Columns { strict: false, .. }));
    }
}
