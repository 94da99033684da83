use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "matgroup CLI - Deduplicate materials-database structure entries into structure-group documents.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Group ungrouped structure entries into deduplicated documents.
    Group(GroupArgs),
}

/// Arguments for the `group` subcommand.
#[derive(Args, Debug)]
pub struct GroupArgs {
    /// Path to the input JSON entry file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the output JSON document file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Path to a matcher configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Species to ignore during framework derivation and matching.
    /// Overrides the ignored species from the config file.
    #[arg(long = "ignored-species", value_name = "SYMBOL")]
    pub ignored_species: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn group_subcommand_parses_repeated_ignored_species() {
        let cli = Cli::parse_from([
            "matgroup",
            "group",
            "--input",
            "entries.json",
            "--output",
            "groups.json",
            "--ignored-species",
            "Li",
            "--ignored-species",
            "Mg",
        ]);
        let Commands::Group(args) = cli.command;
        assert_eq!(args.ignored_species, vec!["Li", "Mg"]);
        assert_eq!(args.input, PathBuf::from("entries.json"));
        assert!(args.config.is_none());
    }
}
