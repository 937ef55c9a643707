// template-editor-cli/src/cli.rs
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "Browse the exercise catalog and workout templates", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Print list output as CSV instead of a table
    #[arg(long, global = true)]
    pub export_csv: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every exercise in the configured catalog
    ListExercises,
    /// Case-insensitive substring search over exercise labels
    Search {
        /// Text to look for (e.g., "squat")
        query: String,
        /// Show at most N matches (defaults to the configured limit)
        #[arg(short, long, value_name = "N")]
        limit: Option<usize>,
    },
    /// List the templates from the config file
    ListTemplates,
    /// Show the exercises and sets of one template
    ShowTemplate {
        /// Template name (case-insensitive)
        name: String,
    },
    /// Show the path to the config file
    ConfigPath,
    /// Generate a shell completion script
    GenerateCompletion {
        /// Shell to generate for
        #[arg(value_enum)]
        shell: Shell,
    },
}

// Function to parse CLI arguments
pub fn parse_args() -> Cli {
    Cli::parse()
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn export_flag_is_global() {
        let cli = Cli::try_parse_from(["te", "search", "squat", "--export-csv", "-l", "3"]).unwrap();
        assert!(cli.export_csv);
        match cli.command {
            Commands::Search { query, limit } => {
                assert_eq!(query, "squat");
                assert_eq!(limit, Some(3));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
