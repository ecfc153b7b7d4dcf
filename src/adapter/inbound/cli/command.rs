//! Command-line interface definitions.
//!
//! Defines the CLI structure for askdb using `clap`: a server, one-shot
//! questions against a local file, and management of stored prompt context.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::paths;

/// Ask questions of a SQLite database in plain language
#[derive(Parser, Debug)]
#[command(name = "askdb")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to the configuration file.
    #[arg(short, long, global = true, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands for the askdb CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    Serve(ServeArgs),

    /// Ask a question about a database file
    Ask(AskArgs),

    /// Print the schema of a database file
    Schema(SchemaArgs),

    /// Manage example question/SQL pairs
    #[command(subcommand)]
    Examples(ExamplesCommand),

    /// Manage free-text notes about the data
    #[command(subcommand)]
    Annotations(AnnotationsCommand),

    /// Manage configuration
    #[command(subcommand, name = "config")]
    Configure(ConfigCommand),
}

/// Arguments for the `serve` subcommand.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Override the listen address (e.g. 0.0.0.0:8080).
    #[arg(long)]
    pub bind: Option<String>,
}

/// Arguments for the `ask` subcommand.
#[derive(Parser, Debug)]
pub struct AskArgs {
    /// SQLite database to query. Queries run on a temporary copy.
    #[arg(long)]
    pub db: PathBuf,

    /// The question, in plain language.
    #[arg(required = true, num_args = 1..)]
    pub question: Vec<String>,
}

impl AskArgs {
    #[must_use]
    pub fn question(&self) -> String {
        self.question.join(" ")
    }
}

/// Arguments for the `schema` subcommand.
#[derive(Parser, Debug)]
pub struct SchemaArgs {
    /// SQLite database to inspect.
    #[arg(long)]
    pub db: PathBuf,
}

/// Subcommands for `askdb examples`.
#[derive(Subcommand, Debug)]
pub enum ExamplesCommand {
    /// Store a question with the SQL that answers it.
    Add {
        #[arg(long)]
        question: String,
        #[arg(long)]
        sql: String,
    },
    /// List stored examples.
    List,
    /// Remove one example by ID.
    Remove { id: i64 },
    /// Remove every example.
    Clear,
}

/// Subcommands for `askdb annotations`.
#[derive(Subcommand, Debug)]
pub enum AnnotationsCommand {
    /// Store a note about the data.
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// List stored annotations.
    List,
    /// Remove one annotation by ID.
    Remove { id: i64 },
    /// Remove every annotation.
    Clear,
}

/// Subcommands for `askdb config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Generate a new configuration file from template.
    Init(ConfigInitArgs),
    /// Display the effective configuration with defaults applied.
    Show,
    /// Validate a configuration file for correctness.
    Validate,
}

/// Arguments for the `config init` subcommand.
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Output path for the generated configuration file. Defaults to `--config`.
    pub path: Option<PathBuf>,
    /// Overwrite the file if it already exists.
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_command() {
        let cli = Cli::try_parse_from(["askdb", "serve"]).unwrap();
        if let Commands::Serve(args) = cli.command {
            assert!(args.bind.is_none());
        } else {
            panic!("Expected Serve command");
        }
    }

    #[test]
    fn test_serve_with_bind() {
        let cli = Cli::try_parse_from(["askdb", "serve", "--bind", "0.0.0.0:8080"]).unwrap();
        if let Commands::Serve(args) = cli.command {
            assert_eq!(args.bind.as_deref(), Some("0.0.0.0:8080"));
        } else {
            panic!("Expected Serve command");
        }
    }

    #[test]
    fn test_ask_joins_question_words() {
        let cli = Cli::try_parse_from([
            "askdb", "ask", "--db", "shop.sqlite", "how", "many", "orders?",
        ])
        .unwrap();
        if let Commands::Ask(args) = cli.command {
            assert_eq!(args.db, PathBuf::from("shop.sqlite"));
            assert_eq!(args.question(), "how many orders?");
        } else {
            panic!("Expected Ask command");
        }
    }

    #[test]
    fn test_ask_requires_db_and_question() {
        assert!(Cli::try_parse_from(["askdb", "ask", "question"]).is_err());
        assert!(Cli::try_parse_from(["askdb", "ask", "--db", "x.sqlite"]).is_err());
    }

    #[test]
    fn test_examples_add() {
        let cli = Cli::try_parse_from([
            "askdb",
            "examples",
            "add",
            "--question",
            "how many users",
            "--sql",
            "SELECT COUNT(*) FROM users",
        ])
        .unwrap();
        if let Commands::Examples(ExamplesCommand::Add { question, sql }) = cli.command {
            assert_eq!(question, "how many users");
            assert_eq!(sql, "SELECT COUNT(*) FROM users");
        } else {
            panic!("Expected Examples Add command");
        }
    }

    #[test]
    fn test_examples_remove_requires_numeric_id() {
        assert!(Cli::try_parse_from(["askdb", "examples", "remove", "abc"]).is_err());
        let cli = Cli::try_parse_from(["askdb", "examples", "remove", "7"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Examples(ExamplesCommand::Remove { id: 7 })
        ));
    }

    #[test]
    fn test_annotations_add_joins_words() {
        let cli =
            Cli::try_parse_from(["askdb", "annotations", "add", "amounts", "are", "cents"]).unwrap();
        if let Commands::Annotations(AnnotationsCommand::Add { text }) = cli.command {
            assert_eq!(text.join(" "), "amounts are cents");
        } else {
            panic!("Expected Annotations Add command");
        }
    }

    #[test]
    fn test_config_commands() {
        let cli = Cli::try_parse_from(["askdb", "config", "show"]).unwrap();
        assert!(matches!(cli.command, Commands::Configure(ConfigCommand::Show)));

        let cli = Cli::try_parse_from(["askdb", "config", "init", "--force"]).unwrap();
        if let Commands::Configure(ConfigCommand::Init(args)) = cli.command {
            assert!(args.force);
            assert!(args.path.is_none());
        } else {
            panic!("Expected Config Init command");
        }
    }

    #[test]
    fn test_config_flag_default_and_override() {
        let cli = Cli::try_parse_from(["askdb", "config", "validate"]).unwrap();
        assert_eq!(cli.config, paths::default_config());

        let cli = Cli::try_parse_from(["askdb", "config", "validate", "-c", "custom.toml"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("custom.toml"));
    }

    #[test]
    fn test_unknown_command_fails() {
        let result = Cli::try_parse_from(["askdb", "unknown"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_color_value() {
        let result = Cli::try_parse_from(["askdb", "--color", "invalid", "serve"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_subcommand() {
        let result = Cli::try_parse_from(["askdb"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_before_command() {
        let cli = Cli::try_parse_from(["askdb", "--json", "--quiet", "-vv", "serve"]).unwrap();
        assert!(cli.json);
        assert!(cli.quiet);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_global_flags_after_command() {
        let cli = Cli::try_parse_from(["askdb", "examples", "list", "--json", "-v"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 1);
    }
}
