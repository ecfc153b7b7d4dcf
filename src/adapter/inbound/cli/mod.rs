//! Command-line interface.
//!
//! [`run`] dispatches a parsed [`command::Cli`] to the handler modules.

pub mod ask;
pub mod command;
pub mod config;
pub mod context;
pub mod diagnostic;
pub mod output;
pub mod paths;
pub mod schema;
pub mod serve;

use command::{Cli, Commands, ConfigCommand};

use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Log level for one-shot commands, raised by `-v`.
fn command_log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize logging for `cli`.
///
/// The server logs at the configured level. Other commands stay quiet unless
/// asked, so their stdout is just the result.
fn init_logging(cli: &Cli, config: &Config) {
    let logging = match (&cli.command, cli.verbose) {
        (Commands::Serve(_), 0) => config.logging.clone(),
        (_, verbose) => config.logging.with_level(command_log_level(verbose)),
    };
    logging.init();
}

/// Run the selected command.
///
/// # Errors
///
/// Returns the command's error for the caller to report.
pub async fn run(cli: &Cli) -> Result<()> {
    // `config` commands handle their own file so a broken file can be replaced.
    if let Commands::Configure(command) = &cli.command {
        return match command {
            ConfigCommand::Init(args) => {
                config::execute_init(args.path.as_deref().unwrap_or(cli.config.as_path()), args.force)
            }
            ConfigCommand::Show => config::execute_show(&cli.config),
            ConfigCommand::Validate => config::execute_validate(&cli.config),
        };
    }

    let settings = Config::load_or_default(&cli.config)?;
    init_logging(cli, &settings);

    match &cli.command {
        Commands::Serve(args) => serve::execute(args, &settings).await,
        Commands::Ask(args) => ask::execute(args, &settings).await,
        Commands::Schema(args) => schema::execute(args).await,
        Commands::Examples(command) => context::execute_examples(command, &settings).await,
        Commands::Annotations(command) => {
            context::execute_annotations(command, &settings).await
        }
        Commands::Configure(_) => Ok(()),
    }
}
