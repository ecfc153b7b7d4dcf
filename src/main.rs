use std::process::ExitCode;

use clap::Parser;

use askdb::adapter::inbound::cli::command::Cli;
use askdb::adapter::inbound::cli::output::{self, OutputConfig};
use askdb::adapter::inbound::cli::{diagnostic, run};

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet), &cli.color);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if output::is_json() {
                output::error(&e.to_string());
            } else {
                eprintln!("{:?}", diagnostic::report(e, &cli.config));
            }
            ExitCode::FAILURE
        }
    }
}
