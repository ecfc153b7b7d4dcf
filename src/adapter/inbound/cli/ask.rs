//! Handler for the `ask` command.

use serde_json::Value;
use tabled::builder::Builder;

use crate::adapter::inbound::cli::command::AskArgs;
use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::sqlite::upload::UploadedDatabase;
use crate::domain::query::{QueryOutcome, Row};
use crate::error::{Error, Result};
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;
use crate::port::inbound::query::TextToSql;

/// Execute the ask command.
///
/// The query runs against a scratch copy, so the user's file is never
/// modified even if the model writes.
pub async fn execute(args: &AskArgs, config: &Config) -> Result<()> {
    let question = args.question();
    let db = open_copy(&args.db)?;
    let service = bootstrap::build_query_service(config)?;

    let pb = output::spinner(&format!("Asking {}", service.provider()));
    let outcome = match service.ask(db.path(), &question).await {
        Ok(outcome) => {
            output::spinner_success(&pb, "Query generated");
            outcome
        }
        Err(e) => {
            output::spinner_fail(&pb, "Generation failed");
            return Err(e);
        }
    };

    if output::is_json() {
        output::json_output(serde_json::to_value(&outcome)?);
    } else {
        print_outcome(&outcome);
    }

    match outcome.error {
        Some(message) => Err(Error::Query(message)),
        None => Ok(()),
    }
}

/// Copy a user database for one command, with a clear error if it is missing.
pub(super) fn open_copy(path: &std::path::Path) -> Result<UploadedDatabase> {
    if !path.is_file() {
        return Err(Error::InvalidDatabase(format!(
            "{}: no such file",
            path.display()
        )));
    }
    UploadedDatabase::copy_from(path)
}

fn print_outcome(outcome: &QueryOutcome) {
    output::section("SQL");
    output::lines(&outcome.sql);

    if outcome.error.is_some() {
        return;
    }

    output::section("Result");
    if outcome.result.is_empty() {
        output::note("(no rows)");
        return;
    }
    output::lines(&render_rows(&outcome.columns(), &outcome.result));
    output::field("Rows", outcome.result.len());
}

/// Render rows as a table with a header of column names.
fn render_rows(columns: &[&str], rows: &[Row]) -> String {
    let mut builder = Builder::default();
    builder.push_record(columns.iter().map(|c| (*c).to_string()));
    for row in rows {
        builder.push_record(row.values().map(cell_text));
    }
    builder.build().to_string()
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
