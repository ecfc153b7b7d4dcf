//! Handler for the `schema` command.

use serde_json::json;

use crate::adapter::inbound::cli::command::SchemaArgs;
use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::sqlite::engine::SqliteEngine;
use crate::error::Result;
use crate::port::outbound::database::DatabaseEngine;

/// Print the schema exactly as it is sent to the model.
pub async fn execute(args: &SchemaArgs) -> Result<()> {
    let db = super::ask::open_copy(&args.db)?;
    let schema = SqliteEngine::new().extract_schema(db.path()).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "schema",
            "schema": schema.render(),
            "tables": schema.tables,
        }));
        return Ok(());
    }

    output::section(&args.db.display().to_string());
    if schema.is_empty() {
        output::note("(no tables)");
        return Ok(());
    }
    output::lines(schema.render().trim_end());
    output::field("Tables", schema.tables.len());
    Ok(())
}
