//! Handlers for the `examples` and `annotations` command groups.
//!
//! These only touch the context store, so they work without an API key.

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::{AnnotationsCommand, ExamplesCommand};
use crate::adapter::inbound::cli::output;
use crate::domain::context::{Annotation, Example};
use crate::domain::error::DomainError;
use crate::error::{Error, Result};
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;
use crate::port::inbound::context::ContextManager;

#[derive(Tabled)]
struct ExampleRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Question")]
    question: String,
    #[tabled(rename = "SQL")]
    sql: String,
}

impl From<&Example> for ExampleRow {
    fn from(example: &Example) -> Self {
        Self {
            id: example.id,
            question: example.question.clone(),
            sql: example.sql.clone(),
        }
    }
}

#[derive(Tabled)]
struct AnnotationRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Annotation")]
    text: String,
    #[tabled(rename = "Added")]
    added: String,
}

impl From<&Annotation> for AnnotationRow {
    fn from(annotation: &Annotation) -> Self {
        Self {
            id: annotation.id,
            text: annotation.text.clone(),
            added: annotation.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute an `examples` subcommand.
pub async fn execute_examples(command: &ExamplesCommand, config: &Config) -> Result<()> {
    let manager = bootstrap::build_context_manager(config)?;
    run_examples(manager.as_ref(), command).await
}

/// Execute an `annotations` subcommand.
pub async fn execute_annotations(command: &AnnotationsCommand, config: &Config) -> Result<()> {
    let manager = bootstrap::build_context_manager(config)?;
    run_annotations(manager.as_ref(), command).await
}

async fn run_examples(manager: &dyn ContextManager, command: &ExamplesCommand) -> Result<()> {
    match command {
        ExamplesCommand::Add { question, sql } => {
            let example = manager.add_example(question, sql).await?;
            if output::is_json() {
                output::json_output(serde_json::to_value(&example)?);
            } else {
                output::success(&format!("Added example {}", output::highlight(example.id)));
            }
        }
        ExamplesCommand::List => {
            let examples = manager.list_examples().await?;
            if output::is_json() {
                output::json_output(serde_json::to_value(&examples)?);
            } else if examples.is_empty() {
                output::note("No examples stored");
                output::hint("add one with `askdb examples add --question ... --sql ...`");
            } else {
                let rows: Vec<ExampleRow> = examples.iter().map(ExampleRow::from).collect();
                output::lines(&Table::new(rows).to_string());
            }
        }
        ExamplesCommand::Remove { id } => {
            if !manager.remove_example(*id).await? {
                return Err(Error::Domain(DomainError::NotFound {
                    kind: "example",
                    id: *id,
                }));
            }
            removed("example", *id);
        }
        ExamplesCommand::Clear => {
            let count = manager.clear_examples().await?;
            cleared("examples", count);
        }
    }
    Ok(())
}

async fn run_annotations(
    manager: &dyn ContextManager,
    command: &AnnotationsCommand,
) -> Result<()> {
    match command {
        AnnotationsCommand::Add { text } => {
            let annotation = manager.add_annotation(&text.join(" ")).await?;
            if output::is_json() {
                output::json_output(serde_json::to_value(&annotation)?);
            } else {
                output::success(&format!(
                    "Added annotation {}",
                    output::highlight(annotation.id)
                ));
            }
        }
        AnnotationsCommand::List => {
            let annotations = manager.list_annotations().await?;
            if output::is_json() {
                output::json_output(serde_json::to_value(&annotations)?);
            } else if annotations.is_empty() {
                output::note("No annotations stored");
            } else {
                let rows: Vec<AnnotationRow> =
                    annotations.iter().map(AnnotationRow::from).collect();
                output::lines(&Table::new(rows).to_string());
            }
        }
        AnnotationsCommand::Remove { id } => {
            if !manager.remove_annotation(*id).await? {
                return Err(Error::Domain(DomainError::NotFound {
                    kind: "annotation",
                    id: *id,
                }));
            }
            removed("annotation", *id);
        }
        AnnotationsCommand::Clear => {
            let count = manager.clear_annotations().await?;
            cleared("annotations", count);
        }
    }
    Ok(())
}

fn removed(kind: &str, id: i64) {
    if output::is_json() {
        output::json_output(json!({ "removed": id }));
    } else {
        output::success(&format!("Removed {kind} {id}"));
    }
}

fn cleared(kind: &str, count: usize) {
    if output::is_json() {
        output::json_output(json!({ "removed": count }));
    } else {
        output::success(&format!("Removed {count} {kind}"));
    }
}
