//! Question pipeline service.
//!
//! Orchestrates one request end to end:
//!
//! ```text
//! file ──▶ DatabaseEngine::extract_schema ──▶ Schema::render
//!                                                  │
//! ExampleStore / AnnotationStore ──────────▶ Prompt::build
//!                                                  │
//!                                          Llm::complete
//!                                                  │
//!                                      clean_generated_sql
//!                                                  │
//!                                   DatabaseEngine::execute ──▶ QueryOutcome
//! ```

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::context::ContextService;
use crate::domain::context::{Annotation, Example};
use crate::domain::error::DomainError;
use crate::domain::prompt::{Prompt, PromptOptions};
use crate::domain::query::{clean_generated_sql, QueryOutcome, EMPTY_QUERY_MESSAGE};
use crate::domain::schema::Schema;
use crate::error::{Error, Result};
use crate::port::inbound::context::ContextManager;
use crate::port::inbound::query::TextToSql;
use crate::port::outbound::database::DatabaseEngine;
use crate::port::outbound::llm::Llm;
use crate::port::outbound::store::{AnnotationStore, ExampleStore};

/// Text-to-SQL service over pluggable engine, store and model.
pub struct QueryService<E, S> {
    engine: E,
    context: ContextService<S>,
    llm: Arc<dyn Llm>,
    options: PromptOptions,
}

impl<E, S> QueryService<E, S>
where
    E: DatabaseEngine,
    S: ExampleStore + AnnotationStore,
{
    #[must_use]
    pub fn new(engine: E, store: S, llm: Arc<dyn Llm>) -> Self {
        Self {
            engine,
            context: ContextService::new(store),
            llm,
            options: PromptOptions::default(),
        }
    }

    /// Cap how much stored context is sent with each prompt.
    #[must_use]
    pub fn with_options(mut self, options: PromptOptions) -> Self {
        self.options = options;
        self
    }

    /// Name of the configured model provider.
    #[must_use]
    pub fn provider(&self) -> &'static str {
        self.llm.name()
    }

    /// Build the prompt that would be sent for `question`.
    async fn prompt_for(&self, schema: &Schema, question: &str) -> Result<String> {
        let store = self.context.store();
        let examples = store.list_examples().await?;
        let annotations = store.list_annotations().await?;
        let schema_text = schema.render();

        let prompt = Prompt::new(&schema_text, question)
            .with_examples(&examples)
            .with_annotations(&annotations)
            .with_options(self.options)
            .build();

        debug!(
            examples = examples.len(),
            annotations = annotations.len(),
            prompt_len = prompt.len(),
            "Prompt assembled"
        );
        Ok(prompt)
    }
}

#[async_trait]
impl<E, S> TextToSql for QueryService<E, S>
where
    E: DatabaseEngine + 'static,
    S: ExampleStore + AnnotationStore + 'static,
{
    async fn ask(&self, database: &Path, question: &str) -> Result<QueryOutcome> {
        let question = question.trim();
        if question.is_empty() {
            return Err(DomainError::EmptyQuestion.into());
        }
        let started = Instant::now();

        let schema = self.engine.extract_schema(database).await?;
        info!(
            tables = schema.tables.len(),
            question_len = question.len(),
            "Schema extracted"
        );

        let prompt = self.prompt_for(&schema, question).await?;
        debug!(%prompt, "Sending prompt");

        let raw = self.llm.complete(&prompt).await?;
        let sql = clean_generated_sql(&raw);
        info!(provider = self.llm.name(), sql = %sql, "SQL generated");

        if sql.is_empty() {
            warn!(provider = self.llm.name(), "Model returned no query text");
            return Ok(QueryOutcome::failure(sql, EMPTY_QUERY_MESSAGE));
        }

        let outcome = match self.engine.execute(database, &sql).await {
            Ok(rows) => {
                info!(
                    rows = rows.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Query executed"
                );
                QueryOutcome::success(sql, rows)
            }
            Err(Error::Query(message)) => {
                warn!(error = %message, "Generated query failed");
                QueryOutcome::failure(sql, message)
            }
            Err(e) => {
                warn!(error = %e, "Generated query could not be run");
                QueryOutcome::failure(sql, e.to_string())
            }
        };
        Ok(outcome)
    }

    async fn schema(&self, database: &Path) -> Result<Schema> {
        self.engine.extract_schema(database).await
    }
}

/// Context management is delegated to the wrapped [`ContextService`].
#[async_trait]
impl<E, S> ContextManager for QueryService<E, S>
where
    E: DatabaseEngine + 'static,
    S: ExampleStore + AnnotationStore + 'static,
{
    async fn add_example(&self, question: &str, sql: &str) -> Result<Example> {
        self.context.add_example(question, sql).await
    }

    async fn list_examples(&self) -> Result<Vec<Example>> {
        self.context.list_examples().await
    }

    async fn remove_example(&self, id: i64) -> Result<bool> {
        self.context.remove_example(id).await
    }

    async fn clear_examples(&self) -> Result<usize> {
        self.context.clear_examples().await
    }

    async fn add_annotation(&self, text: &str) -> Result<Annotation> {
        self.context.add_annotation(text).await
    }

    async fn list_annotations(&self) -> Result<Vec<Annotation>> {
        self.context.list_annotations().await
    }

    async fn remove_annotation(&self, id: i64) -> Result<bool> {
        self.context.remove_annotation(id).await
    }

    async fn clear_annotations(&self) -> Result<usize> {
        self.context.clear_annotations().await
    }
}
