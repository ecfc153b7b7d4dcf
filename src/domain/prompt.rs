//! Prompt assembly.
//!
//! The prompt is plain text: the rendered schema, then any stored
//! annotations and examples, then the user's question. Sections without
//! content are left out so the bare form stays
//! `Given this SQLite schema:\n\n{schema}\n\nWrite a SQL query for: {question}`.

use std::fmt::Write;

use super::context::{Annotation, Example};

/// Limits on how much stored context goes into a prompt.
///
/// `None` means unlimited. When a limit applies, the most recently added
/// entries are kept and their original order is preserved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PromptOptions {
    pub max_examples: Option<usize>,
    pub max_annotations: Option<usize>,
}

/// Builder for the text sent to the model.
#[derive(Debug, Clone, Copy)]
pub struct Prompt<'a> {
    schema: &'a str,
    question: &'a str,
    examples: &'a [Example],
    annotations: &'a [Annotation],
    options: PromptOptions,
}

impl<'a> Prompt<'a> {
    #[must_use]
    pub fn new(schema: &'a str, question: &'a str) -> Self {
        Self {
            schema,
            question,
            examples: &[],
            annotations: &[],
            options: PromptOptions::default(),
        }
    }

    #[must_use]
    pub fn with_examples(mut self, examples: &'a [Example]) -> Self {
        self.examples = examples;
        self
    }

    #[must_use]
    pub fn with_annotations(mut self, annotations: &'a [Annotation]) -> Self {
        self.annotations = annotations;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: PromptOptions) -> Self {
        self.options = options;
        self
    }

    /// Assemble the final prompt text.
    #[must_use]
    pub fn build(&self) -> String {
        let mut sections = vec![format!("Given this SQLite schema:\n\n{}", self.schema)];

        let annotations = tail(self.annotations, self.options.max_annotations);
        if !annotations.is_empty() {
            let mut section = String::from("Here are some notes about the data:");
            for annotation in annotations {
                let _ = write!(section, "\n- {}", annotation.text);
            }
            sections.push(section);
        }

        let examples = tail(self.examples, self.options.max_examples);
        if !examples.is_empty() {
            let mut section = String::from("Here are some example questions and their SQL queries:");
            for example in examples {
                let _ = write!(
                    section,
                    "\n\nQuestion: {}\nSQL: {}",
                    example.question, example.sql
                );
            }
            sections.push(section);
        }

        sections.push(format!("Write a SQL query for: {}", self.question));
        sections.join("\n\n")
    }
}

fn tail<T>(items: &[T], limit: Option<usize>) -> &[T] {
    match limit {
        Some(limit) if limit < items.len() => &items[items.len() - limit..],
        _ => items,
    }
}
