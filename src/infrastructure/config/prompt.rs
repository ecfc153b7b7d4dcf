//! Prompt assembly limits.

use serde::Deserialize;

use crate::domain::prompt::PromptOptions;

/// How much stored context goes into each prompt.
///
/// Unset limits include everything. When set, the most recent entries win.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PromptConfig {
    #[serde(default)]
    pub max_examples: Option<usize>,
    #[serde(default)]
    pub max_annotations: Option<usize>,
}

impl PromptConfig {
    #[must_use]
    pub fn options(&self) -> PromptOptions {
        PromptOptions {
            max_examples: self.max_examples,
            max_annotations: self.max_annotations,
        }
    }
}
