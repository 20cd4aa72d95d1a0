//! Decoding of the `application/x-www-form-urlencoded` prompt form.

use promptcraft::PromptComponents;
use serde::Serialize;

/// Raw values submitted by the browser, kept for echoing back into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormSubmission {
    pub base_prompt: String,
    pub role: String,
    pub task: String,
    pub format: String,
    pub context: Vec<String>,
    pub constraint: Vec<String>,
    pub example: Vec<String>,
}

impl FormSubmission {
    /// Decode a form body. Unknown keys are ignored and missing keys are
    /// empty. For a scalar field submitted more than once the last value wins.
    pub fn parse(body: &[u8]) -> Self {
        let mut form = Self::default();
        for (key, value) in url::form_urlencoded::parse(body) {
            let value = value.into_owned();
            match key.as_ref() {
                "base_prompt" => form.base_prompt = value,
                "role" => form.role = value,
                "task" => form.task = value,
                "format" => form.format = value,
                "context[]" => form.context.push(value),
                "constraint[]" => form.constraint.push(value),
                "example[]" => form.example.push(value),
                _ => {}
            }
        }
        form
    }

    /// Build fresh components for this request. Blank list entries are dropped.
    pub fn to_components(&self) -> PromptComponents {
        PromptComponents::new()
            .with_base_prompt(&self.base_prompt)
            .with_role(&self.role)
            .with_task(&self.task)
            .with_format(&self.format)
            .with_contexts(&self.context)
            .with_constraints(&self.constraint)
            .with_examples(&self.example)
    }
}
