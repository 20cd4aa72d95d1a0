//! Render [`PromptComponents`] into the semi-structured text sent to the model.
//!
//! Output order is fixed: base prompt, role, task, format, then the context,
//! constraints and examples lists. Every part (each labelled line, each list
//! header, each bullet) is joined with a blank line. Empty components are
//! skipped; when nothing at all is populated the [`NO_COMPONENTS_MESSAGE`]
//! sentinel is returned instead of an empty string.

use crate::components::{PromptComponents, is_blank};

/// Returned by [`assemble`] when no component is populated.
pub const NO_COMPONENTS_MESSAGE: &str =
    "The user has not provided any specific prompt components yet.";

pub const BASE_PROMPT_LABEL: &str = "User's Initial Request:";
pub const ROLE_LABEL: &str = "User suggested role:";
pub const TASK_LABEL: &str = "User suggested task:";
pub const FORMAT_LABEL: &str = "User suggested format:";
pub const CONTEXT_HEADER: &str = "User provided context:";
pub const CONSTRAINTS_HEADER: &str = "User provided constraints:";
pub const EXAMPLES_HEADER: &str = "User provided examples:";

/// Accumulates rendered parts and joins them with double newlines.
struct Parts(Vec<String>);

impl Parts {
    fn labelled(mut self, label: &str, value: &str) -> Self {
        if !is_blank(value) {
            self.0.push(format!("{label} {value}"));
        }
        self
    }

    fn list(mut self, header: &str, items: &[String]) -> Self {
        if !items.is_empty() {
            self.0.push(header.to_string());
            self.0.extend(items.iter().map(|item| format!("- {item}")));
        }
        self
    }

    fn finish(self) -> String {
        if self.0.is_empty() {
            NO_COMPONENTS_MESSAGE.to_string()
        } else {
            self.0.join("\n\n")
        }
    }
}

/// Render the components into a single text block.
///
/// Pure function of its input.
///
/// ```
/// use promptcraft::{PromptComponents, assemble};
///
/// let c = PromptComponents::new()
///     .with_base_prompt("Write a poem")
///     .with_role("poet");
/// assert_eq!(
///     assemble(&c),
///     "User's Initial Request: Write a poem\n\nUser suggested role: poet"
/// );
/// ```
pub fn assemble(components: &PromptComponents) -> String {
    Parts(Vec::new())
        .labelled(BASE_PROMPT_LABEL, components.base_prompt())
        .labelled(ROLE_LABEL, components.role())
        .labelled(TASK_LABEL, components.task())
        .labelled(FORMAT_LABEL, components.format())
        .list(CONTEXT_HEADER, components.context())
        .list(CONSTRAINTS_HEADER, components.constraints())
        .list(EXAMPLES_HEADER, components.examples())
        .finish()
}
