//! The structured inputs a user supplies to describe the prompt they want.
//!
//! [`PromptComponents`] is an immutable value assembled through consuming
//! `with_*` methods. Rendering it to text is the job of
//! [`assemble`](crate::assembler::assemble).

/// User-supplied prompt components.
///
/// All fields default to empty. The repeated fields (context, constraints,
/// examples) keep insertion order so that rendering is deterministic.
///
/// # Example
///
/// ```
/// use promptcraft::PromptComponents;
///
/// let components = PromptComponents::new()
///     .with_base_prompt("Write a poem")
///     .with_role("poet")
///     .with_context("   ") // blank entries are ignored
///     .with_constraint("Keep it under 12 lines");
///
/// assert_eq!(components.context().len(), 0);
/// assert_eq!(components.constraints(), ["Keep it under 12 lines"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptComponents {
    base_prompt: String,
    role: String,
    task: String,
    format: String,
    context: Vec<String>,
    constraints: Vec<String>,
    examples: Vec<String>,
}

impl PromptComponents {
    /// Create an empty set of components.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the user's initial request.
    pub fn with_base_prompt(mut self, base_prompt: impl Into<String>) -> Self {
        self.base_prompt = base_prompt.into();
        self
    }

    /// Set the suggested role for the model.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    /// Set the suggested task description.
    pub fn with_task(mut self, task: impl Into<String>) -> Self {
        self.task = task.into();
        self
    }

    /// Set the suggested output format.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Append a context entry. Blank entries are ignored.
    pub fn with_context(mut self, entry: impl AsRef<str>) -> Self {
        push_non_blank(&mut self.context, entry.as_ref());
        self
    }

    /// Append a constraint entry. Blank entries are ignored.
    pub fn with_constraint(mut self, entry: impl AsRef<str>) -> Self {
        push_non_blank(&mut self.constraints, entry.as_ref());
        self
    }

    /// Append an example entry. Blank entries are ignored.
    pub fn with_example(mut self, entry: impl AsRef<str>) -> Self {
        push_non_blank(&mut self.examples, entry.as_ref());
        self
    }

    /// Append every entry yielded by `entries` as context.
    pub fn with_contexts<I, S>(self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        entries.into_iter().fold(self, |c, e| c.with_context(e))
    }

    /// Append every entry yielded by `entries` as a constraint.
    pub fn with_constraints<I, S>(self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        entries.into_iter().fold(self, |c, e| c.with_constraint(e))
    }

    /// Append every entry yielded by `entries` as an example.
    pub fn with_examples<I, S>(self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        entries.into_iter().fold(self, |c, e| c.with_example(e))
    }

    pub fn base_prompt(&self) -> &str {
        &self.base_prompt
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn task(&self) -> &str {
        &self.task
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn context(&self) -> &[String] {
        &self.context
    }

    pub fn constraints(&self) -> &[String] {
        &self.constraints
    }

    pub fn examples(&self) -> &[String] {
        &self.examples
    }

    /// Whether no component would be rendered by the assembler.
    pub fn is_empty(&self) -> bool {
        is_blank(&self.base_prompt)
            && is_blank(&self.role)
            && is_blank(&self.task)
            && is_blank(&self.format)
            && self.context.is_empty()
            && self.constraints.is_empty()
            && self.examples.is_empty()
    }
}

pub(crate) fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn push_non_blank(list: &mut Vec<String>, entry: &str) {
    let entry = entry.trim();
    if !entry.is_empty() {
        list.push(entry.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty() {
        let c = PromptComponents::default();
        assert!(c.is_empty());
        assert_eq!(c.base_prompt(), "");
        assert!(c.context().is_empty());
    }

    #[test]
    fn blank_entries_never_change_length() {
        let c = PromptComponents::new()
            .with_context("")
            .with_context("  \t\n")
            .with_constraint("")
            .with_example(" ");
        assert_eq!(c.context().len(), 0);
        assert_eq!(c.constraints().len(), 0);
        assert_eq!(c.examples().len(), 0);
        assert!(c.is_empty());

        let c = c.with_context("real").with_context("");
        assert_eq!(c.context().len(), 1);
    }

    #[test]
    fn entries_are_trimmed_and_keep_order() {
        let c = PromptComponents::new().with_contexts(["  first ", "second", "", "third\n"]);
        assert_eq!(c.context(), ["first", "second", "third"]);
    }

    #[test]
    fn blank_scalar_counts_as_empty() {
        let c = PromptComponents::new().with_role("   ");
        assert!(c.is_empty());
        assert_eq!(c.role(), "   ");
    }

    #[test]
    fn any_populated_field_is_not_empty() {
        assert!(!PromptComponents::new().with_task("t").is_empty());
        assert!(!PromptComponents::new().with_example("e").is_empty());
    }
}
