//! HTML rendering of the form page.

use minijinja::Environment;
use promptcraft::Enhancement;
use serde::Serialize;
use thiserror::Error;

use crate::form::FormSubmission;

const INDEX_TEMPLATE: &str = "index.html";

#[derive(Debug, Error)]
#[error("failed to render page: {0}")]
pub struct RenderError(#[from] minijinja::Error);

#[derive(Serialize)]
struct ListField<'a> {
    key: &'static str,
    title: &'static str,
    noun: &'static str,
    entries: &'a [String],
}

#[derive(Serialize)]
struct PageView<'a> {
    form: &'a FormSubmission,
    lists: [ListField<'a>; 3],
    submitted: bool,
    result: Option<&'a Enhancement>,
}

/// Renders the single page of the app. The `.html` template name turns on
/// HTML auto-escaping for every interpolated value.
pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut env = Environment::new();
        env.add_template(INDEX_TEMPLATE, include_str!("../templates/index.html"))?;
        Ok(Self { env })
    }

    /// Render the page. `result` is `None` for the initial, empty form.
    pub fn render(
        &self,
        form: &FormSubmission,
        result: Option<&Enhancement>,
    ) -> Result<String, RenderError> {
        let view = PageView {
            form,
            lists: [
                ListField {
                    key: "context",
                    title: "Context",
                    noun: "context",
                    entries: &form.context,
                },
                ListField {
                    key: "constraint",
                    title: "Constraints",
                    noun: "constraint",
                    entries: &form.constraint,
                },
                ListField {
                    key: "example",
                    title: "Examples",
                    noun: "example",
                    entries: &form.example,
                },
            ],
            submitted: result.is_some(),
            result,
        };
        Ok(self.env.get_template(INDEX_TEMPLATE)?.render(&view)?)
    }
}
