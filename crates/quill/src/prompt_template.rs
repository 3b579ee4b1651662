use serde::Serialize;
use strum_macros::Display;
use tera::{Context, Error as TeraError, Tera};

/// Prompts bundled with the crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum PromptTemplate {
    Story,
    Lesson,
}

impl PromptTemplate {
    pub fn source(&self) -> &'static str {
        match self {
            PromptTemplate::Story => include_str!("prompts/story.md"),
            PromptTemplate::Lesson => include_str!("prompts/lesson.md"),
        }
    }

    pub fn render<T: Serialize>(&self, context: &T) -> Result<String, TeraError> {
        render_template(&self.to_string(), self.source(), context)
    }
}

/// Render `source` once under `name`. Output is never HTML-escaped.
pub fn render_template<T: Serialize>(
    name: &str,
    source: &str,
    context: &T,
) -> Result<String, TeraError> {
    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);
    tera.add_raw_template(name, source)?;
    tera.render(name, &Context::from_serialize(context)?)
}
