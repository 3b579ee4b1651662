//! One-shot story and lesson generation.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use serde_json::json;
use strum_macros::{Display, EnumIter, EnumString};

use crate::errors::GenerationError;
use crate::prompt_template::PromptTemplate;
use crate::providers::base::Provider;
use crate::session::SessionManager;

pub const STORY_ERROR_MESSAGE: &str =
    "Sorry, there was an error generating your story. Please try again.";
pub const LESSON_ERROR_MESSAGE: &str =
    "Sorry, there was an error generating your lesson. Please try again.";

lazy_static! {
    static ref HTML_FENCE: Regex = Regex::new(r"^```html\n|\n```$").unwrap();
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum StoryLength {
    #[default]
    Short,
    Long,
}

impl StoryLength {
    pub fn instruction(&self) -> &'static str {
        match self {
            StoryLength::Short => "Create a short, engaging story (about 100-150 words)",
            StoryLength::Long => {
                "Create a detailed, engaging story (between 400-500 words, approximately 20-30 lines)"
            }
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            StoryLength::Short => "100-150 words",
            StoryLength::Long => "20-30 lines",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum LessonLevel {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Serialize)]
struct StyleRule {
    element: &'static str,
    classes: &'static str,
}

const STYLE_GUIDE: &[StyleRule] = &[
    StyleRule { element: "Main title (h1)", classes: "text-4xl font-bold text-gray-800 mb-8" },
    StyleRule { element: "Section title (h2)", classes: "text-3xl font-bold text-gray-800 mb-6 mt-12" },
    StyleRule { element: "Subsection title (h3)", classes: "text-2xl font-semibold text-gray-700 mb-4 mt-8" },
    StyleRule { element: "Section container", classes: "bg-white rounded-xl border border-gray-200 p-6 mb-8 shadow-md" },
    StyleRule { element: "Paragraph", classes: "text-gray-700 mb-4 leading-relaxed" },
    StyleRule { element: "Unordered list (ul)", classes: "space-y-2 my-4 ml-6 list-disc" },
    StyleRule { element: "Ordered list (ol)", classes: "space-y-2 my-4 ml-6 list-decimal" },
    StyleRule { element: "Inline code", classes: "bg-gray-100 text-blue-700 px-1.5 py-0.5 rounded" },
    StyleRule { element: "Code block", classes: "font-mono text-blue-700 whitespace-pre-wrap bg-gray-50 p-4 rounded-lg my-4" },
    StyleRule { element: "Note", classes: "bg-blue-50 border-l-4 border-blue-500 pl-4 py-3 my-4 italic" },
    StyleRule { element: "Warning", classes: "bg-yellow-50 border-l-4 border-yellow-500 pl-4 py-3 my-4 italic" },
    StyleRule { element: "Tip", classes: "bg-green-50 border-l-4 border-green-500 pl-4 py-3 my-4 italic" },
    StyleRule { element: "Key term", classes: "text-blue-700 font-semibold" },
    StyleRule { element: "Exercise container", classes: "bg-gray-50 rounded-xl p-6 my-8 border border-gray-200" },
    StyleRule { element: "Table", classes: "w-full my-4 border-collapse" },
    StyleRule { element: "Table cell", classes: "p-3 border border-gray-300 text-gray-700" },
    StyleRule { element: "Quote", classes: "border-l-4 border-gray-400 pl-4 py-2 my-4 italic" },
    StyleRule { element: "Summary box", classes: "bg-gray-50 p-4 rounded-lg border border-gray-200 my-6" },
];

pub fn story_prompt(idea: &str, length: StoryLength) -> Result<String, GenerationError> {
    let idea = idea.trim();
    if idea.is_empty() {
        return Err(GenerationError::EmptyInput("story prompt"));
    }
    let context = json!({
        "instruction": length.instruction(),
        "idea": idea,
    });
    PromptTemplate::Story.render(&context).map_err(template_error)
}

pub fn lesson_prompt(topic: &str, level: Option<LessonLevel>) -> Result<String, GenerationError> {
    let topic = topic.trim();
    if topic.is_empty() {
        return Err(GenerationError::EmptyInput("lesson topic"));
    }
    let context = json!({
        "level": level.map(|l| l.to_string()),
        "topic": topic,
        "style_guide": STYLE_GUIDE,
    });
    PromptTemplate::Lesson.render(&context).map_err(template_error)
}

fn template_error(e: tera::Error) -> GenerationError {
    tracing::error!(error = %e, "failed to render prompt template");
    GenerationError::Template(e.to_string())
}

/// Strip the ```html fence the model sometimes wraps lessons in
pub fn clean_lesson_html(raw: &str) -> String {
    HTML_FENCE.replace_all(raw, "").into_owned()
}

/// Story and lesson front end over a [`SessionManager`]
pub struct Generator<'a, P: Provider> {
    manager: &'a SessionManager<P>,
}

impl<'a, P: Provider> Generator<'a, P> {
    pub fn new(manager: &'a SessionManager<P>) -> Self {
        Self { manager }
    }

    /// Raw story text, ready for [`render`](crate::render::render) in prose mode
    pub async fn story(&self, idea: &str, length: StoryLength) -> Result<String, GenerationError> {
        let prompt = story_prompt(idea, length)?;
        self.manager.generate_once(&prompt).await
    }

    /// Lesson HTML with any wrapping fence removed
    pub async fn lesson(
        &self,
        topic: &str,
        level: Option<LessonLevel>,
    ) -> Result<String, GenerationError> {
        let prompt = lesson_prompt(topic, level)?;
        let raw = self.manager.generate_once(&prompt).await?;
        Ok(clean_lesson_html(&raw))
    }
}
