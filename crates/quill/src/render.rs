//! Turns raw model output into markup that is safe to inject into a page, and
//! turns either form back into plain text for the clipboard.
//!
//! Rendering works on fenced segments. Text is split on triple-backtick
//! fences; even segments are prose, odd segments are code. Prose gets the
//! lightweight markdown treatment (speaker labels, emphasis, line breaks,
//! asides), code is wrapped in a `<pre>` block untouched. Any segment holding
//! a tag opener (`<` followed by a letter, `/`, `!` or `?`) is escaped before
//! it is emitted, closed or not, so the only live markup in the output is the
//! markup this module writes itself.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

pub const SPEAKER_CLASS: &str = "speaker";
pub const EMPHASIS_CLASS: &str = "emphasis";
pub const ASIDE_CLASS: &str = "aside";
pub const CODE_BLOCK_CLASS: &str = "code-block";

const LINE_BREAK: &str = "<br />";

lazy_static! {
    static ref FENCE: Regex = Regex::new(r"```(?:(\w+)?\n)?").unwrap();
    static ref OPENING_FENCE: Regex = Regex::new(r"```(?:\w+)?\n").unwrap();
    static ref TAG: Regex = Regex::new(r"<[^>]+>").unwrap();
    static ref TAG_OPENER: Regex = Regex::new(r"<[A-Za-z/!?]").unwrap();
    static ref LINE_BREAK_TAG: Regex = Regex::new(r"<br\s*/?>").unwrap();
    static ref SPEAKER_LABEL: Regex = Regex::new(r"\*\*([^*\n]*?):\*\*").unwrap();
    static ref EMPHASIS: Regex = Regex::new(r"\*\*([^*]+)\*\*").unwrap();
    static ref ASIDE: Regex = Regex::new(r"\(([^()<>]*?)\)").unwrap();
}

/// Which of the optional prose treatments to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderMode {
    /// Wrap `(...)` runs as stage directions
    pub aside_styling: bool,
    /// Style `**Name:**` as a speaker label rather than plain emphasis
    pub speaker_label_styling: bool,
    /// Escape prose that contains tag-like text
    pub escape_prose_markup: bool,
}

impl RenderMode {
    /// Chat replies and scripted dialogue
    pub const fn dialogue() -> Self {
        Self {
            aside_styling: true,
            speaker_label_styling: true,
            escape_prose_markup: true,
        }
    }

    /// Stories and other running text
    pub const fn prose() -> Self {
        Self {
            aside_styling: false,
            speaker_label_styling: false,
            escape_prose_markup: true,
        }
    }
}

impl Default for RenderMode {
    fn default() -> Self {
        Self::dialogue()
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Segment<'a> {
    Prose(&'a str),
    Code {
        content: &'a str,
        language: Option<&'a str>,
    },
}

/// Split on fences. A fence opens code when it follows prose and closes it
/// otherwise, so an unclosed fence leaves the tail of the text as code.
fn segments(raw: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut language = None;
    let mut in_code = false;

    for fence in FENCE.captures_iter(raw) {
        let whole = fence.get(0).expect("capture group 0 always matches");
        let text = &raw[start..whole.start()];
        segments.push(if in_code {
            Segment::Code {
                content: text,
                language,
            }
        } else {
            Segment::Prose(text)
        });
        language = fence.get(1).map(|m| m.as_str());
        start = whole.end();
        in_code = !in_code;
    }

    let tail = &raw[start..];
    segments.push(if in_code {
        Segment::Code {
            content: tail,
            language,
        }
    } else {
        Segment::Prose(tail)
    });
    segments
}

/// Replace the three HTML metacharacters with entities
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn looks_like_markup(text: &str) -> bool {
    TAG_OPENER.is_match(text)
}

fn render_prose(text: &str, mode: RenderMode) -> String {
    let mut out = if mode.escape_prose_markup && looks_like_markup(text) {
        escape_html(text)
    } else {
        text.to_string()
    };

    if mode.speaker_label_styling {
        out = SPEAKER_LABEL
            .replace_all(&out, |caps: &Captures| {
                format!(r#"<span class="{SPEAKER_CLASS}">{}:</span>"#, &caps[1])
            })
            .into_owned();
    }
    out = EMPHASIS
        .replace_all(&out, |caps: &Captures| {
            format!(r#"<span class="{EMPHASIS_CLASS}">{}</span>"#, &caps[1])
        })
        .into_owned();

    out = out.replace('\n', LINE_BREAK);

    if mode.aside_styling {
        out = ASIDE
            .replace_all(&out, |caps: &Captures| {
                format!(r#"<span class="{ASIDE_CLASS}">({})</span>"#, &caps[1])
            })
            .into_owned();
    }
    out
}

fn render_code(content: &str, language: Option<&str>) -> String {
    let body = if looks_like_markup(content) {
        escape_html(content)
    } else {
        content.to_string()
    };
    match language {
        Some(language) => format!(
            r#"<pre class="{CODE_BLOCK_CLASS}" data-language="{language}">{body}</pre>"#
        ),
        None => format!(r#"<pre class="{CODE_BLOCK_CLASS}">{body}</pre>"#),
    }
}

/// Render raw model output as markup
pub fn render(raw: &str, mode: RenderMode) -> String {
    segments(raw)
        .into_iter()
        .map(|segment| match segment {
            Segment::Prose(text) => render_prose(text, mode),
            Segment::Code { content, language } => render_code(content, language),
        })
        .collect()
}

/// Recover readable plain text from raw output or from rendered markup.
///
/// Styling is lost; text content is not. Entities are always decoded, so a
/// literal `&lt;` typed into tag-free prose comes back as `<`.
pub fn to_clean_text(text: &str) -> String {
    let text = LINE_BREAK_TAG.replace_all(text, "\n");
    let text = OPENING_FENCE.replace_all(&text, "");
    let text = text.replace("```", "");
    let text = EMPHASIS.replace_all(&text, "$1");
    let text = TAG.replace_all(&text, "");
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(render("", RenderMode::dialogue()), "");
        assert_eq!(render("", RenderMode::prose()), "");
        assert_eq!(to_clean_text(""), "");
    }

    #[test]
    fn test_plain_text_is_unchanged() {
        for text in [
            "Hello world",
            "Tom & Jerry cost 3 < 4 dollars",
            "A single * star and a lone ` tick",
            "Trailing colon: yes",
        ] {
            assert_eq!(render(text, RenderMode::prose()), text);
        }
        assert_eq!(render("No asides here", RenderMode::dialogue()), "No asides here");
    }

    #[test]
    fn test_newlines_become_breaks() {
        assert_eq!(
            render("one\ntwo\n\nthree", RenderMode::prose()),
            "one<br />two<br /><br />three"
        );
    }

    #[test]
    fn test_dialogue_scenario() {
        let out = render("**Alice:** (whispers) Hello\nworld", RenderMode::dialogue());
        assert_eq!(
            out,
            r#"<span class="speaker">Alice:</span> <span class="aside">(whispers)</span> Hello<br />world"#
        );
    }

    #[test]
    fn test_prose_mode_skips_dialogue_styling() {
        let out = render("**Alice:** (whispers) Hello", RenderMode::prose());
        assert_eq!(out, r#"<span class="emphasis">Alice:</span> (whispers) Hello"#);
    }

    #[test]
    fn test_emphasis() {
        assert_eq!(
            render("A **bold** move", RenderMode::dialogue()),
            r#"A <span class="emphasis">bold</span> move"#
        );
    }

    #[test]
    fn test_code_with_markup_is_escaped() {
        let raw = "Here:\n```html\n<div class=\"x\">Hi & bye</div>\n```\nDone";
        let out = render(raw, RenderMode::dialogue());
        assert!(out.contains("&lt;div class=\"x\"&gt;Hi &amp; bye&lt;/div&gt;"));
        assert!(!out.contains("<div"));
        assert!(out.starts_with("Here:<br /><pre class=\"code-block\" data-language=\"html\">"));
        assert!(out.ends_with("</pre>Done"));
    }

    #[test]
    fn test_code_without_markup_is_verbatim() {
        let raw = "```\nfn main() {\n    let x = a && b;\n}\n```";
        let out = render(raw, RenderMode::dialogue());
        assert_eq!(
            out,
            "<pre class=\"code-block\">fn main() {\n    let x = a && b;\n}\n</pre>"
        );
    }

    #[test]
    fn test_code_keeps_markdown_markers() {
        let out = render("```\nlet s = \"**x**\"; (y)\n```", RenderMode::dialogue());
        assert!(out.contains("\"**x**\"; (y)"));
    }

    #[test]
    fn test_unclosed_fence_leaves_code_tail() {
        let out = render("intro\n```python\nprint('hi')\n", RenderMode::prose());
        assert_eq!(
            out,
            "intro<br /><pre class=\"code-block\" data-language=\"python\">print('hi')\n</pre>"
        );
    }

    #[test]
    fn test_segments_alternate() {
        let parts = segments("a```rust\nb```c```d");
        assert_eq!(
            parts,
            vec![
                Segment::Prose("a"),
                Segment::Code {
                    content: "b",
                    language: Some("rust")
                },
                Segment::Prose("c"),
                Segment::Code {
                    content: "d",
                    language: None
                },
            ]
        );
    }

    #[test]
    fn test_prose_markup_is_escaped() {
        let out = render("Try <script>alert(1)</script> now", RenderMode::prose());
        assert_eq!(out, "Try &lt;script&gt;alert(1)&lt;/script&gt; now");
    }

    #[test]
    fn test_clean_text_from_raw() {
        let raw = "**Note:** run this\n```bash\necho &lt;hi&gt;\n```\ndone";
        assert_eq!(to_clean_text(raw), "Note: run this\necho <hi>\ndone");
    }

    #[test]
    fn test_clean_text_recovers_rendered_content() {
        for (raw, mode, clean) in [
            (
                "**Alice:** (whispers) Hello\nworld",
                RenderMode::dialogue(),
                "Alice: (whispers) Hello\nworld",
            ),
            (
                "Use **care** with 3 < 4 & 5 > 2",
                RenderMode::prose(),
                "Use care with 3 < 4 & 5 > 2",
            ),
            (
                "Before\n```html\n<p>Hi</p>\n```\nAfter",
                RenderMode::dialogue(),
                "Before\n<p>Hi</p>\nAfter",
            ),
            ("Inline <b>tag</b> text", RenderMode::prose(), "Inline <b>tag</b> text"),
        ] {
            assert_eq!(to_clean_text(&render(raw, mode)), clean, "round trip of {raw:?}");
        }
    }

    #[test]
    fn test_closing_fence_does_not_swallow_text() {
        let out = render("```
x
```after", RenderMode::prose());
        assert_eq!(out, "<pre class=\"code-block\">x\n</pre>after");
    }

    lazy_static! {
        static ref OWN_MARKUP: Regex = Regex::new(
            r#"<br />|<span class="(?:speaker|emphasis|aside)">|</span>|<pre class="code-block"(?: data-language="\w+")?>|</pre>"#
        )
        .unwrap();
    }

    fn assert_only_own_markup(out: &str) {
        let stripped = OWN_MARKUP.replace_all(out, "");
        assert!(!stripped.contains('<'), "foreign markup in {out:?}");
    }

    #[test]
    fn test_unterminated_tags_are_escaped() {
        for raw in [
            "<img src=x onerror=alert(1)\nhi",
            "**<img src=x onerror=alert(1) :**",
            "<img src=x onerror=alert(1) **b**",
            "```\n<img src=x onerror=alert`1` \n```",
            "before ```html\n</pre><script\n``` after",
            "<!-- open comment (aside)",
        ] {
            for mode in [RenderMode::dialogue(), RenderMode::prose()] {
                let out = render(raw, mode);
                assert_only_own_markup(&out);
                assert!(out.contains("&lt;"), "expected escaping in {out:?}");
            }
        }
    }

    #[test]
    fn test_half_open_tag_in_prose() {
        assert_eq!(
            render("<img src=x onerror=alert(1)\nhi", RenderMode::dialogue()),
            r#"&lt;img src=x onerror=alert<span class="aside">(1)</span><br />hi"#
        );
    }

    #[test]
    fn test_half_open_tag_in_code() {
        assert_eq!(
            render("```\n<img src=x onerror=alert`1` \n```", RenderMode::dialogue()),
            "<pre class=\"code-block\">&lt;img src=x onerror=alert`1` \n</pre>"
        );
    }

    #[test]
    fn test_bare_less_than_is_not_markup() {
        for text in ["3 < 4 & 5", "a <= b", "x <- y"] {
            assert_eq!(render(text, RenderMode::prose()), text);
        }
    }

    #[test]
    fn test_aside_does_not_span_emphasis() {
        assert_eq!(
            render("**a (b** c)", RenderMode::dialogue()),
            r#"<span class="emphasis">a (b</span> c)"#
        );
        assert_eq!(
            render("**a (b) c**", RenderMode::dialogue()),
            r#"<span class="emphasis">a <span class="aside">(b)</span> c</span>"#
        );
    }

    #[test]
    fn test_clean_text_decodes_literal_entities() {
        let rendered = render("type &lt; to compare", RenderMode::prose());
        assert_eq!(rendered, "type &lt; to compare");
        assert_eq!(to_clean_text(&rendered), "type < to compare");
    }
}
