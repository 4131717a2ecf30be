//! Markdown rendering for the page body and its table of contents.

pub mod toc;

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

pub use toc::{collect_headings, render_toc, Heading};

/// Markdown renderer holding the body and TOC option sets
pub struct MarkdownProcessor {
    body_options: Options,
    toc_options: Options,
}

impl MarkdownProcessor {
    pub fn new() -> Self {
        // Fenced code blocks and `<url>` autolinks are core CommonMark, and
        // CommonMark never opens `_` emphasis inside a word.
        let mut body_options = Options::empty();
        body_options.insert(Options::ENABLE_TABLES);
        body_options.insert(Options::ENABLE_STRIKETHROUGH);
        body_options.insert(Options::ENABLE_SUPERSCRIPT);
        body_options.insert(Options::ENABLE_HEADING_ATTRIBUTES);

        // The TOC pass only looks at headings
        let toc_options = Options::ENABLE_HEADING_ATTRIBUTES;

        Self {
            body_options,
            toc_options,
        }
    }

    /// Render markdown to HTML, giving every heading an anchor id.
    pub fn render_body(&self, markdown: &str) -> String {
        let events: Vec<Event> = Parser::new_ext(markdown, self.body_options).collect();
        let headings = collect_headings(&events);
        tracing::debug!(headings = headings.len(), "rendering body");

        let mut ids = headings.into_iter().map(|h| h.id);
        let events = events.into_iter().map(|event| match event {
            Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            }) => {
                let assigned = ids.next().map(CowStr::from);
                Event::Start(Tag::Heading {
                    level,
                    id: id.or(assigned),
                    classes,
                    attrs,
                })
            }
            other => other,
        });

        let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut html_output, events);
        html_output
    }

    /// Render the table of contents for `markdown`.
    ///
    /// Anchors match the ids produced by [`render_body`](Self::render_body)
    /// for the same text. Returns `None` when the document has no headings.
    pub fn render_toc(&self, markdown: &str) -> Option<String> {
        let events: Vec<Event> = Parser::new_ext(markdown, self.toc_options).collect();
        let headings = collect_headings(&events);
        if headings.is_empty() {
            return None;
        }
        Some(render_toc(&headings))
    }
}

impl Default for MarkdownProcessor {
    fn default() -> Self {
        Self::new()
    }
}
