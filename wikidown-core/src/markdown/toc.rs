//! Table of contents rendering.

use crate::slug::SlugRegistry;
use pulldown_cmark::{Event, Tag, TagEnd};

/// A heading found in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub level: u32,
    pub title: String,
    pub id: String,
}

/// Collect headings in document order, assigning each an anchor id.
///
/// Explicit `{#id}` attributes win; everything else gets a unique slug of
/// the heading text that avoids every explicit id in the document. Body and
/// TOC both go through here so their ids agree.
pub fn collect_headings(events: &[Event<'_>]) -> Vec<Heading> {
    let mut registry = SlugRegistry::new();
    for event in events {
        if let Event::Start(Tag::Heading { id: Some(id), .. }) = event {
            registry.reserve(id);
        }
    }

    let mut headings = Vec::new();
    let mut current: Option<(u32, Option<String>, String)> = None;

    for event in events {
        match event {
            Event::Start(Tag::Heading { level, id, .. }) => {
                current = Some((*level as u32, id.as_ref().map(|s| s.to_string()), String::new()));
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, _, title)) = current.as_mut() {
                    title.push_str(text);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, explicit, title)) = current.take() {
                    let title = title.trim().to_string();
                    let id = explicit.unwrap_or_else(|| registry.unique(&title));
                    headings.push(Heading { level, title, id });
                }
            }
            _ => {}
        }
    }

    headings
}

/// Render headings as nested `<ul>` lists of anchors.
///
/// Nesting is relative to the shallowest heading, so a document that starts
/// at `##` does not get an empty outer list. Returns an empty string when
/// there are no headings.
pub fn render_toc(headings: &[Heading]) -> String {
    let Some(base) = headings.iter().map(|h| h.level).min() else {
        return String::new();
    };

    let mut html = String::new();
    let mut depth = 0u32;

    for heading in headings {
        let level = heading.level - base + 1;

        if level > depth {
            while level > depth {
                html.push_str("<ul>\n<li>\n");
                depth += 1;
            }
        } else if level < depth {
            html.push_str("</li>\n");
            while level < depth {
                html.push_str("</ul>\n</li>\n");
                depth -= 1;
            }
            html.push_str("<li>\n");
        } else {
            html.push_str("</li>\n<li>\n");
        }

        html.push_str(&format!(
            "<a href=\"#{}\">{}</a>\n",
            html_escape(&heading.id),
            html_escape(&heading.title)
        ));
    }

    while depth > 0 {
        html.push_str("</li>\n</ul>\n");
        depth -= 1;
    }

    html
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
