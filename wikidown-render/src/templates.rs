//! Askama template definitions.

use askama::Template;

/// Built-in page used when no user template is selected
#[derive(Template)]
#[template(path = "page.html")]
pub struct PageTemplate {
    pub title: Option<String>,

    // Stylesheet reference (empty means no <link>)
    pub stylesheet: String,

    // Table of contents
    pub toc_label: String,
    pub toc_html: Option<String>,

    // Rendered markdown body
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> PageTemplate {
        PageTemplate {
            title: None,
            stylesheet: String::new(),
            toc_label: "Table of Contents".to_string(),
            toc_html: None,
            content: "<p>body</p>\n".to_string(),
        }
    }

    #[test]
    fn test_minimal_page() {
        let html = page().render().unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<p>body</p>"));
        assert!(!html.contains("<title>"));
        assert!(!html.contains("<link"));
        assert!(!html.contains("Table of Contents"));
    }

    #[test]
    fn test_full_page() {
        let html = PageTemplate {
            title: Some("Fish & Chips".to_string()),
            stylesheet: "style.css".to_string(),
            toc_html: Some("<ul>\n<li>\n<a href=\"#a\">A</a>\n</li>\n</ul>\n".to_string()),
            ..page()
        }
        .render()
        .unwrap();

        assert!(html.contains("<link href=\"style.css\" rel=\"stylesheet\">"));
        // askama escapes `&` numerically
        assert!(
            html.contains("<title>Fish &#38; Chips</title>")
                || html.contains("<title>Fish &amp; Chips</title>")
        );
        assert!(html.contains("<p id=\"title\">"));
        assert!(html.contains("<p class=\"toc\">Table of Contents</p>"));
        assert!(html.contains("<a href=\"#a\">A</a>"));

        let toc_at = html.find("Table of Contents").unwrap();
        let body_at = html.find("<p>body</p>").unwrap();
        assert!(toc_at < body_at);
    }
}
