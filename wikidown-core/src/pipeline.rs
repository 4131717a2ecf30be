//! Conversion pipeline: preprocess, decide, render.

use crate::config::Config;
use crate::markdown::MarkdownProcessor;
use crate::preprocess::{DirectiveSet, Preprocessor};
use std::path::{Path, PathBuf};

/// Everything the output assembler needs for one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub title: Option<String>,
    pub toc_html: Option<String>,
    pub body_html: String,
    /// Template requested by a `%template` directive
    pub template: Option<String>,
    /// Stylesheet reference, embedded verbatim
    pub stylesheet: String,
}

/// What to do with a converted document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The document carries `%nohtml`; nothing is written.
    Skipped,
    Rendered(RenderedPage),
}

impl RenderOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, RenderOutcome::Skipped)
    }
}

/// Converts one document at a time.
///
/// Holds only configuration, so a single converter can be reused across
/// any number of documents.
pub struct Converter {
    preprocessor: Preprocessor,
    processor: MarkdownProcessor,
}

impl Converter {
    pub fn new(config: &Config) -> Self {
        Self {
            preprocessor: Preprocessor::from_config(config),
            processor: MarkdownProcessor::new(),
        }
    }

    /// Convert raw document text.
    ///
    /// # Example
    ///
    /// ```
    /// use wikidown_core::{Config, Converter, RenderOutcome};
    ///
    /// let converter = Converter::new(&Config::default());
    /// let outcome = converter.convert("%title Home\nSee [[About]].", "style.css");
    ///
    /// let RenderOutcome::Rendered(page) = outcome else { panic!("not rendered") };
    /// assert_eq!(page.title.as_deref(), Some("Home"));
    /// assert!(page.body_html.contains("<a href=\"About.html\">About</a>"));
    /// ```
    pub fn convert(&self, source: &str, stylesheet: &str) -> RenderOutcome {
        let pre = self.preprocessor.run(source);
        decide(&self.processor, &pre.text, pre.directives, stylesheet)
    }
}

fn decide(
    processor: &MarkdownProcessor,
    text: &str,
    directives: DirectiveSet,
    stylesheet: &str,
) -> RenderOutcome {
    // Checked before rendering: the body would be thrown away anyway.
    if directives.suppresses_html() {
        tracing::info!("document contains %nohtml; skipping");
        return RenderOutcome::Skipped;
    }

    let body_html = processor.render_body(text);
    let toc_html = if directives.wants_toc() {
        processor.render_toc(text)
    } else {
        None
    };

    let title = directives.title().map(str::to_string);
    let template = directives.template().map(str::to_string);
    tracing::debug!(
        title = ?title,
        template = ?template,
        toc = toc_html.is_some(),
        "rendered document"
    );

    RenderOutcome::Rendered(RenderedPage {
        title,
        toc_html,
        body_html,
        template,
        stylesheet: stylesheet.to_string(),
    })
}

/// Output location for `input`: its file name with the extension replaced by
/// `.html`, placed in `output_dir`.
pub fn output_path(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or(input.as_os_str());
    let mut name = stem.to_os_string();
    name.push(".html");
    output_dir.join(name)
}

/// Overwrite guard: convert when forced or when nothing exists at `output`.
pub fn should_convert(force: bool, output: &Path) -> bool {
    force || !output.exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn convert(source: &str) -> RenderOutcome {
        Converter::new(&Config::default()).convert(source, "style.css")
    }

    fn rendered(source: &str) -> RenderedPage {
        match convert(source) {
            RenderOutcome::Rendered(page) => page,
            RenderOutcome::Skipped => panic!("expected a rendered page"),
        }
    }

    #[test]
    fn test_nohtml_skips_regardless_of_other_directives() {
        let outcome = convert("%title Secret\n%toc\n# Heading\n%nohtml\n%template wiki\n");
        assert!(outcome.is_skipped());
    }

    #[test]
    fn test_nohtml_with_trailing_text_skips() {
        assert!(convert("%nohtml some note\nbody\n").is_skipped());
    }

    #[test]
    fn test_plain_document() {
        let page = rendered("Some *text*.\n");
        assert_eq!(page.title, None);
        assert_eq!(page.toc_html, None);
        assert_eq!(page.template, None);
        assert_eq!(page.stylesheet, "style.css");
        assert_eq!(page.body_html, "<p>Some <em>text</em>.</p>\n");
    }

    #[test]
    fn test_title_removed_from_body() {
        let page = rendered("%title My Page\nbody text");
        assert_eq!(page.title.as_deref(), Some("My Page"));
        assert_eq!(page.body_html, "<p>body text</p>\n");
    }

    #[test]
    fn test_toc_only_when_requested() {
        let without = rendered("# A\n\n## B\n");
        assert_eq!(without.toc_html, None);

        let with = rendered("%toc\n# A\n\n## B\n");
        let toc = with.toc_html.unwrap();
        assert!(toc.contains("<a href=\"#a\">A</a>"));
        assert!(toc.contains("<a href=\"#b\">B</a>"));
        assert!(!with.body_html.contains("%toc"));
    }

    #[test]
    fn test_toc_requested_without_headings() {
        let page = rendered("%toc\nno headings here\n");
        assert_eq!(page.toc_html, None);
    }

    #[test]
    fn test_template_passed_through() {
        let page = rendered("%template journal\ntext\n");
        assert_eq!(page.template.as_deref(), Some("journal"));
    }

    #[test]
    fn test_malformed_title_survives_as_text() {
        let page = rendered("%title\nbody\n");
        assert_eq!(page.title, None);
        assert!(page.body_html.contains("%title"));
    }

    #[test]
    fn test_converter_is_reusable() {
        let converter = Converter::new(&Config::default());
        let first = converter.convert("%title One\n%toc\n# H\n", "a.css");
        let second = converter.convert("plain\n", "b.css");

        let RenderOutcome::Rendered(first) = first else { panic!("first skipped") };
        let RenderOutcome::Rendered(second) = second else { panic!("second skipped") };
        assert_eq!(first.title.as_deref(), Some("One"));
        assert!(first.toc_html.is_some());
        assert_eq!(second.title, None);
        assert_eq!(second.toc_html, None);
        assert_eq!(second.stylesheet, "b.css");
    }

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("/wiki/notes/Home.md"), Path::new("/site")),
            PathBuf::from("/site/Home.html")
        );
        assert_eq!(
            output_path(Path::new("diary.2024.wiki"), Path::new("out")),
            PathBuf::from("out/diary.2024.html")
        );
        assert_eq!(
            output_path(Path::new("README"), Path::new("out")),
            PathBuf::from("out/README.html")
        );
    }

    #[test]
    fn test_should_convert() {
        let dir = tempdir().unwrap();
        let existing = dir.path().join("page.html");
        fs::write(&existing, "old").unwrap();
        let missing = dir.path().join("other.html");

        assert!(!should_convert(false, &existing));
        assert!(should_convert(true, &existing));
        assert!(should_convert(false, &missing));
        assert!(should_convert(true, &missing));
    }
}
