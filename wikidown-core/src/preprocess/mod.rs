//! Text-level preprocessing applied before markdown rendering.

pub mod directives;
pub mod wikilinks;

pub use directives::{extract_directives, Directive, DirectiveSet};
pub use wikilinks::{rewrite_wikilinks, WikilinkRewriter, WikilinkSyntax};

use crate::config::Config;

/// A document after link rewriting and directive extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preprocessed {
    /// Markdown handed to the renderer
    pub text: String,
    pub directives: DirectiveSet,
}

/// Runs the wikilink rewriter followed by the directive extractor.
#[derive(Debug, Clone, Default)]
pub struct Preprocessor {
    rewriter: WikilinkRewriter,
}

impl Preprocessor {
    pub fn new(rewriter: WikilinkRewriter) -> Self {
        Self { rewriter }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(WikilinkRewriter::new(
            config.wikilinks,
            config.link_suffix.clone(),
        ))
    }

    pub fn run(&self, source: &str) -> Preprocessed {
        let linked = self.rewriter.rewrite(source);
        let (directives, text) = extract_directives(&linked);
        Preprocessed { text, directives }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_and_directives() {
        let pre = Preprocessor::default().run("%title Index\n%toc\nSee [[Home|home page]].\n");
        assert_eq!(pre.directives.title(), Some("Index"));
        assert!(pre.directives.wants_toc());
        assert_eq!(pre.text, "See [home page](Home.html).\n");
    }

    #[test]
    fn test_wikilink_in_title_is_rewritten_first() {
        let pre = Preprocessor::default().run("%title About [[Me]]\nbody");
        assert_eq!(pre.directives.title(), Some("About [Me](Me.html)"));
        assert_eq!(pre.text, "body");
    }

    #[test]
    fn test_plain_document_passes_through() {
        let source = "# Notes\n\n- one\n- two\n";
        let pre = Preprocessor::default().run(source);
        assert!(pre.directives.is_empty());
        assert_eq!(pre.text, source);
    }

    #[test]
    fn test_config_selects_syntax_and_suffix() {
        let config = Config::from_yaml("wikilinks: greedy\nlink_suffix: \"/\"\n").unwrap();
        let pre = Preprocessor::from_config(&config).run("[[a]] [[b]]");
        assert_eq!(pre.text, "[a]] [[b](a]] [[b/)");
    }
}
