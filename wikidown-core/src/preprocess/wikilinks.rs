//! Wikilink rewriting for [[target]] and [[target|text]] syntax.
//!
//! Links are rewritten into inline markdown links before the document reaches
//! the markdown parser, so the renderer emits ordinary `<a>` tags.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// How much text a wikilink capture is allowed to span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WikilinkSyntax {
    /// Targets and descriptions stop at `[`, `]` and `|`, so every link on a
    /// line is rewritten on its own.
    #[default]
    Bounded,
    /// Captures run as far as the line allows. Two links on one line merge
    /// into a single link spanning from the first `[[` to the last `]]`.
    Greedy,
}

struct Patterns {
    described: Regex,
    simple: Regex,
}

static BOUNDED: OnceLock<Patterns> = OnceLock::new();
static GREEDY: OnceLock<Patterns> = OnceLock::new();

impl WikilinkSyntax {
    fn patterns(self) -> &'static Patterns {
        match self {
            WikilinkSyntax::Bounded => BOUNDED.get_or_init(|| Patterns {
                described: Regex::new(r"\[\[(?P<link>[^\[\]|\n]+)\|(?P<desc>[^\[\]|\n]+)\]\]")
                    .unwrap(),
                simple: Regex::new(r"\[\[(?P<link>[^\[\]|\n]+)\]\]").unwrap(),
            }),
            WikilinkSyntax::Greedy => GREEDY.get_or_init(|| Patterns {
                described: Regex::new(r"\[\[(?P<link>.+)\|(?P<desc>.+)\]\]").unwrap(),
                simple: Regex::new(r"\[\[(?P<link>.+)\]\]").unwrap(),
            }),
        }
    }
}

/// Rewrites wikilinks into markdown links whose targets end in `suffix`.
#[derive(Debug, Clone)]
pub struct WikilinkRewriter {
    syntax: WikilinkSyntax,
    suffix: String,
}

impl WikilinkRewriter {
    pub fn new(syntax: WikilinkSyntax, suffix: impl Into<String>) -> Self {
        Self {
            syntax,
            suffix: suffix.into(),
        }
    }

    /// Rewrite every wikilink in `text`.
    ///
    /// Described links are handled first; otherwise the simple pattern would
    /// swallow the `|description` part as part of the target.
    ///
    /// # Example
    ///
    /// ```
    /// use wikidown_core::preprocess::{WikilinkRewriter, WikilinkSyntax};
    ///
    /// let rewriter = WikilinkRewriter::new(WikilinkSyntax::Bounded, ".html");
    /// assert_eq!(rewriter.rewrite("See [[Home|Go Home]]"), "See [Go Home](Home.html)");
    /// ```
    pub fn rewrite(&self, text: &str) -> String {
        if !text.contains("[[") {
            return text.to_string();
        }

        let patterns = self.syntax.patterns();
        let described = format!("[${{desc}}](${{link}}{})", escape_replacement(&self.suffix));
        let simple = format!("[${{link}}](${{link}}{})", escape_replacement(&self.suffix));

        let text = patterns
            .described
            .replace_all(text, described.as_str())
            .into_owned();
        let text = patterns
            .simple
            .replace_all(&text, simple.as_str())
            .into_owned();

        tracing::debug!(syntax = ?self.syntax, "rewrote wikilinks");
        text
    }
}

impl Default for WikilinkRewriter {
    fn default() -> Self {
        Self::new(WikilinkSyntax::default(), ".html")
    }
}

/// Convenience wrapper using the default `.html` suffix.
pub fn rewrite_wikilinks(text: &str, syntax: WikilinkSyntax) -> String {
    WikilinkRewriter::new(syntax, ".html").rewrite(text)
}

// `$` starts a group reference in regex replacement strings
fn escape_replacement(s: &str) -> String {
    s.replace('$', "$$")
}
