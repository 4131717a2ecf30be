//! Percent-code directives (`%title`, `%toc`, `%nohtml`, `%template`).
//!
//! A directive occupies a whole line. Each directive is consumed at most once:
//! the first matching line is recorded and cut out of the text, later
//! duplicates stay in the document as ordinary text.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// The fixed set of directives recognized in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    Title,
    Toc,
    NoHtml,
    Template,
}

impl Directive {
    /// Every directive, in extraction order.
    pub const ALL: [Directive; 4] = [
        Directive::Title,
        Directive::Toc,
        Directive::NoHtml,
        Directive::Template,
    ];

    /// Key used when reporting the directive set
    pub fn name(self) -> &'static str {
        match self {
            Directive::Title => "title",
            Directive::Toc => "toc",
            Directive::NoHtml => "no_html",
            Directive::Template => "template",
        }
    }

    /// Token as written in the document
    pub fn keyword(self) -> &'static str {
        match self {
            Directive::Title => "%title",
            Directive::Toc => "%toc",
            Directive::NoHtml => "%nohtml",
            Directive::Template => "%template",
        }
    }

    /// Whether the directive carries text after its keyword
    pub fn takes_value(self) -> bool {
        matches!(self, Directive::Title | Directive::Template)
    }

    fn index(self) -> usize {
        match self {
            Directive::Title => 0,
            Directive::Toc => 1,
            Directive::NoHtml => 2,
            Directive::Template => 3,
        }
    }

    fn regex(self) -> &'static Regex {
        static PATTERNS: OnceLock<[Regex; 4]> = OnceLock::new();
        let patterns = PATTERNS.get_or_init(|| Directive::ALL.map(|d| d.build_regex()));
        &patterns[self.index()]
    }

    fn build_regex(self) -> Regex {
        let keyword = regex::escape(self.keyword());
        // Value directives need at least one non-blank character after the
        // keyword. A presence flag ends at whitespace: alone on its line the
        // whole line goes, otherwise only the keyword and the blanks after it.
        let pattern = if self.takes_value() {
            format!(r"(?m)^[ \t]*{keyword}[ \t]+(?P<value>\S[^\r\n]*?)[ \t]*(?:\r?\n|$)")
        } else {
            format!(r"(?m)^[ \t]*(?P<value>{keyword})(?:[ \t]*(?:\r?\n|$)|[ \t]+)")
        };
        Regex::new(&pattern).unwrap()
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Values captured from a document's directives.
///
/// Always holds an entry for each of the four directives; an entry is `None`
/// when the directive did not appear. `%toc` and `%nohtml` record their own
/// keyword, so only their presence is meaningful.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectiveSet {
    values: [Option<String>; 4],
}

impl DirectiveSet {
    pub fn get(&self, directive: Directive) -> Option<&str> {
        self.values[directive.index()].as_deref()
    }

    pub fn is_present(&self, directive: Directive) -> bool {
        self.get(directive).is_some()
    }

    pub fn title(&self) -> Option<&str> {
        self.get(Directive::Title)
    }

    pub fn template(&self) -> Option<&str> {
        self.get(Directive::Template)
    }

    pub fn wants_toc(&self) -> bool {
        self.is_present(Directive::Toc)
    }

    pub fn suppresses_html(&self) -> bool {
        self.is_present(Directive::NoHtml)
    }

    /// True when no directive was found
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// All four entries in extraction order
    pub fn iter(&self) -> impl Iterator<Item = (Directive, Option<&str>)> + '_ {
        Directive::ALL.into_iter().map(|d| (d, self.get(d)))
    }

    fn set(&mut self, directive: Directive, value: Option<String>) {
        self.values[directive.index()] = value;
    }
}

/// Extract all directives from `text`.
///
/// Returns the captured directive set and the text with each matched
/// directive line removed.
///
/// # Example
///
/// ```
/// use wikidown_core::preprocess::extract_directives;
///
/// let (directives, body) = extract_directives("%title My Page\nbody text");
/// assert_eq!(directives.title(), Some("My Page"));
/// assert_eq!(body, "body text");
/// ```
pub fn extract_directives(text: &str) -> (DirectiveSet, String) {
    let mut directives = DirectiveSet::default();
    let mut text = text.to_string();

    for directive in Directive::ALL {
        let Some(captures) = directive.regex().captures(&text) else {
            continue;
        };
        let whole = captures.get(0).map(|m| m.range()).unwrap_or_default();
        let value = captures.name("value").map(|m| m.as_str().to_string());

        tracing::debug!(%directive, value = ?value, "found directive");
        directives.set(directive, value);
        text.replace_range(whole, "");
    }

    (directives, text)
}
