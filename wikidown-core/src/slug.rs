//! Heading anchor generation.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

/// Convert heading text to an anchor id.
///
/// Lowercases, turns whitespace and underscores into hyphens, drops
/// punctuation, and collapses repeated hyphens.
///
/// # Examples
///
/// ```
/// use wikidown_core::slugify;
///
/// assert_eq!(slugify("Getting Started"), "getting-started");
/// assert_eq!(slugify("Q & A"), "q-a");
/// ```
pub fn slugify(input: &str) -> String {
    static HYPHENS: OnceLock<Regex> = OnceLock::new();

    let cleaned: String = input
        .to_lowercase()
        .graphemes(true)
        .filter_map(|g| {
            let c = g.chars().next()?;
            if c.is_whitespace() || c == '_' || c == '-' {
                Some("-")
            } else if c.is_alphanumeric() {
                Some(g)
            } else {
                None
            }
        })
        .collect();

    let hyphens = HYPHENS.get_or_init(|| Regex::new(r"-+").unwrap());
    hyphens
        .replace_all(&cleaned, "-")
        .trim_matches('-')
        .to_string()
}

/// Hands out anchor ids that are unique within one document.
///
/// Repeated headings get `-1`, `-2`, ... appended; an empty slug falls back
/// to `section`.
#[derive(Debug, Default)]
pub struct SlugRegistry {
    seen: HashMap<String, usize>,
}

impl SlugRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an id as taken so generated slugs steer around it
    pub fn reserve(&mut self, id: &str) {
        self.seen.entry(id.to_string()).or_insert(0);
    }

    pub fn unique(&mut self, text: &str) -> String {
        let mut base = slugify(text);
        if base.is_empty() {
            base = String::from("section");
        }

        match self.seen.get_mut(&base) {
            None => {
                self.seen.insert(base.clone(), 0);
                base
            }
            Some(count) => {
                *count += 1;
                let candidate = format!("{base}-{count}");
                // "Intro", "Intro", "Intro 1" must not collide
                if self.seen.contains_key(&candidate) {
                    return self.unique(&candidate);
                }
                self.seen.insert(candidate.clone(), 0);
                candidate
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("  Padded   Title  "), "padded-title");
    }

    #[test]
    fn test_punctuation_dropped() {
        assert_eq!(slugify("What's new?"), "whats-new");
        assert_eq!(slugify("C++ & Rust"), "c-rust");
        assert_eq!(slugify("snake_case_name"), "snake-case-name");
    }

    #[test]
    fn test_unicode_kept() {
        assert_eq!(slugify("Café Notes"), "café-notes");
    }

    #[test]
    fn test_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_registry_deduplicates() {
        let mut registry = SlugRegistry::new();
        assert_eq!(registry.unique("Intro"), "intro");
        assert_eq!(registry.unique("Intro"), "intro-1");
        assert_eq!(registry.unique("Intro 1"), "intro-1-1");
        assert_eq!(registry.unique("Intro"), "intro-2");
        assert_eq!(registry.unique("???"), "section");
        assert_eq!(registry.unique(""), "section-1");
    }

    #[test]
    fn test_reserved_ids_are_skipped() {
        let mut registry = SlugRegistry::new();
        registry.reserve("intro");
        registry.reserve("setup-1");
        assert_eq!(registry.unique("Intro"), "intro-1");
        assert_eq!(registry.unique("Setup"), "setup");
        assert_eq!(registry.unique("Setup"), "setup-1-1");
    }
}
