//! # wikidown-core
//!
//! Core library for the wikidown markdown-to-HTML converter.
//!
//! A document goes through wikilink rewriting and directive extraction
//! ([`preprocess`]), then the [`Converter`] decides whether it is rendered
//! at all and whether it gets a table of contents.

pub mod config;
pub mod markdown;
pub mod pipeline;
pub mod preprocess;
pub mod slug;

pub use config::{Config, ConfigError, TemplatesConfig};
pub use markdown::MarkdownProcessor;
pub use pipeline::{output_path, should_convert, Converter, RenderOutcome, RenderedPage};
pub use preprocess::{Directive, DirectiveSet, Preprocessed, Preprocessor, WikilinkSyntax};
pub use slug::slugify;
