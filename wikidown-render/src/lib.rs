//! # wikidown-render
//!
//! Wraps converted pages into complete HTML documents, either with the
//! built-in Askama page or with a user-supplied minijinja template.

pub mod assembler;
pub mod templates;

pub use assembler::{PageAssembler, RenderError, TemplateLookup};
pub use templates::PageTemplate;
