//! CLI command implementations.

pub mod convert;

pub use convert::{apply_template_overrides, convert_file, ConvertArgs};
