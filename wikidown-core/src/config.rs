//! Configuration parsing and management.

use crate::preprocess::WikilinkSyntax;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

/// Converter configuration, matching the optional `wikidown.yml` schema.
///
/// Every field has a default, so an empty file (or no file at all) yields
/// the stock vimwiki behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Suffix appended to every wikilink target
    #[serde(default = "default_link_suffix")]
    pub link_suffix: String,

    #[serde(default)]
    pub wikilinks: WikilinkSyntax,

    /// Label printed above the table of contents
    #[serde(default = "default_toc_label")]
    pub toc_label: String,

    #[serde(default)]
    pub templates: TemplatesConfig,

    // Internal: path to config file (for relative path resolution)
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

fn default_link_suffix() -> String {
    String::from(".html")
}

fn default_toc_label() -> String {
    String::from("Table of Contents")
}

fn default_template_ext() -> String {
    String::from(".html")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplatesConfig {
    /// Directory holding user templates (None means only the built-in page)
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Template used when a document has no `%template` directive
    #[serde(default)]
    pub default: Option<String>,

    #[serde(default = "default_template_ext")]
    pub ext: String,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            path: None,
            default: None,
            ext: default_template_ext(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            link_suffix: default_link_suffix(),
            wikilinks: WikilinkSyntax::default(),
            toc_label: default_toc_label(),
            templates: TemplatesConfig::default(),
            config_path: None,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&contents)?;

        // Store config file path for relative path resolution
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Parse configuration from YAML text. Empty input yields the defaults.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Get the template directory, resolved relative to config file
    pub fn template_dir(&self) -> Option<PathBuf> {
        self.templates.path.as_ref().map(|p| self.resolve_path(p))
    }

    /// Resolve a path relative to the config file location
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(parent) = self.config_path.as_deref().and_then(Path::parent) {
            parent.join(path)
        } else {
            path.to_path_buf()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config = Config::from_yaml("").unwrap();
        assert_eq!(config.link_suffix, ".html");
        assert_eq!(config.wikilinks, WikilinkSyntax::Bounded);
        assert_eq!(config.toc_label, "Table of Contents");
        assert_eq!(config.templates.ext, ".html");
        assert!(config.template_dir().is_none());
    }

    #[test]
    fn test_partial_yaml() {
        let config = Config::from_yaml("wikilinks: greedy\ntemplates:\n  default: wiki\n").unwrap();
        assert_eq!(config.wikilinks, WikilinkSyntax::Greedy);
        assert_eq!(config.templates.default.as_deref(), Some("wiki"));
        assert_eq!(config.templates.ext, ".html");
        assert_eq!(config.link_suffix, ".html");
    }

    #[test]
    fn test_invalid_yaml() {
        let result = Config::from_yaml("wikilinks: [unclosed");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_template_dir_relative_to_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wikidown.yml");
        fs::write(&path, "templates:\n  path: tpl\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.template_dir(), Some(dir.path().join("tpl")));
    }

    #[test]
    fn test_missing_file() {
        let result = Config::from_file("/nonexistent/wikidown.yml");
        assert!(matches!(result, Err(ConfigError::ReadError(_))));
    }
}
