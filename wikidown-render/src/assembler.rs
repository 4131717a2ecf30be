//! Final document assembly.
//!
//! A page is rendered through a user template when one is selected and
//! found on disk, otherwise through the built-in [`PageTemplate`].
//!
//! User templates are minijinja templates looked up as
//! `<template dir>/<name><ext>`. The name comes from the `%template`
//! directive, else from the configured default. A template requested by
//! `%template` must exist, otherwise assembly fails with
//! [`RenderError::TemplateNotFound`]. A missing default template falls back
//! to the built-in page. Templates see these variables:
//!
//! | Variable | Value |
//! |---|---|
//! | `title` | `%title` text or none |
//! | `toc_content` | table of contents HTML or none |
//! | `main_content` | rendered body HTML |
//! | `cssfile` | stylesheet reference |
//! | `toc_label` | label shown above the table of contents |
//! | `root_path` | path from the page back to the wiki root |
//! | `date` | today's date, `YYYY-MM-DD` |

use crate::templates::PageTemplate;
use askama::Template;
use minijinja::{context, Environment, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use wikidown_core::{Config, RenderedPage};

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to render built-in page: {0}")]
    Page(#[from] askama::Error),

    #[error("Template not found: {0:?}")]
    TemplateNotFound(PathBuf),

    #[error("Failed to read template {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to render template {path:?}: {source}")]
    Template {
        path: PathBuf,
        source: minijinja::Error,
    },
}

/// Where user templates live and which one is the default
#[derive(Debug, Clone, Default)]
pub struct TemplateLookup {
    pub dir: Option<PathBuf>,
    pub default: Option<String>,
    pub ext: String,
}

impl TemplateLookup {
    pub fn from_config(config: &Config) -> Self {
        Self {
            dir: config.template_dir(),
            default: config.templates.default.clone(),
            ext: config.templates.ext.clone(),
        }
    }

    /// Template file for a page, or `None` for the built-in page
    pub fn resolve(&self, requested: Option<&str>) -> Result<Option<PathBuf>, RenderError> {
        let Some(dir) = &self.dir else {
            if let Some(name) = requested {
                tracing::warn!("%template {name} ignored: no template directory configured");
            }
            return Ok(None);
        };

        if let Some(name) = requested {
            let path = self.path_for(dir, name);
            if !path.is_file() {
                return Err(RenderError::TemplateNotFound(path));
            }
            return Ok(Some(path));
        }

        let Some(default) = self.default.as_deref() else {
            return Ok(None);
        };
        let path = self.path_for(dir, default);
        if path.is_file() {
            Ok(Some(path))
        } else {
            tracing::debug!("Default template {:?} not found; using built-in page", path);
            Ok(None)
        }
    }

    fn path_for(&self, dir: &Path, name: &str) -> PathBuf {
        dir.join(format!("{name}{}", self.ext))
    }
}

/// Wraps rendered pages into complete HTML documents
#[derive(Debug, Clone)]
pub struct PageAssembler {
    lookup: TemplateLookup,
    toc_label: String,
    root_path: String,
}

impl PageAssembler {
    pub fn new(lookup: TemplateLookup, toc_label: impl Into<String>) -> Self {
        Self {
            lookup,
            toc_label: toc_label.into(),
            root_path: String::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(TemplateLookup::from_config(config), config.toc_label.clone())
    }

    pub fn with_root_path(mut self, root_path: impl Into<String>) -> Self {
        self.root_path = root_path.into();
        self
    }

    pub fn assemble(&self, page: &RenderedPage) -> Result<String, RenderError> {
        match self.lookup.resolve(page.template.as_deref())? {
            Some(path) => self.render_user_template(&path, page),
            None => self.render_builtin(page),
        }
    }

    fn render_builtin(&self, page: &RenderedPage) -> Result<String, RenderError> {
        let template = PageTemplate {
            title: page.title.clone(),
            stylesheet: page.stylesheet.clone(),
            toc_label: self.toc_label.clone(),
            toc_html: page.toc_html.clone().filter(|toc| !toc.is_empty()),
            content: page.body_html.clone(),
        };
        Ok(template.render()?)
    }

    fn render_user_template(&self, path: &Path, page: &RenderedPage) -> Result<String, RenderError> {
        tracing::debug!("Rendering with template {:?}", path);
        let source = fs::read_to_string(path).map_err(|source| RenderError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let template_error = |source| RenderError::Template {
            path: path.to_path_buf(),
            source,
        };

        // Named after the file so autoescaping follows its extension
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from("page.html"));

        let mut env = Environment::new();
        env.add_template_owned(name.clone(), source)
            .map_err(template_error)?;
        let template = env.get_template(&name).map_err(template_error)?;

        template
            .render(context! {
                title => page.title,
                toc_content => page.toc_html.clone().map(Value::from_safe_string),
                main_content => Value::from_safe_string(page.body_html.clone()),
                cssfile => page.stylesheet,
                toc_label => self.toc_label,
                root_path => self.root_path,
                date => chrono::Local::now().format("%Y-%m-%d").to_string(),
            })
            .map_err(template_error)
    }
}
