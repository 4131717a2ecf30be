//! Convert command implementation.

use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::PathBuf;
use wikidown_core::{output_path, should_convert, Config, Converter, RenderOutcome};
use wikidown_render::PageAssembler;

/// Inputs for converting a single page
pub struct ConvertArgs {
    pub force: bool,
    pub output_dir: PathBuf,
    pub input: PathBuf,
    pub stylesheet: String,
    pub root_path: String,
}

/// Template arguments given on the command line win over the config file
pub fn apply_template_overrides(
    config: &mut Config,
    path: Option<&str>,
    default: Option<&str>,
    ext: Option<&str>,
) -> Result<()> {
    if let Some(path) = path {
        let path = PathBuf::from(path);
        let path = if path.is_relative() {
            env::current_dir()
                .context("Failed to resolve current directory")?
                .join(path)
        } else {
            path
        };
        config.templates.path = Some(path);
    }
    if let Some(default) = default {
        config.templates.default = Some(default.to_string());
    }
    if let Some(ext) = ext {
        // vimwiki passes the extension with or without its dot
        config.templates.ext = if ext.starts_with('.') {
            ext.to_string()
        } else {
            format!(".{ext}")
        };
    }
    Ok(())
}

/// Convert one markdown file into an html file in the output directory
pub fn convert_file(config: &Config, args: &ConvertArgs) -> Result<()> {
    let output = output_path(&args.input, &args.output_dir);

    if !should_convert(args.force, &output) {
        tracing::debug!("Keeping existing {:?}", output);
        println!("The file already exists and the force argument is not 1.");
        return Ok(());
    }

    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {:?}", args.input))?;

    let converter = Converter::new(config);
    match converter.convert(&source, &args.stylesheet) {
        RenderOutcome::Skipped => {
            println!(
                "{} not converted due to presence of '%nohtml' in the file.",
                output.display()
            );
        }
        RenderOutcome::Rendered(page) => {
            let html = PageAssembler::from_config(config)
                .with_root_path(args.root_path.as_str())
                .assemble(&page)
                .context("Failed to assemble page")?;

            fs::create_dir_all(&args.output_dir)
                .with_context(|| format!("Failed to create {:?}", args.output_dir))?;
            fs::write(&output, html).with_context(|| format!("Failed to write {:?}", output))?;

            tracing::info!("Wrote {:?}", output);
            println!("Converted file to: {}", output.display());
        }
    }

    Ok(())
}
