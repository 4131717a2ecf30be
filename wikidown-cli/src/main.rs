//! # wikidown CLI
//!
//! Vimwiki `custom_wiki2html` converter for markdown wikis. Vimwiki calls it
//! once per page with positional arguments:
//!
//! ```text
//! wikidown FORCE SYNTAX EXTENSION OUTPUT_DIR INPUT_FILE CSS_FILE \
//!     [TEMPLATE_PATH TEMPLATE_DEFAULT TEMPLATE_EXT ROOT_PATH CUSTOM_ARGS...]
//! ```

mod commands;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use wikidown_core::Config;

#[derive(Parser)]
#[command(name = "wikidown")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Overwrite any previously existing html file (0 = no, 1 = yes)
    #[arg(value_parser = clap::value_parser!(u8).range(0..=1))]
    force: u8,

    /// Syntax of the file to convert
    #[arg(value_enum)]
    syntax: Syntax,

    /// Extension of the input file, e.g. wiki, txt or md
    extension: String,

    /// Directory where the html file is created
    outputdir: PathBuf,

    /// Markdown file to convert
    input_file: PathBuf,

    /// Stylesheet referenced by the generated page
    cssfile: String,

    /// Directory holding page templates
    template_path: Option<String>,

    /// Template used when a page has no %template directive
    template_default: Option<String>,

    /// Extension of template files, e.g. .html
    template_ext: Option<String>,

    /// Path from the page back to the wiki root
    root_path: Option<String>,

    /// Extra arguments configured in vimwiki (ignored)
    custom_args: Vec<String>,

    /// Path to configuration file
    #[arg(long, env = "WIKIDOWN_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Syntax {
    Markdown,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for vimwiki-facing messages
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::WARN.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    tracing::debug!(
        syntax = ?cli.syntax,
        extension = %cli.extension,
        custom_args = ?cli.custom_args,
        "starting conversion"
    );

    let mut config = match &cli.config {
        Some(path) => {
            tracing::debug!("Loading config from {:?}", path);
            Config::from_file(path).context("Failed to load configuration")?
        }
        None => Config::default(),
    };
    commands::apply_template_overrides(
        &mut config,
        given(&cli.template_path),
        given(&cli.template_default),
        given(&cli.template_ext),
    )?;

    let args = commands::ConvertArgs {
        force: cli.force == 1,
        output_dir: cli.outputdir,
        input: cli.input_file,
        stylesheet: cli.cssfile,
        root_path: given(&cli.root_path).unwrap_or_default().to_string(),
    };
    commands::convert_file(&config, &args)
}

/// Vimwiki passes `-` (or an empty string) for unset trailing arguments
fn given(arg: &Option<String>) -> Option<&str> {
    arg.as_deref().filter(|value| !value.is_empty() && *value != "-")
}
