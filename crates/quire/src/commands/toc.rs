//! `quire toc` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use quire_config::{CliSettings, Config, TocRange};

use super::{build_renderer, read_source};
use crate::error::CliError;

/// Arguments for the toc command.
#[derive(Args)]
pub(crate) struct TocArgs {
    /// Markdown file to outline (default: read stdin).
    file: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover quire.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Header range "B" or "B:E" (overrides config).
    #[arg(short, long)]
    range: Option<String>,

    /// Class of the outline list (overrides config).
    #[arg(long)]
    class: Option<String>,
}

impl TocArgs {
    /// Execute the toc command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, input or output fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let markdown = read_source(self.file.as_deref())?;

        let cli_settings = CliSettings {
            toc: self.range.as_deref().map(TocRange::parse),
            toc_class: self.class,
            ..Default::default()
        };
        let mut config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        config.toc.enabled = true;

        let outline = build_renderer(&config).outline_markdown(&markdown);

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        out.write_all(outline.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}
