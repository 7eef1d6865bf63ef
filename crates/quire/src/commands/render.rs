//! `quire render` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use quire_config::{CliSettings, Config, TocRange};
use quire_renderer::RenderResult;

use super::{build_renderer, read_source};
use crate::error::CliError;
use crate::layout::{Layout, LayoutSource};
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render (default: read stdin).
    file: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover quire.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Echo the Markdown source unchanged.
    #[arg(long)]
    raw: bool,

    /// Prepend an outline of headers in range "B" or "B:E" (overrides config).
    #[arg(long, value_name = "RANGE")]
    toc: Option<String>,

    /// Class of the outline list (overrides config).
    #[arg(long)]
    toc_class: Option<String>,

    /// Style template name (overrides config).
    #[arg(short, long, env = "QUIRE_STYLE")]
    style: Option<String>,

    /// Style template directory (overrides config).
    #[arg(long)]
    style_dir: Option<PathBuf>,

    /// Self-close void elements.
    #[arg(long)]
    xhtml: bool,

    /// Only render links with safe URLs.
    #[arg(long)]
    safelink: bool,

    /// Entity-escape all raw HTML.
    #[arg(long)]
    escape: bool,

    /// Turn paragraph line breaks into <br>.
    #[arg(long)]
    hard_wrap: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, input or output fails.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let markdown = read_source(self.file.as_deref())?;
        let stdout = std::io::stdout();
        let mut out = stdout.lock();

        if self.raw {
            out.write_all(markdown.as_bytes())?;
            out.flush()?;
            return Ok(());
        }

        let cli_settings = CliSettings {
            toc: self.toc.as_deref().map(TocRange::parse),
            toc_class: self.toc_class,
            style: self.style,
            style_dir: self.style_dir,
            xhtml: self.xhtml.then_some(true),
            safelink: self.safelink.then_some(true),
            escape: self.escape.then_some(true),
            hard_wrap: self.hard_wrap.then_some(true),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let layout = Layout::load(&config.layout_resolved)?;
        match layout.source {
            LayoutSource::Requested => {}
            LayoutSource::DefaultStyle => output.warning(&format!(
                "Style '{}' not found, using default style",
                config.layout_resolved.style
            )),
            LayoutSource::Builtin => tracing::info!(
                style_dir = %config.layout_resolved.style_dir.display(),
                "No style template found, using built-in page"
            ),
        }

        let result = build_renderer(&config).render_markdown(&markdown);
        tracing::info!(
            html_len = result.html.len(),
            headers = result.anchors.peek(),
            "Rendered page"
        );

        write_page(&mut out, &layout, &result)?;
        out.flush()?;
        Ok(())
    }
}

/// Write layout header, outline, body and layout footer.
fn write_page(
    out: &mut impl Write,
    layout: &Layout,
    result: &RenderResult,
) -> std::io::Result<()> {
    out.write_all(layout.header.as_bytes())?;
    if let Some(toc) = &result.toc {
        out.write_all(toc.as_bytes())?;
    }
    out.write_all(result.html.as_bytes())?;
    out.write_all(layout.footer.as_bytes())
}
