//! CLI command implementations.

pub(crate) mod render;
pub(crate) mod toc;

pub(crate) use render::RenderArgs;
pub(crate) use toc::TocArgs;

use std::io::Read;
use std::path::Path;

use quire_config::{Config, RenderConfig};
use quire_renderer::{ClassAttributes, MarkdownRenderer, RenderFlags};

use crate::error::CliError;

/// Read Markdown from a file, or from stdin when no file is given.
fn read_source(file: Option<&Path>) -> Result<String, CliError> {
    match file {
        Some(path) => std::fs::read_to_string(path).map_err(|source| CliError::Input {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut markdown = String::new();
            std::io::stdin().read_to_string(&mut markdown)?;
            Ok(markdown)
        }
    }
}

/// Map `[render]` options to renderer flags.
fn render_flags(render: &RenderConfig) -> RenderFlags {
    let mut flags = RenderFlags::empty();
    flags.set(RenderFlags::USE_XHTML, render.xhtml);
    flags.set(RenderFlags::SKIP_HTML, render.skip_html);
    flags.set(RenderFlags::SKIP_STYLE, render.skip_style);
    flags.set(RenderFlags::SKIP_LINKS, render.skip_links);
    flags.set(RenderFlags::SKIP_IMAGES, render.skip_images);
    flags.set(RenderFlags::ESCAPE, render.escape);
    flags.set(RenderFlags::SAFELINK, render.safelink);
    flags.set(RenderFlags::HARD_WRAP, render.hard_wrap);
    flags.set(RenderFlags::SKIP_LINEBREAK, render.skip_linebreak);
    flags.set(RenderFlags::USE_TASK_LIST, render.task_lists);
    flags
}

/// Build a renderer from configuration.
///
/// The outline pass is configured only when `[toc]` is enabled.
fn build_renderer(config: &Config) -> MarkdownRenderer {
    let classes = ClassAttributes {
        ul: config.classes.ul.clone(),
        ol: config.classes.ol.clone(),
        task: config.classes.task.clone(),
    };

    let renderer = MarkdownRenderer::new()
        .with_flags(render_flags(&config.render))
        .with_classes(classes)
        .with_gfm(config.markdown.gfm)
        .with_heading_attributes(config.markdown.heading_attributes);

    if config.toc.enabled {
        let range = config.toc.range;
        renderer.with_toc(
            Some(range.begin),
            range.end,
            config.toc.class().map(str::to_owned),
        )
    } else {
        renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quire_config::TocRange;

    #[test]
    fn test_render_flags_default_empty() {
        assert_eq!(render_flags(&RenderConfig::default()), RenderFlags::empty());
    }

    #[test]
    fn test_render_flags_mapping() {
        let render = RenderConfig {
            xhtml: true,
            safelink: true,
            task_lists: true,
            ..Default::default()
        };
        assert_eq!(
            render_flags(&render),
            RenderFlags::USE_XHTML | RenderFlags::SAFELINK | RenderFlags::USE_TASK_LIST
        );
    }

    #[test]
    fn test_build_renderer_without_toc() {
        let config = Config::default();
        let result = build_renderer(&config).render_markdown("## Title\n");
        assert_eq!(result.toc, None);
        assert_eq!(result.html, "<h2>Title</h2>\n");
    }

    #[test]
    fn test_build_renderer_with_toc() {
        let mut config = Config::default();
        config.toc.enabled = true;
        config.toc.range = TocRange::parse("2");

        let result = build_renderer(&config).render_markdown("# Top\n\n## Title\n");

        assert_eq!(result.html, "<h1 id=\"toc_0\">Top</h1>\n\n<h2 id=\"toc_1\">Title</h2>\n");
        assert_eq!(
            result.toc.as_deref(),
            Some("<ul class=\"toc\">\n<li>\n<a href=\"#toc_1\">Title</a>\n</li>\n</ul>\n")
        );
    }

    #[test]
    fn test_build_renderer_classes() {
        let mut config = Config::default();
        config.classes.ul = Some("plain".to_owned());
        let result = build_renderer(&config).render_markdown("- a\n");
        assert_eq!(result.html, "<ul class=\"plain\">\n<li>a</li>\n</ul>\n");
    }

    #[test]
    fn test_read_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_source(Some(&dir.path().join("absent.md"))).unwrap_err();
        assert!(matches!(err, CliError::Input { .. }));
        assert!(err.to_string().contains("absent.md"));
    }

    #[test]
    fn test_read_source_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.md");
        std::fs::write(&path, "# Doc\n").unwrap();
        assert_eq!(read_source(Some(&path)).unwrap(), "# Doc\n");
    }
}
