//! Two-pass Markdown renderer.

use pulldown_cmark::{Event, Options, Parser};

use crate::callbacks::CallbackTable;
use crate::driver;
use crate::html;
use crate::options::{AnchorCounter, ClassAttributes, LinkAttributesFn, RenderFlags};
use crate::toc::{self, TocState};

/// Result of rendering markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML fragment.
    pub html: String,
    /// Outline fragment, if an outline was requested.
    pub toc: Option<String>,
    /// Anchor counter after the body pass.
    pub anchors: AnchorCounter,
}

/// Outline settings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct OutlineSettings {
    begin: Option<u8>,
    end: Option<u8>,
    class: Option<String>,
}

/// Markdown renderer producing an HTML fragment and an optional outline.
///
/// With an outline configured, the document is rendered twice: once with the
/// outline callback table, once with the HTML table. Both passes start from
/// the same anchor value, so `#toc_<n>` links in the outline resolve to the
/// `toc_<n>` ids of the body headers.
///
/// # Example
///
/// ```
/// use quire_renderer::{MarkdownRenderer, RenderFlags};
///
/// let result = MarkdownRenderer::new()
///     .with_flags(RenderFlags::SAFELINK)
///     .with_toc(None, None, Some("toc".to_owned()))
///     .render_markdown("# Hello\n\n**Bold** text");
///
/// assert!(result.html.contains(r#"<h1 id="toc_0">Hello</h1>"#));
/// assert!(result.toc.unwrap().contains(r##"<a href="#toc_0">Hello</a>"##));
/// ```
#[derive(Clone, Debug)]
pub struct MarkdownRenderer {
    flags: RenderFlags,
    classes: ClassAttributes,
    outline: Option<OutlineSettings>,
    link_attributes: Option<LinkAttributesFn>,
    anchor_start: u32,
    gfm: bool,
    heading_attributes: bool,
}

impl MarkdownRenderer {
    /// Create a renderer with GFM extensions and heading attributes enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            flags: RenderFlags::empty(),
            classes: ClassAttributes::default(),
            outline: None,
            link_attributes: None,
            anchor_start: 0,
            gfm: true,
            heading_attributes: true,
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: RenderFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Set `class` values for `<ul>`, `<ol>` and task lists.
    #[must_use]
    pub fn with_classes(mut self, classes: ClassAttributes) -> Self {
        self.classes = classes;
        self
    }

    /// Produce an outline of headers between `begin` and `end` (inclusive).
    ///
    /// Also turns on [`RenderFlags::TOC`] for the body pass.
    #[must_use]
    pub fn with_toc(mut self, begin: Option<u8>, end: Option<u8>, class: Option<String>) -> Self {
        self.outline = Some(OutlineSettings { begin, end, class });
        self
    }

    /// Hook writing extra attributes into every rendered `<a>` tag.
    #[must_use]
    pub fn with_link_attributes(mut self, hook: LinkAttributesFn) -> Self {
        self.link_attributes = Some(hook);
        self
    }

    /// First value of the header anchor counter (default 0).
    #[must_use]
    pub fn with_anchor_start(mut self, start: u32) -> Self {
        self.anchor_start = start;
        self
    }

    /// Enable or disable GitHub Flavored Markdown extensions.
    ///
    /// GFM is enabled by default. When enabled, the parser supports:
    /// - Tables
    /// - Strikethrough (`~~text~~`)
    /// - Task lists (`- [ ] item`)
    /// - Superscript (`^text^`)
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Enable or disable `{#id .class}` heading attributes.
    #[must_use]
    pub fn with_heading_attributes(mut self, enabled: bool) -> Self {
        self.heading_attributes = enabled;
        self
    }

    /// Flags used by the body pass.
    #[must_use]
    pub fn flags(&self) -> RenderFlags {
        if self.outline.is_some() {
            self.flags | RenderFlags::TOC
        } else {
            self.flags
        }
    }

    /// Get parser options based on extension configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        let mut options = Options::empty();
        if self.gfm {
            options |= Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_SUPERSCRIPT;
        }
        if self.heading_attributes {
            options |= Options::ENABLE_HEADING_ATTRIBUTES;
        }
        options
    }

    /// Create a configured parser for the given markdown text.
    #[must_use]
    pub fn create_parser<'a>(&self, markdown: &'a str) -> Parser<'a> {
        Parser::new_ext(markdown, self.parser_options())
    }

    /// Render markdown text directly using configured parser options.
    #[must_use]
    pub fn render_markdown(&self, markdown: &str) -> RenderResult {
        self.render(self.create_parser(markdown))
    }

    /// Render only the outline of markdown text.
    ///
    /// Uses the configured outline range and class, or the whole document
    /// without a class if no outline was configured.
    #[must_use]
    pub fn outline_markdown(&self, markdown: &str) -> String {
        let (table, mut state) = self.outline_renderer();
        driver::render(self.create_parser(markdown), &table, &mut state).into_string()
    }

    /// Render markdown events and return the result.
    pub fn render<'a, I>(&self, events: I) -> RenderResult
    where
        I: IntoIterator<Item = Event<'a>>,
    {
        let events: Vec<Event<'a>> = events.into_iter().collect();

        let toc = self.outline.is_some().then(|| {
            let (table, mut state) = self.outline_renderer();
            let outline = driver::render(events.iter().cloned(), &table, &mut state);
            (outline.into_string(), state.anchors)
        });

        let (table, options) = html::renderer(self.flags(), self.classes.clone());
        let mut options = options.with_anchors(AnchorCounter::starting_at(self.anchor_start));
        if let Some(hook) = self.link_attributes {
            options = options.with_link_attributes(hook);
        }
        let body = driver::render(events, &table, &mut options);

        let toc = toc.map(|(outline, toc_anchors)| {
            if toc_anchors != options.anchors {
                tracing::warn!(
                    outline = toc_anchors.peek(),
                    body = options.anchors.peek(),
                    "Outline and body anchors diverged"
                );
            }
            outline
        });

        tracing::debug!(
            html_len = body.len(),
            outline = toc.is_some(),
            anchors = options.anchors.peek(),
            "Rendered document"
        );

        RenderResult {
            html: body.into_string(),
            toc,
            anchors: options.anchors,
        }
    }

    fn outline_renderer(&self) -> (CallbackTable<TocState>, TocState) {
        let settings = self.outline.clone().unwrap_or_default();
        let (table, state) = toc::renderer(settings.begin, settings.end, settings.class);
        (
            table,
            state.with_anchors(AnchorCounter::starting_at(self.anchor_start)),
        )
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}
