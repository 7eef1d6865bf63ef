//! Parser adapter: walks pulldown-cmark events and invokes a callback table.
//!
//! Every container opens a frame with its own [`Buffer`]. When the container
//! ends, its rendered children are handed to the matching table operation,
//! which writes into the parent frame. Leaf events render straight into the
//! innermost frame.

use pulldown_cmark::{Alignment, CodeBlockKind, Event, LinkType, Tag, TagEnd};

use crate::buffer::Buffer;
use crate::callbacks::{AbsentBlock, AutolinkKind, CallbackTable, CellAlignment, ListFlags};
use crate::util::{cell_alignment, heading_annotation, heading_level_to_num};

/// Run one render pass over `events`.
///
/// The document header operation runs before the first event and the document
/// footer after the last one.
pub fn render<'a, I, S>(events: I, table: &CallbackTable<S>, state: &mut S) -> Buffer
where
    I: IntoIterator<Item = Event<'a>>,
{
    let mut driver = Driver::new(table, state);
    driver.table.render_doc_header(&mut driver.stack[0].out, driver.state);

    let mut count = 0usize;
    for event in events {
        driver.process_event(event);
        count += 1;
    }

    driver.finish(count)
}

/// Emphasis kinds that can merge into triple emphasis.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Emphasis {
    Single,
    Double,
}

enum FrameKind {
    Root,
    Paragraph,
    Heading { level: u8, attr: Option<String> },
    BlockQuote,
    CodeBlock { lang: Option<String> },
    HtmlBlock,
    List { flags: ListFlags },
    Item { flags: ListFlags },
    Table { header: Buffer },
    TableHead,
    TableRow,
    TableCell { align: CellAlignment, is_header: bool },
    Emphasis(Emphasis),
    Strikethrough,
    Superscript,
    Link { url: String, title: String, link_type: LinkType },
    Image { url: String, title: String },
    /// Container without an operation; content is appended to the parent.
    Transparent,
}

struct Frame {
    kind: FrameKind,
    out: Buffer,
    /// Number of child nodes seen so far.
    children: usize,
    /// Content of the first child if that child was an emphasis span.
    first_emphasis: Option<(Emphasis, String)>,
}

impl Frame {
    fn new(kind: FrameKind) -> Self {
        Self {
            kind,
            out: Buffer::new(),
            children: 0,
            first_emphasis: None,
        }
    }
}

struct Driver<'t, 's, S> {
    table: &'t CallbackTable<S>,
    state: &'s mut S,
    stack: Vec<Frame>,
    alignments: Vec<Alignment>,
    cell_index: usize,
    in_table_head: bool,
    /// Depth of nested images; inside an image only plain alt text is kept.
    image_depth: usize,
    /// Task marker waiting for the first content of its list item.
    task_marker: Option<&'static str>,
}

impl<'t, 's, S> Driver<'t, 's, S> {
    fn new(table: &'t CallbackTable<S>, state: &'s mut S) -> Self {
        Self {
            table,
            state,
            stack: vec![Frame::new(FrameKind::Root)],
            alignments: Vec::new(),
            cell_index: 0,
            in_table_head: false,
            image_depth: 0,
            task_marker: None,
        }
    }

    fn finish(mut self, events: usize) -> Buffer {
        // Well-formed streams close every frame; fold any leftovers into root.
        while self.stack.len() > 1 {
            if let Some(frame) = self.stack.pop() {
                self.top().out.push_str(frame.out.as_str());
            }
        }

        let mut root = self.stack.pop().map(|frame| frame.out).unwrap_or_default();
        self.table.render_doc_footer(&mut root, self.state);

        tracing::debug!(events, bytes = root.len(), "Render pass complete");
        root
    }

    fn top(&mut self) -> &mut Frame {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn in_raw_text(&self) -> bool {
        self.image_depth > 0
            || matches!(
                self.stack.last().map(|frame| &frame.kind),
                Some(FrameKind::CodeBlock { .. } | FrameKind::HtmlBlock)
            )
    }

    /// Count a new child of the innermost frame, marking loose list items.
    fn add_child(&mut self, is_block: bool) {
        let top = self.top();
        if top.children == 0
            && is_block
            && let FrameKind::Item { flags } = &mut top.kind
        {
            flags.insert(ListFlags::BLOCK);
        }
        top.children += 1;
    }

    /// Whether the table drops the content of this container.
    fn discards(&self, kind: &FrameKind) -> bool {
        if self.table.absent_block != AbsentBlock::Discard {
            return false;
        }
        match kind {
            FrameKind::BlockQuote => self.table.block_quote.is_none(),
            FrameKind::List { .. } => self.table.list.is_none(),
            FrameKind::Item { .. } => self.table.list_item.is_none(),
            _ => false,
        }
    }

    /// Frame a closing header renders into.
    ///
    /// Headers nested in discarded containers write to the outermost such
    /// container's parent, so their output survives.
    fn header_target(&self) -> usize {
        self.stack
            .iter()
            .skip(1)
            .position(|frame| self.discards(&frame.kind))
            .unwrap_or(self.stack.len() - 1)
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.code(&code),
            Event::Html(html) | Event::InlineHtml(html) => self.raw_html(&html),
            Event::SoftBreak => self.text("\n"),
            Event::HardBreak => self.hard_break(),
            Event::Rule => self.rule(),
            Event::TaskListMarker(checked) => self.task_list_marker(checked),
            Event::FootnoteReference(label) => self.text(&format!("[^{label}]")),
            Event::InlineMath(math) | Event::DisplayMath(math) => self.text(&math),
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        if self.image_depth > 0 {
            self.add_child(false);
            let kind = match tag {
                Tag::Image { dest_url, title, .. } => {
                    self.image_depth += 1;
                    FrameKind::Image {
                        url: dest_url.to_string(),
                        title: title.to_string(),
                    }
                }
                _ => FrameKind::Transparent,
            };
            self.stack.push(Frame::new(kind));
            return;
        }

        let kind = match tag {
            Tag::Paragraph => FrameKind::Paragraph,
            Tag::Heading {
                level, id, classes, ..
            } => FrameKind::Heading {
                level: heading_level_to_num(level),
                attr: heading_annotation(id.as_deref(), &classes),
            },
            Tag::BlockQuote(_) => FrameKind::BlockQuote,
            Tag::CodeBlock(kind) => FrameKind::CodeBlock {
                lang: match kind {
                    CodeBlockKind::Fenced(info) if !info.is_empty() => Some(info.to_string()),
                    _ => None,
                },
            },
            Tag::HtmlBlock => FrameKind::HtmlBlock,
            Tag::List(start) => FrameKind::List {
                flags: if start.is_some() {
                    ListFlags::ORDERED
                } else {
                    ListFlags::empty()
                },
            },
            Tag::Item => {
                let ordered = match self.stack.last().map(|frame| &frame.kind) {
                    Some(FrameKind::List { flags }) => *flags & ListFlags::ORDERED,
                    _ => ListFlags::empty(),
                };
                FrameKind::Item { flags: ordered }
            }
            Tag::Table(alignments) => {
                self.alignments = alignments;
                FrameKind::Table {
                    header: Buffer::new(),
                }
            }
            Tag::TableHead => {
                self.in_table_head = true;
                self.cell_index = 0;
                FrameKind::TableHead
            }
            Tag::TableRow => {
                self.cell_index = 0;
                FrameKind::TableRow
            }
            Tag::TableCell => FrameKind::TableCell {
                align: self
                    .alignments
                    .get(self.cell_index)
                    .copied()
                    .map_or(CellAlignment::None, cell_alignment),
                is_header: self.in_table_head,
            },
            Tag::Emphasis => FrameKind::Emphasis(Emphasis::Single),
            Tag::Strong => FrameKind::Emphasis(Emphasis::Double),
            Tag::Strikethrough => FrameKind::Strikethrough,
            Tag::Superscript => FrameKind::Superscript,
            Tag::Link {
                link_type,
                dest_url,
                title,
                ..
            } => FrameKind::Link {
                url: dest_url.to_string(),
                title: title.to_string(),
                link_type,
            },
            Tag::Image {
                dest_url, title, ..
            } => {
                self.image_depth += 1;
                FrameKind::Image {
                    url: dest_url.to_string(),
                    title: title.to_string(),
                }
            }
            Tag::Subscript
            | Tag::FootnoteDefinition(_)
            | Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition
            | Tag::MetadataBlock(_) => FrameKind::Transparent,
        };

        let is_block = matches!(
            kind,
            FrameKind::Paragraph
                | FrameKind::Heading { .. }
                | FrameKind::BlockQuote
                | FrameKind::CodeBlock { .. }
                | FrameKind::HtmlBlock
                | FrameKind::List { .. }
                | FrameKind::Table { .. }
        );
        let is_paragraph = matches!(kind, FrameKind::Paragraph);
        if !is_paragraph {
            self.flush_task_marker();
        }
        self.add_child(is_block);
        self.stack.push(Frame::new(kind));
        if is_paragraph {
            self.flush_task_marker();
        }
    }

    #[allow(clippy::too_many_lines)]
    fn end_tag(&mut self, _tag: TagEnd) {
        if self.stack.len() < 2 {
            return;
        }
        // An item holding only a task marker still gets it.
        self.flush_task_marker();
        let Some(frame) = self.stack.pop() else {
            return;
        };
        let table = self.table;
        let target = match frame.kind {
            FrameKind::Heading { .. } => self.header_target(),
            _ => self.stack.len() - 1,
        };
        let parent = &mut self.stack[target];
        let text = frame.out.as_str();

        match frame.kind {
            FrameKind::Root | FrameKind::Transparent => parent.out.push_str(text),
            FrameKind::Paragraph => table.render_paragraph(&mut parent.out, text, self.state),
            FrameKind::Heading { level, attr } => {
                table.render_header(&mut parent.out, text, attr.as_deref(), level, self.state);
            }
            FrameKind::BlockQuote => table.render_block_quote(&mut parent.out, text, self.state),
            FrameKind::CodeBlock { lang } => {
                table.render_block_code(&mut parent.out, text, lang.as_deref(), self.state);
            }
            FrameKind::HtmlBlock => table.render_raw_block(&mut parent.out, text, self.state),
            FrameKind::List { flags } => {
                table.render_list(&mut parent.out, text, flags, self.state);
            }
            FrameKind::Item { mut flags } => {
                table.render_list_item(&mut parent.out, text, None, &mut flags, self.state);
                if flags.contains(ListFlags::TASK)
                    && let FrameKind::List { flags: list_flags } = &mut parent.kind
                {
                    list_flags.insert(ListFlags::TASK);
                }
            }
            FrameKind::Table { header } => {
                table.render_table(&mut parent.out, header.as_str(), None, text, self.state);
                self.alignments.clear();
            }
            FrameKind::TableHead => {
                self.in_table_head = false;
                if let FrameKind::Table { header } = &mut parent.kind {
                    table.render_table_row(header, text, self.state);
                }
            }
            FrameKind::TableRow => table.render_table_row(&mut parent.out, text, self.state),
            FrameKind::TableCell { align, is_header } => {
                table.render_table_cell(&mut parent.out, text, align, is_header, self.state);
                self.cell_index += 1;
            }
            FrameKind::Emphasis(kind) => {
                let triple = frame
                    .first_emphasis
                    .as_ref()
                    .filter(|(inner, _)| frame.children == 1 && *inner != kind);
                match (triple, kind) {
                    (Some((_, inner)), _) => {
                        table.render_triple_emphasis(&mut parent.out, inner, self.state);
                    }
                    (None, Emphasis::Single) => {
                        table.render_emphasis(&mut parent.out, text, self.state);
                    }
                    (None, Emphasis::Double) => {
                        table.render_double_emphasis(&mut parent.out, text, self.state);
                    }
                }
                if triple.is_none() && parent.children == 1 {
                    parent.first_emphasis = Some((kind, text.to_owned()));
                }
            }
            FrameKind::Strikethrough => {
                table.render_strikethrough(&mut parent.out, text, self.state);
            }
            FrameKind::Superscript => table.render_superscript(&mut parent.out, text, self.state),
            FrameKind::Link {
                url,
                title,
                link_type,
            } => match link_type {
                LinkType::Autolink => {
                    table.render_autolink(&mut parent.out, &url, AutolinkKind::Normal, self.state);
                }
                LinkType::Email => {
                    table.render_autolink(&mut parent.out, &url, AutolinkKind::Email, self.state);
                }
                _ => table.render_link(&mut parent.out, &url, &title, text, None, self.state),
            },
            FrameKind::Image { url, title } => {
                self.image_depth -= 1;
                if self.image_depth > 0 {
                    parent.out.push_str(text);
                } else {
                    table.render_image(&mut parent.out, &url, &title, text, None, self.state);
                }
            }
        }
    }

    fn text(&mut self, text: &str) {
        self.flush_task_marker();
        self.add_child(false);
        if self.in_raw_text() {
            self.top().out.push_str(text);
        } else {
            let table = self.table;
            let last = self.stack.len() - 1;
            table.render_normal_text(&mut self.stack[last].out, text, self.state);
        }
    }

    fn code(&mut self, code: &str) {
        self.flush_task_marker();
        self.add_child(false);
        if self.in_raw_text() {
            self.top().out.push_str(code);
        } else {
            let table = self.table;
            let last = self.stack.len() - 1;
            table.render_code_span(&mut self.stack[last].out, code, self.state);
        }
    }

    fn raw_html(&mut self, html: &str) {
        self.flush_task_marker();
        self.add_child(false);
        if self.in_raw_text() {
            if self.image_depth == 0 {
                self.top().out.push_str(html);
            }
        } else {
            let table = self.table;
            let last = self.stack.len() - 1;
            table.render_raw_html(&mut self.stack[last].out, html, self.state);
        }
    }

    fn hard_break(&mut self) {
        self.flush_task_marker();
        self.add_child(false);
        if self.image_depth > 0 {
            self.top().out.push('\n');
        } else {
            let table = self.table;
            let last = self.stack.len() - 1;
            table.render_line_break(&mut self.stack[last].out, self.state);
        }
    }

    fn rule(&mut self) {
        self.flush_task_marker();
        self.add_child(true);
        let table = self.table;
        let last = self.stack.len() - 1;
        table.render_hrule(&mut self.stack[last].out, self.state);
    }

    /// Queue the literal marker so the list item operation can detect it.
    ///
    /// It is written into the item's first paragraph if one follows, else
    /// into the item itself.
    fn task_list_marker(&mut self, checked: bool) {
        self.task_marker = Some(if checked { "[x] " } else { "[ ] " });
    }

    fn flush_task_marker(&mut self) {
        if let Some(marker) = self.task_marker.take() {
            self.top().out.push_str(marker);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html;
    use crate::options::{ClassAttributes, RenderFlags};
    use crate::toc;
    use pretty_assertions::assert_eq;
    use pulldown_cmark::{Options, Parser};

    fn parse(markdown: &str) -> Parser<'_> {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_SUPERSCRIPT;
        Parser::new_ext(markdown, options)
    }

    fn render_html(markdown: &str, flags: RenderFlags) -> String {
        let (table, mut options) = html::renderer(flags, ClassAttributes::default());
        render(parse(markdown), &table, &mut options).into_string()
    }

    fn render_toc(markdown: &str) -> String {
        let (table, mut state) = toc::renderer(None, None, None);
        render(parse(markdown), &table, &mut state).into_string()
    }

    #[test]
    fn test_paragraphs_are_separated() {
        assert_eq!(
            render_html("one\n\ntwo", RenderFlags::empty()),
            "<p>one</p>\n\n<p>two</p>\n"
        );
    }

    #[test]
    fn test_inline_formatting() {
        assert_eq!(
            render_html("*a* **b** ~~c~~ `d` ^e^", RenderFlags::empty()),
            "<p><em>a</em> <strong>b</strong> <del>c</del> <code>d</code> <sup>e</sup></p>\n"
        );
    }

    #[test]
    fn test_triple_emphasis() {
        assert_eq!(
            render_html("***both***", RenderFlags::empty()),
            "<p><strong><em>both</em></strong></p>\n"
        );
    }

    #[test]
    fn test_strong_with_emphasis_and_text_is_not_triple() {
        assert_eq!(
            render_html("**a *b***", RenderFlags::empty()),
            "<p><strong>a <em>b</em></strong></p>\n"
        );
    }

    #[test]
    fn test_heading_attributes() {
        assert_eq!(
            render_html("# Title {#top .lead}", RenderFlags::empty()),
            "<h1 id=\"top\" class=\"lead\">Title</h1>\n"
        );
    }

    #[test]
    fn test_code_block_language() {
        assert_eq!(
            render_html("```rust\nlet x = 1 < 2;\n```", RenderFlags::empty()),
            "<pre><code class=\"rust\">let x = 1 &lt; 2;\n</code></pre>\n"
        );
    }

    #[test]
    fn test_indented_code_block() {
        assert_eq!(
            render_html("    raw & code\n", RenderFlags::empty()),
            "<pre><code>raw &amp; code\n</code></pre>\n"
        );
    }

    #[test]
    fn test_tight_list() {
        assert_eq!(
            render_html("- a\n- b", RenderFlags::empty()),
            "<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n"
        );
    }

    #[test]
    fn test_ordered_list() {
        assert_eq!(
            render_html("1. a\n2. b", RenderFlags::empty()),
            "<ol>\n<li>a</li>\n<li>b</li>\n</ol>\n"
        );
    }

    #[test]
    fn test_task_list() {
        assert_eq!(
            render_html("- [x] done\n- [ ] todo", RenderFlags::USE_TASK_LIST),
            "<ul>\n<li><input checked=\"\" type=\"checkbox\"> done</li>\n\
             <li><input type=\"checkbox\"> todo</li>\n</ul>\n"
        );
    }

    #[test]
    fn test_task_list_class() {
        let classes = ClassAttributes {
            task: Some("tasks".to_owned()),
            ..ClassAttributes::default()
        };
        let (table, mut options) = html::renderer(RenderFlags::USE_TASK_LIST, classes);
        let html = render(parse("- [x] done\n- plain"), &table, &mut options);
        assert!(html.as_str().starts_with("<ul class=\"tasks\">\n"));
    }

    #[test]
    fn test_loose_task_list() {
        assert_eq!(
            render_html("- [x] done\n\n- [ ] todo", RenderFlags::USE_TASK_LIST),
            "<ul>\n<li><p><input checked=\"\" type=\"checkbox\"> done</p></li>\n\
             <li><p><input type=\"checkbox\"> todo</p></li>\n</ul>\n"
        );
    }

    #[test]
    fn test_empty_task_item_keeps_marker() {
        assert_eq!(
            render_html("- [x]\n- b\n\npara\n", RenderFlags::USE_TASK_LIST),
            "<ul>\n<li><input checked=\"\" type=\"checkbox\"> </li>\n\
             <li>b</li>\n</ul>\n\n<p>para</p>\n"
        );
        assert_eq!(
            render_html("- [x]\n- b\n\npara\n", RenderFlags::empty()),
            "<ul>\n<li>[x] </li>\n<li>b</li>\n</ul>\n\n<p>para</p>\n"
        );
    }

    #[test]
    fn test_task_markers_without_flag_stay_text() {
        assert_eq!(
            render_html("- [x] done", RenderFlags::empty()),
            "<ul>\n<li>[x] done</li>\n</ul>\n"
        );
    }

    #[test]
    fn test_block_quote() {
        assert_eq!(
            render_html("> quoted", RenderFlags::empty()),
            "<blockquote>\n<p>quoted</p>\n</blockquote>\n"
        );
    }

    #[test]
    fn test_table() {
        let html = render_html("| a | b |\n|:-:|--:|\n| 1 | 2 |", RenderFlags::empty());
        assert_eq!(
            html,
            "<table><thead>\n<tr>\n<th align=\"center\">a</th>\n<th align=\"right\">b</th>\n</tr>\n\
             </thead><tbody>\n<tr>\n<td align=\"center\">1</td>\n<td align=\"right\">2</td>\n</tr>\n\
             </tbody></table>\n"
        );
    }

    #[test]
    fn test_links_and_autolinks() {
        assert_eq!(
            render_html(
                "[go](/x \"T\") <https://a.io> <me@b.io>",
                RenderFlags::empty()
            ),
            "<p><a href=\"/x\" title=\"T\">go</a> <a href=\"https://a.io\">https://a.io</a> \
             <a href=\"mailto:me@b.io\">me@b.io</a></p>\n"
        );
    }

    #[test]
    fn test_safelink_degrades_to_content() {
        assert_eq!(
            render_html("[click](javascript:alert(1))", RenderFlags::SAFELINK),
            "<p>click</p>\n"
        );
    }

    #[test]
    fn test_skip_links() {
        assert_eq!(
            render_html("[a](/x) <https://b.io>", RenderFlags::SKIP_LINKS),
            "<p>a https://b.io</p>\n"
        );
    }

    #[test]
    fn test_image_alt_is_plain_text() {
        assert_eq!(
            render_html("![an *alt* `x`](/i.png \"t\")", RenderFlags::empty()),
            "<p><img src=\"/i.png\" alt=\"an alt x\" title=\"t\"></p>\n"
        );
    }

    #[test]
    fn test_skip_images() {
        assert_eq!(
            render_html("a ![alt](/i.png) b", RenderFlags::SKIP_IMAGES),
            "<p>a  b</p>\n"
        );
    }

    #[test]
    fn test_hard_break_and_rule() {
        assert_eq!(
            render_html("a  \nb\n\n---", RenderFlags::USE_XHTML),
            "<p>a<br/>\nb</p>\n\n<hr/>\n"
        );
    }

    #[test]
    fn test_html_block_passthrough() {
        assert_eq!(
            render_html("<div>\nhi\n</div>", RenderFlags::empty()),
            "<div>\nhi\n</div>\n"
        );
    }

    #[test]
    fn test_html_block_escaped() {
        assert_eq!(
            render_html("<div>x</div>", RenderFlags::ESCAPE),
            "<p>&lt;div&gt;x&lt;/div&gt;</p>\n"
        );
    }

    #[test]
    fn test_html_block_skipped() {
        assert_eq!(render_html("<div>x</div>", RenderFlags::SKIP_HTML), "");
    }

    #[test]
    fn test_style_block_kept_under_skip_style() {
        assert_eq!(
            render_html("<style>\nbody{}\n</style>\n\npara\n", RenderFlags::SKIP_STYLE),
            "<style>\nbody{}\n</style>\n\n<p>para</p>\n"
        );
    }

    #[test]
    fn test_inline_style_skipped() {
        assert_eq!(
            render_html("a <style>b</style> c", RenderFlags::SKIP_STYLE),
            "<p>a b c</p>\n"
        );
    }

    #[test]
    fn test_toc_pass_keeps_only_headers() {
        let html = render_toc("# One\n\ntext\n\n## *Two*\n\n- item\n\n```\ncode\n```");
        assert_eq!(
            html,
            "<ul>\n<li>\n<a href=\"#toc_0\">One</a>\n\
             <ul>\n<li>\n<a href=\"#toc_1\"><em>Two</em></a>\n\
             </li>\n</ul>\n</li>\n</ul>\n"
        );
    }

    #[test]
    fn test_toc_pass_keeps_nested_headers() {
        let html = render_toc("# A\n\n> ## Quoted\n\n# B\n\n- ## InList\n\n> - > ### Deep\n");
        assert_eq!(
            html,
            "<ul>\n<li>\n<a href=\"#toc_0\">A</a>\n\
             <ul>\n<li>\n<a href=\"#toc_1\">Quoted</a>\n\
             </li>\n</ul>\n</li>\n<li>\n<a href=\"#toc_2\">B</a>\n\
             <ul>\n<li>\n<a href=\"#toc_3\">InList</a>\n\
             <ul>\n<li>\n<a href=\"#toc_4\">Deep</a>\n\
             </li>\n</ul>\n</li>\n</ul>\n</li>\n</ul>\n"
        );
    }

    #[test]
    fn test_toc_pass_strips_links() {
        let html = render_toc("# See [docs](/docs)");
        assert!(html.contains("<a href=\"#toc_0\">See docs</a>"));
    }

    #[test]
    fn test_unbalanced_events_are_flushed() {
        let (table, mut options) = html::renderer(RenderFlags::empty(), ClassAttributes::default());
        let events = vec![Event::Start(Tag::Emphasis), Event::Text("x".into())];
        assert_eq!(render(events, &table, &mut options).as_str(), "x");
    }
}
