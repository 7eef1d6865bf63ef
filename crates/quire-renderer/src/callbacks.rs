//! Callback table: one optional render operation per node kind.
//!
//! A parser driver invokes the table in document order, children first. Each
//! slot may be absent; the `render_*` dispatch methods apply the default
//! policy of that slot so drivers never have to special-case a missing
//! operation.

use bitflags::bitflags;

use crate::buffer::Buffer;
use crate::escape::escape_html;

bitflags! {
    /// List and list item flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ListFlags: u8 {
        /// The list is ordered (`<ol>`).
        const ORDERED = 1 << 0;
        /// The item's content is block-level (a "loose" item whose rendered
        /// text starts with a block tag such as `<p>`).
        const BLOCK = 1 << 1;
        /// At least one item was rendered as a task item.
        const TASK = 1 << 2;
    }
}

/// Kind of an autolink.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AutolinkKind {
    /// URL autolink (`<https://…>`).
    #[default]
    Normal,
    /// Bare email address; rendered with a `mailto:` href.
    Email,
}

/// Table cell alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellAlignment {
    #[default]
    None,
    Left,
    Center,
    Right,
}

/// What an absent block container slot does with its rendered children.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AbsentBlock {
    /// Append the children unmodified.
    #[default]
    PassThrough,
    /// Drop the children.
    Discard,
}

/// `code_block(out, text, language_annotation, state)`
pub type BlockCodeFn<S> = fn(&mut Buffer, &str, Option<&str>, &mut S);
/// Block operation over already-rendered (or raw) text.
pub type BlockTextFn<S> = fn(&mut Buffer, &str, &mut S);
/// `header(out, text, attribute_annotation, level, state)`
pub type HeaderFn<S> = fn(&mut Buffer, &str, Option<&str>, u8, &mut S);
/// Operation without content: horizontal rule, document header and footer.
pub type MarkerFn<S> = fn(&mut Buffer, &mut S);
/// `list(out, text, flags, state)`
pub type ListFn<S> = fn(&mut Buffer, &str, ListFlags, &mut S);
/// `list_item(out, text, attribute_annotation, flags, state)`
///
/// May set [`ListFlags::TASK`] in `flags` for the enclosing list to observe.
pub type ListItemFn<S> = fn(&mut Buffer, &str, Option<&str>, &mut ListFlags, &mut S);
/// `table(out, header, attribute_annotation, body, state)`
pub type TableFn<S> = fn(&mut Buffer, &str, Option<&str>, &str, &mut S);
/// `table_cell(out, text, alignment, is_header, state)`
pub type TableCellFn<S> = fn(&mut Buffer, &str, CellAlignment, bool, &mut S);
/// `autolink(out, url, kind, state) -> handled`
pub type AutolinkFn<S> = fn(&mut Buffer, &str, AutolinkKind, &mut S) -> bool;
/// Span operation over rendered or raw text; returns whether it was handled.
pub type SpanFn<S> = fn(&mut Buffer, &str, &mut S) -> bool;
/// `image(out, url, title, alt, attribute_annotation, state) -> handled`
pub type ImageFn<S> = fn(&mut Buffer, &str, &str, &str, Option<&str>, &mut S) -> bool;
/// `line_break(out, state) -> handled`
pub type LineBreakFn<S> = fn(&mut Buffer, &mut S) -> bool;
/// `link(out, url, title, content, attribute_annotation, state) -> handled`
pub type LinkFn<S> = fn(&mut Buffer, &str, &str, &str, Option<&str>, &mut S) -> bool;
/// `normal_text(out, text, state)`
pub type TextFn<S> = fn(&mut Buffer, &str, &mut S);

/// Render operations for every node kind, generic over the per-pass state.
pub struct CallbackTable<S> {
    // Block level
    pub block_code: Option<BlockCodeFn<S>>,
    pub block_quote: Option<BlockTextFn<S>>,
    pub raw_block: Option<BlockTextFn<S>>,
    pub header: Option<HeaderFn<S>>,
    pub hrule: Option<MarkerFn<S>>,
    pub list: Option<ListFn<S>>,
    pub list_item: Option<ListItemFn<S>>,
    pub paragraph: Option<BlockTextFn<S>>,
    pub table: Option<TableFn<S>>,
    pub table_row: Option<BlockTextFn<S>>,
    pub table_cell: Option<TableCellFn<S>>,
    pub doc_header: Option<MarkerFn<S>>,
    pub doc_footer: Option<MarkerFn<S>>,

    // Span level
    pub autolink: Option<AutolinkFn<S>>,
    pub code_span: Option<SpanFn<S>>,
    pub double_emphasis: Option<SpanFn<S>>,
    pub emphasis: Option<SpanFn<S>>,
    pub image: Option<ImageFn<S>>,
    pub line_break: Option<LineBreakFn<S>>,
    pub link: Option<LinkFn<S>>,
    pub raw_html: Option<SpanFn<S>>,
    pub triple_emphasis: Option<SpanFn<S>>,
    pub strikethrough: Option<SpanFn<S>>,
    pub superscript: Option<SpanFn<S>>,
    pub normal_text: Option<TextFn<S>>,

    /// Policy for absent block container slots.
    pub absent_block: AbsentBlock,
}

impl<S> CallbackTable<S> {
    /// Table with every slot absent.
    #[must_use]
    pub const fn empty(absent_block: AbsentBlock) -> Self {
        Self {
            block_code: None,
            block_quote: None,
            raw_block: None,
            header: None,
            hrule: None,
            list: None,
            list_item: None,
            paragraph: None,
            table: None,
            table_row: None,
            table_cell: None,
            doc_header: None,
            doc_footer: None,
            autolink: None,
            code_span: None,
            double_emphasis: None,
            emphasis: None,
            image: None,
            line_break: None,
            link: None,
            raw_html: None,
            triple_emphasis: None,
            strikethrough: None,
            superscript: None,
            normal_text: None,
            absent_block,
        }
    }

    fn absent_container(&self, out: &mut Buffer, text: &str) {
        if self.absent_block == AbsentBlock::PassThrough {
            out.push_str(text);
        }
    }

    pub fn render_block_code(&self, out: &mut Buffer, text: &str, lang: Option<&str>, state: &mut S) {
        if let Some(op) = self.block_code {
            op(out, text, lang, state);
        }
    }

    pub fn render_block_quote(&self, out: &mut Buffer, text: &str, state: &mut S) {
        match self.block_quote {
            Some(op) => op(out, text, state),
            None => self.absent_container(out, text),
        }
    }

    /// Without a raw block operation, the block is treated as inline raw HTML
    /// inside a paragraph, so the inline HTML policy still applies.
    pub fn render_raw_block(&self, out: &mut Buffer, text: &str, state: &mut S) {
        if let Some(op) = self.raw_block {
            op(out, text, state);
            return;
        }
        let mut inline = Buffer::new();
        self.render_raw_html(&mut inline, text.trim_matches('\n'), state);
        self.render_paragraph(out, inline.as_str(), state);
    }

    pub fn render_header(
        &self,
        out: &mut Buffer,
        text: &str,
        attr: Option<&str>,
        level: u8,
        state: &mut S,
    ) {
        match self.header {
            Some(op) => op(out, text, attr, level, state),
            None => self.absent_container(out, text),
        }
    }

    pub fn render_hrule(&self, out: &mut Buffer, state: &mut S) {
        if let Some(op) = self.hrule {
            op(out, state);
        }
    }

    pub fn render_list(&self, out: &mut Buffer, text: &str, flags: ListFlags, state: &mut S) {
        match self.list {
            Some(op) => op(out, text, flags, state),
            None => self.absent_container(out, text),
        }
    }

    pub fn render_list_item(
        &self,
        out: &mut Buffer,
        text: &str,
        attr: Option<&str>,
        flags: &mut ListFlags,
        state: &mut S,
    ) {
        match self.list_item {
            Some(op) => op(out, text, attr, flags, state),
            None => self.absent_container(out, text),
        }
    }

    pub fn render_paragraph(&self, out: &mut Buffer, text: &str, state: &mut S) {
        match self.paragraph {
            Some(op) => op(out, text, state),
            None => self.absent_container(out, text),
        }
    }

    pub fn render_table(
        &self,
        out: &mut Buffer,
        header: &str,
        attr: Option<&str>,
        body: &str,
        state: &mut S,
    ) {
        match self.table {
            Some(op) => op(out, header, attr, body, state),
            None => {
                self.absent_container(out, header);
                self.absent_container(out, body);
            }
        }
    }

    pub fn render_table_row(&self, out: &mut Buffer, text: &str, state: &mut S) {
        match self.table_row {
            Some(op) => op(out, text, state),
            None => self.absent_container(out, text),
        }
    }

    pub fn render_table_cell(
        &self,
        out: &mut Buffer,
        text: &str,
        align: CellAlignment,
        header: bool,
        state: &mut S,
    ) {
        match self.table_cell {
            Some(op) => op(out, text, align, header, state),
            None => self.absent_container(out, text),
        }
    }

    pub fn render_doc_header(&self, out: &mut Buffer, state: &mut S) {
        if let Some(op) = self.doc_header {
            op(out, state);
        }
    }

    pub fn render_doc_footer(&self, out: &mut Buffer, state: &mut S) {
        if let Some(op) = self.doc_footer {
            op(out, state);
        }
    }

    /// Unhandled autolinks degrade to their URL as plain text.
    pub fn render_autolink(&self, out: &mut Buffer, url: &str, kind: AutolinkKind, state: &mut S) {
        let handled = self.autolink.is_some_and(|op| op(out, url, kind, state));
        if !handled {
            self.render_normal_text(out, url, state);
        }
    }

    pub fn render_code_span(&self, out: &mut Buffer, text: &str, state: &mut S) {
        let handled = self.code_span.is_some_and(|op| op(out, text, state));
        if !handled {
            self.render_normal_text(out, text, state);
        }
    }

    pub fn render_double_emphasis(&self, out: &mut Buffer, text: &str, state: &mut S) {
        span_or_content(self.double_emphasis, out, text, state);
    }

    pub fn render_emphasis(&self, out: &mut Buffer, text: &str, state: &mut S) {
        span_or_content(self.emphasis, out, text, state);
    }

    pub fn render_triple_emphasis(&self, out: &mut Buffer, text: &str, state: &mut S) {
        span_or_content(self.triple_emphasis, out, text, state);
    }

    pub fn render_strikethrough(&self, out: &mut Buffer, text: &str, state: &mut S) {
        span_or_content(self.strikethrough, out, text, state);
    }

    pub fn render_superscript(&self, out: &mut Buffer, text: &str, state: &mut S) {
        span_or_content(self.superscript, out, text, state);
    }

    /// Unhandled images are dropped.
    pub fn render_image(
        &self,
        out: &mut Buffer,
        url: &str,
        title: &str,
        alt: &str,
        attr: Option<&str>,
        state: &mut S,
    ) {
        if let Some(op) = self.image {
            op(out, url, title, alt, attr, state);
        }
    }

    pub fn render_line_break(&self, out: &mut Buffer, state: &mut S) {
        if let Some(op) = self.line_break {
            op(out, state);
        }
    }

    /// Unhandled links degrade to their rendered content.
    pub fn render_link(
        &self,
        out: &mut Buffer,
        url: &str,
        title: &str,
        content: &str,
        attr: Option<&str>,
        state: &mut S,
    ) {
        let handled = self
            .link
            .is_some_and(|op| op(out, url, title, content, attr, state));
        if !handled {
            out.push_str(content);
        }
    }

    /// Unhandled raw HTML is dropped.
    pub fn render_raw_html(&self, out: &mut Buffer, text: &str, state: &mut S) {
        if let Some(op) = self.raw_html {
            op(out, text, state);
        }
    }

    pub fn render_normal_text(&self, out: &mut Buffer, text: &str, state: &mut S) {
        match self.normal_text {
            Some(op) => op(out, text, state),
            None => out.push_str(&escape_html(text)),
        }
    }
}

/// Call a wrapping span operation, or append the content unwrapped.
fn span_or_content<S>(op: Option<SpanFn<S>>, out: &mut Buffer, text: &str, state: &mut S) {
    let handled = op.is_some_and(|op| op(out, text, state));
    if !handled {
        out.push_str(text);
    }
}

impl<S> Default for CallbackTable<S> {
    fn default() -> Self {
        Self::empty(AbsentBlock::default())
    }
}

impl<S> Clone for CallbackTable<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for CallbackTable<S> {}

impl<S> std::fmt::Debug for CallbackTable<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackTable")
            .field("block_code", &self.block_code.is_some())
            .field("block_quote", &self.block_quote.is_some())
            .field("raw_block", &self.raw_block.is_some())
            .field("header", &self.header.is_some())
            .field("hrule", &self.hrule.is_some())
            .field("list", &self.list.is_some())
            .field("list_item", &self.list_item.is_some())
            .field("paragraph", &self.paragraph.is_some())
            .field("table", &self.table.is_some())
            .field("autolink", &self.autolink.is_some())
            .field("image", &self.image.is_some())
            .field("link", &self.link.is_some())
            .field("raw_html", &self.raw_html.is_some())
            .field("absent_block", &self.absent_block)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap_em(out: &mut Buffer, text: &str, _: &mut ()) -> bool {
        if text.is_empty() {
            return false;
        }
        out.push_str("<em>");
        out.push_str(text);
        out.push_str("</em>");
        true
    }

    fn refuse_link(
        _: &mut Buffer,
        _: &str,
        _: &str,
        _: &str,
        _: Option<&str>,
        _: &mut (),
    ) -> bool {
        false
    }

    fn pass_raw(out: &mut Buffer, text: &str, _: &mut ()) -> bool {
        out.push_str("[raw:");
        out.push_str(text);
        out.push(']');
        true
    }

    fn paragraph(out: &mut Buffer, text: &str, _: &mut ()) {
        if !text.is_empty() {
            out.push_str("<p>");
            out.push_str(text);
            out.push_str("</p>");
        }
    }

    fn render(f: impl FnOnce(&mut Buffer, &mut ())) -> String {
        let mut out = Buffer::new();
        f(&mut out, &mut ());
        out.into_string()
    }

    #[test]
    fn test_absent_container_passes_through() {
        let table = CallbackTable::<()>::empty(AbsentBlock::PassThrough);
        let html = render(|out, state| table.render_paragraph(out, "text", state));
        assert_eq!(html, "text");
    }

    #[test]
    fn test_absent_container_discards() {
        let table = CallbackTable::<()>::empty(AbsentBlock::Discard);
        let html = render(|out, state| {
            table.render_paragraph(out, "text", state);
            table.render_table(out, "head", None, "body", state);
        });
        assert_eq!(html, "");
    }

    #[test]
    fn test_absent_leaves_are_suppressed() {
        let table = CallbackTable::<()>::empty(AbsentBlock::PassThrough);
        let html = render(|out, state| {
            table.render_block_code(out, "code", None, state);
            table.render_hrule(out, state);
            table.render_image(out, "a.png", "", "alt", None, state);
            table.render_line_break(out, state);
            table.render_raw_html(out, "<b>", state);
        });
        assert_eq!(html, "");
    }

    #[test]
    fn test_absent_normal_text_is_escaped() {
        let table = CallbackTable::<()>::default();
        let html = render(|out, state| table.render_normal_text(out, "a < b", state));
        assert_eq!(html, "a &lt; b");
    }

    #[test]
    fn test_absent_autolink_degrades_to_text() {
        let table = CallbackTable::<()>::default();
        let html = render(|out, state| {
            table.render_autolink(out, "http://x.org/?a&b", AutolinkKind::Normal, state);
        });
        assert_eq!(html, "http://x.org/?a&amp;b");
    }

    #[test]
    fn test_span_not_handled_keeps_content() {
        let mut table = CallbackTable::<()>::default();
        table.emphasis = Some(wrap_em);
        let html = render(|out, state| {
            table.render_emphasis(out, "", state);
            table.render_emphasis(out, "x", state);
        });
        assert_eq!(html, "<em>x</em>");
    }

    #[test]
    fn test_refused_link_keeps_content() {
        let mut table = CallbackTable::<()>::default();
        table.link = Some(refuse_link);
        let html = render(|out, state| {
            table.render_link(out, "javascript:x", "", "<em>label</em>", None, state);
        });
        assert_eq!(html, "<em>label</em>");
    }

    #[test]
    fn test_absent_raw_block_goes_through_inline_policy() {
        let mut table = CallbackTable::<()>::default();
        table.raw_html = Some(pass_raw);
        table.paragraph = Some(paragraph);
        let html = render(|out, state| table.render_raw_block(out, "\n<div>x</div>\n", state));
        assert_eq!(html, "<p>[raw:<div>x</div>]</p>");
    }

    #[test]
    fn test_absent_raw_block_without_inline_is_dropped() {
        let mut table = CallbackTable::<()>::default();
        table.paragraph = Some(paragraph);
        let html = render(|out, state| table.render_raw_block(out, "<div>x</div>", state));
        assert_eq!(html, "");
    }

    #[test]
    fn test_debug_reports_present_slots() {
        let mut table = CallbackTable::<()>::default();
        table.paragraph = Some(paragraph);
        let debug = format!("{table:?}");
        assert!(debug.contains("paragraph: true"));
        assert!(debug.contains("header: false"));
    }
}
