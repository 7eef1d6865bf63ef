//! Table of contents (outline) render pass.
//!
//! Reuses the inline formatting operations of the HTML renderer and replaces
//! everything block-level with a single header operation that builds nested
//! `<ul><li>` lists. Other blocks are discarded.

use std::fmt::Write;

use crate::attributes::AttributeList;
use crate::buffer::Buffer;
use crate::callbacks::{AbsentBlock, CallbackTable};
use crate::escape::escape_html;
use crate::html;
use crate::options::AnchorCounter;

/// Mutable state of one outline pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TocState {
    /// Outline depth of the currently open `<li>` (0 = nothing open).
    pub current_level: u8,
    /// Offset subtracted from raw header levels, fixed by the first emitted
    /// header.
    level_offset: Option<u8>,
    /// Header anchor counter, shared protocol with the body pass.
    pub anchors: AnchorCounter,
    /// Headers above this level (numerically lower) are left out.
    pub begin_level: Option<u8>,
    /// Headers below this level (numerically higher) are left out.
    pub end_level: Option<u8>,
    /// Class of the outermost `<ul>`.
    pub outline_class: Option<String>,
    class_emitted: bool,
}

impl TocState {
    #[must_use]
    pub fn new(begin_level: Option<u8>, end_level: Option<u8>, outline_class: Option<String>) -> Self {
        Self {
            begin_level,
            end_level,
            outline_class,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_anchors(mut self, anchors: AnchorCounter) -> Self {
        self.anchors = anchors;
        self
    }

    /// Whether a header at `level` is outside the configured range.
    fn is_filtered(&self, level: u8) -> bool {
        let begin = self.begin_level.unwrap_or(0);
        if level < begin {
            return true;
        }
        self.end_level
            .is_some_and(|end| end >= begin && level > end)
    }
}

/// Build the callback table and state for an outline pass.
#[must_use]
pub fn renderer(
    begin_level: Option<u8>,
    end_level: Option<u8>,
    outline_class: Option<String>,
) -> (CallbackTable<TocState>, TocState) {
    let table = CallbackTable {
        header: Some(header),
        doc_footer: Some(finalize),
        code_span: Some(html::code_span),
        double_emphasis: Some(html::double_emphasis),
        emphasis: Some(html::emphasis),
        link: Some(link),
        triple_emphasis: Some(html::triple_emphasis),
        strikethrough: Some(html::strikethrough),
        superscript: Some(html::superscript),
        ..CallbackTable::empty(AbsentBlock::Discard)
    };

    (table, TocState::new(begin_level, end_level, outline_class))
}

fn header(out: &mut Buffer, text: &str, attr: Option<&str>, level: u8, state: &mut TocState) {
    let anchor = state.anchors.claim();

    if state.is_filtered(level) {
        tracing::trace!(level, anchor, "Header outside outline range");
        return;
    }

    let offset = *state.level_offset.get_or_insert(level.saturating_sub(1));
    let level = level.saturating_sub(offset).max(1);

    if level > state.current_level {
        while level > state.current_level {
            match state.outline_class.as_deref().filter(|_| !state.class_emitted) {
                Some(class) => {
                    write!(out, "<ul class=\"{}\">\n<li>\n", escape_html(class)).unwrap();
                    state.class_emitted = true;
                }
                None => out.push_str("<ul>\n<li>\n"),
            }
            state.current_level += 1;
        }
    } else if level < state.current_level {
        out.push_str("</li>\n");
        while level < state.current_level {
            out.push_str("</ul>\n</li>\n");
            state.current_level -= 1;
        }
        out.push_str("<li>\n");
    } else {
        out.push_str("</li>\n<li>\n");
    }

    let id = attr.and_then(|attr| AttributeList::parse(attr).id);
    match id {
        Some(id) => write!(out, "<a href=\"#{}\">", escape_html(id)).unwrap(),
        None => write!(out, "<a href=\"#toc_{anchor}\">").unwrap(),
    }
    out.push_str(text);
    out.push_str("</a>\n");
}

/// Outline entries are not navigable inside themselves: keep only the content.
fn link(
    out: &mut Buffer,
    _url: &str,
    _title: &str,
    content: &str,
    _attr: Option<&str>,
    _state: &mut TocState,
) -> bool {
    out.push_str(content);
    true
}

/// Close every open `<li>` and `<ul>`.
fn finalize(out: &mut Buffer, state: &mut TocState) {
    while state.current_level > 0 {
        out.push_str("</li>\n</ul>\n");
        state.current_level -= 1;
    }
}
