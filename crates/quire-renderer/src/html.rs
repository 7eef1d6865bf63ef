//! Full HTML render operations.
//!
//! [`renderer`] builds the callback table for a full render. Block operations
//! receive already-rendered child text; span operations return whether they
//! handled the node, so the table can fall back for refused links and empty
//! emphasis.

use std::fmt::Write;

use crate::attributes::{AttributeList, write_attributes};
use crate::buffer::Buffer;
use crate::callbacks::{AbsentBlock, AutolinkKind, CallbackTable, CellAlignment, ListFlags};
use crate::escape::{escape_href, escape_html};
use crate::options::{ClassAttributes, RenderFlags, RenderOptions};

/// URL prefixes accepted by the safe-link check.
const SAFE_PREFIXES: [&str; 4] = ["http://", "https://", "ftp://", "mailto:"];

/// Result of matching a raw HTML fragment against a tag name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HtmlTag {
    /// The fragment is not that tag.
    None,
    /// Opening tag, e.g. `<style>` or `<a href="…">`.
    Open,
    /// Closing tag, e.g. `</style>`.
    Close,
}

/// Build the callback table and options for a full HTML render.
///
/// Flags also switch off whole operations: `SKIP_IMAGES` removes image
/// rendering, `SKIP_LINKS` removes links and autolinks, and `SKIP_HTML` or
/// `ESCAPE` remove raw block pass-through so HTML blocks go through the inline
/// raw HTML policy instead.
#[must_use]
pub fn renderer(
    flags: RenderFlags,
    classes: ClassAttributes,
) -> (CallbackTable<RenderOptions>, RenderOptions) {
    let mut table = CallbackTable {
        block_code: Some(block_code),
        block_quote: Some(block_quote),
        raw_block: Some(raw_block),
        header: Some(header),
        hrule: Some(hrule),
        list: Some(list),
        list_item: Some(list_item),
        paragraph: Some(paragraph),
        table: Some(table),
        table_row: Some(table_row),
        table_cell: Some(table_cell),
        doc_header: None,
        doc_footer: None,
        autolink: Some(autolink),
        code_span: Some(code_span),
        double_emphasis: Some(double_emphasis),
        emphasis: Some(emphasis),
        image: Some(image),
        line_break: Some(line_break),
        link: Some(link),
        raw_html: Some(raw_html),
        triple_emphasis: Some(triple_emphasis),
        strikethrough: Some(strikethrough),
        superscript: Some(superscript),
        normal_text: Some(normal_text),
        absent_block: AbsentBlock::PassThrough,
    };

    if flags.contains(RenderFlags::SKIP_IMAGES) {
        table.image = None;
    }
    if flags.contains(RenderFlags::SKIP_LINKS) {
        table.link = None;
        table.autolink = None;
    }
    if flags.intersects(RenderFlags::SKIP_HTML | RenderFlags::ESCAPE) {
        table.raw_block = None;
    }

    (table, RenderOptions::new(flags, classes))
}

/// Match a raw HTML fragment against `name`.
///
/// The fragment must start with `<`, optionally `/`, then exactly `name`
/// (case-sensitive) followed by whitespace or `>`.
#[must_use]
pub fn is_tag(fragment: &str, name: &str) -> HtmlTag {
    let bytes = fragment.as_bytes();
    if bytes.len() < 3 || bytes[0] != b'<' {
        return HtmlTag::None;
    }

    let (closing, rest) = match bytes[1] {
        b'/' => (true, &bytes[2..]),
        _ => (false, &bytes[1..]),
    };

    let Some(after) = rest.strip_prefix(name.as_bytes()) else {
        return HtmlTag::None;
    };

    match after.first() {
        Some(&b) if b.is_ascii_whitespace() || b == b'>' => {
            if closing {
                HtmlTag::Close
            } else {
                HtmlTag::Open
            }
        }
        _ => HtmlTag::None,
    }
}

/// Whether a link target is allowed under [`RenderFlags::SAFELINK`].
///
/// Accepts `http`, `https`, `ftp` and `mailto` URLs (the prefix must be
/// followed by an alphanumeric character) and relative references, i.e.
/// targets without a scheme that are not protocol-relative (`//host`).
#[must_use]
pub fn is_safe_link(url: &str) -> bool {
    let bytes = url.as_bytes();

    let allowed_scheme = SAFE_PREFIXES.iter().any(|prefix| {
        bytes.len() > prefix.len()
            && bytes[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
            && bytes[prefix.len()].is_ascii_alphanumeric()
    });
    if allowed_scheme {
        return true;
    }

    is_relative_reference(url)
}

/// A non-empty reference without a scheme that stays on the current host.
fn is_relative_reference(url: &str) -> bool {
    if url.is_empty() || url.starts_with("//") {
        return false;
    }
    let path_end = url.find(['/', '?', '#']).unwrap_or(url.len());
    !url[..path_end].contains(':')
}

/// Separate a block from preceding output with a newline.
fn separate(out: &mut Buffer) {
    if !out.is_empty() {
        out.push('\n');
    }
}

fn void_close(options: &RenderOptions) -> &'static str {
    if options.xhtml() { "/>" } else { ">" }
}

// Block level

fn block_code(out: &mut Buffer, text: &str, lang: Option<&str>, _options: &mut RenderOptions) {
    separate(out);

    match lang.filter(|lang| !lang.trim().is_empty()) {
        Some(lang) => {
            out.push_str("<pre><code");
            if !write_attributes(out, lang) {
                // Plain language hint: every whitespace-separated word is a class.
                out.push_str(" class=\"");
                for (i, word) in lang.split_ascii_whitespace().enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    let word = word.strip_prefix('.').unwrap_or(word);
                    out.push_str(&escape_html(word));
                }
                out.push('"');
            }
            out.push('>');
        }
        None => out.push_str("<pre><code>"),
    }

    out.push_str(&escape_html(text));
    out.push_str("</code></pre>\n");
}

fn block_quote(out: &mut Buffer, text: &str, _options: &mut RenderOptions) {
    separate(out);
    out.push_str("<blockquote>\n");
    out.push_str(text);
    out.push_str("</blockquote>\n");
}

fn raw_block(out: &mut Buffer, text: &str, options: &mut RenderOptions) {
    let trimmed = text.trim_matches('\n');
    if trimmed.is_empty() {
        return;
    }
    separate(out);
    out.push_str(trimmed);
    out.push('\n');
}

fn header(out: &mut Buffer, text: &str, attr: Option<&str>, level: u8, options: &mut RenderOptions) {
    separate(out);

    let attrs = attr.map(AttributeList::parse).unwrap_or_default();
    write!(out, "<h{level}").unwrap();

    // Every header claims one anchor in TOC mode, so outline links stay aligned
    // even when an annotation supplies its own id.
    if options.flags.contains(RenderFlags::TOC) {
        let anchor = options.anchors.claim();
        if attrs.id.is_none() {
            write!(out, r#" id="toc_{anchor}""#).unwrap();
        }
    }
    attrs.write_to(out);

    out.push('>');
    out.push_str(text);
    write!(out, "</h{level}>\n").unwrap();
}

fn hrule(out: &mut Buffer, options: &mut RenderOptions) {
    separate(out);
    out.push_str("<hr");
    out.push_str(void_close(options));
    out.push('\n');
}

fn list(out: &mut Buffer, text: &str, flags: ListFlags, options: &mut RenderOptions) {
    separate(out);

    let ordered = flags.contains(ListFlags::ORDERED);
    let tag = if ordered { "ol" } else { "ul" };
    let classes = &options.classes;
    let class = classes
        .task
        .as_deref()
        .filter(|_| flags.contains(ListFlags::TASK))
        .or(if ordered {
            classes.ol.as_deref()
        } else {
            classes.ul.as_deref()
        });

    match class {
        Some(class) => write!(out, "<{tag} class=\"{}\">\n", escape_html(class)).unwrap(),
        None => write!(out, "<{tag}>\n").unwrap(),
    }
    out.push_str(text);
    write!(out, "</{tag}>\n").unwrap();
}

fn list_item(
    out: &mut Buffer,
    text: &str,
    attr: Option<&str>,
    flags: &mut ListFlags,
    options: &mut RenderOptions,
) {
    let body = text.trim_end_matches('\n');

    out.push_str("<li");
    if let Some(attr) = attr {
        write_attributes(out, attr);
    }
    out.push('>');

    let mut rest = body;
    if options.flags.contains(RenderFlags::USE_TASK_LIST) {
        // A loose item starts with its `<p>` tag; the marker follows it.
        let prefix_len = if flags.contains(ListFlags::BLOCK) { 3 } else { 0 };
        if let Some((prefix, checked, after)) = split_task_marker(body, prefix_len) {
            out.push_str(prefix);
            if checked {
                out.push_str(r#"<input checked="" type="checkbox""#);
            } else {
                out.push_str(r#"<input type="checkbox""#);
            }
            out.push_str(void_close(options));
            flags.insert(ListFlags::TASK);
            rest = after;
        }
    }

    out.push_str(rest);
    out.push_str("</li>\n");
}

/// Split `text` into (block prefix, checked, remainder) if a task marker
/// follows the first `prefix_len` bytes.
fn split_task_marker(text: &str, prefix_len: usize) -> Option<(&str, bool, &str)> {
    let prefix = text.get(..prefix_len)?;
    let marked = text.get(prefix_len..)?;
    if let Some(after) = marked.strip_prefix("[ ]") {
        Some((prefix, false, after))
    } else {
        marked.strip_prefix("[x]").map(|after| (prefix, true, after))
    }
}

fn paragraph(out: &mut Buffer, text: &str, options: &mut RenderOptions) {
    let Some(start) = text.find(|c: char| !c.is_ascii_whitespace()) else {
        return;
    };
    let body = &text[start..];

    separate(out);
    out.push_str("<p>");

    let flags = options.flags;
    if flags.contains(RenderFlags::HARD_WRAP) {
        let content = body.strip_suffix('\n').unwrap_or(body);
        for (i, line) in content.split('\n').enumerate() {
            if i > 0 {
                line_break(out, options);
            }
            out.push_str(line);
        }
    } else if flags.contains(RenderFlags::SKIP_LINEBREAK) {
        let content = body.strip_suffix('\n').unwrap_or(body);
        let mut previous: Option<&str> = None;
        for line in content.split('\n') {
            if let Some(prev) = previous
                && joins_with_space(prev)
            {
                out.push(' ');
            }
            out.push_str(line);
            previous = Some(line);
        }
    } else {
        out.push_str(body);
    }

    out.push_str("</p>\n");
}

/// Whether a collapsed line boundary after `line` needs a joining space.
///
/// No space after an explicit break or after a non-ASCII byte (CJK text is
/// joined directly).
fn joins_with_space(line: &str) -> bool {
    let after_break = line.ends_with("<br>") || line.ends_with("<br/>");
    !after_break && line.as_bytes().last().is_none_or(u8::is_ascii)
}

fn table(
    out: &mut Buffer,
    header: &str,
    attr: Option<&str>,
    body: &str,
    _options: &mut RenderOptions,
) {
    separate(out);
    out.push_str("<table");
    if let Some(attr) = attr {
        write_attributes(out, attr);
    }
    out.push_str("><thead>\n");
    out.push_str(header);
    out.push_str("</thead><tbody>\n");
    out.push_str(body);
    out.push_str("</tbody></table>\n");
}

fn table_row(out: &mut Buffer, text: &str, _options: &mut RenderOptions) {
    out.push_str("<tr>\n");
    out.push_str(text);
    out.push_str("</tr>\n");
}

fn table_cell(
    out: &mut Buffer,
    text: &str,
    align: CellAlignment,
    is_header: bool,
    _options: &mut RenderOptions,
) {
    let tag = if is_header { "th" } else { "td" };
    let align = match align {
        CellAlignment::Center => r#" align="center""#,
        CellAlignment::Left => r#" align="left""#,
        CellAlignment::Right => r#" align="right""#,
        CellAlignment::None => "",
    };
    write!(out, "<{tag}{align}>").unwrap();
    out.push_str(text);
    write!(out, "</{tag}>\n").unwrap();
}

// Span level

fn autolink(out: &mut Buffer, url: &str, kind: AutolinkKind, options: &mut RenderOptions) -> bool {
    if url.is_empty() {
        return false;
    }
    if options.flags.contains(RenderFlags::SAFELINK)
        && kind != AutolinkKind::Email
        && !is_safe_link(url)
    {
        tracing::debug!(url = %url, "Autolink suppressed by safe-link policy");
        return false;
    }

    out.push_str("<a href=\"");
    if kind == AutolinkKind::Email {
        out.push_str("mailto:");
    }
    out.push_str(&escape_href(url));
    out.push('"');
    if let Some(hook) = options.link_attributes {
        hook(out, url);
    }
    out.push('>');

    let display = url.strip_prefix("mailto:").unwrap_or(url);
    out.push_str(&escape_html(display));
    out.push_str("</a>");
    true
}

/// `<code>` span with escaped content.
pub fn code_span<S>(out: &mut Buffer, text: &str, _state: &mut S) -> bool {
    out.push_str("<code>");
    out.push_str(&escape_html(text));
    out.push_str("</code>");
    true
}

/// Wrap non-empty rendered text in a tag pair.
fn wrap(out: &mut Buffer, text: &str, open: &str, close: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    out.push_str(open);
    out.push_str(text);
    out.push_str(close);
    true
}

pub fn double_emphasis<S>(out: &mut Buffer, text: &str, _state: &mut S) -> bool {
    wrap(out, text, "<strong>", "</strong>")
}

pub fn emphasis<S>(out: &mut Buffer, text: &str, _state: &mut S) -> bool {
    wrap(out, text, "<em>", "</em>")
}

pub fn triple_emphasis<S>(out: &mut Buffer, text: &str, _state: &mut S) -> bool {
    wrap(out, text, "<strong><em>", "</em></strong>")
}

pub fn strikethrough<S>(out: &mut Buffer, text: &str, _state: &mut S) -> bool {
    wrap(out, text, "<del>", "</del>")
}

pub fn superscript<S>(out: &mut Buffer, text: &str, _state: &mut S) -> bool {
    wrap(out, text, "<sup>", "</sup>")
}

fn image(
    out: &mut Buffer,
    url: &str,
    title: &str,
    alt: &str,
    attr: Option<&str>,
    options: &mut RenderOptions,
) -> bool {
    if url.is_empty() {
        return false;
    }

    out.push_str("<img src=\"");
    out.push_str(&escape_href(url));
    out.push_str("\" alt=\"");
    out.push_str(&escape_html(alt));
    out.push('"');
    if !title.is_empty() {
        out.push_str(" title=\"");
        out.push_str(&escape_html(title));
        out.push('"');
    }
    if let Some(attr) = attr {
        write_attributes(out, attr);
    }
    out.push_str(void_close(options));
    true
}

fn line_break(out: &mut Buffer, options: &mut RenderOptions) -> bool {
    out.push_str("<br");
    out.push_str(void_close(options));
    out.push('\n');
    true
}

fn link(
    out: &mut Buffer,
    url: &str,
    title: &str,
    content: &str,
    attr: Option<&str>,
    options: &mut RenderOptions,
) -> bool {
    if options.flags.contains(RenderFlags::SAFELINK) && !is_safe_link(url) {
        tracing::debug!(url = %url, "Link suppressed by safe-link policy");
        return false;
    }

    out.push_str("<a href=\"");
    out.push_str(&escape_href(url));
    out.push('"');
    if !title.is_empty() {
        out.push_str(" title=\"");
        out.push_str(&escape_html(title));
        out.push('"');
    }
    if let Some(hook) = options.link_attributes {
        hook(out, url);
    } else if let Some(attr) = attr {
        write_attributes(out, attr);
    }
    out.push('>');
    out.push_str(content);
    out.push_str("</a>");
    true
}

fn raw_html(out: &mut Buffer, text: &str, options: &mut RenderOptions) -> bool {
    let flags = options.flags;

    if flags.contains(RenderFlags::ESCAPE) {
        out.push_str(&escape_html(text));
        return true;
    }
    if flags.contains(RenderFlags::SKIP_HTML) {
        return true;
    }

    if filtered_tag(text, flags).is_none() {
        out.push_str(text);
    }
    true
}

/// Name of the tag `text` starts with if its skip flag is set.
fn filtered_tag(text: &str, flags: RenderFlags) -> Option<&'static str> {
    let filtered = [
        (RenderFlags::SKIP_STYLE, "style"),
        (RenderFlags::SKIP_LINKS, "a"),
        (RenderFlags::SKIP_IMAGES, "img"),
    ];
    let name = filtered
        .into_iter()
        .find(|&(flag, name)| flags.contains(flag) && is_tag(text, name) != HtmlTag::None)
        .map(|(_, name)| name)?;
    tracing::trace!(tag = name, "Raw HTML tag dropped");
    Some(name)
}

fn normal_text(out: &mut Buffer, text: &str, _options: &mut RenderOptions) {
    out.push_str(&escape_html(text));
}
