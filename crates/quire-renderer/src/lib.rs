//! Callback-driven markdown to HTML renderer.
//!
//! Rendering is split between a parser driver and a [`CallbackTable`]: the
//! driver walks pulldown-cmark events bottom-up and hands each finished node
//! to the table, which writes HTML into a [`Buffer`]. Two tables ship with the
//! crate:
//! - [`html::renderer`]: the full HTML fragment, with raw HTML filtering,
//!   safe links, task lists and `toc_<n>` header anchors
//! - [`toc::renderer`]: a nested `<ul>` outline of the document's headers
//!
//! Both passes share one [`AnchorCounter`] protocol so outline links resolve to
//! body header ids. [`MarkdownRenderer`] runs them together.
//!
//! # Example
//!
//! ```
//! use quire_renderer::{ClassAttributes, MarkdownRenderer, RenderFlags};
//!
//! let classes = ClassAttributes {
//!     task: Some("tasks".to_owned()),
//!     ..ClassAttributes::default()
//! };
//! let result = MarkdownRenderer::new()
//!     .with_flags(RenderFlags::USE_TASK_LIST | RenderFlags::SKIP_STYLE)
//!     .with_classes(classes)
//!     .with_toc(Some(1), None, None)
//!     .render_markdown("# Plan\n\n- [x] write\n- [ ] ship");
//!
//! assert!(result.html.contains(r#"<ul class="tasks">"#));
//! assert!(result.toc.is_some());
//! ```

mod attributes;
mod buffer;
mod callbacks;
mod driver;
mod escape;
pub mod html;
mod options;
mod renderer;
pub mod toc;
mod util;

pub use attributes::{AttributeList, write_attributes};
pub use buffer::{Buffer, OUTPUT_UNIT};
pub use callbacks::{
    AbsentBlock, AutolinkFn, AutolinkKind, BlockCodeFn, BlockTextFn, CallbackTable,
    CellAlignment, HeaderFn, ImageFn, LineBreakFn, LinkFn, ListFlags, ListFn, ListItemFn,
    MarkerFn, SpanFn, TableCellFn, TableFn, TextFn,
};
pub use driver::render;
pub use escape::{escape_href, escape_html};
pub use options::{AnchorCounter, ClassAttributes, LinkAttributesFn, RenderFlags, RenderOptions};
pub use renderer::{MarkdownRenderer, RenderResult};
pub use toc::TocState;
