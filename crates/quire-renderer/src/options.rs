//! Render flags, class overrides and per-document render state.

use std::fmt;

use bitflags::bitflags;

use crate::buffer::Buffer;

bitflags! {
    /// Options for the full HTML render.
    ///
    /// `ESCAPE` dominates `SKIP_HTML`, `SKIP_STYLE`, `SKIP_LINKS` and
    /// `SKIP_IMAGES` for raw inline HTML. When both `HARD_WRAP` and
    /// `SKIP_LINEBREAK` are set, `HARD_WRAP` wins.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct RenderFlags: u32 {
        /// Self-close void elements (`<br/>`, `<hr/>`, `<img …/>`).
        const USE_XHTML = 1 << 0;
        /// Drop all raw HTML.
        const SKIP_HTML = 1 << 1;
        /// Drop raw `<style>` tags.
        const SKIP_STYLE = 1 << 2;
        /// Drop raw `<a>` tags and disable link rendering.
        const SKIP_LINKS = 1 << 3;
        /// Drop raw `<img>` tags and disable image rendering.
        const SKIP_IMAGES = 1 << 4;
        /// Entity-escape all raw HTML instead of passing it through.
        const ESCAPE = 1 << 5;
        /// Only render links whose URL passes the safe-link check.
        const SAFELINK = 1 << 6;
        /// Turn every line boundary inside a paragraph into `<br>`.
        const HARD_WRAP = 1 << 7;
        /// Join paragraph lines with a single space.
        const SKIP_LINEBREAK = 1 << 8;
        /// Render `[ ]` / `[x]` list item prefixes as checkboxes.
        const USE_TASK_LIST = 1 << 9;
        /// Give headers sequential `toc_<n>` anchor ids.
        const TOC = 1 << 10;
    }
}

/// Optional `class` values for list containers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassAttributes {
    /// Class for `<ul>`.
    pub ul: Option<String>,
    /// Class for `<ol>`.
    pub ol: Option<String>,
    /// Class for lists containing task items. Takes precedence over `ul`/`ol`.
    pub task: Option<String>,
}

/// Sequential header anchor counter shared between the outline pass and the
/// body pass.
///
/// Both passes must start from the same value and claim exactly one value per
/// header for `toc_<n>` ids and `#toc_<n>` links to agree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnchorCounter(u32);

impl AnchorCounter {
    /// Counter starting at `value`.
    #[must_use]
    pub const fn starting_at(value: u32) -> Self {
        Self(value)
    }

    /// Value the next header will receive.
    #[must_use]
    pub const fn peek(self) -> u32 {
        self.0
    }

    /// Claim the current value and advance.
    pub fn claim(&mut self) -> u32 {
        let value = self.0;
        self.0 += 1;
        value
    }
}

impl fmt::Display for AnchorCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hook that writes extra attributes into an `<a …>` tag.
///
/// Receives the output buffer (positioned just after the closing quote of the
/// `href`/`title` attribute) and the raw link URL. Written text should start
/// with a space, e.g. ` rel="nofollow"`.
pub type LinkAttributesFn = fn(&mut Buffer, &str);

/// Configuration and mutable per-document state of the full HTML render.
#[derive(Clone, Debug, Default)]
pub struct RenderOptions {
    pub flags: RenderFlags,
    pub classes: ClassAttributes,
    /// Next `toc_<n>` header anchor.
    pub anchors: AnchorCounter,
    pub link_attributes: Option<LinkAttributesFn>,
}

impl RenderOptions {
    #[must_use]
    pub fn new(flags: RenderFlags, classes: ClassAttributes) -> Self {
        Self {
            flags,
            classes,
            anchors: AnchorCounter::default(),
            link_attributes: None,
        }
    }

    #[must_use]
    pub fn with_link_attributes(mut self, hook: LinkAttributesFn) -> Self {
        self.link_attributes = Some(hook);
        self
    }

    #[must_use]
    pub fn with_anchors(mut self, anchors: AnchorCounter) -> Self {
        self.anchors = anchors;
        self
    }

    pub(crate) fn xhtml(&self) -> bool {
        self.flags.contains(RenderFlags::USE_XHTML)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_counter_claims_sequentially() {
        let mut anchors = AnchorCounter::starting_at(3);
        assert_eq!(anchors.claim(), 3);
        assert_eq!(anchors.claim(), 4);
        assert_eq!(anchors.peek(), 5);
        assert_eq!(anchors.to_string(), "5");
    }

    #[test]
    fn test_render_options_defaults() {
        let options = RenderOptions::default();
        assert!(options.flags.is_empty());
        assert_eq!(options.classes, ClassAttributes::default());
        assert_eq!(options.anchors.peek(), 0);
        assert!(options.link_attributes.is_none());
    }

    #[test]
    fn test_flags_combine() {
        let flags = RenderFlags::USE_XHTML | RenderFlags::SAFELINK;
        let options = RenderOptions::new(flags, ClassAttributes::default());
        assert!(options.xhtml());
        assert!(options.flags.contains(RenderFlags::SAFELINK));
        assert!(!options.flags.contains(RenderFlags::ESCAPE));
    }
}
