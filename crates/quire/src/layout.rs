//! Page layout: wraps a rendered fragment in a style template.
//!
//! A style template is split after the first line containing `<body` and a
//! later `>`. Everything up to and including that line is written before
//! the fragment, the rest after it.

use std::io;
use std::path::Path;

use quire_config::{DEFAULT_STYLE, LayoutConfig};

/// Page shell used when no style template exists.
const BUILTIN_HEADER: &str =
    "<!DOCTYPE html>\n<html>\n<head><title>Markdown</title></head>\n<body>\n";
const BUILTIN_FOOTER: &str = "</body>\n</html>\n";

/// Where a layout came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LayoutSource {
    /// The requested style template.
    Requested,
    /// The default style, used because the requested one is missing.
    DefaultStyle,
    /// The built-in shell; no template was found.
    Builtin,
}

/// Text surrounding the rendered fragment.
#[derive(Debug)]
pub(crate) struct Layout {
    pub(crate) header: String,
    pub(crate) footer: String,
    pub(crate) source: LayoutSource,
}

impl Layout {
    /// Load the layout for the configured style.
    ///
    /// A missing template falls back to the default style, then to the
    /// built-in shell. Other read errors are returned.
    pub(crate) fn load(config: &LayoutConfig) -> io::Result<Self> {
        if let Some(template) = read_template(&config.template_path(&config.style))? {
            return Ok(Self::split(&template, LayoutSource::Requested));
        }
        tracing::debug!(style = %config.style, "Style template not found");

        if config.style != DEFAULT_STYLE
            && let Some(template) = read_template(&config.template_path(DEFAULT_STYLE))?
        {
            return Ok(Self::split(&template, LayoutSource::DefaultStyle));
        }

        Ok(Self::builtin())
    }

    /// The built-in `<!DOCTYPE html>` shell.
    pub(crate) fn builtin() -> Self {
        Self {
            header: BUILTIN_HEADER.to_owned(),
            footer: BUILTIN_FOOTER.to_owned(),
            source: LayoutSource::Builtin,
        }
    }

    /// Split a template after its `<body…>` line.
    ///
    /// Without such a line the whole template becomes the header.
    fn split(template: &str, source: LayoutSource) -> Self {
        let mut offset = 0;
        for line in template.split_inclusive('\n') {
            offset += line.len();
            if opens_body(line) {
                let (header, footer) = template.split_at(offset);
                return Self {
                    header: header.to_owned(),
                    footer: footer.to_owned(),
                    source,
                };
            }
        }

        Self {
            header: template.to_owned(),
            footer: String::new(),
            source,
        }
    }
}

/// Whether `line` holds `<body` followed by a `>`, case-insensitively.
fn opens_body(line: &str) -> bool {
    let line = line.to_ascii_lowercase();
    line.find("<body")
        .is_some_and(|start| line[start + "<body".len()..].contains('>'))
}

/// Read a template, mapping a missing file to `None`.
fn read_template(path: &Path) -> io::Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(template) => Ok(Some(template)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}
