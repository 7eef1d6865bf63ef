//! Helpers for mapping pulldown-cmark values onto render operation inputs.

use std::ops::Deref;

use pulldown_cmark::{Alignment, HeadingLevel};

use crate::callbacks::CellAlignment;

/// Convert heading level enum to number (1-6).
#[must_use]
pub(crate) fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Re-serialize `{#id .class}` heading attributes as an annotation string.
///
/// Returns `None` when the heading carries neither.
pub(crate) fn heading_annotation<S>(id: Option<&str>, classes: &[S]) -> Option<String>
where
    S: Deref<Target = str>,
{
    if id.is_none() && classes.is_empty() {
        return None;
    }

    let mut annotation = String::new();
    if let Some(id) = id {
        annotation.push('#');
        annotation.push_str(id);
    }
    for class in classes {
        if !annotation.is_empty() {
            annotation.push(' ');
        }
        annotation.push('.');
        annotation.push_str(class);
    }
    Some(annotation)
}

pub(crate) fn cell_alignment(alignment: Alignment) -> CellAlignment {
    match alignment {
        Alignment::None => CellAlignment::None,
        Alignment::Left => CellAlignment::Left,
        Alignment::Center => CellAlignment::Center,
        Alignment::Right => CellAlignment::Right,
    }
}
