//! FILENAME: core/template-engine/src/directive.rs
//! PURPOSE: Recognizes cells whose whole content is one block tag.
//! CONTEXT: Row blocks use `{% ... %}`, column blocks use `{%col ... %}`.
//! The two spellings never overlap, so the row scanner never sees column
//! tags and vice versa. A cell mixing a tag with other text, or holding two
//! tags, is not a directive; the cell renderer treats it as template text.

use std::fmt;

use crate::tags::{split_for_header, split_tag};

/// The dimension a block expands along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Row,
    Column,
}

impl Axis {
    /// Marker that follows `{%` in this axis' tags.
    pub fn marker(self) -> &'static str {
        match self {
            Axis::Row => "",
            Axis::Column => "col",
        }
    }

    /// Formats a tag keyword the way it is written in a template.
    pub fn tag(self, keyword: &str) -> String {
        match self {
            Axis::Row => format!("{{% {} %}}", keyword),
            Axis::Column => format!("{{%col {} %}}", keyword),
        }
    }

    pub fn line_label(self) -> &'static str {
        match self {
            Axis::Row => "row",
            Axis::Column => "column",
        }
    }

    pub fn block_label(self) -> &'static str {
        match self {
            Axis::Row => "block",
            Axis::Column => "column block",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.line_label())
    }
}

/// The parsed intent of a block-tag cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    ForOpen { var: String, iterable: String },
    ForClose,
    IfOpen { condition: String },
    IfClose,
}

/// Block kind shared by openers and closers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    For,
    If,
}

impl BlockKind {
    pub fn open_keyword(self) -> &'static str {
        match self {
            BlockKind::For => "for",
            BlockKind::If => "if",
        }
    }

    pub fn close_keyword(self) -> &'static str {
        match self {
            BlockKind::For => "endfor",
            BlockKind::If => "endif",
        }
    }
}

impl Directive {
    pub fn kind(&self) -> BlockKind {
        match self {
            Directive::ForOpen { .. } | Directive::ForClose => BlockKind::For,
            Directive::IfOpen { .. } | Directive::IfClose => BlockKind::If,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Directive::ForOpen { .. } | Directive::IfOpen { .. })
    }

    pub fn keyword(&self) -> &'static str {
        if self.is_open() {
            self.kind().open_keyword()
        } else {
            self.kind().close_keyword()
        }
    }
}

/// Returns the inside of a cell that is exactly one `{% ... %}` tag,
/// with whitespace-control markers and surrounding whitespace removed.
fn block_tag_inner(text: &str) -> Option<&str> {
    let inner = text.trim().strip_prefix("{%")?.strip_suffix("%}")?;
    if inner.contains("%}") || inner.contains("{%") {
        return None;
    }
    let inner = inner.strip_prefix('-').unwrap_or(inner);
    let inner = inner.strip_suffix('-').unwrap_or(inner);
    Some(inner)
}

/// Splits a tag's inner text into its axis and the remaining tag body.
fn tag_axis(inner: &str) -> (Axis, &str) {
    match inner.strip_prefix("col") {
        Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => {
            (Axis::Column, rest)
        }
        // `{%col- ... %}`
        Some(rest) if rest.starts_with('-') => (Axis::Column, &rest[1..]),
        _ => (Axis::Row, inner),
    }
}

/// Returns true if the text is shaped like a single block tag of either axis,
/// whether or not its keyword is recognized.
pub fn looks_like_block_tag(text: &str) -> bool {
    block_tag_inner(text).is_some()
}

/// Parses a cell as a directive of the requested axis.
pub fn parse_directive(text: &str, axis: Axis) -> Option<Directive> {
    let inner = block_tag_inner(text)?;
    let (tag_axis, body) = tag_axis(inner);
    if tag_axis != axis {
        return None;
    }

    let (keyword, rest) = split_tag(body);
    match keyword {
        "for" => {
            let (var, iterable) = split_for_header(rest)?;
            Some(Directive::ForOpen {
                var: var.to_string(),
                iterable: iterable.to_string(),
            })
        }
        "if" if !rest.is_empty() => Some(Directive::IfOpen {
            condition: rest.to_string(),
        }),
        "endfor" if rest.is_empty() => Some(Directive::ForClose),
        "endif" if rest.is_empty() => Some(Directive::IfClose),
        _ => None,
    }
}
