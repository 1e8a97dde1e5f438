//! FILENAME: core/template-engine/src/error.rs
//! PURPOSE: Error types raised while expanding and rendering a sheet template.
//! CONTEXT: `EvalError` comes from the expression evaluator (minijinja); the
//! sheet renderer wraps it into a `RenderError` naming the failing expression
//! and location.
//! Structural problems in block tags are `SyntaxError`s.

use std::fmt;

use thiserror::Error;

use crate::directive::Axis;

/// Failures of the expression evaluator.
#[derive(Error, Debug)]
pub enum EvalError {
    /// Syntax or evaluation errors reported by minijinja, including
    /// undefined values used inside a larger expression.
    #[error(transparent)]
    Jinja(#[from] minijinja::Error),

    #[error("'{0}' is undefined")]
    Undefined(String),

    #[error("'{0}' is not iterable")]
    NotIterable(String),
}

/// Where a render failure happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// A single cell, as an A1 reference.
    Cell(String),
    /// A directive line.
    Line(Axis, u32),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Cell(a1) => write!(f, "cell {}", a1),
            Location::Line(Axis::Row, row) => write!(f, "row {}", row),
            Location::Line(Axis::Column, col) => write!(f, "column {}", col),
        }
    }
}

/// Mismatched or unclosed block tags.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyntaxError {
    #[error(
        "Mismatched {} tag at {} {position}: found {} but expected {}",
        .axis.block_label(), .axis.line_label(), .axis.tag(.found), .axis.tag(.expected)
    )]
    MismatchedTag {
        axis: Axis,
        position: u32,
        found: String,
        expected: String,
    },

    #[error(
        "Unexpected {} at {} {position} without a matching opener",
        .axis.tag(.found), .axis.line_label()
    )]
    UnexpectedClose {
        axis: Axis,
        position: u32,
        found: String,
    },

    #[error("Unclosed {} at {} {position}", .axis.tag(.kind), .axis.line_label())]
    Unclosed { axis: Axis, position: u32, kind: String },
}

/// Failures while evaluating iterables, conditions or cell content.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to evaluate iterable '{expression}' at {location}: {source}")]
    Iterable {
        expression: String,
        location: Location,
        #[source]
        source: EvalError,
    },

    #[error("Failed to evaluate condition '{expression}' at {location}: {source}")]
    Condition {
        expression: String,
        location: Location,
        #[source]
        source: EvalError,
    },

    #[error("Failed to render expression '{expression}' in {location}: {source}")]
    Expression {
        expression: String,
        location: Location,
        #[source]
        source: EvalError,
    },

    #[error("Failed to render {location}: {source}")]
    Cell {
        location: Location,
        #[source]
        source: EvalError,
    },
}

/// Any failure of a sheet render call.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("Template render error: {0}")]
    Render(#[from] RenderError),
}

pub type TemplateResult<T> = Result<T, TemplateError>;
