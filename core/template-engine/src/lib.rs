//! FILENAME: core/template-engine/src/lib.rs
//! PURPOSE: Expands row and column blocks in a worksheet and renders its
//! expression cells.
//! CONTEXT: A sheet is rendered in three passes over a `SheetGrid`:
//!
//! 1. Column pass: `{%col for %}` / `{%col if %}` blocks are expanded or
//!    removed; body contexts are deferred into the `ColumnContextStore`.
//! 2. Row pass: `{% for %}` / `{% if %}` blocks are expanded or removed and
//!    their bodies rendered with the loop context plus any deferred column
//!    context.
//! 3. Remaining cells are rendered with the top-level context.
//!
//! Expressions are evaluated through `ExpressionEvaluator`; `Environment` is
//! the default evaluator, backed by minijinja with strict undefined handling
//! and the `date` and `number_format` filters.

pub mod blocks;
pub mod column_store;
pub mod context;
pub mod directive;
pub mod environment;
pub mod error;
pub mod expander;
pub mod filters;
pub mod sheet;
pub mod sheet_grid;
pub mod tags;
pub mod value;

pub use blocks::{match_blocks, scan_blocks, scan_directives, Block, BlockHeader};
pub use column_store::ColumnContextStore;
pub use context::{loop_record, Context, Scope};
pub use directive::{looks_like_block_tag, parse_directive, Axis, BlockKind, Directive};
pub use environment::{Environment, EnvironmentOptions, ExpressionEvaluator};
pub use error::{
    EvalError, Location, RenderError, SyntaxError, TemplateError, TemplateResult,
};
pub use expander::{expand_for_loop, remove_lines};
pub use sheet::{render_sheet, SheetRenderer, COLUMN_LOOP_VAR};
pub use sheet_grid::SheetGrid;
pub use tags::{has_template_tag, pure_expression};
pub use value::{from_json, loop_items, to_cell_value, Value};

pub use minijinja;
