//! FILENAME: core/template-engine/src/sheet.rs
//! PURPOSE: Renders one worksheet: column blocks, then row blocks, then the
//! remaining expression cells.
//! CONTEXT: Each pass scans its whole axis once, matches the directives into
//! a block tree and processes the siblings last-to-first, so a block's
//! mutations never move a sibling that is still waiting. Inside a for-block
//! every iteration's range is rescanned, which keeps nested positions valid
//! without re-indexing the tree.
//!
//! The column pass cannot render body cells (a row loop may still need to
//! copy them), so it records the loop context per column in a
//! `ColumnContextStore`. The row pass and the final sweep merge that context
//! in when they render a cell.

use engine::{coord_to_a1, CellValue};

use crate::blocks::{scan_blocks, Block, BlockHeader};
use crate::column_store::ColumnContextStore;
use crate::context::{loop_record, Context, Scope};
use crate::directive::{looks_like_block_tag, Axis};
use crate::environment::ExpressionEvaluator;
use crate::error::{Location, RenderError, TemplateResult};
use crate::expander::{expand_for_loop, remove_lines};
use crate::sheet_grid::{line_count, SheetGrid};
use crate::tags::{has_template_tag, pure_expression};
use crate::value::{loop_items, to_cell_value};

/// Name under which a column loop also exposes its loop record, so a cell
/// inside both a row loop and a column loop can reach both.
pub const COLUMN_LOOP_VAR: &str = "col_loop";

/// Clamps a drift-adjusted position back to a line number.
fn to_line(position: i64) -> u32 {
    u32::try_from(position).unwrap_or(0)
}

/// Renders a single worksheet in place. Owns the per-sheet column context
/// store; create one renderer per sheet and render call.
pub struct SheetRenderer<'a, G: SheetGrid + ?Sized, E: ExpressionEvaluator + ?Sized> {
    grid: &'a mut G,
    evaluator: &'a E,
    column_store: ColumnContextStore,
}

impl<'a, G: SheetGrid + ?Sized, E: ExpressionEvaluator + ?Sized> SheetRenderer<'a, G, E> {
    pub fn new(grid: &'a mut G, evaluator: &'a E) -> Self {
        SheetRenderer {
            grid,
            evaluator,
            column_store: ColumnContextStore::new(),
        }
    }

    /// Deferred column contexts recorded by the column pass.
    pub fn column_store(&self) -> &ColumnContextStore {
        &self.column_store
    }

    /// Runs the full pipeline against `context`. On error the grid is left
    /// partially rendered.
    pub fn render(&mut self, context: &Context) -> TemplateResult<()> {
        let column_delta = self.render_axis(Axis::Column, context)?;
        let row_delta = self.render_axis(Axis::Row, context)?;
        self.render_remaining(context)?;

        log::debug!(
            "[TEMPLATE] sheet rendered: column delta {}, row delta {}, {} deferred column(s)",
            column_delta,
            row_delta,
            self.column_store.len()
        );
        Ok(())
    }

    fn render_axis(&mut self, axis: Axis, context: &Context) -> TemplateResult<i64> {
        let end = line_count(&*self.grid, axis);
        let blocks = scan_blocks(&*self.grid, axis, 1, end)?;
        if blocks.is_empty() {
            return Ok(0);
        }
        log::debug!("[TEMPLATE] {} pass: {} top-level block(s)", axis, blocks.len());
        self.process_blocks(axis, &blocks, context)
    }

    // ========================================================================
    // BLOCK PROCESSING
    // ========================================================================

    /// Processes sibling blocks from the last to the first and returns their
    /// combined line delta.
    fn process_blocks(
        &mut self,
        axis: Axis,
        blocks: &[Block],
        context: &Context,
    ) -> TemplateResult<i64> {
        let mut total = 0;
        for block in blocks.iter().rev() {
            total += match &block.header {
                BlockHeader::For { var, iterable } => {
                    self.process_for(axis, block, var, iterable, context)?
                }
                BlockHeader::If { condition } => {
                    self.process_if(axis, block, condition, context)?
                }
            };
        }
        Ok(total)
    }

    fn process_for(
        &mut self,
        axis: Axis,
        block: &Block,
        var: &str,
        iterable: &str,
        context: &Context,
    ) -> TemplateResult<i64> {
        let items = self
            .evaluator
            .eval(iterable, context)
            .and_then(|value| loop_items(&value))
            .map_err(|source| RenderError::Iterable {
                expression: iterable.to_string(),
                location: Location::Line(axis, block.open),
                source,
            })?;

        let count = items.len();
        let body_len = block.body_len() as i64;

        if body_len == 0 || count == 0 {
            log::debug!(
                "[TEMPLATE] {} for at {}: nothing to repeat, removing {}..={}",
                axis,
                block.open,
                block.open,
                block.close
            );
            return Ok(self.remove(axis, block.open, block.close));
        }

        let added = self.expand(axis, block.body_start(), block.body_end(), count);
        log::debug!(
            "[TEMPLATE] {} for at {}: {} iteration(s) over {} line(s), {} inserted",
            axis,
            block.open,
            count,
            body_len,
            added
        );

        let body_start = block.body_start() as i64;
        let mut cumulative = 0;

        for (index, item) in items.into_iter().enumerate() {
            let start = body_start + index as i64 * body_len + cumulative;
            let end = start + body_len - 1;

            let record = loop_record(index, count);
            let mut scope = Scope::new();
            scope.insert(var.to_string(), item);
            if axis == Axis::Column {
                scope.insert(COLUMN_LOOP_VAR.to_string(), record.clone());
            }
            scope.insert("loop".to_string(), record);
            let loop_context = context.with_layer(scope);

            let nested = scan_blocks(&*self.grid, axis, to_line(start), to_line(end))?;
            let child_delta = self.process_blocks(axis, &nested, &loop_context)?;
            cumulative += child_delta;

            self.finish_body(axis, start, end + child_delta, &loop_context)?;
        }

        let close = to_line(block.close as i64 + added + cumulative);
        self.remove(axis, close, close);
        self.remove(axis, block.open, block.open);

        Ok(added + cumulative - 2)
    }

    fn process_if(
        &mut self,
        axis: Axis,
        block: &Block,
        condition: &str,
        context: &Context,
    ) -> TemplateResult<i64> {
        let keep = self
            .evaluator
            .eval(condition, context)
            .map_err(|source| RenderError::Condition {
                expression: condition.to_string(),
                location: Location::Line(axis, block.open),
                source,
            })?
            .is_true();

        log::debug!("[TEMPLATE] {} if at {}: {}", axis, block.open, keep);

        if !keep {
            return Ok(self.remove(axis, block.open, block.close));
        }

        // Children were matched in this block's numbering and nothing inside
        // the body has moved yet.
        let (open, close) = (block.open, block.close);
        let (body_start, body_end) = (block.body_start() as i64, block.body_end() as i64);
        let child_delta = self.process_blocks(axis, &block.children, context)?;

        self.finish_body(axis, body_start, body_end + child_delta, context)?;

        let close = to_line(close as i64 + child_delta);
        self.remove(axis, close, close);
        self.remove(axis, open, open);

        Ok(child_delta - 2)
    }

    /// Renders a processed body range (rows) or defers it (columns).
    fn finish_body(
        &mut self,
        axis: Axis,
        start: i64,
        end: i64,
        context: &Context,
    ) -> TemplateResult<()> {
        if end < start {
            return Ok(());
        }
        let (start, end) = (to_line(start), to_line(end));
        match axis {
            Axis::Row => self.render_row_range(start, end, context)?,
            Axis::Column => self.column_store.store(start, end, context),
        }
        Ok(())
    }

    // ========================================================================
    // STRUCTURAL CHANGES
    // ========================================================================

    fn expand(&mut self, axis: Axis, body_start: u32, body_end: u32, iterations: usize) -> i64 {
        let added = expand_for_loop(&mut *self.grid, axis, body_start, body_end, iterations);
        if axis == Axis::Column {
            self.column_store.shift(body_end + 1, added as i64);
        }
        added as i64
    }

    fn remove(&mut self, axis: Axis, start: u32, end: u32) -> i64 {
        let delta = remove_lines(&mut *self.grid, axis, start, end);
        if axis == Axis::Column {
            self.column_store.shift(start, delta);
        }
        log::trace!("[TEMPLATE] removed {} {}..={}", axis, start, end);
        delta
    }

    // ========================================================================
    // CELL RENDERING
    // ========================================================================

    fn render_row_range(&mut self, start: u32, end: u32, context: &Context) -> Result<(), RenderError> {
        let columns = self.grid.max_column();
        for row in start..=end {
            for col in 1..=columns {
                self.render_cell(row, col, context)?;
            }
        }
        Ok(())
    }

    /// Renders every expression cell still left on the sheet with the
    /// top-level context.
    fn render_remaining(&mut self, context: &Context) -> Result<(), RenderError> {
        let rows = self.grid.max_row();
        self.render_row_range(1, rows, context)
    }

    /// Renders one cell if it carries a template tag and is not a block tag.
    /// A cell that is a single `{{ expr }}` keeps the expression's type.
    pub fn render_cell(&mut self, row: u32, col: u32, context: &Context) -> Result<(), RenderError> {
        let text = match self.grid.cell_text(row, col) {
            Some(text) if has_template_tag(text) && !looks_like_block_tag(text) => text.to_string(),
            _ => return Ok(()),
        };

        let merged = self.column_store.merged_for(col, context);

        let value = match pure_expression(&text) {
            Some(expression) => self
                .evaluator
                .eval(expression, &merged)
                .map_err(|source| RenderError::Expression {
                    expression: expression.to_string(),
                    location: Location::Cell(coord_to_a1(row, col)),
                    source,
                })
                .map(|value| to_cell_value(&value))?,
            None => {
                let rendered = self
                    .evaluator
                    .render_template(&text, &merged)
                    .map_err(|source| RenderError::Cell {
                        location: Location::Cell(coord_to_a1(row, col)),
                        source,
                    })?;
                CellValue::Text(rendered)
            }
        };

        self.grid.set_cell_value(row, col, value);
        Ok(())
    }
}

/// Renders `grid` with a fresh renderer.
pub fn render_sheet<G, E>(grid: &mut G, evaluator: &E, context: &Context) -> TemplateResult<()>
where
    G: SheetGrid + ?Sized,
    E: ExpressionEvaluator + ?Sized,
{
    SheetRenderer::new(grid, evaluator).render(context)
}
