//! FILENAME: core/template-engine/src/blocks.rs
//! PURPOSE: Scans a line range for directives and pairs them into a block tree.
//! CONTEXT: One scan covers a contiguous range of rows (or columns). Every
//! cell across the line is inspected, but only the first directive found on
//! a line counts. Openers and closers are then matched with a stack: a closed
//! block becomes a child of the block below it on the stack, or a top-level
//! result when the stack is empty.
//!
//! Trees are short-lived: the expansion engine builds one per scan, processes
//! it, and rescans each loop iteration's range instead of re-indexing nodes.

use crate::directive::{parse_directive, Axis, BlockKind, Directive};
use crate::error::SyntaxError;
use crate::sheet_grid::{cell_at, cross_count, SheetGrid};

/// What an opener asks for, carried by its block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockHeader {
    For { var: String, iterable: String },
    If { condition: String },
}

impl BlockHeader {
    pub fn kind(&self) -> BlockKind {
        match self {
            BlockHeader::For { .. } => BlockKind::For,
            BlockHeader::If { .. } => BlockKind::If,
        }
    }
}

/// A matched opener/closer pair along one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub header: BlockHeader,
    pub open: u32,
    pub close: u32,
    pub children: Vec<Block>,
}

impl Block {
    pub fn kind(&self) -> BlockKind {
        self.header.kind()
    }

    pub fn body_start(&self) -> u32 {
        self.open + 1
    }

    /// Last body line. Equal to `open` when the body is empty.
    pub fn body_end(&self) -> u32 {
        self.close - 1
    }

    /// Number of body lines.
    pub fn body_len(&self) -> u32 {
        self.close - self.open - 1
    }
}

/// Collects the first directive of each line in `start..=end`.
pub fn scan_directives<G: SheetGrid + ?Sized>(
    grid: &G,
    axis: Axis,
    start: u32,
    end: u32,
) -> Vec<(u32, Directive)> {
    let cross = cross_count(grid, axis);
    let mut events = Vec::new();

    for line in start..=end {
        let found = (1..=cross).find_map(|c| {
            let (row, col) = cell_at(axis, line, c);
            grid.cell_text(row, col)
                .and_then(|text| parse_directive(text, axis))
        });
        if let Some(directive) = found {
            events.push((line, directive));
        }
    }

    events
}

/// Scans `start..=end` along `axis` and matches the directives into blocks.
pub fn scan_blocks<G: SheetGrid + ?Sized>(
    grid: &G,
    axis: Axis,
    start: u32,
    end: u32,
) -> Result<Vec<Block>, SyntaxError> {
    let blocks = match_blocks(axis, scan_directives(grid, axis, start, end))?;
    log::trace!(
        "[TEMPLATE] scanned {} {}..={}: {} top-level block(s)",
        axis,
        start,
        end,
        blocks.len()
    );
    Ok(blocks)
}

/// Pairs openers with closers using stack discipline.
pub fn match_blocks(
    axis: Axis,
    mut events: Vec<(u32, Directive)>,
) -> Result<Vec<Block>, SyntaxError> {
    events.sort_by_key(|(position, _)| *position);

    let mut stack: Vec<Block> = Vec::new();
    let mut top_level = Vec::new();

    for (position, directive) in events {
        let header = match directive {
            Directive::ForOpen { var, iterable } => BlockHeader::For { var, iterable },
            Directive::IfOpen { condition } => BlockHeader::If { condition },
            closer => {
                close_block(axis, position, &closer, &mut stack, &mut top_level)?;
                continue;
            }
        };
        stack.push(Block {
            header,
            open: position,
            close: position,
            children: Vec::new(),
        });
    }

    if let Some(unclosed) = stack.first() {
        return Err(SyntaxError::Unclosed {
            axis,
            position: unclosed.open,
            kind: unclosed.kind().open_keyword().to_string(),
        });
    }

    Ok(top_level)
}

/// Pops the innermost open block and attaches it to its parent.
fn close_block(
    axis: Axis,
    position: u32,
    directive: &Directive,
    stack: &mut Vec<Block>,
    top_level: &mut Vec<Block>,
) -> Result<(), SyntaxError> {
    let Some(mut block) = stack.pop() else {
        return Err(SyntaxError::UnexpectedClose {
            axis,
            position,
            found: directive.keyword().to_string(),
        });
    };

    if block.kind() != directive.kind() {
        return Err(SyntaxError::MismatchedTag {
            axis,
            position,
            found: directive.keyword().to_string(),
            expected: block.kind().close_keyword().to_string(),
        });
    }

    block.close = position;
    match stack.last_mut() {
        Some(parent) => parent.children.push(block),
        None => top_level.push(block),
    }
    Ok(())
}
