//! FILENAME: core/template-engine/src/column_store.rs
//! PURPOSE: Deferred per-column render contexts.
//! CONTEXT: The column pass runs before rows are expanded, so cells inside a
//! column-loop body cannot be rendered yet: they may also sit in a row loop.
//! The column pass stores the loop context for each body column instead, and
//! the row pass merges it in when it renders the cell.
//!
//! INVARIANTS:
//! - Every column insert/delete made by the column pass is mirrored here with
//!   `shift`; entries inside a deleted range are dropped.
//! - An inner block's stored context wins over an outer block's (`store`).
//! - At render time the caller's context wins over the stored one (`merged_for`).

use std::collections::BTreeMap;

use crate::context::Context;

#[derive(Debug, Clone, Default)]
pub struct ColumnContextStore {
    entries: BTreeMap<u32, Context>,
}

impl ColumnContextStore {
    pub fn new() -> Self {
        ColumnContextStore::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, col: u32) -> Option<&Context> {
        self.entries.get(&col)
    }

    /// Columns that currently hold a stored context, ascending.
    pub fn columns(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.keys().copied()
    }

    /// Mirrors a structural change of `delta` columns at `at`.
    /// Positive: entries at or after `at` move right.
    /// Negative: entries in `at..at - delta` are dropped, later ones move left.
    pub fn shift(&mut self, at: u32, delta: i64) {
        if delta == 0 || self.entries.is_empty() {
            return;
        }

        let removed_end = if delta < 0 { at as i64 - delta } else { at as i64 };
        let old = std::mem::take(&mut self.entries);

        for (col, context) in old {
            let pos = col as i64;
            let new_pos = if pos < at as i64 {
                pos
            } else if pos < removed_end {
                continue;
            } else {
                pos + delta
            };
            self.entries.insert(new_pos as u32, context);
        }
    }

    /// Records `context` for every column in `start..=end`.
    /// A context already stored for a column (from a nested block) stays on top.
    pub fn store(&mut self, start: u32, end: u32, context: &Context) {
        for col in start..=end {
            let merged = match self.entries.get(&col) {
                Some(existing) => context.overlay(existing),
                None => context.clone(),
            };
            self.entries.insert(col, merged);
        }
    }

    /// The context to render a cell in `col` with: the stored context with
    /// the caller's layers on top.
    pub fn merged_for(&self, col: u32, caller: &Context) -> Context {
        match self.entries.get(&col) {
            Some(stored) => stored.overlay(caller),
            None => caller.clone(),
        }
    }
}
