//! Positional rewrite instructions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewriteTokenKind {
    Offset,
    RowCount,
}

/// Marks a literal in the original statement text that must be replaced
/// when the statement is rewritten for a physical target.
///
/// `start_offset` is the byte offset where the literal begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RewriteToken {
    pub kind: RewriteTokenKind,
    pub start_offset: usize,
    pub value: u64,
}

impl RewriteToken {
    pub fn offset(start_offset: usize, value: u64) -> Self {
        Self {
            kind: RewriteTokenKind::Offset,
            start_offset,
            value,
        }
    }

    pub fn row_count(start_offset: usize, value: u64) -> Self {
        Self {
            kind: RewriteTokenKind::RowCount,
            start_offset,
            value,
        }
    }
}
