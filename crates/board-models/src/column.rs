//! Board columns.
//!
//! The board has a fixed, ordered set of workflow columns. New orders land
//! in the first one and move rightwards as the kitchen works through them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A workflow column on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnId {
    /// Order has been placed.
    #[default]
    Ordered,
    /// Order is being prepared.
    InProgress,
    /// Order is ready to be served.
    Ready,
}

/// Error returned when a string does not name a column.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown column: {0}")]
pub struct ParseColumnError(pub String);

impl ColumnId {
    /// All columns in board order (left to right).
    pub const ALL: [ColumnId; 3] = [ColumnId::Ordered, ColumnId::InProgress, ColumnId::Ready];

    /// The column new orders are placed in.
    pub fn initial() -> Self {
        Self::ALL[0]
    }

    /// Returns the attribute value used to tag this column's drop area.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnId::Ordered => "ordered",
            ColumnId::InProgress => "in-progress",
            ColumnId::Ready => "ready",
        }
    }

    /// Human readable heading.
    pub fn title(&self) -> &'static str {
        match self {
            ColumnId::Ordered => "Ordered",
            ColumnId::InProgress => "Preparing",
            ColumnId::Ready => "Served",
        }
    }

    /// Position of this column in board order.
    pub fn index(&self) -> usize {
        match self {
            ColumnId::Ordered => 0,
            ColumnId::InProgress => 1,
            ColumnId::Ready => 2,
        }
    }

    /// Column to the left, if any.
    pub fn prev(&self) -> Option<Self> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }

    /// Column to the right, if any.
    pub fn next(&self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnId {
    type Err = ParseColumnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseColumnError(s.to_string()))
    }
}
