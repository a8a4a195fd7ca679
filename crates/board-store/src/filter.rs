//! Order filtering for queries.

use board_models::{ColumnId, Order};

/// Filter criteria for listing orders.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// Filter by column.
    pub column: Option<ColumnId>,
    /// Filter by table.
    pub table: Option<String>,
}

impl OrderFilter {
    /// Creates a new empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the column filter.
    pub fn with_column(mut self, column: ColumnId) -> Self {
        self.column = Some(column);
        self
    }

    /// Sets the table filter.
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Returns true if the order matches this filter.
    pub fn matches(&self, order: &Order) -> bool {
        if let Some(column) = self.column {
            if order.column != column {
                return false;
            }
        }

        if let Some(ref table) = self.table {
            if order.table != *table {
                return false;
            }
        }

        true
    }
}
