//! Drag transfer payload.
//!
//! Mirrors the dragged order's id into data that travels with the gesture,
//! so a drop target can recover the order even when it does not share
//! memory with the drag source.

use std::collections::BTreeMap;

/// Format key for plain text payloads.
pub const TEXT_PLAIN: &str = "text/plain";

/// Data carried along with a drag gesture, keyed by format.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DragTransfer {
    items: BTreeMap<String, String>,
}

impl DragTransfer {
    /// Creates an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores data under a format, replacing any previous value.
    pub fn set_data(&mut self, format: impl Into<String>, data: impl Into<String>) {
        self.items.insert(format.into(), data.into());
    }

    /// Reads data stored under a format.
    pub fn get_data(&self, format: &str) -> Option<&str> {
        self.items.get(format).map(String::as_str)
    }

    /// Removes all data.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
