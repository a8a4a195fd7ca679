//! Order id generation.

use board_models::OrderId;

/// Source of fresh order ids.
///
/// Implementations only promise uniqueness within the lifetime of the
/// process.
pub trait IdGenerator {
    /// Returns an id that has not been returned before.
    fn next_id(&mut self) -> OrderId;
}

/// Random `order-<uuid>` ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> OrderId {
        OrderId::new()
    }
}

/// Deterministic `<prefix>-<n>` ids, counting from 1.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    /// Creates a generator with the given prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> OrderId {
        let id = OrderId::from_string(format!("{}-{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}
