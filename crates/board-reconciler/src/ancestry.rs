//! Ancestor chain scanning.
//!
//! A pointer is usually over some deeply nested element (a label inside a
//! card inside a column body), while the information the board needs lives
//! on an outer element: the drop area of a column, or the id of a card.
//! These helpers walk a chain of elements from the innermost one outwards
//! and return the first tag found.

use std::collections::BTreeMap;

use board_models::{ColumnId, OrderId};
use tracing::trace;

/// Data attribute naming the column of a drop area.
pub const AREA_ATTR: &str = "area";

/// Data attribute carrying an order id.
pub const ID_ATTR: &str = "id";

/// A host element as seen by the reconciler: a tag name and its data
/// attributes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    /// Element kind, for diagnostics only.
    pub tag: String,
    /// Data attributes.
    pub dataset: BTreeMap<String, String>,
}

impl Element {
    /// Creates an element without data attributes.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            dataset: BTreeMap::new(),
        }
    }

    /// Adds a data attribute.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.dataset.insert(key.into(), value.into());
        self
    }

    /// Element tagged as the drop area of a column.
    pub fn area(tag: impl Into<String>, column: ColumnId) -> Self {
        Self::new(tag).with_data(AREA_ATTR, column.as_str())
    }

    /// Element carrying an order id.
    pub fn order(tag: impl Into<String>, id: &OrderId) -> Self {
        Self::new(tag).with_data(ID_ATTR, id.as_str())
    }

    /// Returns a non-empty data attribute.
    pub fn data(&self, key: &str) -> Option<&str> {
        self.dataset
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

/// Returns the first tag produced while walking `chain` from the innermost
/// element outwards.
///
/// `tag` inspects one element and returns `Some` if it is tagged. Elements
/// further out are not inspected once a tag is found.
pub fn find_tagged_ancestor<'a, E, T, I, F>(chain: I, tag: F) -> Option<T>
where
    E: 'a,
    I: IntoIterator<Item = &'a E>,
    F: FnMut(&'a E) -> Option<T>,
{
    chain.into_iter().find_map(tag)
}

/// Resolves the column of the nearest drop area in the chain.
///
/// The nearest element carrying an area attribute decides; if its value is
/// not a known column the chain resolves to nothing.
pub fn resolve_area(chain: &[Element]) -> Option<ColumnId> {
    let raw = find_tagged_ancestor(chain, |e| e.data(AREA_ATTR))?;
    match raw.parse() {
        Ok(column) => Some(column),
        Err(e) => {
            trace!(error = %e, "drop area tagged with unknown column");
            None
        }
    }
}

/// Resolves the order id of the nearest card in the chain.
pub fn resolve_order(chain: &[Element]) -> Option<OrderId> {
    find_tagged_ancestor(chain, |e| e.data(ID_ATTR)).map(OrderId::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_area_several_layers_up() {
        let chain = [
            Element::new("span"),
            Element::new("div"),
            Element::new("section").with_data(AREA_ATTR, "ready"),
        ];
        assert_eq!(resolve_area(&chain), Some(ColumnId::Ready));
    }

    #[test]
    fn test_first_tagged_ancestor_wins() {
        let chain = [
            Element::new("span"),
            Element::area("div", ColumnId::InProgress),
            Element::area("section", ColumnId::Ready),
        ];
        assert_eq!(resolve_area(&chain), Some(ColumnId::InProgress));
    }

    #[test]
    fn test_no_tagged_ancestor() {
        let chain = [Element::new("span"), Element::new("div"), Element::new("body")];
        assert_eq!(resolve_area(&chain), None);
    }

    #[test]
    fn test_empty_chain() {
        assert_eq!(resolve_area(&[]), None);
        assert_eq!(resolve_order(&[]), None);
    }

    #[test]
    fn test_empty_attribute_is_not_a_tag() {
        let chain = [
            Element::new("div").with_data(AREA_ATTR, ""),
            Element::area("section", ColumnId::Ordered),
        ];
        assert_eq!(resolve_area(&chain), Some(ColumnId::Ordered));
    }

    #[test]
    fn test_unknown_column_stops_the_walk() {
        let chain = [
            Element::new("div").with_data(AREA_ATTR, "kitchen"),
            Element::area("section", ColumnId::Ordered),
        ];
        assert_eq!(resolve_area(&chain), None);
    }

    #[test]
    fn test_resolve_order() {
        let id = OrderId::from("X");
        let chain = [Element::new("p"), Element::order("article", &id), Element::area("section", ColumnId::Ready)];
        assert_eq!(resolve_order(&chain), Some(id));
    }

    #[test]
    fn test_find_tagged_ancestor_is_generic() {
        let chain = [1, 4, 9, 16];
        let found = find_tagged_ancestor(&chain, |n| (n % 2 == 0).then_some(n * 10));
        assert_eq!(found, Some(40));
    }

    #[test]
    fn test_find_tagged_ancestor_stops_early() {
        let chain = [Element::area("a", ColumnId::Ordered), Element::area("b", ColumnId::Ready)];
        let mut visited = 0;
        let _ = find_tagged_ancestor(&chain, |e| {
            visited += 1;
            e.data(AREA_ATTR)
        });
        assert_eq!(visited, 1);
    }
}
