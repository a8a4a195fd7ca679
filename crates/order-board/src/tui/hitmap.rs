//! Hit testing for pointer events.
//!
//! Every render registers the screen regions it draws together with the
//! element they stand for and how deeply nested they are. A pointer
//! position then maps to an ancestor chain, innermost element first, that
//! the reconciler can scan for drop areas and card ids.

use board_reconciler::Element;
use ratatui::layout::Rect;

/// A drawn region and the element it represents.
#[derive(Debug, Clone)]
pub struct HitRegion {
    /// Screen area.
    pub rect: Rect,
    /// Nesting depth; larger is further inside.
    pub depth: u8,
    /// Element at this region.
    pub element: Element,
}

impl HitRegion {
    /// Returns true if the position is within this region.
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.rect.x
            && x < self.rect.x.saturating_add(self.rect.width)
            && y >= self.rect.y
            && y < self.rect.y.saturating_add(self.rect.height)
    }
}

/// Regions registered during the last render.
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    regions: Vec<HitRegion>,
}

impl HitMap {
    /// Creates an empty hit map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets all regions. Called at the start of every render.
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    /// Registers a region.
    pub fn push(&mut self, rect: Rect, depth: u8, element: Element) {
        self.regions.push(HitRegion { rect, depth, element });
    }

    /// Ancestor chain at a position, innermost first.
    ///
    /// Regions at the same depth keep registration order, later ones first,
    /// since they were drawn on top.
    pub fn chain_at(&self, x: u16, y: u16) -> Vec<Element> {
        let mut hits: Vec<(usize, &HitRegion)> = self
            .regions
            .iter()
            .enumerate()
            .filter(|(_, r)| r.contains(x, y))
            .collect();
        hits.sort_by(|(ia, a), (ib, b)| b.depth.cmp(&a.depth).then(ib.cmp(ia)));
        hits.into_iter().map(|(_, r)| r.element.clone()).collect()
    }

    /// Returns the number of registered regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_models::{ColumnId, OrderId};
    use board_reconciler::{resolve_area, resolve_order};

    fn rect(x: u16, y: u16, width: u16, height: u16) -> Rect {
        Rect { x, y, width, height }
    }

    fn board() -> HitMap {
        let mut hits = HitMap::new();
        hits.push(rect(0, 0, 90, 30), 0, Element::new("main"));
        hits.push(rect(0, 1, 30, 28), 1, Element::area("section", ColumnId::Ordered));
        hits.push(rect(30, 1, 30, 28), 1, Element::area("section", ColumnId::Ready));
        hits.push(rect(1, 2, 28, 26), 2, Element::new("ul"));
        hits.push(rect(1, 2, 28, 4), 3, Element::order("article", &OrderId::from("X")));
        hits.push(rect(2, 3, 26, 1), 4, Element::new("p"));
        hits
    }

    #[test]
    fn test_region_contains() {
        let region = HitRegion {
            rect: rect(10, 5, 20, 1),
            depth: 0,
            element: Element::new("button"),
        };

        assert!(region.contains(10, 5));
        assert!(region.contains(29, 5));
        assert!(!region.contains(9, 5));
        assert!(!region.contains(30, 5));
        assert!(!region.contains(15, 4));
        assert!(!region.contains(15, 6));
    }

    #[test]
    fn test_chain_is_innermost_first() {
        let chain = board().chain_at(5, 3);
        let tags: Vec<&str> = chain.iter().map(|e| e.tag.as_str()).collect();
        assert_eq!(tags, vec!["p", "article", "ul", "section", "main"]);
    }

    #[test]
    fn test_chain_resolves_card_and_column() {
        let chain = board().chain_at(5, 3);
        assert_eq!(resolve_order(&chain), Some(OrderId::from("X")));
        assert_eq!(resolve_area(&chain), Some(ColumnId::Ordered));
    }

    #[test]
    fn test_chain_in_other_column() {
        let chain = board().chain_at(40, 10);
        assert_eq!(resolve_area(&chain), Some(ColumnId::Ready));
        assert_eq!(resolve_order(&chain), None);
    }

    #[test]
    fn test_chain_outside_columns() {
        let chain = board().chain_at(80, 0);
        assert_eq!(chain.len(), 1);
        assert_eq!(resolve_area(&chain), None);
    }

    #[test]
    fn test_later_region_wins_at_same_depth() {
        let mut hits = HitMap::new();
        hits.push(rect(0, 0, 10, 10), 1, Element::new("under"));
        hits.push(rect(0, 0, 10, 10), 1, Element::new("over"));

        let chain = hits.chain_at(1, 1);
        assert_eq!(chain[0].tag, "over");
    }

    #[test]
    fn test_clear() {
        let mut hits = board();
        assert!(!hits.is_empty());
        hits.clear();
        assert!(hits.chain_at(5, 3).is_empty());
    }
}
