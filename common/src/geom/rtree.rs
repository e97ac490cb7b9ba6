use super::rect::Rect;
use rstar::{AABB, RTree};

/// Bounding-box index over ids. Queries are coarse: callers refine the
/// candidates with an exact predicate.
pub struct SpatialIndex {
    tree: RTree<IndexedRect>,
}

struct IndexedRect {
    rect: Rect,
    id: usize,
}

impl rstar::RTreeObject for IndexedRect {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        envelope_of(&self.rect)
    }
}

fn envelope_of(rect: &Rect) -> AABB<[f64; 2]> {
    AABB::from_corners([rect.min.x, rect.min.y], [rect.max.x, rect.max.y])
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    pub fn insert(&mut self, rect: Rect, id: usize) {
        self.tree.insert(IndexedRect { rect, id });
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Ids whose box touches `rect`, boundaries included, sorted ascending so
    /// callers see insertion order regardless of tree layout.
    pub fn query(&self, rect: Rect) -> Vec<usize> {
        let mut ids: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&envelope_of(&rect))
            .map(|item| item.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Id of an entry whose box equals `rect` exactly.
    pub fn find_exact(&self, rect: Rect) -> Option<usize> {
        self.tree
            .locate_in_envelope(&envelope_of(&rect))
            .filter(|item| item.rect == rect)
            .map(|item| item.id)
            .min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_returns_touching_boxes_in_id_order() {
        let mut index = SpatialIndex::new();
        index.insert(Rect::from_xywh(10.0, 0.0, 5.0, 5.0), 1);
        index.insert(Rect::from_xywh(0.0, 0.0, 5.0, 5.0), 0);
        index.insert(Rect::from_xywh(50.0, 50.0, 5.0, 5.0), 2);

        assert_eq!(index.query(Rect::from_xywh(5.0, 0.0, 5.0, 1.0)), vec![0, 1]);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn find_exact_ignores_contained_boxes() {
        let mut index = SpatialIndex::new();
        index.insert(Rect::from_xywh(1.0, 1.0, 2.0, 2.0), 0);
        index.insert(Rect::from_xywh(0.0, 0.0, 4.0, 4.0), 1);

        assert_eq!(index.find_exact(Rect::from_xywh(0.0, 0.0, 4.0, 4.0)), Some(1));
        assert_eq!(index.find_exact(Rect::from_xywh(0.0, 0.0, 3.0, 3.0)), None);
    }
}
