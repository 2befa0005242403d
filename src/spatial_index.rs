//! Spatial Index Module
//!
//! R-tree over canvas-space item rectangles. Hit testing and marquee
//! containment query it instead of scanning every item.

use rstar::{RTree, RTreeObject, AABB};

use crate::types::{ItemId, Point, Rect};

/// A canvas item's bounding box in canvas coordinates.
#[derive(Debug, Clone)]
pub struct SpatialEntry {
    pub item_id: ItemId,
    bounds: AABB<[f32; 2]>,
}

impl SpatialEntry {
    /// Build an entry; inverted rectangles are normalized.
    pub fn new(item_id: ItemId, rect: Rect) -> Self {
        Self {
            item_id,
            bounds: envelope_of(rect),
        }
    }

    #[inline]
    pub fn contains_point(&self, p: Point) -> bool {
        let (lower, upper) = (self.bounds.lower(), self.bounds.upper());
        (lower[0]..=upper[0]).contains(&p.x) && (lower[1]..=upper[1]).contains(&p.y)
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.bounds
    }
}

/// Spatial index for canvas items using an R-tree.
///
/// Rebuilt wholesale from the registry whenever geometry changes; queries
/// between rebuilds are read-only.
#[derive(Debug)]
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// All items whose rectangle contains the point.
    pub fn query_point(&self, p: Point) -> Vec<ItemId> {
        let point_envelope = AABB::from_point([p.x, p.y]);

        self.tree
            .locate_in_envelope_intersecting(&point_envelope)
            .filter(|entry| entry.contains_point(p))
            .map(|entry| entry.item_id.clone())
            .collect()
    }

    /// All items lying entirely inside the rectangle.
    pub fn query_contained(&self, rect: Rect) -> Vec<ItemId> {
        let envelope = envelope_of(rect);

        self.tree
            .locate_in_envelope(&envelope)
            .map(|entry| entry.item_id.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Replace the contents with `(id, canvas rect)` pairs.
    pub fn rebuild<I>(&mut self, items: I)
    where
        I: Iterator<Item = (ItemId, Rect)>,
    {
        self.tree = RTree::bulk_load(items.map(|(id, rect)| SpatialEntry::new(id, rect)).collect());
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}

/// `from_corners` orders each axis, so negative sizes are fine.
fn envelope_of(rect: Rect) -> AABB<[f32; 2]> {
    AABB::from_corners([rect.x, rect.y], [rect.right(), rect.bottom()])
}
