//! Core types for the swimlane canvas.
//!
//! This module defines the geometry primitives, the tagged `Item` type that
//! represents snippets, blocks and lanes, and the truth descriptors the canvas
//! reconciles against.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{CanvasError, CanvasResult};

// ============================================================================
// Identifiers
// ============================================================================

/// Opaque, stable item identifier. Unique within a canvas instance.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ============================================================================
// Geometry
// ============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn offset(self, delta: Point) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y)
    }

    /// Vector from `origin` to `self`.
    #[inline]
    pub fn delta_from(self, origin: Point) -> Self {
        Self::new(self.x - origin.x, self.y - origin.y)
    }
}

/// Axis-aligned rectangle in the coordinate space of its container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn translated(self, delta: Point) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }

    #[inline]
    pub fn with_origin(self, origin: Point) -> Self {
        Self::new(origin.x, origin.y, self.width, self.height)
    }

    #[inline]
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// True if all four corners of `other` lie inside `self`.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.right() <= self.right()
            && other.y >= self.y
            && other.bottom() <= self.bottom()
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }

    /// The part of `self` between `top` and `bottom`, or `None` if nothing
    /// of it is left.
    pub fn clip_to_band(&self, top: f32, bottom: f32) -> Option<Rect> {
        let y = self.y.max(top);
        let end = self.bottom().min(bottom);
        (end > y).then(|| Rect::new(self.x, y, self.width, end - y))
    }

    /// Corner point for the given anchor.
    pub fn corner(&self, anchor: Anchor) -> Point {
        let x = if anchor.is_west() { self.x } else { self.right() };
        let y = if anchor.is_north() { self.y } else { self.bottom() };
        Point::new(x, y)
    }
}

/// Resize handle position on an item's bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Nw,
    Ne,
    Se,
    Sw,
}

impl Anchor {
    pub const ALL: [Anchor; 4] = [Anchor::Nw, Anchor::Ne, Anchor::Se, Anchor::Sw];

    #[inline]
    pub fn is_west(self) -> bool {
        matches!(self, Anchor::Nw | Anchor::Sw)
    }

    #[inline]
    pub fn is_north(self) -> bool {
        matches!(self, Anchor::Nw | Anchor::Ne)
    }
}

/// Apply an anchor-relative resize to `rect`.
///
/// West anchors move the left edge, north anchors move the top edge; the
/// opposite edges stay put. No clamping happens here, so a large enough delta
/// yields a negative width or height.
pub fn resize_rect(rect: Rect, anchor: Anchor, delta: Point) -> Rect {
    let mut out = rect;
    if anchor.is_west() {
        out.x += delta.x;
        out.width -= delta.x;
    } else {
        out.width += delta.x;
    }
    if anchor.is_north() {
        out.y += delta.y;
        out.height -= delta.y;
    } else {
        out.height += delta.y;
    }
    out
}

/// Clamp a resized rectangle to `min_size` while keeping the edge opposite
/// `anchor` fixed.
pub fn clamp_resized(rect: Rect, anchor: Anchor, min_size: f32) -> Rect {
    let mut out = rect;
    if out.width < min_size {
        if anchor.is_west() {
            out.x = rect.right() - min_size;
        }
        out.width = min_size;
    }
    if out.height < min_size {
        if anchor.is_north() {
            out.y = rect.bottom() - min_size;
        }
        out.height = min_size;
    }
    out
}

/// Normalized bounding box of a marquee with a fixed origin and a vector.
pub fn normalize_marquee(origin: Point, vector: Point) -> Rect {
    Rect::new(
        origin.x + vector.x.min(0.0),
        origin.y + vector.y.min(0.0),
        vector.x.abs(),
        vector.y.abs(),
    )
}

// ============================================================================
// Items
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Snippet,
    Block,
    Lane,
}

impl ItemKind {
    pub fn is_container(self) -> bool {
        matches!(self, ItemKind::Block | ItemKind::Lane)
    }
}

/// Kind-specific state. Only container kinds carry a child list.
#[derive(Clone, Debug, PartialEq)]
pub enum ItemVariant {
    Snippet,
    Block { child_ids: Vec<ItemId> },
    Lane { child_ids: Vec<ItemId>, pan_offset: Point },
}

/// A container that can own children: the canvas root, a lane or a block.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ContainerRef {
    Root,
    Lane(ItemId),
    Block(ItemId),
}

impl ContainerRef {
    /// Id of the item backing this container; `None` for the root.
    pub fn item_id(&self) -> Option<&ItemId> {
        match self {
            ContainerRef::Root => None,
            ContainerRef::Lane(id) | ContainerRef::Block(id) => Some(id),
        }
    }
}

impl fmt::Display for ContainerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerRef::Root => f.write_str("root"),
            ContainerRef::Lane(id) => write!(f, "lane {id}"),
            ContainerRef::Block(id) => write!(f, "block {id}"),
        }
    }
}

/// A positioned rectangular canvas entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub id: ItemId,
    /// Lane-local for items under a lane, canvas space otherwise.
    /// For lanes, `y` and `height` describe the lane band in canvas space.
    pub rect: Rect,
    pub name: String,
    pub color: String,
    /// Owning lane. `None` for lanes themselves and for root-level items.
    pub lane_id: Option<ItemId>,
    pub selected: bool,
    pub highlighted: bool,
    pub variant: ItemVariant,
    pub(crate) container: Option<ContainerRef>,
}

impl Item {
    pub fn from_descriptor(descriptor: &ItemDescriptor) -> Self {
        let variant = match descriptor.kind {
            ItemKind::Snippet => ItemVariant::Snippet,
            ItemKind::Block => ItemVariant::Block { child_ids: Vec::new() },
            ItemKind::Lane => ItemVariant::Lane {
                child_ids: Vec::new(),
                pan_offset: Point::ZERO,
            },
        };
        Self {
            id: descriptor.id.clone(),
            rect: descriptor.rect(),
            name: descriptor.name.clone().unwrap_or_default(),
            color: descriptor.color.clone(),
            lane_id: None,
            selected: false,
            highlighted: false,
            variant,
            container: None,
        }
    }

    pub fn new_lane(descriptor: &LaneDescriptor, y: f32, height: f32) -> Self {
        Self {
            id: descriptor.id.clone(),
            rect: Rect::new(0.0, y, 0.0, height),
            name: descriptor.name.clone().unwrap_or_default(),
            color: descriptor.color.clone().unwrap_or_default(),
            lane_id: None,
            selected: false,
            highlighted: false,
            variant: ItemVariant::Lane {
                child_ids: Vec::new(),
                pan_offset: Point::ZERO,
            },
            container: None,
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self.variant {
            ItemVariant::Snippet => ItemKind::Snippet,
            ItemVariant::Block { .. } => ItemKind::Block,
            ItemVariant::Lane { .. } => ItemKind::Lane,
        }
    }

    pub fn is_lane(&self) -> bool {
        matches!(self.variant, ItemVariant::Lane { .. })
    }

    /// Enclosing block, if any. Top-level items report `None`.
    pub fn parent_id(&self) -> Option<&ItemId> {
        match &self.container {
            Some(ContainerRef::Block(id)) => Some(id),
            _ => None,
        }
    }

    /// The container this item is currently attached to.
    pub fn container(&self) -> Option<&ContainerRef> {
        self.container.as_ref()
    }

    pub fn child_ids(&self) -> Option<&[ItemId]> {
        match &self.variant {
            ItemVariant::Snippet => None,
            ItemVariant::Block { child_ids } | ItemVariant::Lane { child_ids, .. } => {
                Some(child_ids)
            }
        }
    }

    pub(crate) fn child_ids_mut(&mut self) -> Option<&mut Vec<ItemId>> {
        match &mut self.variant {
            ItemVariant::Snippet => None,
            ItemVariant::Block { child_ids } | ItemVariant::Lane { child_ids, .. } => {
                Some(child_ids)
            }
        }
    }

    /// Pan offset of a lane; zero for other kinds.
    pub fn pan_offset(&self) -> Point {
        match self.variant {
            ItemVariant::Lane { pan_offset, .. } => pan_offset,
            _ => Point::ZERO,
        }
    }

    pub(crate) fn set_pan_offset(&mut self, offset: Point) {
        if let ItemVariant::Lane { pan_offset, .. } = &mut self.variant {
            *pan_offset = offset;
        }
    }

    /// Refresh display metadata and geometry from a truth descriptor.
    pub fn refresh(&mut self, descriptor: &ItemDescriptor) {
        self.rect = descriptor.rect();
        self.color = descriptor.color.clone();
        self.name = descriptor.name.clone().unwrap_or_default();
    }
}

// ============================================================================
// Truth descriptors
// ============================================================================

/// Externally owned description of a snippet or block.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDescriptor {
    pub id: ItemId,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub parent_id: Option<ItemId>,
    #[serde(default)]
    pub lane_id: Option<ItemId>,
    #[serde(default)]
    pub child_ids: Option<Vec<ItemId>>,
}

impl ItemDescriptor {
    pub fn new(id: impl Into<ItemId>, kind: ItemKind, rect: Rect) -> Self {
        Self {
            id: id.into(),
            kind,
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            color: String::new(),
            name: None,
            parent_id: None,
            lane_id: None,
            child_ids: None,
        }
    }

    pub fn snippet(id: impl Into<ItemId>, rect: Rect) -> Self {
        Self::new(id, ItemKind::Snippet, rect)
    }

    pub fn block(id: impl Into<ItemId>, rect: Rect) -> Self {
        Self::new(id, ItemKind::Block, rect)
    }

    pub fn in_lane(mut self, lane_id: impl Into<ItemId>) -> Self {
        self.lane_id = Some(lane_id.into());
        self
    }

    pub fn in_parent(mut self, parent_id: impl Into<ItemId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaneDescriptor {
    pub id: ItemId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    /// Explicit lane height; falls back to the configured default.
    #[serde(default)]
    pub height: Option<f32>,
}

impl LaneDescriptor {
    pub fn new(id: impl Into<ItemId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            color: None,
            height: None,
        }
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }
}

/// Read-only snapshot of the external data source.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Truth {
    #[serde(default)]
    pub elements: BTreeMap<ItemId, ItemDescriptor>,
    #[serde(default)]
    pub lanes: Vec<LaneDescriptor>,
}

impl Truth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> CanvasResult<Self> {
        serde_json::from_str(json).map_err(CanvasError::from)
    }

    pub fn with_lane(mut self, lane: LaneDescriptor) -> Self {
        self.lanes.push(lane);
        self
    }

    pub fn with_element(mut self, element: ItemDescriptor) -> Self {
        self.elements.insert(element.id.clone(), element);
        self
    }

    pub fn contains_lane(&self, id: &ItemId) -> bool {
        self.lanes.iter().any(|lane| &lane.id == id)
    }
}
