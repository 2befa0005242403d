//! Root router - turns raw client-space input into classified events.
//!
//! ## Performance Notes
//!
//! Pointer down is a hot path. Hit testing asks the R-tree for candidates
//! under the pointer and then picks the topmost one by paint order, so the
//! cost stays O(log n + k) in the number of items.

use std::collections::HashSet;
use tracing::trace;

use super::state::{InputEvent, InputStateKind, Modifiers, Pointer};
use crate::canvas::Canvas;
use crate::profile_scope;
use crate::types::{Anchor, ItemId, Point};

/// What lies under the pointer, in priority order.
#[derive(Clone, Debug, PartialEq)]
pub enum HitTarget {
    ResizeHandle { item: ItemId, anchor: Anchor },
    Item(ItemId),
    Lane(ItemId),
}

/// Keys the canvas reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Space,
    Escape,
    Other,
}

impl Canvas {
    /// Classify a canvas-space point.
    ///
    /// Resize handles of selected items win over item bodies, and item
    /// bodies win over empty lane space. Only the part of an item inside its
    /// lane's band can be hit.
    pub fn hit_test(&mut self, p: Point) -> Option<HitTarget> {
        profile_scope!("hit_test");

        if let Some((item, anchor)) = self.resize_handle_at(p) {
            return Some(HitTarget::ResizeHandle { item, anchor });
        }

        let candidates: HashSet<ItemId> = self.spatial_index().query_point(p).into_iter().collect();
        if !candidates.is_empty() {
            let topmost = self
                .registry
                .paint_order()
                .into_iter()
                .rev()
                .find(|item| candidates.contains(&item.id))
                .map(|item| item.id.clone());
            if let Some(id) = topmost {
                return Some(HitTarget::Item(id));
            }
        }

        self.get_lane_at(p).map(|lane| HitTarget::Lane(lane.id.clone()))
    }

    /// Handles sit on the corners of selected items. A corner hidden by its
    /// lane window has no handle.
    fn resize_handle_at(&self, p: Point) -> Option<(ItemId, Anchor)> {
        let reach = self.options.resize_handle_size;
        self.selection.iter().find_map(|id| {
            let rect = self.item_canvas_rect(id).ok()?;
            let visible = self.visible_canvas_rect(id).ok()??;
            Anchor::ALL.into_iter().find_map(|anchor| {
                let corner = rect.corner(anchor);
                let near = (p.x - corner.x).abs() <= reach && (p.y - corner.y).abs() <= reach;
                (near && visible.contains_point(corner)).then(|| (id.clone(), anchor))
            })
        })
    }

    fn pointer_at(&self, client: Point, modifiers: Modifiers) -> Pointer {
        Pointer {
            position: self.client_to_canvas(client),
            modifiers,
        }
    }

    /// Route a pointer press. Ignored while unmounted or when the press
    /// lands outside every lane and item.
    pub fn pointer_down(&mut self, client: Point, modifiers: Modifiers) -> Option<InputStateKind> {
        if !self.is_mounted() {
            return None;
        }
        let pointer = self.pointer_at(client, modifiers);
        let event = match self.hit_test(pointer.position)? {
            HitTarget::ResizeHandle { item, anchor } => InputEvent::MouseDownOnResizeHandle {
                target: item,
                anchor,
                pointer,
            },
            HitTarget::Item(target) => InputEvent::MouseDownOnItem { target, pointer },
            HitTarget::Lane(lane) => InputEvent::MouseDownOnLane { lane, pointer },
        };
        trace!(event = event.name(), "pointer down");
        Some(self.send(event))
    }

    pub fn pointer_move(&mut self, client: Point, modifiers: Modifiers) -> Option<InputStateKind> {
        if !self.is_mounted() {
            return None;
        }
        let pointer = self.pointer_at(client, modifiers);
        Some(self.send(InputEvent::MouseMove { pointer }))
    }

    pub fn pointer_up(&mut self, client: Point, modifiers: Modifiers) -> Option<InputStateKind> {
        if !self.is_mounted() {
            return None;
        }
        let pointer = self.pointer_at(client, modifiers);
        Some(self.send(InputEvent::MouseUp { pointer }))
    }

    pub fn double_click(&mut self, client: Point, modifiers: Modifiers) -> Option<InputStateKind> {
        if !self.is_mounted() {
            return None;
        }
        let pointer = self.pointer_at(client, modifiers);
        let event = match self.hit_test(pointer.position)? {
            HitTarget::ResizeHandle { item, .. } | HitTarget::Item(item) => {
                InputEvent::DblClickOnItem {
                    target: item,
                    pointer,
                }
            }
            HitTarget::Lane(lane) => InputEvent::DblClickOnLane { lane, pointer },
        };
        Some(self.send(event))
    }

    pub fn key_down(&mut self, key: Key) -> Option<InputStateKind> {
        if !self.is_mounted() {
            return None;
        }
        match key {
            Key::Space => Some(self.send(InputEvent::SpaceDown)),
            Key::Escape | Key::Other => None,
        }
    }

    /// Escape is delivered on key up, so a held key cannot abort twice.
    pub fn key_up(&mut self, key: Key) -> Option<InputStateKind> {
        if !self.is_mounted() {
            return None;
        }
        match key {
            Key::Space => Some(self.send(InputEvent::SpaceUp)),
            Key::Escape => Some(self.send(InputEvent::Escape)),
            Key::Other => None,
        }
    }
}
