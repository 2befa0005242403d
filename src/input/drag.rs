//! Self-transitions - dragging, resizing, marquee growth and panning.
//!
//! Mouse move is called very frequently during a gesture. Each handler only
//! touches the items the gesture captured on entry; marquee containment
//! goes through the R-tree instead of scanning every item.

use std::collections::BTreeSet;
use tracing::{error, trace};

use super::state::{DragItem, InputEvent, InputState, MarqueeSelect, Pan, ResizeItem};
use crate::canvas::Canvas;
use crate::error::CanvasResult;
use crate::events::CanvasEvent;
use crate::profile_scope;
use crate::types::{ItemId, ItemKind, Point, clamp_resized, resize_rect};

impl Canvas {
    pub(crate) fn on_update(&mut self, event: &InputEvent) {
        profile_scope!("input_update");

        let mut state = std::mem::take(&mut self.input_state);
        let result = match (&mut state, event) {
            (InputState::Ready, InputEvent::DblClickOnLane { lane, pointer }) => {
                let kind = if pointer.modifiers.alt {
                    ItemKind::Block
                } else {
                    ItemKind::Snippet
                };
                self.request_add(kind, lane, pointer.position)
            }
            (InputState::DragItem(drag), InputEvent::MouseMove { pointer }) => {
                self.drag_to(drag, pointer.position)
            }
            (InputState::ResizeItem(resize), InputEvent::MouseMove { pointer }) => {
                self.resize_to(resize, pointer.position)
            }
            (InputState::MarqueeSelect(marquee), InputEvent::MouseMove { pointer }) => {
                marquee.vector = pointer.position.delta_from(marquee.origin);
                self.highlight_marquee(marquee);
                Ok(())
            }
            (InputState::Pan(pan), InputEvent::MouseMove { pointer }) => {
                self.pan_to(pan, pointer.position)
            }
            _ => Ok(()),
        };

        if let Err(e) = result {
            // The gesture cannot continue against a diverged registry.
            error!(state = %state.kind(), event = event.name(), "input update failed: {e}");
            state = InputState::Ready;
        }
        self.input_state = state;
    }

    /// Emit `add` for a double click on empty lane space.
    fn request_add(&mut self, kind: ItemKind, lane: &ItemId, position: Point) -> CanvasResult<()> {
        let lane_position = self.canvas_to_lane(lane, position)?;
        self.emit(CanvasEvent::Add {
            kind,
            position,
            lane_position,
            lane_id: lane.clone(),
        });
        Ok(())
    }

    /// Move every tracked item by the pointer delta since the last step.
    pub(crate) fn drag_to(&mut self, drag: &mut DragItem, position: Point) -> CanvasResult<()> {
        let delta = position.delta_from(drag.last);
        drag.last = position;
        if delta == Point::ZERO {
            return Ok(());
        }

        for tracked in &drag.tracked {
            let item = self.registry.item_mut(&tracked.id)?;
            item.rect = item.rect.translated(delta);
        }
        self.invalidate_spatial_index();
        trace!(dx = delta.x, dy = delta.y, items = drag.tracked.len(), "drag step");
        Ok(())
    }

    /// Resize from the gesture's start rectangle by the total pointer
    /// movement, clamped to the minimum item size.
    fn resize_to(&mut self, resize: &mut ResizeItem, position: Point) -> CanvasResult<()> {
        let delta = position.delta_from(resize.start_pos);
        let min_size = self.options.min_item_size;
        let rect = clamp_resized(
            resize_rect(resize.start_rect, resize.anchor, delta),
            resize.anchor,
            min_size,
        );

        self.registry.item_mut(&resize.target)?.rect = rect;
        resize.has_resized = true;
        self.invalidate_spatial_index();
        Ok(())
    }

    /// Highlight exactly the items fully inside the marquee.
    pub(crate) fn highlight_marquee(&mut self, marquee: &mut MarqueeSelect) {
        profile_scope!("marquee_containment");

        let rect = marquee.rect();
        let contained: BTreeSet<ItemId> = self
            .spatial_index()
            .query_contained(rect)
            .into_iter()
            .collect();

        for id in marquee.highlighted.difference(&contained) {
            if let Some(item) = self.registry.get_mut(id) {
                item.highlighted = false;
            }
        }
        for id in contained.difference(&marquee.highlighted) {
            if let Some(item) = self.registry.get_mut(id) {
                item.highlighted = true;
            }
        }
        marquee.highlighted = contained;
    }

    fn pan_to(&mut self, pan: &mut Pan, position: Point) -> CanvasResult<()> {
        let delta = position.delta_from(pan.last);
        pan.last = position;
        self.pan_lanes(delta, pan.lane.as_ref())
    }
}
