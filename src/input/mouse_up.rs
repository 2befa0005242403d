//! State exit - commit on mouse up, abort on escape.
//!
//! Abort restores whatever the gesture changed and emits nothing. Commit
//! applies the gesture's effect and emits its domain event.

use std::collections::BTreeSet;
use tracing::{debug, error};

use super::state::{
    DragItem, InputEvent, InputState, InputStateKind, MarqueeSelect, MousedownOnItem, ResizeItem,
};
use crate::canvas::Canvas;
use crate::error::CanvasResult;
use crate::events::{CanvasEvent, DroppedItem};
use crate::types::{ContainerRef, ItemId};

impl Canvas {
    pub(crate) fn on_exit(&mut self, previous: &InputState, event: &InputEvent, next: InputStateKind) {
        let abort = matches!(event, InputEvent::Escape);
        let result = match previous {
            InputState::MousedownOnItem(pressed) => self.exit_mousedown_on_item(pressed, next),
            InputState::DragItem(drag) if abort => self.abort_drag(drag),
            InputState::DragItem(drag) => self.commit_drag(drag),
            InputState::ResizeItem(resize) if abort => self.abort_resize(resize),
            InputState::ResizeItem(resize) => self.commit_resize(resize),
            InputState::MarqueeSelect(marquee) => self.exit_marquee_select(marquee, abort),
            InputState::Ready
            | InputState::MousedownOnLane(_)
            | InputState::SpaceDown
            | InputState::Pan(_) => Ok(()),
        };

        if let Err(e) = result {
            error!(state = %previous.kind(), event = event.name(), "exiting state failed: {e}");
        }
    }

    /// Release rules for a press on an item.
    ///
    /// The press already selected the target, so a plain release only
    /// collapses the selection to it. A shift release on an item that was
    /// already selected toggles it off. Starting a drag from an item that was
    /// not selected collapses the selection too.
    fn exit_mousedown_on_item(
        &mut self,
        pressed: &MousedownOnItem,
        next: InputStateKind,
    ) -> CanvasResult<()> {
        let target = &pressed.target;
        match next {
            InputStateKind::DragItem => {
                if !pressed.was_selected {
                    self.deselect_all_but(target)?;
                }
            }
            _ if !pressed.shift => {
                self.deselect_all_but(target)?;
            }
            _ if pressed.was_selected => {
                self.deselect(Some(target))?;
            }
            _ => {}
        }
        Ok(())
    }

    fn abort_drag(&mut self, drag: &DragItem) -> CanvasResult<()> {
        for tracked in &drag.tracked {
            self.registry.item_mut(&tracked.id)?.rect = tracked.original;
        }
        self.invalidate_spatial_index();
        debug!(items = drag.tracked.len(), "drag aborted");
        Ok(())
    }

    /// Move each dragged subtree into the lane under its final position and
    /// emit `drop`.
    ///
    /// Only subtree roots change containers: an item whose container is also
    /// being dragged follows it. An item inside a block that stays behind
    /// keeps its block. Items over no lane keep the lane they had.
    fn commit_drag(&mut self, drag: &DragItem) -> CanvasResult<()> {
        let tracked: BTreeSet<&ItemId> = drag.tracked.iter().map(|t| &t.id).collect();

        for entry in &drag.tracked {
            let item = self.registry.item(&entry.id)?;
            let moves_with_container = item
                .container()
                .and_then(ContainerRef::item_id)
                .is_some_and(|container| tracked.contains(container));
            if moves_with_container || matches!(item.container(), Some(ContainerRef::Block(_)) | None) {
                continue;
            }
            self.relocate_to_lane_under(&entry.id)?;
        }

        let mut items = Vec::with_capacity(drag.tracked.len());
        for entry in &drag.tracked {
            let item = self.registry.item(&entry.id)?;
            items.push(DroppedItem {
                id: item.id.clone(),
                lane_id: item.lane_id.clone(),
                position: item.rect.origin(),
            });
        }

        self.invalidate_spatial_index();
        debug!(items = items.len(), "drag committed");
        self.emit(CanvasEvent::Drop { items });
        Ok(())
    }

    /// Re-home a top-level item (and its subtree) into the lane under its
    /// canvas-space origin, converting coordinates to the new lane's space.
    fn relocate_to_lane_under(&mut self, id: &ItemId) -> CanvasResult<()> {
        let canvas_origin = self.item_canvas_rect(id)?.origin();
        let Some(target_lane) = self.get_lane_at(canvas_origin).map(|lane| lane.id.clone()) else {
            return Ok(());
        };
        let item = self.registry.item(id)?;
        if item.lane_id.as_ref() == Some(&target_lane) {
            return Ok(());
        }

        let local = self.canvas_to_lane(&target_lane, canvas_origin)?;
        let shift = local.delta_from(item.rect.origin());
        let mut subtree = vec![id.clone()];
        subtree.extend(
            self.registry
                .get_descendants_of(id)?
                .map(|item| item.id.clone()),
        );
        for moved in &subtree {
            let item = self.registry.item_mut(moved)?;
            item.rect = item.rect.translated(shift);
        }

        self.registry
            .append_child(&ContainerRef::Lane(target_lane.clone()), id)?;
        debug!(item = %id, lane = %target_lane, "moved to lane");
        Ok(())
    }

    fn abort_resize(&mut self, resize: &ResizeItem) -> CanvasResult<()> {
        self.registry.item_mut(&resize.target)?.rect = resize.start_rect;
        self.invalidate_spatial_index();
        debug!(item = %resize.target, "resize aborted");
        Ok(())
    }

    fn commit_resize(&mut self, resize: &ResizeItem) -> CanvasResult<()> {
        if !resize.has_resized {
            return Ok(());
        }
        let rect = self.registry.item(&resize.target)?.rect;
        self.emit(CanvasEvent::Resize {
            id: resize.target.clone(),
            rect,
        });
        Ok(())
    }

    /// Commit adds every highlighted item to the selection; abort leaves the
    /// selection alone. Highlighting is cleared either way.
    fn exit_marquee_select(&mut self, marquee: &MarqueeSelect, abort: bool) -> CanvasResult<()> {
        for id in &marquee.highlighted {
            if let Some(item) = self.registry.get_mut(id) {
                item.highlighted = false;
            }
        }
        if abort {
            return Ok(());
        }
        for id in &marquee.highlighted {
            self.select(id, true)?;
        }
        debug!(selected = self.selection.len(), "marquee committed");
        Ok(())
    }
}
