//! State entry - selection on press, drag/resize/marquee/pan initiation.
//!
//! Every enter handler builds the struct for its state from the triggering
//! event and, where needed, the state being left. A handler that hits a
//! registry error logs it and falls back to `Ready`.

use std::collections::BTreeSet;
use tracing::{debug, error};

use super::state::{
    DragItem, InputEvent, InputState, InputStateKind, MarqueeSelect, MousedownOnItem,
    MousedownOnLane, Pan, ResizeItem, TrackedItem,
};
use crate::canvas::Canvas;
use crate::error::CanvasResult;
use crate::types::ItemId;

impl Canvas {
    pub(crate) fn on_enter(
        &mut self,
        next: InputStateKind,
        event: &InputEvent,
        previous: InputState,
    ) -> InputState {
        let entered = match next {
            InputStateKind::Ready => Ok(InputState::Ready),
            InputStateKind::SpaceDown => Ok(InputState::SpaceDown),
            InputStateKind::MousedownOnItem => self.enter_mousedown_on_item(event),
            InputStateKind::MousedownOnLane => self.enter_mousedown_on_lane(event),
            InputStateKind::ResizeItem => self.enter_resize_item(event),
            InputStateKind::DragItem => self.enter_drag_item(event, previous),
            InputStateKind::MarqueeSelect => self.enter_marquee_select(event, previous),
            InputStateKind::Pan => self.enter_pan(event),
        };

        entered.unwrap_or_else(|e| {
            error!(state = %next, event = event.name(), "entering state failed: {e}");
            InputState::Ready
        })
    }

    fn enter_mousedown_on_item(&mut self, event: &InputEvent) -> CanvasResult<InputState> {
        let InputEvent::MouseDownOnItem { target, pointer } = event else {
            return Ok(InputState::Ready);
        };
        self.registry.item(target)?;

        let was_selected = self.selection.contains(target);
        let shift = pointer.modifiers.shift;
        if !was_selected {
            self.select(target, shift)?;
        }

        Ok(InputState::MousedownOnItem(MousedownOnItem {
            target: target.clone(),
            was_selected,
            shift,
            press: pointer.position,
        }))
    }

    fn enter_mousedown_on_lane(&mut self, event: &InputEvent) -> CanvasResult<InputState> {
        let InputEvent::MouseDownOnLane { lane, pointer } = event else {
            return Ok(InputState::Ready);
        };
        self.registry.lane(lane)?;

        if !pointer.modifiers.shift {
            self.clear_selection();
        }

        Ok(InputState::MousedownOnLane(MousedownOnLane {
            lane: lane.clone(),
            press: pointer.position,
        }))
    }

    fn enter_resize_item(&mut self, event: &InputEvent) -> CanvasResult<InputState> {
        let InputEvent::MouseDownOnResizeHandle {
            target,
            anchor,
            pointer,
        } = event
        else {
            return Ok(InputState::Ready);
        };

        self.deselect_all_but(target)?;
        self.select(target, true)?;

        // The resized item and its contents paint above their siblings.
        let mut raised = vec![target.clone()];
        raised.extend(
            self.registry
                .get_descendants_of(target)?
                .map(|item| item.id.clone()),
        );
        for id in &raised {
            self.registry.move_to_the_front(id)?;
        }

        let start_rect = self.registry.item(target)?.rect;
        debug!(item = %target, ?anchor, "resize started");
        Ok(InputState::ResizeItem(ResizeItem {
            target: target.clone(),
            anchor: *anchor,
            start_rect,
            start_pos: pointer.position,
            has_resized: false,
        }))
    }

    fn enter_drag_item(
        &mut self,
        event: &InputEvent,
        previous: InputState,
    ) -> CanvasResult<InputState> {
        let (InputState::MousedownOnItem(pressed), Some(pointer)) = (previous, event.pointer())
        else {
            return Ok(InputState::Ready);
        };

        let mut seen: BTreeSet<ItemId> = BTreeSet::new();
        let mut tracked = Vec::new();
        let mut roots = self.selection.to_vec();
        if !roots.contains(&pressed.target) {
            roots.push(pressed.target.clone());
        }
        for root in &roots {
            let mut ids = vec![root.clone()];
            ids.extend(
                self.registry
                    .get_descendants_of(root)?
                    .map(|item| item.id.clone()),
            );
            for id in ids {
                if seen.insert(id.clone()) {
                    let original = self.registry.item(&id)?.rect;
                    tracked.push(TrackedItem { id, original });
                }
            }
        }

        let mut drag = DragItem {
            tracked,
            last: pressed.press,
        };
        debug!(items = drag.tracked.len(), "drag started");

        // The move that started the drag counts as its first step.
        self.drag_to(&mut drag, pointer.position)?;
        Ok(InputState::DragItem(drag))
    }

    fn enter_marquee_select(
        &mut self,
        event: &InputEvent,
        previous: InputState,
    ) -> CanvasResult<InputState> {
        let (InputState::MousedownOnLane(pressed), Some(pointer)) = (previous, event.pointer())
        else {
            return Ok(InputState::Ready);
        };

        let mut marquee = MarqueeSelect {
            origin: pressed.press,
            vector: pointer.position.delta_from(pressed.press),
            highlighted: BTreeSet::new(),
        };
        self.highlight_marquee(&mut marquee);
        Ok(InputState::MarqueeSelect(marquee))
    }

    fn enter_pan(&mut self, event: &InputEvent) -> CanvasResult<InputState> {
        let (lane, pointer) = match event {
            InputEvent::MouseDownOnLane { lane, pointer } => {
                (Some(self.registry.lane(lane)?.id.clone()), pointer)
            }
            InputEvent::MouseDownOnItem { target, pointer } => {
                (self.registry.item(target)?.lane_id.clone(), pointer)
            }
            _ => return Ok(InputState::Ready),
        };

        Ok(InputState::Pan(Pan {
            lane,
            last: pointer.position,
        }))
    }
}
