//! Input state machine - one explicit state per gesture phase.
//!
//! Each gesture-bearing state is a struct that owns exactly the values it
//! captured on entry. A state is built by its enter handler, replaced by the
//! next transition and dropped on exit; nothing survives between gestures.
//!
//! ## State Transitions
//!
//! ```text
//! Ready           -> MousedownOnItem  (mousedown:item)
//! Ready           -> MousedownOnLane  (mousedown:lane)
//! Ready           -> ResizeItem       (mousedown:resize-handle)
//! Ready           -> SpaceDown        (spacedown)
//! MousedownOnItem -> DragItem         (mousemove)
//! MousedownOnLane -> MarqueeSelect    (mousemove)
//! SpaceDown       -> Pan              (mousedown:item / mousedown:lane)
//!
//! Any gesture     -> Ready            (mouseup commits, escape aborts)
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::types::{Anchor, ItemId, Point, Rect, normalize_marquee};

/// Keyboard modifiers held during a pointer event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        alt: false,
        ctrl: false,
    };

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }

    pub fn alt() -> Self {
        Self {
            alt: true,
            ..Self::NONE
        }
    }
}

/// Pointer position in canvas coordinates plus the held modifiers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pointer {
    pub position: Point,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl Pointer {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            position: Point::new(x, y),
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Classified input delivered to the state machine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InputEvent {
    #[serde(rename = "mousedown:item")]
    MouseDownOnItem { target: ItemId, pointer: Pointer },
    #[serde(rename = "mousedown:lane")]
    MouseDownOnLane { lane: ItemId, pointer: Pointer },
    #[serde(rename = "mousedown:resize-handle")]
    MouseDownOnResizeHandle {
        target: ItemId,
        anchor: Anchor,
        pointer: Pointer,
    },
    #[serde(rename = "dblclick:lane")]
    DblClickOnLane { lane: ItemId, pointer: Pointer },
    #[serde(rename = "dblclick:item")]
    DblClickOnItem { target: ItemId, pointer: Pointer },
    #[serde(rename = "mousemove")]
    MouseMove { pointer: Pointer },
    #[serde(rename = "mouseup")]
    MouseUp { pointer: Pointer },
    #[serde(rename = "spacedown")]
    SpaceDown,
    #[serde(rename = "spaceup")]
    SpaceUp,
    #[serde(rename = "escape")]
    Escape,
}

impl InputEvent {
    pub fn pointer(&self) -> Option<&Pointer> {
        match self {
            InputEvent::MouseDownOnItem { pointer, .. }
            | InputEvent::MouseDownOnLane { pointer, .. }
            | InputEvent::MouseDownOnResizeHandle { pointer, .. }
            | InputEvent::DblClickOnLane { pointer, .. }
            | InputEvent::DblClickOnItem { pointer, .. }
            | InputEvent::MouseMove { pointer }
            | InputEvent::MouseUp { pointer } => Some(pointer),
            InputEvent::SpaceDown | InputEvent::SpaceUp | InputEvent::Escape => None,
        }
    }

    /// Wire name, as used in replay scripts and logs.
    pub fn name(&self) -> &'static str {
        match self {
            InputEvent::MouseDownOnItem { .. } => "mousedown:item",
            InputEvent::MouseDownOnLane { .. } => "mousedown:lane",
            InputEvent::MouseDownOnResizeHandle { .. } => "mousedown:resize-handle",
            InputEvent::DblClickOnLane { .. } => "dblclick:lane",
            InputEvent::DblClickOnItem { .. } => "dblclick:item",
            InputEvent::MouseMove { .. } => "mousemove",
            InputEvent::MouseUp { .. } => "mouseup",
            InputEvent::SpaceDown => "spacedown",
            InputEvent::SpaceUp => "spaceup",
            InputEvent::Escape => "escape",
        }
    }
}

/// Discriminant of [`InputState`], used by the transition table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputStateKind {
    Ready,
    MousedownOnItem,
    MousedownOnLane,
    DragItem,
    ResizeItem,
    MarqueeSelect,
    SpaceDown,
    Pan,
}

impl fmt::Display for InputStateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputStateKind::Ready => "ready",
            InputStateKind::MousedownOnItem => "mousedown-on-item",
            InputStateKind::MousedownOnLane => "mousedown-on-lane",
            InputStateKind::DragItem => "drag-item",
            InputStateKind::ResizeItem => "resize-item",
            InputStateKind::MarqueeSelect => "marquee-select",
            InputStateKind::SpaceDown => "space-down",
            InputStateKind::Pan => "pan",
        };
        f.write_str(name)
    }
}

/// Pointer pressed on an item; not yet a drag.
#[derive(Clone, Debug, PartialEq)]
pub struct MousedownOnItem {
    pub target: ItemId,
    /// Whether the target was selected before the press
    pub was_selected: bool,
    /// Shift state at press time; decides the release rule
    pub shift: bool,
    pub press: Point,
}

/// Pointer pressed on empty lane space; not yet a marquee.
#[derive(Clone, Debug, PartialEq)]
pub struct MousedownOnLane {
    pub lane: ItemId,
    pub press: Point,
}

/// Pre-drag snapshot of one moving item.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackedItem {
    pub id: ItemId,
    /// Rect in the item's own space before the drag
    pub original: Rect,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DragItem {
    /// Selected items and their descendants, each once
    pub tracked: Vec<TrackedItem>,
    /// Last pointer position applied
    pub last: Point,
}

impl DragItem {
    pub fn tracks(&self, id: &ItemId) -> bool {
        self.tracked.iter().any(|t| &t.id == id)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResizeItem {
    pub target: ItemId,
    pub anchor: Anchor,
    pub start_rect: Rect,
    pub start_pos: Point,
    pub has_resized: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MarqueeSelect {
    /// Fixed at the press position
    pub origin: Point,
    /// Grows from the origin as the pointer moves
    pub vector: Point,
    pub highlighted: BTreeSet<ItemId>,
}

impl MarqueeSelect {
    pub fn rect(&self) -> Rect {
        normalize_marquee(self.origin, self.vector)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Pan {
    /// Lane that receives vertical pan; `None` when pressed outside lanes
    pub lane: Option<ItemId>,
    pub last: Point,
}

/// Current phase of pointer interaction.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum InputState {
    #[default]
    Ready,
    MousedownOnItem(MousedownOnItem),
    MousedownOnLane(MousedownOnLane),
    DragItem(DragItem),
    ResizeItem(ResizeItem),
    MarqueeSelect(MarqueeSelect),
    SpaceDown,
    Pan(Pan),
}

impl InputState {
    pub fn kind(&self) -> InputStateKind {
        match self {
            InputState::Ready => InputStateKind::Ready,
            InputState::MousedownOnItem(_) => InputStateKind::MousedownOnItem,
            InputState::MousedownOnLane(_) => InputStateKind::MousedownOnLane,
            InputState::DragItem(_) => InputStateKind::DragItem,
            InputState::ResizeItem(_) => InputStateKind::ResizeItem,
            InputState::MarqueeSelect(_) => InputStateKind::MarqueeSelect,
            InputState::SpaceDown => InputStateKind::SpaceDown,
            InputState::Pan(_) => InputStateKind::Pan,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// True while a gesture is moving, resizing or panning something
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::DragItem(_) | Self::ResizeItem(_) | Self::Pan(_))
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self, Self::ResizeItem(_))
    }

    pub fn is_dragging_items(&self) -> bool {
        matches!(self, Self::DragItem(_))
    }

    pub fn is_marquee_selecting(&self) -> bool {
        matches!(self, Self::MarqueeSelect(_))
    }

    pub fn is_panning(&self) -> bool {
        matches!(self, Self::Pan(_))
    }

    /// Normalized marquee rectangle, if marquee selecting
    pub fn marquee_rect(&self) -> Option<Rect> {
        match self {
            Self::MarqueeSelect(marquee) => Some(marquee.rect()),
            _ => None,
        }
    }

    /// Item being resized, if any
    pub fn resizing_item(&self) -> Option<&ItemId> {
        match self {
            Self::ResizeItem(resize) => Some(&resize.target),
            _ => None,
        }
    }
}
