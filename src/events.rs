//! Domain events emitted by the canvas and the typed channel that delivers them.
//!
//! Each emitter owns one `EventChannel` over a closed event enum. Handlers
//! subscribe to a concrete kind; there is no wildcard subscription, so a
//! consumer cannot listen for something the emitter never produces.

use serde::Serialize;
use std::fmt;

use crate::types::{ItemId, ItemKind, Point, Rect};

/// One entry of a `Drop` event: where an item landed.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DroppedItem {
    pub id: ItemId,
    /// `None` when the item stays on the canvas root.
    pub lane_id: Option<ItemId>,
    /// Lane-local position after the drop; canvas space for root items.
    pub position: Point,
}

/// High-level events consumed by the editor/controller layer.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum CanvasEvent {
    Select {
        id: ItemId,
    },
    Deselect {
        ids: Vec<ItemId>,
    },
    /// Double click on empty lane space.
    Add {
        #[serde(rename = "type")]
        kind: ItemKind,
        /// Canvas coordinates of the click.
        position: Point,
        #[serde(rename = "lanePosition")]
        lane_position: Point,
        #[serde(rename = "laneId")]
        lane_id: ItemId,
    },
    /// End of a committed drag.
    Drop {
        items: Vec<DroppedItem>,
    },
    /// End of a committed resize. `rect` is lane-local.
    Resize {
        id: ItemId,
        rect: Rect,
    },
    Delete {
        id: ItemId,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CanvasEventKind {
    Select,
    Deselect,
    Add,
    Drop,
    Resize,
    Delete,
}

impl CanvasEventKind {
    pub const ALL: [CanvasEventKind; 6] = [
        CanvasEventKind::Select,
        CanvasEventKind::Deselect,
        CanvasEventKind::Add,
        CanvasEventKind::Drop,
        CanvasEventKind::Resize,
        CanvasEventKind::Delete,
    ];
}

/// An event type with a closed set of kinds.
pub trait ChannelEvent {
    type Kind: Copy + Eq + fmt::Debug;

    fn kind(&self) -> Self::Kind;
}

impl ChannelEvent for CanvasEvent {
    type Kind = CanvasEventKind;

    fn kind(&self) -> CanvasEventKind {
        match self {
            CanvasEvent::Select { .. } => CanvasEventKind::Select,
            CanvasEvent::Deselect { .. } => CanvasEventKind::Deselect,
            CanvasEvent::Add { .. } => CanvasEventKind::Add,
            CanvasEvent::Drop { .. } => CanvasEventKind::Drop,
            CanvasEvent::Resize { .. } => CanvasEventKind::Resize,
            CanvasEvent::Delete { .. } => CanvasEventKind::Delete,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler<E> = Box<dyn FnMut(&E)>;

/// Single typed event channel owned by an emitter.
pub struct EventChannel<E: ChannelEvent> {
    handlers: Vec<(SubscriptionId, E::Kind, Handler<E>)>,
    next_id: u64,
}

impl<E: ChannelEvent> Default for EventChannel<E> {
    fn default() -> Self {
        Self {
            handlers: Vec::new(),
            next_id: 0,
        }
    }
}

impl<E: ChannelEvent> fmt::Debug for EventChannel<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventChannel")
            .field("subscriptions", &self.handlers.len())
            .finish()
    }
}

impl<E: ChannelEvent> EventChannel<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&mut self, kind: E::Kind, handler: impl FnMut(&E) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, kind, Box::new(handler)));
        id
    }

    /// Returns true if the subscription existed.
    pub fn off(&mut self, subscription: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(id, _, _)| *id != subscription);
        self.handlers.len() != before
    }

    pub fn subscriber_count(&self, kind: E::Kind) -> usize {
        self.handlers.iter().filter(|(_, k, _)| *k == kind).count()
    }

    /// Deliver to every handler subscribed to the event's kind, in
    /// subscription order.
    pub fn emit(&mut self, event: &E) {
        let kind = event.kind();
        for (_, subscribed, handler) in &mut self.handlers {
            if *subscribed == kind {
                handler(event);
            }
        }
    }
}
