//! Item registry - the id→item map and the containment tree.
//!
//! The registry is the only place item lifecycle and parent/child bookkeeping
//! change. It is organized into submodules:
//! - `container` - ordered child-list operations and z-order
//! - `traversal` - lazy children/descendants/ancestors iterators
//!
//! ## Containment
//!
//! Every attached item records the container it lives in, and that
//! container's child list holds the item's id exactly once. The canvas root
//! holds lanes (in vertical order) plus any item without a lane; lanes hold
//! their top-level items; blocks hold nested items. List position is the
//! stacking order.

mod container;
mod traversal;

pub use traversal::{Ancestors, Descendants};

use std::collections::HashMap;
use tracing::trace;

use crate::error::{CanvasError, CanvasResult};
use crate::types::{ContainerRef, Item, ItemDescriptor, ItemId, ItemKind};

#[derive(Debug, Default)]
pub struct ItemRegistry {
    items: HashMap<ItemId, Item>,
    root: Vec<ItemId>,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.items.contains_key(id)
    }

    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &ItemId) -> Option<&mut Item> {
        self.items.get_mut(id)
    }

    /// Look up an item, failing if it is not registered.
    pub fn item(&self, id: &ItemId) -> CanvasResult<&Item> {
        self.items
            .get(id)
            .ok_or_else(|| CanvasError::ItemNotFound(id.clone()))
    }

    pub(crate) fn item_mut(&mut self, id: &ItemId) -> CanvasResult<&mut Item> {
        self.items
            .get_mut(id)
            .ok_or_else(|| CanvasError::ItemNotFound(id.clone()))
    }

    pub fn ids(&self) -> impl Iterator<Item = &ItemId> {
        self.items.keys()
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Lanes in vertical (root) order.
    pub fn lanes(&self) -> impl Iterator<Item = &Item> {
        self.root
            .iter()
            .filter_map(|id| self.items.get(id))
            .filter(|item| item.is_lane())
    }

    pub fn lane(&self, id: &ItemId) -> CanvasResult<&Item> {
        match self.items.get(id) {
            Some(item) if item.is_lane() => Ok(item),
            _ => Err(CanvasError::LaneNotFound(id.clone())),
        }
    }

    pub(crate) fn lane_mut(&mut self, id: &ItemId) -> CanvasResult<&mut Item> {
        match self.items.get_mut(id) {
            Some(item) if item.is_lane() => Ok(item),
            _ => Err(CanvasError::LaneNotFound(id.clone())),
        }
    }

    /// Register a lane and append it to the root's lane stack.
    pub fn add_lane(&mut self, lane: Item) -> CanvasResult<()> {
        if self.items.contains_key(&lane.id) {
            return Err(CanvasError::DuplicateId(lane.id));
        }
        let id = lane.id.clone();
        self.items.insert(id.clone(), lane);
        self.append_child(&ContainerRef::Root, &id)?;
        trace!(lane = %id, "registered lane");
        Ok(())
    }

    /// Build the item variant for `descriptor`, register it and attach it to
    /// its owning container.
    ///
    /// The container is the parent block if `parent_id` is set, else the lane
    /// named by `lane_id`, else the canvas root. Containers must be added
    /// before their children.
    pub fn add_item(&mut self, descriptor: &ItemDescriptor) -> CanvasResult<()> {
        if self.items.contains_key(&descriptor.id) {
            return Err(CanvasError::DuplicateId(descriptor.id.clone()));
        }
        let container = self.resolve_container(descriptor)?;
        let item = Item::from_descriptor(descriptor);
        let id = item.id.clone();
        self.items.insert(id.clone(), item);

        if let Err(err) = self.append_child(&container, &id) {
            self.items.remove(&id);
            return Err(err);
        }
        trace!(item = %id, %container, "registered item");
        Ok(())
    }

    /// Container a descriptor asks to live in.
    pub fn resolve_container(&self, descriptor: &ItemDescriptor) -> CanvasResult<ContainerRef> {
        if descriptor.kind == ItemKind::Lane {
            return Err(CanvasError::LaneAsElement(descriptor.id.clone()));
        }
        if let Some(parent_id) = &descriptor.parent_id {
            let parent = self
                .items
                .get(parent_id)
                .ok_or_else(|| CanvasError::ParentNotFound {
                    id: descriptor.id.clone(),
                    parent_id: parent_id.clone(),
                })?;
            return match parent.kind() {
                ItemKind::Block => Ok(ContainerRef::Block(parent_id.clone())),
                ItemKind::Lane => Ok(ContainerRef::Lane(parent_id.clone())),
                ItemKind::Snippet => Err(CanvasError::NotAContainer(parent_id.clone())),
            };
        }
        if let Some(lane_id) = &descriptor.lane_id {
            self.lane(lane_id)?;
            return Ok(ContainerRef::Lane(lane_id.clone()));
        }
        Ok(ContainerRef::Root)
    }

    /// Detach an item from its container and unregister it.
    ///
    /// Does not cascade: remaining children are left registered but detached
    /// (no container). Callers that want a cascade remove descendants first.
    pub fn remove(&mut self, id: &ItemId) -> CanvasResult<Item> {
        let container = self.item(id)?.container.clone();
        if let Some(container) = container {
            self.extract_child(&container, id)?;
        }
        let mut item = self
            .items
            .remove(id)
            .ok_or_else(|| CanvasError::ItemNotFound(id.clone()))?;

        if let Some(children) = item.child_ids_mut() {
            for child_id in children.drain(..) {
                if let Some(child) = self.items.get_mut(&child_id) {
                    child.container = None;
                }
            }
        }
        trace!(item = %id, "unregistered item");
        Ok(item)
    }
}
