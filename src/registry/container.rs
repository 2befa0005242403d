//! Container capability - ordered child lists shared by root, lanes and blocks.
//!
//! Every operation updates the child list and the child's container pointer
//! together, so `child.container == C` holds exactly when `C`'s list contains
//! the child. List position doubles as stacking order: the last entry paints
//! on top.

use std::collections::HashSet;

use super::ItemRegistry;
use crate::error::{CanvasError, CanvasResult};
use crate::types::{ContainerRef, ItemId, ItemKind};

/// Where an attached child lands in its new container's list.
#[derive(Debug, Clone)]
enum Placement {
    Front,
    Back,
    Before(ItemId),
}

impl ItemRegistry {
    /// Ordered child ids of a container.
    pub fn children(&self, container: &ContainerRef) -> CanvasResult<&[ItemId]> {
        match container {
            ContainerRef::Root => Ok(&self.root),
            ContainerRef::Lane(id) | ContainerRef::Block(id) => {
                let item = self.item(id)?;
                if Some(item.kind()) != expected_kind(container) {
                    return Err(CanvasError::NotAContainer(id.clone()));
                }
                item.child_ids()
                    .ok_or_else(|| CanvasError::NotAContainer(id.clone()))
            }
        }
    }

    fn children_mut(&mut self, container: &ContainerRef) -> CanvasResult<&mut Vec<ItemId>> {
        match container {
            ContainerRef::Root => Ok(&mut self.root),
            ContainerRef::Lane(id) | ContainerRef::Block(id) => {
                let expected = expected_kind(container);
                let item = self
                    .items
                    .get_mut(id)
                    .ok_or_else(|| CanvasError::ItemNotFound(id.clone()))?;
                if Some(item.kind()) != expected {
                    return Err(CanvasError::NotAContainer(id.clone()));
                }
                item.child_ids_mut()
                    .ok_or_else(|| CanvasError::NotAContainer(id.clone()))
            }
        }
    }

    pub fn insert_child_before(
        &mut self,
        container: &ContainerRef,
        id: &ItemId,
        before_id: &ItemId,
    ) -> CanvasResult<()> {
        self.attach(container, id, Placement::Before(before_id.clone()))
    }

    pub fn append_child(&mut self, container: &ContainerRef, id: &ItemId) -> CanvasResult<()> {
        self.attach(container, id, Placement::Back)
    }

    pub fn prepend_child(&mut self, container: &ContainerRef, id: &ItemId) -> CanvasResult<()> {
        self.attach(container, id, Placement::Front)
    }

    /// Remove `id` from `container`'s list. The item stays registered, keeps
    /// its lane and is left detached.
    pub fn extract_child(&mut self, container: &ContainerRef, id: &ItemId) -> CanvasResult<()> {
        let list = self.children_mut(container)?;
        let index = list
            .iter()
            .position(|child| child == id)
            .ok_or_else(|| CanvasError::NotAMember {
                container: container.clone(),
                id: id.clone(),
            })?;
        list.remove(index);
        if let Some(item) = self.items.get_mut(id) {
            item.container = None;
        }
        Ok(())
    }

    pub fn get_next_child(
        &self,
        container: &ContainerRef,
        id: &ItemId,
    ) -> CanvasResult<Option<&ItemId>> {
        let list = self.children(container)?;
        let index = member_index(list, container, id)?;
        Ok(list.get(index + 1))
    }

    pub fn get_previous_child(
        &self,
        container: &ContainerRef,
        id: &ItemId,
    ) -> CanvasResult<Option<&ItemId>> {
        let list = self.children(container)?;
        let index = member_index(list, container, id)?;
        Ok(index.checked_sub(1).and_then(|i| list.get(i)))
    }

    /// Reorder a container's children so ids listed in `order` come first, in
    /// that order. Members not in `order` keep their relative order after them.
    /// Ids that are not members, and repeats, are skipped.
    pub fn reorder_children(&mut self, container: &ContainerRef, order: &[ItemId]) -> CanvasResult<()> {
        let list = self.children_mut(container)?;
        let mut placed: HashSet<&ItemId> = HashSet::with_capacity(list.len());
        let mut sorted: Vec<ItemId> = Vec::with_capacity(list.len());
        for id in order.iter().chain(list.iter()) {
            if list.contains(id) && placed.insert(id) {
                sorted.push(id.clone());
            }
        }
        *list = sorted;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Z-order
    // ------------------------------------------------------------------------

    /// Move `steps` places towards the top of the stack, stopping at the end.
    pub fn move_forwards(&mut self, id: &ItemId, steps: usize) -> CanvasResult<()> {
        self.restack(id, |index, len| (index + steps).min(len - 1))
    }

    /// Move `steps` places towards the bottom of the stack, stopping at zero.
    pub fn move_backwards(&mut self, id: &ItemId, steps: usize) -> CanvasResult<()> {
        self.restack(id, |index, _| index.saturating_sub(steps))
    }

    pub fn move_to_the_front(&mut self, id: &ItemId) -> CanvasResult<()> {
        self.restack(id, |_, len| len - 1)
    }

    pub fn move_to_the_back(&mut self, id: &ItemId) -> CanvasResult<()> {
        self.restack(id, |_, _| 0)
    }

    fn restack(
        &mut self,
        id: &ItemId,
        target: impl FnOnce(usize, usize) -> usize,
    ) -> CanvasResult<()> {
        let item = self.item(id)?;
        // Lanes keep their vertical order; detached items have no stack.
        if item.is_lane() {
            return Ok(());
        }
        let Some(container) = item.container.clone() else {
            return Ok(());
        };
        let list = self.children_mut(&container)?;
        let Some(index) = list.iter().position(|child| child == id) else {
            return Ok(());
        };
        let new_index = target(index, list.len());
        if new_index != index {
            let moved = list.remove(index);
            list.insert(new_index, moved);
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn attach(&mut self, container: &ContainerRef, id: &ItemId, placement: Placement) -> CanvasResult<()> {
        self.check_placement(container, id)?;

        // Validate everything before mutating so a failure leaves no trace.
        let siblings = self.children(container)?;
        if let Placement::Before(before_id) = &placement {
            if before_id == id {
                return Ok(());
            }
            member_index(siblings, container, before_id)?;
        }
        let lane = self.lane_of_container(container)?;

        if let Some(current) = self.item(id)?.container.clone() {
            self.extract_child(&current, id)?;
        }

        let list = self.children_mut(container)?;
        let index = match &placement {
            Placement::Front => 0,
            Placement::Back => list.len(),
            Placement::Before(before_id) => list
                .iter()
                .position(|child| child == before_id)
                .unwrap_or(list.len()),
        };
        list.insert(index, id.clone());

        let item = self.item_mut(id)?;
        item.container = Some(container.clone());
        if !item.is_lane() {
            self.set_lane_recursive(id, lane)?;
        }
        Ok(())
    }

    fn check_placement(&self, container: &ContainerRef, id: &ItemId) -> CanvasResult<()> {
        let item = self.item(id)?;
        if item.is_lane() && *container != ContainerRef::Root {
            return Err(CanvasError::InvalidPlacement {
                container: container.clone(),
                id: id.clone(),
            });
        }
        if let Some(container_id) = container.item_id() {
            let would_cycle = container_id == id
                || self
                    .get_ancestors_of(container_id)?
                    .any(|ancestor| &ancestor.id == id);
            if would_cycle {
                return Err(CanvasError::Cycle {
                    container: container.clone(),
                    id: id.clone(),
                });
            }
        }
        Ok(())
    }

    fn lane_of_container(&self, container: &ContainerRef) -> CanvasResult<Option<ItemId>> {
        match container {
            ContainerRef::Root => Ok(None),
            ContainerRef::Lane(id) => Ok(Some(id.clone())),
            ContainerRef::Block(id) => Ok(self.item(id)?.lane_id.clone()),
        }
    }

    /// Assign `lane` to an item and all of its descendants.
    pub(crate) fn set_lane_recursive(&mut self, id: &ItemId, lane: Option<ItemId>) -> CanvasResult<()> {
        let mut ids = vec![id.clone()];
        ids.extend(self.get_descendants_of(id)?.map(|item| item.id.clone()));
        for item_id in ids {
            if let Some(item) = self.items.get_mut(&item_id) {
                item.lane_id = lane.clone();
            }
        }
        Ok(())
    }
}

fn expected_kind(container: &ContainerRef) -> Option<ItemKind> {
    match container {
        ContainerRef::Root => None,
        ContainerRef::Lane(_) => Some(ItemKind::Lane),
        ContainerRef::Block(_) => Some(ItemKind::Block),
    }
}

fn member_index(list: &[ItemId], container: &ContainerRef, id: &ItemId) -> CanvasResult<usize> {
    list.iter()
        .position(|child| child == id)
        .ok_or_else(|| CanvasError::NotAMember {
            container: container.clone(),
            id: id.clone(),
        })
}
