//! Reconciling the registry against the externally owned truth snapshot.
//!
//! `update` runs in four passes: add new lanes, add new items (containers
//! before their children), delete anything truth no longer names, then
//! refresh the survivors in place. A truth that lists a lane among its
//! elements is rejected before anything changes. Structural errors abort the
//! pass and are returned to the caller.

use tracing::{debug, error, info};

use super::Canvas;
use crate::error::{CanvasError, CanvasResult};
use crate::profile_scope;
use crate::types::{ContainerRef, ItemDescriptor, ItemId, ItemKind, Truth};

/// Counts from one reconciliation pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub added: usize,
    pub deleted: usize,
    pub refreshed: usize,
}

impl Canvas {
    /// Replace the truth snapshot. Call `update` to apply it.
    pub fn set_truth(&mut self, truth: Truth) {
        debug!(
            elements = truth.elements.len(),
            lanes = truth.lanes.len(),
            "truth set"
        );
        self.truth = Some(truth);
    }

    /// Bring the registry in line with the last truth set.
    pub fn update(&mut self) -> CanvasResult<SyncReport> {
        profile_scope!("canvas_update");

        let truth = self.truth.take().ok_or(CanvasError::NoTruth)?;
        let result = self.reconcile(&truth);
        self.truth = Some(truth);
        self.invalidate_spatial_index();

        match &result {
            Ok(report) => info!(
                added = report.added,
                deleted = report.deleted,
                refreshed = report.refreshed,
                "canvas updated"
            ),
            Err(e) => error!("canvas update failed: {e}"),
        }
        result
    }

    fn reconcile(&mut self, truth: &Truth) -> CanvasResult<SyncReport> {
        if let Some(lane) = truth.elements.values().find(|d| d.kind == ItemKind::Lane) {
            return Err(CanvasError::LaneAsElement(lane.id.clone()));
        }

        let mut report = SyncReport::default();

        report.added += self.sync_lanes(truth)?;
        report.added += self.add_missing_items(truth)?;
        report.deleted += self.delete_orphans(truth)?;
        report.refreshed += self.refresh_items(truth)?;

        Ok(report)
    }

    fn sync_lanes(&mut self, truth: &Truth) -> CanvasResult<usize> {
        let mut added = 0;
        for descriptor in &truth.lanes {
            match self.registry.get_mut(&descriptor.id) {
                Some(lane) => {
                    if let Some(name) = &descriptor.name {
                        lane.name = name.clone();
                    }
                    if let Some(color) = &descriptor.color {
                        lane.color = color.clone();
                    }
                    if let Some(height) = descriptor.height {
                        lane.rect.height = height;
                    }
                }
                None => {
                    self.add_lane(descriptor)?;
                    added += 1;
                }
            }
        }

        let order: Vec<ItemId> = truth.lanes.iter().map(|lane| lane.id.clone()).collect();
        self.registry.reorder_children(&ContainerRef::Root, &order)?;
        self.restack_lanes();
        Ok(added)
    }

    fn add_missing_items(&mut self, truth: &Truth) -> CanvasResult<usize> {
        let mut missing: Vec<&ItemDescriptor> = truth
            .elements
            .values()
            .filter(|descriptor| !self.registry.contains(&descriptor.id))
            .collect();
        missing.sort_by_key(|descriptor| truth_depth(truth, &descriptor.id));

        for descriptor in &missing {
            self.add_item(descriptor)?;
        }
        Ok(missing.len())
    }

    fn delete_orphans(&mut self, truth: &Truth) -> CanvasResult<usize> {
        let mut orphans: Vec<ItemId> = self
            .registry
            .items()
            .filter(|item| {
                if item.is_lane() {
                    !truth.contains_lane(&item.id)
                } else {
                    !truth.elements.contains_key(&item.id)
                }
            })
            .map(|item| item.id.clone())
            .collect();
        orphans.sort();

        let mut deleted = 0;
        for id in orphans {
            // An earlier cascade may already have taken it.
            if self.registry.contains(&id) {
                let before = self.registry.len();
                self.delete_item(&id)?;
                deleted += before - self.registry.len();
            }
        }
        Ok(deleted)
    }

    fn refresh_items(&mut self, truth: &Truth) -> CanvasResult<usize> {
        let mut ordered: Vec<&ItemDescriptor> = truth.elements.values().collect();
        ordered.sort_by_key(|descriptor| truth_depth(truth, &descriptor.id));

        for descriptor in &ordered {
            let wanted = self.registry.resolve_container(descriptor)?;
            let item = self.registry.item_mut(&descriptor.id)?;
            item.refresh(descriptor);
            if item.container() != Some(&wanted) {
                debug!(item = %descriptor.id, container = %wanted, "re-homing item");
                self.registry.append_child(&wanted, &descriptor.id)?;
            }
        }

        for descriptor in &ordered {
            if let Some(child_ids) = &descriptor.child_ids {
                let container = ContainerRef::Block(descriptor.id.clone());
                if self.registry.children(&container).is_ok() {
                    self.registry.reorder_children(&container, child_ids)?;
                }
            }
        }
        Ok(ordered.len())
    }
}

/// Number of truth ancestors above an element. Cycles stop the walk.
fn truth_depth(truth: &Truth, id: &ItemId) -> usize {
    let limit = truth.elements.len();
    let mut depth = 0;
    let mut current = truth.elements.get(id).and_then(|d| d.parent_id.as_ref());
    while let Some(parent_id) = current {
        depth += 1;
        if depth > limit {
            break;
        }
        current = truth
            .elements
            .get(parent_id)
            .and_then(|d| d.parent_id.as_ref());
    }
    depth
}
