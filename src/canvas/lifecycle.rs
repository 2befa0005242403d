//! Canvas construction, mounting and item lifecycle.

use tracing::{debug, error, info};

use super::Canvas;
use crate::constants::DEFAULT_Z_STEP;
use crate::error::CanvasResult;
use crate::events::CanvasEvent;
use crate::input::{InputState, MountPoint};
use crate::options::{CanvasOptions, CanvasOptionsPatch};
use crate::types::{Item, ItemDescriptor, ItemId, LaneDescriptor};

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    pub fn new() -> Self {
        Self::from_options(CanvasOptions::default())
    }

    pub fn with_options(mut options: CanvasOptions) -> Self {
        options.ensure_contain();
        Self::from_options(options)
    }

    /// Attach the canvas to a host surface. Pointer input is only routed
    /// while mounted.
    pub fn mount(&mut self, mount: MountPoint) {
        info!(x = mount.origin.x, y = mount.origin.y, "canvas mounted");
        self.mount = Some(mount);
    }

    /// Detach from the host. Any gesture in progress is dropped as is.
    pub fn unmount(&mut self) {
        if self.mount.take().is_some() {
            info!("canvas unmounted");
        }
        self.input_state = InputState::Ready;
    }

    pub fn is_mounted(&self) -> bool {
        self.mount.is_some()
    }

    pub fn mount_point(&self) -> Option<&MountPoint> {
        self.mount.as_ref()
    }

    pub fn set_options(&mut self, patch: CanvasOptionsPatch) {
        self.options.apply(patch);
        debug!(styles = self.options.styles.len(), "options updated");
    }

    // ------------------------------------------------------------------------
    // Items
    // ------------------------------------------------------------------------

    /// Register a lane below the existing ones.
    pub fn add_lane(&mut self, descriptor: &LaneDescriptor) -> CanvasResult<()> {
        let height = descriptor
            .height
            .unwrap_or(self.options.lanes.default_height);
        let y = self.lanes_bottom();
        self.registry
            .add_lane(Item::new_lane(descriptor, y, height))
            .inspect_err(|e| error!(lane = %descriptor.id, "add_lane failed: {e}"))?;
        self.invalidate_spatial_index();
        Ok(())
    }

    /// Register an item and attach it to its container.
    pub fn add_item(&mut self, descriptor: &ItemDescriptor) -> CanvasResult<()> {
        self.registry
            .add_item(descriptor)
            .inspect_err(|e| error!(item = %descriptor.id, "add_item failed: {e}"))?;
        self.invalidate_spatial_index();
        Ok(())
    }

    /// Deselect, detach and unregister an item, emitting `delete`.
    ///
    /// Containers take their descendants with them, deepest first, and each
    /// removed item gets its own `delete` event.
    pub fn delete_item(&mut self, id: &ItemId) -> CanvasResult<()> {
        let was_lane = self
            .registry
            .item(id)
            .inspect_err(|e| error!("delete_item failed: {e}"))?
            .is_lane();
        let mut doomed = vec![id.clone()];
        doomed.extend(
            self.registry
                .get_descendants_of(id)
                .inspect_err(|e| error!(item = %id, "delete_item failed: {e}"))?
                .map(|item| item.id.clone()),
        );

        for item_id in doomed.iter().rev() {
            if self.selection.remove(item_id) {
                if let Some(item) = self.registry.get_mut(item_id) {
                    item.selected = false;
                }
                self.emit(CanvasEvent::Deselect {
                    ids: vec![item_id.clone()],
                });
            }
            self.registry.remove(item_id)?;
            self.emit(CanvasEvent::Delete {
                id: item_id.clone(),
            });
        }

        if doomed.len() > 1 {
            debug!(item = %id, cascaded = doomed.len() - 1, "deleted container");
        }
        if was_lane {
            self.restack_lanes();
        }
        self.invalidate_spatial_index();
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Z-order
// ----------------------------------------------------------------------------

impl Canvas {
    /// Raise an item `steps` places among its siblings (default one).
    pub fn move_forwards(&mut self, id: &ItemId, steps: Option<usize>) -> CanvasResult<()> {
        self.registry
            .move_forwards(id, steps.unwrap_or(DEFAULT_Z_STEP))
    }

    /// Lower an item `steps` places among its siblings (default one).
    pub fn move_backwards(&mut self, id: &ItemId, steps: Option<usize>) -> CanvasResult<()> {
        self.registry
            .move_backwards(id, steps.unwrap_or(DEFAULT_Z_STEP))
    }

    pub fn move_to_the_front(&mut self, id: &ItemId) -> CanvasResult<()> {
        self.registry.move_to_the_front(id)
    }

    pub fn move_to_the_back(&mut self, id: &ItemId) -> CanvasResult<()> {
        self.registry.move_to_the_back(id)
    }
}
