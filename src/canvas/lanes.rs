//! Lane layout - vertical stacking, lookup by position and window fitting.

use tracing::debug;

use super::Canvas;
use crate::error::{CanvasError, CanvasResult};
use crate::types::{ContainerRef, Item, ItemId, Point, Rect};

/// Height and vertical pan that fit a lane's contents.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaneWindow {
    pub height: f32,
    pub pan_offset_y: f32,
}

impl Canvas {
    /// Lane whose band contains the canvas-space point.
    pub fn get_lane_at(&self, p: Point) -> Option<&Item> {
        self.registry
            .lanes()
            .find(|lane| p.y >= lane.rect.y && p.y < lane.rect.bottom())
    }

    /// Canvas y where the next lane starts.
    pub(crate) fn lanes_bottom(&self) -> f32 {
        self.registry.lanes().map(|lane| lane.rect.height).sum()
    }

    /// Re-derive each lane's `y` from the heights of the lanes above it.
    pub fn restack_lanes(&mut self) {
        let lane_ids: Vec<ItemId> = self.registry.lanes().map(|l| l.id.clone()).collect();
        let mut y = 0.0;
        for id in lane_ids {
            if let Some(lane) = self.registry.get_mut(&id) {
                lane.rect.y = y;
                y += lane.rect.height;
            }
        }
        self.invalidate_spatial_index();
    }

    /// Bounding box of everything inside a lane, in lane-local space.
    pub fn lane_contents_bounds(&self, lane_id: &ItemId) -> CanvasResult<Option<Rect>> {
        self.registry.lane(lane_id)?;
        Ok(self
            .registry
            .get_descendants_of(lane_id)?
            .map(|item| item.rect)
            .reduce(|acc, rect| acc.union(&rect)))
    }

    /// Height and vertical pan that show all of a lane's items with the
    /// configured padding, clamped to `[min_height, max_height]`. An empty
    /// lane gets the default height and no pan. Inverted or NaN bounds are
    /// an error.
    pub fn calculate_optimal_lane_window(
        &self,
        lane_id: &ItemId,
        min_height: f32,
        max_height: f32,
    ) -> CanvasResult<LaneWindow> {
        if min_height.is_nan() || max_height.is_nan() || min_height > max_height {
            return Err(CanvasError::InvalidLaneWindow {
                min_height,
                max_height,
            });
        }
        let padding = self.options.lanes.window_padding;
        let Some(bounds) = self.lane_contents_bounds(lane_id)? else {
            return Ok(LaneWindow {
                height: self.options.lanes.default_height,
                pan_offset_y: 0.0,
            });
        };

        Ok(LaneWindow {
            height: (bounds.height + 2.0 * padding).clamp(min_height, max_height),
            pan_offset_y: padding - bounds.y,
        })
    }

    /// Apply the optimal window to a lane and push the lanes below it.
    pub fn fit_lane_to_contents(&mut self, lane_id: &ItemId) -> CanvasResult<LaneWindow> {
        let window = self.calculate_optimal_lane_window(
            lane_id,
            self.options.lanes.min_height,
            self.options.lanes.max_height,
        )?;

        let lane = self.registry.lane_mut(lane_id)?;
        lane.rect.height = window.height;
        let pan = lane.pan_offset();
        lane.set_pan_offset(Point::new(pan.x, window.pan_offset_y));
        debug!(lane = %lane_id, height = window.height, pan_y = window.pan_offset_y, "fitted lane");

        self.restack_lanes();
        Ok(window)
    }

    /// Ids of the lanes in vertical order.
    pub fn lane_ids(&self) -> Vec<ItemId> {
        self.registry.lanes().map(|lane| lane.id.clone()).collect()
    }

    /// Top-level items of a lane, bottom of the stack first.
    pub fn lane_children(&self, lane_id: &ItemId) -> CanvasResult<&[ItemId]> {
        self.registry.children(&ContainerRef::Lane(lane_id.clone()))
    }
}
