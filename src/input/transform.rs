//! Canvas transformations - lane-local conversion and lane panning.

use super::coords::{CoordinateConverter, LaneFrame};
use crate::canvas::Canvas;
use crate::error::CanvasResult;
use crate::types::{ItemId, Point};

impl Canvas {
    pub fn lane_to_canvas(&self, lane_id: &ItemId, p: Point) -> CanvasResult<Point> {
        let lane = self.registry.lane(lane_id)?;
        Ok(CoordinateConverter::lane_to_canvas(p, &LaneFrame::of(lane)))
    }

    pub fn canvas_to_lane(&self, lane_id: &ItemId, p: Point) -> CanvasResult<Point> {
        let lane = self.registry.lane(lane_id)?;
        Ok(CoordinateConverter::canvas_to_lane(p, &LaneFrame::of(lane)))
    }

    /// Client to canvas space. An unmounted canvas has its origin at zero.
    pub fn client_to_canvas(&self, p: Point) -> Point {
        match &self.mount {
            Some(mount) => CoordinateConverter::client_to_canvas(p, mount),
            None => p,
        }
    }

    pub fn canvas_to_client(&self, p: Point) -> Point {
        match &self.mount {
            Some(mount) => CoordinateConverter::canvas_to_client(p, mount),
            None => p,
        }
    }

    /// Shift every lane horizontally by `delta.x`, and `lane` (if any)
    /// vertically by `delta.y`.
    pub fn pan_lanes(&mut self, delta: Point, lane: Option<&ItemId>) -> CanvasResult<()> {
        let lane_ids = self.lane_ids();
        for id in &lane_ids {
            let item = self.registry.lane_mut(id)?;
            let pan = item.pan_offset();
            let dy = if Some(id) == lane { delta.y } else { 0.0 };
            item.set_pan_offset(Point::new(pan.x + delta.x, pan.y + dy));
        }
        self.invalidate_spatial_index();
        Ok(())
    }

    /// Set one lane's pan offset directly.
    pub fn set_lane_pan(&mut self, lane_id: &ItemId, offset: Point) -> CanvasResult<()> {
        self.registry.lane_mut(lane_id)?.set_pan_offset(offset);
        self.invalidate_spatial_index();
        Ok(())
    }
}
