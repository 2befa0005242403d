//! Coordinate conversion between the three nested spaces.
//!
//! - client: raw pointer coordinates reported by the host
//! - canvas: client minus the mount origin
//! - lane-local: canvas minus the lane's vertical offset and pan
//!
//! Each pair is an exact inverse.

use crate::types::{Item, Point};

/// Client-space origin of the surface the canvas is mounted into.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MountPoint {
    pub origin: Point,
}

impl MountPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            origin: Point::new(x, y),
        }
    }
}

/// The parts of a lane that define its local space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaneFrame {
    pub y: f32,
    pub pan_offset: Point,
}

impl LaneFrame {
    #[inline]
    pub fn of(lane: &Item) -> Self {
        Self {
            y: lane.rect.y,
            pan_offset: lane.pan_offset(),
        }
    }
}

pub struct CoordinateConverter;

impl CoordinateConverter {
    #[inline]
    pub fn lane_to_canvas(p: Point, frame: &LaneFrame) -> Point {
        Point::new(
            p.x + frame.pan_offset.x,
            p.y + frame.y + frame.pan_offset.y,
        )
    }

    #[inline]
    pub fn canvas_to_lane(p: Point, frame: &LaneFrame) -> Point {
        Point::new(
            p.x - frame.pan_offset.x,
            p.y - frame.y - frame.pan_offset.y,
        )
    }

    #[inline]
    pub fn client_to_canvas(p: Point, mount: &MountPoint) -> Point {
        p.delta_from(mount.origin)
    }

    #[inline]
    pub fn canvas_to_client(p: Point, mount: &MountPoint) -> Point {
        p.offset(mount.origin)
    }
}
