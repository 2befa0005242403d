//! Headless swimlane canvas: items in lanes and blocks, driven by a pointer
//! state machine and kept in sync with an external truth snapshot.
//!
//! ## Modules
//!
//! - `types` - geometry, items and truth descriptors
//! - `registry` - id map, containment tree and z-order
//! - `selection` - selected id set
//! - `spatial_index` - R-tree for hit testing and marquee containment
//! - `input` - gesture state machine and pointer routing
//! - `canvas` - the facade tying everything together
//! - `events` - domain events and their channel
//! - `options` - configuration with defaults
//! - `logging` / `perf` - tracing setup and profiling helpers

pub mod canvas;
pub mod constants;
pub mod error;
pub mod events;
pub mod input;
pub mod logging;
pub mod options;
pub mod perf;
pub mod registry;
pub mod selection;
pub mod spatial_index;
pub mod types;

pub use canvas::{Canvas, LaneWindow, SyncReport};
pub use error::{CanvasError, CanvasResult};
pub use events::{CanvasEvent, CanvasEventKind, DroppedItem, SubscriptionId};
pub use input::{InputEvent, InputState, InputStateKind, Key, Modifiers, MountPoint, Pointer};
pub use options::{CanvasOptions, CanvasOptionsPatch, LaneOptions};
pub use types::{
    Anchor, ContainerRef, Item, ItemDescriptor, ItemId, ItemKind, ItemVariant, LaneDescriptor,
    Point, Rect, Truth,
};
