//! Error types for canvas operations
//!
//! Structural errors signal that the live registry and the truth source have
//! diverged. They are returned to the caller and never swallowed.

use thiserror::Error;

use crate::types::{ContainerRef, ItemId};

/// Errors raised by the registry, the selection and the canvas facade
#[derive(Error, Debug)]
pub enum CanvasError {
    /// Operation named an id that is not registered
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),

    /// Id does not resolve to a registered lane
    #[error("lane not found: {0}")]
    LaneNotFound(ItemId),

    /// Descriptor references a parent that has not been added yet
    #[error("parent {parent_id} of item {id} not found")]
    ParentNotFound { id: ItemId, parent_id: ItemId },

    /// An item with this id is already registered
    #[error("duplicate item id: {0}")]
    DuplicateId(ItemId),

    /// Container operation targeted an item that cannot hold children
    #[error("item {0} is not a container")]
    NotAContainer(ItemId),

    /// Child is not currently a member of the container
    #[error("item {id} is not a child of {container}")]
    NotAMember { container: ContainerRef, id: ItemId },

    /// Insertion would make a container its own ancestor
    #[error("inserting {id} into {container} would create a cycle")]
    Cycle { container: ContainerRef, id: ItemId },

    /// Item kind is not allowed in the target container
    #[error("item {id} cannot be placed in {container}")]
    InvalidPlacement { container: ContainerRef, id: ItemId },

    /// Element descriptor has kind lane; lanes only come from the lane list
    #[error("element {0} is a lane; lanes must be declared in the truth lane list")]
    LaneAsElement(ItemId),

    /// Lane window bounds are inverted or not numbers
    #[error("invalid lane window bounds: min {min_height}, max {max_height}")]
    InvalidLaneWindow { min_height: f32, max_height: f32 },

    /// `update` called before any truth was set
    #[error("no truth set")]
    NoTruth,

    /// Malformed truth or options JSON
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error while loading options
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for canvas operations
pub type CanvasResult<T> = Result<T, CanvasError>;
