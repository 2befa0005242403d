//! Pointer and keyboard input handling for the canvas.
//!
//! ## Architecture
//!
//! The input system is an explicit state machine. `transition` is a pure
//! table from (state, event) to a step; `Canvas::send` runs the side effects
//! that go with each step.
//!
//! ## Modules
//!
//! - `state` - input events, state structs and query helpers
//! - `transition` - the transition table
//! - `mouse_down` - state entry (selection on press, gesture start)
//! - `drag` - self-transitions (drag, resize, marquee, pan)
//! - `mouse_up` - state exit (commit on mouse up, abort on escape)
//! - `router` - hit testing raw pointer input into classified events
//! - `transform` - lane-local conversion and panning
//! - `coords` - pure coordinate conversion

pub mod coords;
mod drag;
mod mouse_down;
mod mouse_up;
mod router;
mod state;
mod transform;
mod transition;

pub use coords::{CoordinateConverter, LaneFrame, MountPoint};
pub use router::{HitTarget, Key};
pub use state::{
    DragItem, InputEvent, InputState, InputStateKind, MarqueeSelect, Modifiers, MousedownOnItem,
    MousedownOnLane, Pan, Pointer, ResizeItem, TrackedItem,
};
pub use transition::{Step, transition};
