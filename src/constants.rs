//! Canvas-wide constants.
//!
//! Centralizes magic numbers and layout values used by the registry, the
//! input state machine and the option defaults.

// ============================================================================
// Lane Layout
// ============================================================================

/// Height of a lane when neither truth nor contents say otherwise
pub const DEFAULT_LANE_HEIGHT: f32 = 500.0;

/// Lower bound used when fitting a lane to its contents
pub const MIN_LANE_HEIGHT: f32 = 100.0;

/// Upper bound used when fitting a lane to its contents
pub const MAX_LANE_HEIGHT: f32 = 2000.0;

/// Margin kept around lane contents by the optimal lane window
pub const LANE_WINDOW_PADDING: f32 = 20.0;

// ============================================================================
// Input Handling
// ============================================================================

/// Minimum width/height an item can be resized down to
pub const MIN_ITEM_SIZE: f32 = 10.0;

/// Half the side of the square hit area centered on each resize handle
pub const RESIZE_HANDLE_SIZE: f32 = 8.0;

/// Default z-order step for move_forwards/move_backwards
pub const DEFAULT_Z_STEP: usize = 1;

// ============================================================================
// Styles
// ============================================================================

/// CSS `contain` value applied when the host styles omit it
pub const DEFAULT_CONTAIN: &str = "layout";
