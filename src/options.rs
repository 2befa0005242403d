//! Canvas options - styles, lane sizing and gesture tolerances.
//!
//! Every field has a default, so a partial JSON document (or none at all)
//! yields a usable configuration. Runtime changes go through
//! [`CanvasOptionsPatch`], which only touches the fields it names.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use crate::constants::{
    DEFAULT_CONTAIN, DEFAULT_LANE_HEIGHT, LANE_WINDOW_PADDING, MAX_LANE_HEIGHT, MIN_ITEM_SIZE,
    MIN_LANE_HEIGHT, RESIZE_HANDLE_SIZE,
};
use crate::error::CanvasResult;

/// Host styles applied to the canvas surface when none are configured.
pub static DEFAULT_STYLES: Lazy<BTreeMap<String, String>> = Lazy::new(|| {
    BTreeMap::from([
        ("contain".to_string(), DEFAULT_CONTAIN.to_string()),
        ("position".to_string(), "relative".to_string()),
        ("overflow".to_string(), "hidden".to_string()),
    ])
});

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LaneOptions {
    pub default_height: f32,
    pub min_height: f32,
    pub max_height: f32,
    /// Margin kept around lane contents when fitting the lane window
    pub window_padding: f32,
}

impl Default for LaneOptions {
    fn default() -> Self {
        Self {
            default_height: DEFAULT_LANE_HEIGHT,
            min_height: MIN_LANE_HEIGHT,
            max_height: MAX_LANE_HEIGHT,
            window_padding: LANE_WINDOW_PADDING,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasOptions {
    pub styles: BTreeMap<String, String>,
    pub lanes: LaneOptions,
    pub min_item_size: f32,
    pub resize_handle_size: f32,
}

impl Default for CanvasOptions {
    fn default() -> Self {
        Self {
            styles: DEFAULT_STYLES.clone(),
            lanes: LaneOptions::default(),
            min_item_size: MIN_ITEM_SIZE,
            resize_handle_size: RESIZE_HANDLE_SIZE,
        }
    }
}

impl CanvasOptions {
    pub fn from_json_str(json: &str) -> CanvasResult<Self> {
        let mut options: Self = serde_json::from_str(json)?;
        options.ensure_contain();
        Ok(options)
    }

    pub fn load(path: impl AsRef<Path>) -> CanvasResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "loading canvas options");
        Self::from_json_str(&json)
    }

    /// Merge a partial update. Styles are replaced wholesale.
    pub fn apply(&mut self, patch: CanvasOptionsPatch) {
        if let Some(styles) = patch.styles {
            self.styles = styles;
        }
        if let Some(lanes) = patch.lanes {
            self.lanes = lanes;
        }
        if let Some(min_item_size) = patch.min_item_size {
            self.min_item_size = min_item_size;
        }
        if let Some(resize_handle_size) = patch.resize_handle_size {
            self.resize_handle_size = resize_handle_size;
        }
        self.ensure_contain();
    }

    /// The surface relies on layout containment; keep it unless the host
    /// chose its own value.
    pub(crate) fn ensure_contain(&mut self) {
        self.styles
            .entry("contain".to_string())
            .or_insert_with(|| DEFAULT_CONTAIN.to_string());
    }
}

/// Partial options update for `Canvas::set_options`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasOptionsPatch {
    pub styles: Option<BTreeMap<String, String>>,
    pub lanes: Option<LaneOptions>,
    pub min_item_size: Option<f32>,
    pub resize_handle_size: Option<f32>,
}

impl CanvasOptionsPatch {
    pub fn styles<K, V>(styles: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            styles: Some(
                styles
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
            ..Self::default()
        }
    }
}
