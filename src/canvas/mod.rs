//! Canvas facade - owns the registry, selection, input state and events.
//!
//! Methods are split across submodules by concern:
//! - `lifecycle` - construction, mounting, options, item deletion
//! - `truth_sync` - reconciling the registry against the truth snapshot
//! - `selection_handlers` - select/deselect with event emission
//! - `lanes` - lane lookup, stacking and window fitting
//!
//! Gesture side effects live in `crate::input` as further `impl Canvas`
//! blocks, next to the state machine they serve.

mod lanes;
mod lifecycle;
mod selection_handlers;
mod truth_sync;

pub use lanes::LaneWindow;
pub use truth_sync::SyncReport;

use tracing::{debug, trace};

use crate::events::{CanvasEvent, CanvasEventKind, EventChannel, SubscriptionId};
use crate::input::{InputEvent, InputState, InputStateKind, MountPoint, Step, transition};
use crate::options::CanvasOptions;
use crate::profile_scope;
use crate::registry::ItemRegistry;
use crate::selection::SelectionManager;
use crate::spatial_index::SpatialIndex;
use crate::types::{Item, ItemId, Rect, Truth};

pub struct Canvas {
    pub(crate) registry: ItemRegistry,
    pub(crate) selection: SelectionManager,
    pub(crate) input_state: InputState,
    pub(crate) options: CanvasOptions,
    pub(crate) events: EventChannel<CanvasEvent>,
    pub(crate) truth: Option<Truth>,
    pub(crate) mount: Option<MountPoint>,
    /// Visible canvas-space rects of non-lane items, rebuilt lazily
    spatial: SpatialIndex,
    spatial_dirty: bool,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("items", &self.registry.len())
            .field("selected", &self.selection.len())
            .field("state", &self.input_state.kind())
            .field("mounted", &self.mount.is_some())
            .finish()
    }
}

impl Canvas {
    pub(crate) fn from_options(options: CanvasOptions) -> Self {
        Self {
            registry: ItemRegistry::new(),
            selection: SelectionManager::new(),
            input_state: InputState::Ready,
            options,
            events: EventChannel::new(),
            truth: None,
            mount: None,
            spatial: SpatialIndex::new(),
            spatial_dirty: true,
        }
    }

    // ------------------------------------------------------------------------
    // State machine
    // ------------------------------------------------------------------------

    /// Feed one classified event to the state machine.
    ///
    /// Runs the exit side effects of the old state, then the enter side
    /// effects of the new one. Events the current state does not list are
    /// ignored. Returns the state the machine is in afterwards.
    pub fn send(&mut self, event: InputEvent) -> InputStateKind {
        profile_scope!("canvas_send");

        match transition(&self.input_state, &event) {
            Step::Ignore => {
                trace!(state = %self.input_state.kind(), event = event.name(), "ignored input");
            }
            Step::Update => {
                self.on_update(&event);
            }
            Step::Enter(next) => {
                let previous = std::mem::take(&mut self.input_state);
                debug!(from = %previous.kind(), to = %next, event = event.name(), "input transition");
                self.on_exit(&previous, &event, next);
                self.input_state = self.on_enter(next, &event, previous);
            }
        }
        self.input_state.kind()
    }

    // ------------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------------

    pub fn on(
        &mut self,
        kind: CanvasEventKind,
        handler: impl FnMut(&CanvasEvent) + 'static,
    ) -> SubscriptionId {
        self.events.on(kind, handler)
    }

    pub fn off(&mut self, subscription: SubscriptionId) -> bool {
        self.events.off(subscription)
    }

    pub(crate) fn emit(&mut self, event: CanvasEvent) {
        trace!(?event, "emit");
        self.events.emit(&event);
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn registry(&self) -> &ItemRegistry {
        &self.registry
    }

    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.registry.get(id)
    }

    pub fn input_state(&self) -> &InputState {
        &self.input_state
    }

    pub fn options(&self) -> &CanvasOptions {
        &self.options
    }

    pub fn truth(&self) -> Option<&Truth> {
        self.truth.as_ref()
    }

    /// Normalized marquee rectangle in canvas space while marquee selecting.
    pub fn marquee_rect(&self) -> Option<Rect> {
        self.input_state.marquee_rect()
    }

    /// An item's rectangle in canvas space.
    pub fn item_canvas_rect(&self, id: &ItemId) -> crate::error::CanvasResult<Rect> {
        let item = self.registry.item(id)?;
        match &item.lane_id {
            Some(lane_id) if !item.is_lane() => {
                let origin = self.lane_to_canvas(lane_id, item.rect.origin())?;
                Ok(item.rect.with_origin(origin))
            }
            _ => Ok(item.rect),
        }
    }

    /// The part of an item's canvas rectangle inside its lane's band.
    ///
    /// `None` when the lane window hides the item entirely. Items outside any
    /// lane are never clipped.
    pub fn visible_canvas_rect(&self, id: &ItemId) -> crate::error::CanvasResult<Option<Rect>> {
        let rect = self.item_canvas_rect(id)?;
        let item = self.registry.item(id)?;
        match &item.lane_id {
            Some(lane_id) if !item.is_lane() => {
                let band = self.registry.lane(lane_id)?.rect;
                Ok(rect.clip_to_band(band.y, band.bottom()))
            }
            _ => Ok(Some(rect)),
        }
    }

    // ------------------------------------------------------------------------
    // Spatial index
    // ------------------------------------------------------------------------

    pub(crate) fn invalidate_spatial_index(&mut self) {
        self.spatial_dirty = true;
    }

    /// Up-to-date index of the visible parts of non-lane items, in canvas
    /// space.
    pub(crate) fn spatial_index(&mut self) -> &SpatialIndex {
        if self.spatial_dirty {
            profile_scope!("rebuild_spatial_index");
            let entries: Vec<(ItemId, Rect)> = self
                .registry
                .items()
                .filter(|item| !item.is_lane())
                .filter_map(|item| {
                    let rect = self.visible_canvas_rect(&item.id).ok()??;
                    Some((item.id.clone(), rect))
                })
                .collect();
            self.spatial.rebuild(entries.into_iter());
            self.spatial_dirty = false;
            trace!(entries = self.spatial.len(), "spatial index rebuilt");
        }
        &self.spatial
    }
}
