//! Selection methods - keep `Item::selected` in step with the selection set
//! and emit `select`/`deselect`.

use tracing::error;

use super::Canvas;
use crate::error::CanvasResult;
use crate::events::CanvasEvent;
use crate::types::ItemId;

impl Canvas {
    /// Select an item. Without `multiple`, every other item is deselected
    /// first.
    pub fn select(&mut self, id: &ItemId, multiple: bool) -> CanvasResult<()> {
        self.registry
            .item(id)
            .inspect_err(|e| error!("select failed: {e}"))?;

        if !multiple {
            self.deselect_all_but(id)?;
        }
        if self.selection.insert(id.clone()) {
            self.set_selected_flag(id, true);
            self.emit(CanvasEvent::Select { id: id.clone() });
        }
        Ok(())
    }

    /// Deselect one item, or everything when `id` is `None`.
    pub fn deselect(&mut self, id: Option<&ItemId>) -> CanvasResult<()> {
        let Some(id) = id else {
            self.clear_selection();
            return Ok(());
        };

        self.registry
            .item(id)
            .inspect_err(|e| error!("deselect failed: {e}"))?;
        if self.selection.remove(id) {
            self.set_selected_flag(id, false);
            self.emit(CanvasEvent::Deselect {
                ids: vec![id.clone()],
            });
        }
        Ok(())
    }

    /// Deselect every item except `keep`. Does not select `keep`.
    pub fn deselect_all_but(&mut self, keep: &ItemId) -> CanvasResult<()> {
        self.registry
            .item(keep)
            .inspect_err(|e| error!("deselect_all_but failed: {e}"))?;
        let removed = self.selection.retain_only(keep);
        self.emit_deselected(removed);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        let removed = self.selection.clear();
        self.emit_deselected(removed);
    }

    pub fn selected_ids(&self) -> Vec<ItemId> {
        self.selection.to_vec()
    }

    pub fn is_selected(&self, id: &ItemId) -> bool {
        self.selection.contains(id)
    }

    fn emit_deselected(&mut self, removed: Vec<ItemId>) {
        if removed.is_empty() {
            return;
        }
        for id in &removed {
            self.set_selected_flag(id, false);
        }
        self.emit(CanvasEvent::Deselect { ids: removed });
    }

    fn set_selected_flag(&mut self, id: &ItemId, selected: bool) {
        if let Some(item) = self.registry.get_mut(id) {
            item.selected = selected;
        }
    }
}
