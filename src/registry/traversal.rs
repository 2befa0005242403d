//! Lazy traversal over the containment tree.
//!
//! Each call builds a fresh iterator that borrows the registry, so the tree
//! cannot change while one is alive. Collect into a `Vec` before mutating.

use super::ItemRegistry;
use crate::error::CanvasResult;
use crate::types::{ContainerRef, Item, ItemId};

/// Pre-order walk below an item: parents come before their children.
pub struct Descendants<'a> {
    registry: &'a ItemRegistry,
    stack: Vec<&'a ItemId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Item;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            let Some(item) = self.registry.items.get(id) else {
                continue;
            };
            if let Some(children) = item.child_ids() {
                self.stack.extend(children.iter().rev());
            }
            return Some(item);
        }
        None
    }
}

/// Walk up the container chain, nearest container first. The root is not an
/// item and is never yielded.
pub struct Ancestors<'a> {
    registry: &'a ItemRegistry,
    current: Option<&'a ContainerRef>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a Item;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?.item_id()?;
        let item = self.registry.items.get(id)?;
        self.current = item.container.as_ref();
        Some(item)
    }
}

impl ItemRegistry {
    pub fn get_children_of(
        &self,
        container: &ContainerRef,
    ) -> CanvasResult<impl Iterator<Item = &Item> + '_> {
        let children = self.children(container)?;
        Ok(children.iter().filter_map(|id| self.items.get(id)))
    }

    pub fn get_descendants_of(&self, id: &ItemId) -> CanvasResult<Descendants<'_>> {
        let item = self.item(id)?;
        let stack = item
            .child_ids()
            .map(|children| children.iter().rev().collect())
            .unwrap_or_default();
        Ok(Descendants {
            registry: self,
            stack,
        })
    }

    pub fn get_ancestors_of(&self, id: &ItemId) -> CanvasResult<Ancestors<'_>> {
        let item = self.item(id)?;
        Ok(Ancestors {
            registry: self,
            current: item.container.as_ref(),
        })
    }

    /// Distance from the canvas root, which sits at depth 0.
    pub fn get_item_depth(&self, id: &ItemId) -> CanvasResult<usize> {
        Ok(self.get_ancestors_of(id)?.count() + 1)
    }

    /// Every attached item in paint order: root children in order, each
    /// followed by its descendants. Later entries paint on top.
    pub fn paint_order(&self) -> Vec<&Item> {
        let mut out = Vec::with_capacity(self.items.len());
        for id in &self.root {
            let Some(item) = self.items.get(id) else {
                continue;
            };
            out.push(item);
            if let Ok(descendants) = self.get_descendants_of(id) {
                out.extend(descendants);
            }
        }
        out
    }
}
