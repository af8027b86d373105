//! In-memory widget store.

use super::{StoreError, StoreResult, WidgetService};
use crate::widget::{Widget, WidgetId, WidgetPatch};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};

/// Both indexes plus the ID counter. Only touched under the store lock.
#[derive(Debug, Default)]
struct Layers {
    /// ID handed to the next created widget.
    next_id: WidgetId,
    /// Canonical storage.
    by_id: HashMap<WidgetId, Widget>,
    /// Z-index to widget ID, back to front.
    by_z_index: BTreeMap<i32, WidgetId>,
}

impl Layers {
    /// Z-index just in front of the frontmost widget.
    fn next_z_index(&self) -> StoreResult<i32> {
        match self.by_z_index.last_key_value() {
            Some((&top, _)) => top.checked_add(1).ok_or(StoreError::ZIndexOverflow(top)),
            None => Ok(0),
        }
    }

    /// Vacate `z_index` by moving every widget at or above it forward by one.
    ///
    /// Widgets are visited front to back so that each one lands on the slot
    /// freed by the previous move. Nothing changes if the frontmost widget
    /// already sits at `i32::MAX`.
    fn shift_from(&mut self, z_index: i32) -> StoreResult<()> {
        if !self.by_z_index.contains_key(&z_index) {
            return Ok(());
        }
        if self
            .by_z_index
            .last_key_value()
            .is_some_and(|(&top, _)| top == i32::MAX)
        {
            return Err(StoreError::ZIndexOverflow(i32::MAX));
        }

        let shifted: Vec<(i32, WidgetId)> = self
            .by_z_index
            .range(z_index..)
            .rev()
            .map(|(&z, &id)| (z, id))
            .collect();

        for &(old, id) in &shifted {
            let new = old + 1;
            self.by_z_index.remove(&old);
            self.by_z_index.insert(new, id);
            if let Some(widget) = self.by_id.get_mut(&id) {
                widget.z_index = new;
            }
        }

        log::debug!(
            "Shifted {} widget(s) forward from z-index {}",
            shifted.len(),
            z_index
        );
        Ok(())
    }

    fn insert(&mut self, widget: Widget) {
        self.by_z_index.insert(widget.z_index, widget.id);
        self.by_id.insert(widget.id, widget);
    }

    /// Widgets back to front.
    fn ordered(&self) -> impl Iterator<Item = &Widget> {
        self.by_z_index
            .values()
            .filter_map(|id| self.by_id.get(id))
    }
}

/// Thread-safe in-memory widget store.
///
/// A single reader-writer lock guards both indexes and the ID counter, so
/// writers run one at a time (cascade included) and readers always see a
/// state where the indexes agree.
#[derive(Debug, Default)]
pub struct InMemoryWidgetStore {
    layers: RwLock<Layers>,
}

impl InMemoryWidgetStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl WidgetService for InMemoryWidgetStore {
    fn create(&self, patch: WidgetPatch) -> StoreResult<Widget> {
        let mut layers = self.layers.write();

        let z_index = match patch.z_index {
            Some(z_index) => z_index,
            None => layers.next_z_index()?,
        };
        layers.shift_from(z_index)?;

        let id = layers.next_id;
        layers.next_id += 1;

        let widget = Widget::from_patch(id, z_index, &patch);
        layers.insert(widget.clone());

        log::debug!("Created widget {} at z-index {}", id, z_index);
        Ok(widget)
    }

    fn get(&self, id: WidgetId) -> Option<Widget> {
        self.layers.read().by_id.get(&id).cloned()
    }

    fn update(&self, id: WidgetId, patch: WidgetPatch) -> StoreResult<Widget> {
        let mut layers = self.layers.write();

        let mut updated = layers
            .by_id
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))?;
        let old_z_index = updated.z_index;
        updated.apply(&patch);

        if updated.z_index != old_z_index {
            // Take the widget out first so it never collides with itself.
            layers.by_z_index.remove(&old_z_index);
            if let Err(err) = layers.shift_from(updated.z_index) {
                layers.by_z_index.insert(old_z_index, id);
                return Err(err);
            }
            log::debug!(
                "Moved widget {} from z-index {} to {}",
                id,
                old_z_index,
                updated.z_index
            );
        }

        layers.insert(updated.clone());
        Ok(updated)
    }

    fn delete(&self, id: WidgetId) {
        let mut layers = self.layers.write();
        if let Some(widget) = layers.by_id.remove(&id) {
            layers.by_z_index.remove(&widget.z_index);
            log::debug!("Deleted widget {}", id);
        }
    }

    fn list_all(&self) -> Vec<Widget> {
        self.layers.read().ordered().cloned().collect()
    }

    fn list_page(&self, offset: usize, limit: usize) -> Vec<Widget> {
        let layers = self.layers.read();
        if limit == 0 || offset >= layers.by_id.len() {
            return Vec::new();
        }
        layers.ordered().skip(offset).take(limit).cloned().collect()
    }

    fn size(&self) -> usize {
        self.layers.read().by_id.len()
    }
}
