//! Widget store abstraction.

mod memory;

pub use memory::InMemoryWidgetStore;

use crate::widget::{Widget, WidgetId, WidgetPatch};
use thiserror::Error;

/// Store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Widget not found: {0}")]
    NotFound(WidgetId),
    /// Placing a widget would push some z-index past `i32::MAX`.
    #[error("No z-index slot available above {0}")]
    ZIndexOverflow(i32),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Operations over a collection of widgets with unique z-indexes.
///
/// Implementations must be safe to share between threads. Every mutation,
/// including any z-index shifting it triggers, is atomic with respect to
/// other callers.
pub trait WidgetService: Send + Sync {
    /// Create a widget. Missing geometry defaults to zero and a missing
    /// z-index places the widget in front of everything else.
    fn create(&self, patch: WidgetPatch) -> StoreResult<Widget>;

    /// Look up a widget by ID.
    fn get(&self, id: WidgetId) -> Option<Widget>;

    /// Apply the fields present in `patch` to an existing widget.
    fn update(&self, id: WidgetId, patch: WidgetPatch) -> StoreResult<Widget>;

    /// Remove a widget. Unknown IDs are ignored.
    fn delete(&self, id: WidgetId);

    /// All widgets, back to front.
    fn list_all(&self) -> Vec<Widget>;

    /// At most `limit` widgets, back to front, skipping the first `offset`.
    fn list_page(&self, offset: usize, limit: usize) -> Vec<Widget>;

    /// Number of live widgets.
    fn size(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }
}
