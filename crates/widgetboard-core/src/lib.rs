//! Widgetboard Core Library
//!
//! Widget records with unique stacking order, and the thread-safe store that
//! keeps them ordered.

pub mod store;
pub mod widget;

pub use store::{InMemoryWidgetStore, StoreError, StoreResult, WidgetService};
pub use widget::{Widget, WidgetId, WidgetPatch};
