//! Widget records and partial updates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique widget identifier, assigned by the store.
pub type WidgetId = u64;

/// A rectangle placed on the board with a unique stacking order.
///
/// Only the store assigns `id`, `z_index` and `created_at`, so those are
/// read through accessors. Geometry is plain data.
///
/// Widgets go out on the wire but never come back in; clients send a
/// [`WidgetPatch`] instead.
///
/// ```compile_fail
/// let _: widgetboard_core::Widget = serde_json::from_str("{}").unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
    pub(crate) id: WidgetId,
    /// Left edge.
    pub x: i64,
    /// Top edge.
    pub y: i64,
    pub width: i64,
    pub height: i64,
    pub(crate) z_index: i32,
    pub(crate) created_at: DateTime<Utc>,
}

impl Widget {
    /// Materialize a widget from a patch, filling absent geometry with zero.
    pub(crate) fn from_patch(id: WidgetId, z_index: i32, patch: &WidgetPatch) -> Self {
        Self {
            id,
            x: patch.x.unwrap_or(0),
            y: patch.y.unwrap_or(0),
            width: patch.width.unwrap_or(0),
            height: patch.height.unwrap_or(0),
            z_index,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// Stacking order. Higher values render in front.
    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Copy every field present in `patch` onto this widget.
    pub(crate) fn apply(&mut self, patch: &WidgetPatch) {
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(width) = patch.width {
            self.width = width;
        }
        if let Some(height) = patch.height {
            self.height = height;
        }
        if let Some(z_index) = patch.z_index {
            self.z_index = z_index;
        }
    }
}

/// Sparse widget description used for both creation and update.
///
/// A `None` field means "use the default" on create and "leave unchanged"
/// on update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
}

impl WidgetPatch {
    /// An empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position(mut self, x: i64, y: i64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn with_size(mut self, width: i64, height: i64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = Some(z_index);
        self
    }
}
