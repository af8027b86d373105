//! HTTP routes over the widget store.
//!
//! | Method | Path            | Action                                   |
//! |--------|-----------------|------------------------------------------|
//! | GET    | `/health`       | liveness check                           |
//! | POST   | `/widgets`      | create from a JSON patch                 |
//! | GET    | `/widgets/all`  | all widgets, or a page with `offset`/`limit` |
//! | GET    | `/widgets/{id}` | single widget                            |
//! | PATCH  | `/widgets/{id}` | apply a JSON patch                       |
//! | DELETE | `/widgets/{id}` | remove (idempotent)                      |

use crate::error::ApiError;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use widgetboard_core::{StoreError, Widget, WidgetId, WidgetPatch, WidgetService};

/// Page size used when only `offset` is given.
pub const DEFAULT_PAGE_LIMIT: usize = 20;

/// Store shared by all handlers.
pub type SharedStore = Arc<dyn WidgetService>;

/// Optional paging parameters for `/widgets/all`.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub offset: Option<usize>,
    /// Zero or negative yields an empty page.
    pub limit: Option<i64>,
}

/// Build the application router.
pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/widgets", post(create_widget))
        .route("/widgets/all", get(list_widgets))
        .route(
            "/widgets/{id}",
            get(get_widget).patch(update_widget).delete(delete_widget),
        )
        .with_state(store)
}

/// Health check
async fn health() -> &'static str {
    "ok"
}

async fn create_widget(
    State(store): State<SharedStore>,
    Json(patch): Json<WidgetPatch>,
) -> Result<(StatusCode, Json<Widget>), ApiError> {
    let widget = store.create(patch)?;
    info!("Created widget {} at z-index {}", widget.id(), widget.z_index());
    Ok((StatusCode::CREATED, Json(widget)))
}

async fn get_widget(
    State(store): State<SharedStore>,
    Path(id): Path<WidgetId>,
) -> Result<Json<Widget>, ApiError> {
    store
        .get(id)
        .map(Json)
        .ok_or(ApiError::Store(StoreError::NotFound(id)))
}

async fn list_widgets(
    State(store): State<SharedStore>,
    Query(page): Query<PageQuery>,
) -> Json<Vec<Widget>> {
    if page.offset.is_none() && page.limit.is_none() {
        return Json(store.list_all());
    }
    let limit = match page.limit {
        Some(limit) if limit <= 0 => return Json(Vec::new()),
        Some(limit) => usize::try_from(limit).unwrap_or(usize::MAX),
        None => DEFAULT_PAGE_LIMIT,
    };
    Json(store.list_page(page.offset.unwrap_or(0), limit))
}

async fn update_widget(
    State(store): State<SharedStore>,
    Path(id): Path<WidgetId>,
    Json(patch): Json<WidgetPatch>,
) -> Result<Json<Widget>, ApiError> {
    let widget = store.update(id, patch)?;
    info!("Updated widget {}", id);
    Ok(Json(widget))
}

async fn delete_widget(State(store): State<SharedStore>, Path(id): Path<WidgetId>) -> StatusCode {
    store.delete(id);
    StatusCode::NO_CONTENT
}
