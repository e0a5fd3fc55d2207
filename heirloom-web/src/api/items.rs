//! Browse and timeline listing handlers

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::content_items::{self, ContentItemSummary};
use crate::error::ApiResult;
use crate::AppState;

/// GET /api/items query parameters
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Category filter; accepts any UI alias, "all" or absent means no filter
    pub category: Option<String>,
    /// "asc" for oldest-first; anything else is newest-first
    pub order: Option<String>,
}

/// GET /api/items response
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub items: Vec<ContentItemSummary>,
    pub count: usize,
}

/// GET /api/items
///
/// Public records ordered by the date they depict, newest first unless
/// `order=asc` is given.
pub async fn list_items(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<ListResponse>> {
    let category = query
        .category
        .as_deref()
        .filter(|c| !c.is_empty() && *c != "all");
    let ascending = query.order.as_deref() == Some("asc");

    let items = content_items::list_public(&state.db, category, ascending).await?;
    let count = items.len();

    Ok(Json(ListResponse { items, count }))
}

/// One timeline year grouping
#[derive(Debug, Serialize)]
pub struct TimelineYear {
    pub year: i32,
    pub items: Vec<ContentItemSummary>,
}

/// GET /api/timeline
///
/// Public, dated records grouped by year, oldest year first.
pub async fn timeline(State(state): State<AppState>) -> ApiResult<Json<Vec<TimelineYear>>> {
    use chrono::Datelike;

    let items = content_items::list_timeline(&state.db).await?;

    let mut years: Vec<TimelineYear> = Vec::new();
    for item in items {
        // list_timeline only returns dated items
        let Some(date) = item.occurred_on else {
            continue;
        };
        let year = date.year();
        match years.last_mut() {
            Some(group) if group.year == year => group.items.push(item),
            _ => years.push(TimelineYear {
                year,
                items: vec![item],
            }),
        }
    }

    Ok(Json(years))
}

/// Build listing routes
pub fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/api/items", get(list_items))
        .route("/api/timeline", get(timeline))
}
