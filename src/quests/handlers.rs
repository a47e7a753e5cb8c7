use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use tracing::{error, instrument};

use super::dto::Pagination;
use crate::{error::ApiError, state::AppState, store::Quest};

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/quests", get(list_quests))
}

#[instrument(skip(state))]
pub async fn list_quests(
    State(state): State<AppState>,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<Quest>>, ApiError> {
    let (limit, offset) = p.clamped();
    state
        .store
        .list_quests(limit, offset)
        .await
        .map(Json)
        .map_err(|e| {
            error!(error = %e, limit, offset, "list_quests failed");
            ApiError::internal("Failed to fetch quests")
        })
}
