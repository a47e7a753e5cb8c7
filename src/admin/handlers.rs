use axum::{
    extract::{Path, State},
    routing::{get, patch},
    Json, Router,
};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use super::{
    dto::{SetAdminRequest, Stats, UpdatedUser, UserSummary},
    services::{self, MutationError},
};
use crate::{
    auth::guard::AdminUser,
    error::{ApiError, JsonBody},
    state::AppState,
};

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/stats", get(get_stats))
        .route("/admin/users", get(list_users))
        .route("/admin/users/:id", patch(update_user))
}

#[instrument(skip(state, admin), fields(admin_id = %admin.0.id))]
pub async fn get_stats(
    State(state): State<AppState>,
    admin: AdminUser,
) -> Result<Json<Stats>, ApiError> {
    match services::get_stats(state.store.as_ref()).await {
        Ok(stats) => Ok(Json(stats)),
        Err(e) => {
            error!(error = %e, "get_stats failed");
            Err(ApiError::internal("Failed to fetch stats"))
        }
    }
}

#[instrument(skip(state, admin), fields(admin_id = %admin.0.id))]
pub async fn list_users(
    State(state): State<AppState>,
    admin: AdminUser,
) -> Result<Json<Vec<UserSummary>>, ApiError> {
    match services::list_users(state.store.as_ref()).await {
        Ok(users) => Ok(Json(users)),
        Err(e) => {
            error!(error = %e, "list_users failed");
            Err(ApiError::internal("Failed to fetch users"))
        }
    }
}

#[instrument(skip(state, admin, body), fields(admin_id = %admin.0.id))]
pub async fn update_user(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
    JsonBody(body): JsonBody<SetAdminRequest>,
) -> Result<Json<UpdatedUser>, ApiError> {
    match services::set_admin_flag(state.store.as_ref(), id, body.is_admin).await {
        Ok(user) => {
            info!(user_id = %user.id, is_admin = user.is_admin, "admin flag updated");
            Ok(Json(user))
        }
        Err(MutationError::NotFound) => {
            warn!(user_id = %id, "admin flag update for unknown user");
            Err(ApiError::NotFound("User not found".into()))
        }
        Err(MutationError::Store(e)) => {
            error!(error = %e, user_id = %id, "set_admin_flag failed");
            Err(ApiError::internal("Failed to update user"))
        }
    }
}
