use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, Profile, RefreshRequest, RegisterRequest},
        services::{hash_password, is_valid_email, verify_password, AuthUser, JwtKeys},
    },
    error::{ApiError, JsonBody},
    state::AppState,
    store::User,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

fn issue_tokens(state: &AppState, user: User) -> Result<AuthResponse, ApiError> {
    let keys = JwtKeys::from_ref(state);
    let access_token = keys.sign_access(user.id, &user.email).map_err(|e| {
        error!(error = %e, "jwt sign access failed");
        ApiError::internal("Failed to issue token")
    })?;
    let refresh_token = keys.sign_refresh(user.id, &user.email).map_err(|e| {
        error!(error = %e, "jwt sign refresh failed");
        ApiError::internal("Failed to issue token")
    })?;
    Ok(AuthResponse {
        access_token,
        refresh_token,
        user: user.into(),
    })
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(mut payload): JsonBody<RegisterRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::BadRequest("Invalid email".into()));
    }

    if payload.password.len() < 8 {
        warn!("password too short");
        return Err(ApiError::BadRequest("Password too short".into()));
    }

    match state.store.find_user_by_email(&payload.email).await {
        Ok(None) => {}
        Ok(Some(_)) => {
            warn!(email = %payload.email, "email already registered");
            return Err(ApiError::Conflict("Email already registered".into()));
        }
        Err(e) => {
            error!(error = %e, "find_user_by_email failed");
            return Err(ApiError::internal("Failed to register"));
        }
    }

    let hash = hash_password(&payload.password).map_err(|e| {
        error!(error = %e, "hash_password failed");
        ApiError::internal("Failed to register")
    })?;

    let name = payload
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());
    // A concurrent sign-up can take the email between the check above and
    // this insert; the store reports that as `None`.
    let user = match state.store.create_user(&payload.email, name, &hash).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(email = %payload.email, "email registered concurrently");
            return Err(ApiError::Conflict("Email already registered".into()));
        }
        Err(e) => {
            error!(error = %e, "create user failed");
            return Err(ApiError::internal("Failed to register"));
        }
    };

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(Json(issue_tokens(&state, user)?))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(mut payload): JsonBody<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::BadRequest("Invalid email".into()));
    }

    let user = match state.store.find_user_by_email(&payload.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(email = %payload.email, "login unknown email");
            return Err(ApiError::InvalidCredentials);
        }
        Err(e) => {
            error!(error = %e, "find_user_by_email failed");
            return Err(ApiError::internal("Failed to log in"));
        }
    };

    let ok = verify_password(&payload.password, &user.password_hash).map_err(|e| {
        error!(error = %e, "verify_password failed");
        ApiError::internal("Failed to log in")
    })?;

    if !ok {
        warn!(email = %payload.email, user_id = %user.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(issue_tokens(&state, user)?))
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RefreshRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let keys = JwtKeys::from_ref(&state);
    let claims = keys.verify_refresh(&payload.refresh_token).map_err(|e| {
        warn!(error = %e, "refresh rejected");
        ApiError::Unauthorized
    })?;

    let user = match state.store.find_user_by_id(claims.sub).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(user_id = %claims.sub, "refresh for unknown user");
            return Err(ApiError::Unauthorized);
        }
        Err(e) => {
            error!(error = %e, "find_user_by_id failed");
            return Err(ApiError::internal("Failed to refresh token"));
        }
    };

    Ok(Json(issue_tokens(&state, user)?))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Profile>, ApiError> {
    match state.store.find_user_by_id(user_id).await {
        Ok(Some(user)) => Ok(Json(user.into())),
        Ok(None) => {
            warn!(user_id = %user_id, "user not found");
            Err(ApiError::Unauthorized)
        }
        Err(e) => {
            error!(error = %e, user_id = %user_id, "find_user_by_id failed");
            Err(ApiError::internal("Failed to fetch profile"))
        }
    }
}
