//! Admin authorization guard.
//!
//! [`authorize`] is the decision itself; [`AdminUser`] wires it into axum so
//! handlers only run once the caller is known to be an admin.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tracing::{debug, error, warn};

use super::services::Session;
use crate::{
    error::ApiError,
    state::AppState,
    store::{Store, User},
};

#[derive(Debug)]
pub enum Verdict {
    Authorized(User),
    Unauthorized,
    Forbidden,
}

/// Decides whether `principal_email` may use admin operations.
///
/// Performs no read when there is no principal and exactly one lookup
/// otherwise. A lookup failure is returned as `Err`, never as `Forbidden`.
pub async fn authorize(
    store: &dyn Store,
    principal_email: Option<&str>,
) -> anyhow::Result<Verdict> {
    let Some(email) = principal_email else {
        return Ok(Verdict::Unauthorized);
    };

    match store.find_user_by_email(email).await? {
        Some(user) if user.is_admin => Ok(Verdict::Authorized(user)),
        Some(_) | None => Ok(Verdict::Forbidden),
    }
}

/// Extractor for admin-only routes. Holds the admin's user record.
#[derive(Debug)]
pub struct AdminUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = match Session::from_request_parts(parts, state).await {
            Ok(session) => session,
            Err(never) => match never {},
        };

        match authorize(state.store.as_ref(), session.email.as_deref()).await {
            Ok(Verdict::Authorized(user)) => {
                debug!(user_id = %user.id, "admin authorized");
                Ok(AdminUser(user))
            }
            Ok(Verdict::Unauthorized) => Err(ApiError::Unauthorized),
            Ok(Verdict::Forbidden) => {
                warn!(email = ?session.email, "admin access denied");
                Err(ApiError::Forbidden)
            }
            Err(e) => {
                error!(error = %e, "admin guard lookup failed");
                Err(ApiError::internal("Internal server error"))
            }
        }
    }
}
