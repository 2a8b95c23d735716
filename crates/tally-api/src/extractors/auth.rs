//! Authentication extractors
//!
//! `AuthUser` validates the bearer token; `CurrentWorkspace` additionally
//! resolves the company the user is acting in.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use tally_core::UserId;
use tally_service::{Workspace, WorkspaceService};

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user extracted from JWT token
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: UserId,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);

        let claims = app_state
            .jwt_service()
            .validate_access_token(bearer.token())
            .map_err(|e| {
                tracing::warn!(error = %e, "Invalid access token");
                ApiError::App(e)
            })?;

        let user_id = claims.user_id()?;

        Ok(AuthUser { user_id })
    }
}

/// Workspace of the authenticated user
///
/// Rejects with 403 when the user has no current workspace or is no longer
/// a member of it.
#[derive(Debug, Clone)]
pub struct CurrentWorkspace(pub Workspace);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentWorkspace
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;
        let app_state = AppState::from_ref(state);

        let workspace = WorkspaceService::new(app_state.service_context())
            .current(auth.user_id)
            .await?;

        Ok(CurrentWorkspace(workspace))
    }
}
