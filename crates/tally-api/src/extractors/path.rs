//! Path parameter extractors
//!
//! Typed record ids parsed from the URL path.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tally_core::{ProjectId, UserId};

use crate::response::ApiError;

/// Extract path parameters, rejecting malformed ids with a JSON error
#[derive(Debug, Clone)]
pub struct IdPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for IdPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(inner) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;

        Ok(IdPath(inner))
    }
}

/// `/projects/:project_id/members/:user_id`
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ProjectMemberPath {
    pub project_id: ProjectId,
    pub user_id: UserId,
}
