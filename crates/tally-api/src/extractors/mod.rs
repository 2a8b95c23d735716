//! Axum extractors for request handling
//!
//! Custom extractors for authentication, workspace resolution, validated
//! bodies, typed paths and repeated-key query strings.

mod auth;
mod path;
mod query;
mod validated;

pub use auth::{AuthUser, CurrentWorkspace};
pub use path::{IdPath, ProjectMemberPath};
pub use query::{
    DateRangeParams, ProjectFilterParams, QueryParams, SelectedEntriesParams, TimeFrameParams,
};
pub use validated::{JsonBody, ValidatedJson};
