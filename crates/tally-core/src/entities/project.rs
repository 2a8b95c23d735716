//! Project entity and team membership

use chrono::{DateTime, Utc};
use validator::Validate;

use crate::value_objects::{ClientId, ProjectId, UserId};

/// Project entity
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: ProjectId,
    pub client_id: ClientId,
    pub name: String,
    pub description: Option<String>,
    pub billable: bool,
    pub discarded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    #[inline]
    pub fn is_kept(&self) -> bool {
        self.discarded_at.is_none()
    }
}

/// Attributes of a project about to be inserted
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewProject {
    pub client_id: ClientId,
    #[validate(length(min = 1, message = "can't be blank"))]
    pub name: String,
    pub description: Option<String>,
    pub billable: bool,
}

/// Team membership of a user on a project
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct ProjectMember {
    pub project_id: ProjectId,
    pub user_id: UserId,
    #[validate(range(min = 0.0, message = "must be greater than or equal to 0"))]
    pub hourly_rate: f64,
}

/// Team member with the user's display name resolved
#[derive(Debug, Clone, PartialEq)]
pub struct TeamMember {
    pub user_id: UserId,
    pub full_name: String,
    pub hourly_rate: f64,
}
