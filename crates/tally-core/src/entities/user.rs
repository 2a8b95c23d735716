//! User entity

use chrono::{DateTime, Utc};
use validator::Validate;

use crate::value_objects::{CompanyId, UserId};

/// User account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub current_workspace_id: Option<CompanyId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Attributes of a user about to be inserted
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, message = "can't be blank"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "can't be blank"))]
    pub last_name: String,
    #[validate(email(message = "is invalid"))]
    pub email: String,
}

impl User {
    /// "First Last", trimmed when either part is empty
    pub fn full_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }
}

/// Join a first and last name
pub fn full_name(first_name: &str, last_name: &str) -> String {
    format!("{first_name} {last_name}").trim().to_string()
}
