//! Company entity - the workspace that owns clients and projects

use chrono::{DateTime, Utc};

use crate::value_objects::{CompanyId, CompanyRole, UserId};

/// Company (workspace) entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user's membership in a company
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompanyMember {
    pub company_id: CompanyId,
    pub user_id: UserId,
    pub role: CompanyRole,
}

impl CompanyMember {
    pub fn new(company_id: CompanyId, user_id: UserId, role: CompanyRole) -> Self {
        Self {
            company_id,
            user_id,
            role,
        }
    }
}
