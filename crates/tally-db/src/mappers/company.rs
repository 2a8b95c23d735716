//! Company entity <-> model mapper

use tally_core::entities::{Company, CompanyMember};
use tally_core::error::DomainError;
use tally_core::value_objects::{CompanyId, CompanyRole, UserId};

use crate::models::{CompanyMemberModel, CompanyModel};

impl From<CompanyModel> for Company {
    fn from(model: CompanyModel) -> Self {
        Company {
            id: CompanyId::new(model.id),
            name: model.name,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Roles are stored as text; an unknown role means the row is corrupt
impl TryFrom<CompanyMemberModel> for CompanyMember {
    type Error = DomainError;

    fn try_from(model: CompanyMemberModel) -> Result<Self, Self::Error> {
        let role = CompanyRole::parse(&model.role).ok_or_else(|| {
            DomainError::DatabaseError(format!("unknown company role: {}", model.role))
        })?;
        Ok(CompanyMember::new(
            CompanyId::new(model.company_id),
            UserId::new(model.user_id),
            role,
        ))
    }
}
