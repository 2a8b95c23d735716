//! User entity <-> model mapper

use tally_core::entities::User;
use tally_core::value_objects::{CompanyId, UserId};

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: UserId::new(model.id),
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            current_workspace_id: model.current_workspace_id.map(CompanyId::new),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
