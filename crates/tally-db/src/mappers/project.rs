//! Project entity <-> model mapper

use tally_core::entities::{full_name, Project, TeamMember};
use tally_core::query::ProjectSummary;
use tally_core::value_objects::{ClientId, ProjectId, UserId};

use crate::models::{ProjectModel, ProjectSummaryModel, TeamMemberModel};

impl From<ProjectModel> for Project {
    fn from(model: ProjectModel) -> Self {
        Project {
            id: ProjectId::new(model.id),
            client_id: ClientId::new(model.client_id),
            name: model.name,
            description: model.description,
            billable: model.billable,
            discarded_at: model.discarded_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<ProjectSummaryModel> for ProjectSummary {
    fn from(model: ProjectSummaryModel) -> Self {
        ProjectSummary {
            id: ProjectId::new(model.id),
            name: model.name,
            client_id: ClientId::new(model.client_id),
            client_name: model.client_name,
            is_billable: model.billable,
        }
    }
}

impl From<TeamMemberModel> for TeamMember {
    fn from(model: TeamMemberModel) -> Self {
        TeamMember {
            user_id: UserId::new(model.user_id),
            full_name: full_name(&model.first_name, &model.last_name),
            hourly_rate: model.hourly_rate,
        }
    }
}
