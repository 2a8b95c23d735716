//! Project listing query
//!
//! A `ProjectQuery` is always rooted in one workspace. Optional filters are
//! appended as extra predicates and every predicate must hold for a project
//! to be listed. The SQL rendition lives in the database crate; `matches`
//! evaluates the same predicates against an in-memory record.

use serde::{Deserialize, Serialize};

use crate::value_objects::{ClientId, CompanyId, ProjectId, UserId};

/// Optional filters supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    pub client_ids: Vec<ClientId>,
    pub user_ids: Vec<UserId>,
    pub billable: Option<bool>,
    pub search: Option<String>,
}

/// One conjunct of a project query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectPredicate {
    /// Project's client belongs to the company
    InWorkspace(CompanyId),
    /// Project belongs to one of the clients
    InClients(Vec<ClientId>),
    /// At least one of the users is on the project team
    HasTeamMember(Vec<UserId>),
    /// Billable flag equals the value
    Billable(bool),
    /// Project name or client name contains the text, case-insensitively
    NameOrClientMatches(String),
}

/// Workspace-scoped project query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectQuery {
    workspace: CompanyId,
    filters: Vec<ProjectPredicate>,
}

/// Flattened project row used for in-memory evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRecord {
    pub id: ProjectId,
    pub name: String,
    pub billable: bool,
    pub project_discarded: bool,
    pub client_id: ClientId,
    pub client_name: String,
    pub client_company_id: CompanyId,
    pub client_discarded: bool,
    pub member_ids: Vec<UserId>,
}

/// Listed project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: ProjectId,
    pub name: String,
    pub client_id: ClientId,
    pub client_name: String,
    pub is_billable: bool,
}

impl ProjectQuery {
    /// Query over every kept project of the workspace
    pub fn for_workspace(workspace: CompanyId) -> Self {
        Self {
            workspace,
            filters: Vec::new(),
        }
    }

    /// Narrow the query with caller filters; absent or empty filters are skipped
    pub fn with_filter(mut self, filter: ProjectFilter) -> Self {
        if !filter.client_ids.is_empty() {
            self.filters
                .push(ProjectPredicate::InClients(filter.client_ids));
        }
        if !filter.user_ids.is_empty() {
            self.filters
                .push(ProjectPredicate::HasTeamMember(filter.user_ids));
        }
        if let Some(billable) = filter.billable {
            self.filters.push(ProjectPredicate::Billable(billable));
        }
        if let Some(search) = filter.search {
            let search = search.trim();
            if !search.is_empty() {
                self.filters
                    .push(ProjectPredicate::NameOrClientMatches(search.to_string()));
            }
        }
        self
    }

    pub fn workspace(&self) -> CompanyId {
        self.workspace
    }

    /// All predicates, the workspace predicate first
    pub fn predicates(&self) -> impl Iterator<Item = ProjectPredicate> + '_ {
        std::iter::once(ProjectPredicate::InWorkspace(self.workspace))
            .chain(self.filters.iter().cloned())
    }

    /// Evaluate the query against one project
    pub fn matches(&self, record: &ProjectRecord) -> bool {
        !record.project_discarded
            && !record.client_discarded
            && self.predicates().all(|p| p.matches(record))
    }

    /// Apply the query to a set of records, ordered by lowercased name then id
    pub fn apply<'a, I>(&self, records: I) -> Vec<ProjectSummary>
    where
        I: IntoIterator<Item = &'a ProjectRecord>,
    {
        let mut out: Vec<ProjectSummary> = records
            .into_iter()
            .filter(|r| self.matches(r))
            .map(ProjectSummary::from)
            .collect();
        out.sort_by_cached_key(|p| (p.name.to_lowercase(), p.id));
        out
    }
}

impl ProjectPredicate {
    pub fn matches(&self, record: &ProjectRecord) -> bool {
        match self {
            Self::InWorkspace(company_id) => record.client_company_id == *company_id,
            Self::InClients(ids) => ids.contains(&record.client_id),
            Self::HasTeamMember(ids) => record.member_ids.iter().any(|m| ids.contains(m)),
            Self::Billable(billable) => record.billable == *billable,
            Self::NameOrClientMatches(text) => {
                let needle = text.to_lowercase();
                record.name.to_lowercase().contains(&needle)
                    || record.client_name.to_lowercase().contains(&needle)
            }
        }
    }
}

impl From<&ProjectRecord> for ProjectSummary {
    fn from(record: &ProjectRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            client_id: record.client_id,
            client_name: record.client_name.clone(),
            is_billable: record.billable,
        }
    }
}
