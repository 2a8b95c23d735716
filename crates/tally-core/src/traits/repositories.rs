//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    Client, Company, CompanyMember, InvoiceLineItem, LineItemCandidate, NewClient,
    NewInvoiceLineItem, NewProject, NewTimesheetEntry, NewUser, Project, ProjectMember,
    TeamMember, TimesheetEntry, User,
};
use crate::error::DomainError;
use crate::query::{ProjectQuery, ProjectSummary};
use crate::search::EntryProjectionSource;
use crate::value_objects::{
    BillStatus, ClientId, CompanyId, DateRange, ProjectId, TimesheetEntryId, UserId,
};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Company Repository
// ============================================================================

#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Find company by ID
    async fn find_by_id(&self, id: CompanyId) -> RepoResult<Option<Company>>;

    /// Create a new company
    async fn create(&self, name: &str) -> RepoResult<Company>;

    /// Find a user's membership in a company
    async fn find_member(
        &self,
        company_id: CompanyId,
        user_id: UserId,
    ) -> RepoResult<Option<CompanyMember>>;

    /// Add a user to a company with a role
    async fn add_member(&self, member: &CompanyMember) -> RepoResult<()>;
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Create a new user
    async fn create(&self, user: &NewUser) -> RepoResult<User>;

    /// Switch the workspace a user is working in
    async fn set_current_workspace(&self, id: UserId, company_id: CompanyId) -> RepoResult<()>;
}

// ============================================================================
// Client Repository
// ============================================================================

#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Find client by ID, discarded or not
    async fn find_by_id(&self, id: ClientId) -> RepoResult<Option<Client>>;

    /// List kept clients of a company, ordered by name
    async fn find_kept_by_company(&self, company_id: CompanyId) -> RepoResult<Vec<Client>>;

    /// Whether another client of the company already uses the email
    async fn email_taken(
        &self,
        company_id: CompanyId,
        email: &str,
        except: Option<ClientId>,
    ) -> RepoResult<bool>;

    /// Whether another client of the company already uses the client code
    async fn client_code_taken(
        &self,
        company_id: CompanyId,
        client_code: &str,
        except: Option<ClientId>,
    ) -> RepoResult<bool>;

    /// Create a new client
    async fn create(&self, client: &NewClient) -> RepoResult<Client>;

    /// Update an existing client
    async fn update(&self, client: &Client) -> RepoResult<()>;

    /// Discard a client and all of its projects in one transaction
    ///
    /// Returns the number of projects discarded.
    async fn discard(&self, id: ClientId, at: DateTime<Utc>) -> RepoResult<u64>;

    /// Unbilled entries of the client's projects, excluding `except`
    async fn line_item_candidates(
        &self,
        id: ClientId,
        except: &[TimesheetEntryId],
    ) -> RepoResult<Vec<LineItemCandidate>>;
}

// ============================================================================
// Project Repository
// ============================================================================

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Find project by ID, discarded or not
    async fn find_by_id(&self, id: ProjectId) -> RepoResult<Option<Project>>;

    /// Company owning the project through its client
    async fn find_company_id(&self, id: ProjectId) -> RepoResult<Option<CompanyId>>;

    /// List kept projects of a client, ordered by name
    async fn find_kept_by_client(&self, client_id: ClientId) -> RepoResult<Vec<Project>>;

    /// Run a workspace-scoped project query
    async fn list(&self, query: &ProjectQuery) -> RepoResult<Vec<ProjectSummary>>;

    /// Create a new project
    async fn create(&self, project: &NewProject) -> RepoResult<Project>;

    /// Team of a project with resolved names
    async fn team(&self, id: ProjectId) -> RepoResult<Vec<TeamMember>>;

    /// Add a user to the project team
    async fn add_member(&self, member: &ProjectMember) -> RepoResult<()>;

    /// Remove a user from the project team; false when not a member
    async fn remove_member(&self, id: ProjectId, user_id: UserId) -> RepoResult<bool>;
}

// ============================================================================
// Timesheet Entry Repository
// ============================================================================

#[async_trait]
pub trait TimesheetEntryRepository: Send + Sync {
    /// Find entry by ID
    async fn find_by_id(&self, id: TimesheetEntryId) -> RepoResult<Option<TimesheetEntry>>;

    /// A user's entries in a workspace, most recent work date first
    async fn find_by_user_during(
        &self,
        user_id: UserId,
        company_id: CompanyId,
        range: DateRange,
    ) -> RepoResult<Vec<TimesheetEntry>>;

    /// Find several entries at once
    async fn find_many(&self, ids: &[TimesheetEntryId]) -> RepoResult<Vec<TimesheetEntry>>;

    /// Insert an entry with its resolved bill status
    async fn create(
        &self,
        entry: &NewTimesheetEntry,
        bill_status: BillStatus,
    ) -> RepoResult<TimesheetEntry>;

    /// Update an existing entry
    ///
    /// `read_status` is the bill status the entry was loaded with. The write
    /// fails with `StaleTimesheetEntry` when the stored status moved since.
    async fn update(&self, entry: &TimesheetEntry, read_status: BillStatus) -> RepoResult<()>;

    /// Minutes logged on a project within a date range
    async fn sum_duration(&self, project_id: ProjectId, range: DateRange) -> RepoResult<f64>;

    /// Entry joined with the names its search document needs
    async fn projection_source(
        &self,
        id: TimesheetEntryId,
    ) -> RepoResult<Option<EntryProjectionSource>>;
}

// ============================================================================
// Invoice Line Item Repository
// ============================================================================

#[async_trait]
pub trait InvoiceLineItemRepository: Send + Sync {
    /// Insert line items and mark their entries billed in one transaction
    ///
    /// Fails with `AlreadyBilled` when any entry is no longer unbilled.
    async fn bill_entries(&self, items: &[NewInvoiceLineItem])
        -> RepoResult<Vec<InvoiceLineItem>>;

    /// Line items of a client, newest first
    async fn find_by_client(&self, client_id: ClientId) -> RepoResult<Vec<InvoiceLineItem>>;
}
