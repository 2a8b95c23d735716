//! Test fixtures and data generators
//!
//! Workspaces and users are seeded through the repositories because the API
//! has no sign-up surface; everything else goes through HTTP.

use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tally_core::entities::{Company, CompanyMember, NewUser, User};
use tally_core::traits::{CompanyRepository, UserRepository};
use tally_core::CompanyRole;
use tally_db::{PgCompanyRepository, PgUserRepository};

use crate::helpers::TestServer;

static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique suffix for names, emails and client codes
pub fn unique_suffix() -> String {
    format!(
        "{}{}",
        Utc::now().timestamp_micros(),
        COUNTER.fetch_add(1, Ordering::SeqCst)
    )
}

/// A seeded user together with a valid access token
#[derive(Debug, Clone)]
pub struct Member {
    pub user: User,
    pub token: String,
}

/// A company with one member per role that matters to the API
#[derive(Debug, Clone)]
pub struct SeededWorkspace {
    pub company: Company,
    pub owner: Member,
    pub employee: Member,
    pub book_keeper: Member,
}

/// Create a user, optionally joining `company` with `role` as their current workspace
pub async fn seed_user(
    server: &TestServer,
    company: Option<&Company>,
    role: CompanyRole,
) -> Result<Member> {
    let pool = server.state().service_context().pool().clone();
    let users = PgUserRepository::new(pool.clone());
    let companies = PgCompanyRepository::new(pool);

    let suffix = unique_suffix();
    let user = users
        .create(&NewUser {
            first_name: "Test".to_string(),
            last_name: format!("User{suffix}"),
            email: format!("user_{suffix}@example.com"),
        })
        .await?;

    if let Some(company) = company {
        companies
            .add_member(&CompanyMember::new(company.id, user.id, role))
            .await?;
        users.set_current_workspace(user.id, company.id).await?;
    }

    let token = server.state().jwt_service().issue_access_token(user.id)?;
    Ok(Member { user, token })
}

pub async fn seed_workspace(server: &TestServer) -> Result<SeededWorkspace> {
    let companies = PgCompanyRepository::new(server.state().service_context().pool().clone());
    let company = companies
        .create(&format!("Company {}", unique_suffix()))
        .await?;

    Ok(SeededWorkspace {
        owner: seed_user(server, Some(&company), CompanyRole::Owner).await?,
        employee: seed_user(server, Some(&company), CompanyRole::Employee).await?,
        book_keeper: seed_user(server, Some(&company), CompanyRole::BookKeeper).await?,
        company,
    })
}

/// Body for `POST /clients` with a unique email and client code
pub fn client_body(name: &str) -> Value {
    let suffix = unique_suffix();
    json!({
        "name": name,
        "email": format!("client_{suffix}@example.com"),
        "phone": null,
        "address": "1 Main St",
        "client_code": format!("C{suffix}"),
    })
}

pub fn project_body(client_id: i64, name: &str, billable: bool) -> Value {
    json!({
        "client_id": client_id,
        "name": name,
        "description": null,
        "billable": billable,
    })
}

#[derive(Debug, Deserialize)]
pub struct ClientBody {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub client_code: String,
}

#[derive(Debug, Deserialize)]
pub struct ProjectBody {
    pub id: i64,
    pub client_id: i64,
    pub name: String,
    pub is_billable: bool,
}

#[derive(Debug, Deserialize)]
pub struct ProjectListBody {
    pub projects: Vec<ProjectBody>,
}

#[derive(Debug, Deserialize)]
pub struct EntryBody {
    pub id: i64,
    pub project_id: i64,
    pub duration: f64,
    pub formatted_duration: String,
    pub bill_status: String,
    pub team_member: String,
}

#[derive(Debug, Deserialize)]
pub struct EntriesBody {
    pub entries: Vec<EntryBody>,
}

#[derive(Debug, Deserialize)]
pub struct LineItemBody {
    pub timesheet_entry_id: i64,
    pub rate: f64,
    pub quantity: f64,
    pub amount: f64,
}

#[derive(Debug, Deserialize)]
pub struct LineItemsBody {
    pub line_items: Vec<LineItemBody>,
}
