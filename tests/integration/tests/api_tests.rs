//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL, JWT_SECRET
//!
//! Search documents go to the in-memory index, so Redis is not needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use chrono::Utc;
use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;
use serde_json::{json, Value};
use tally_core::CompanyRole;

fn today() -> String {
    Utc::now().date_naive().to_string()
}

/// Create a client as the workspace owner
async fn create_client(server: &TestServer, ws: &SeededWorkspace, name: &str) -> ClientBody {
    let response = server
        .post_auth("/api/v1/clients", &ws.owner.token, &client_body(name))
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn create_project(
    server: &TestServer,
    ws: &SeededWorkspace,
    client_id: i64,
    name: &str,
    billable: bool,
) -> ProjectBody {
    let response = server
        .post_auth(
            "/api/v1/projects",
            &ws.owner.token,
            &project_body(client_id, name, billable),
        )
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn add_member(
    server: &TestServer,
    ws: &SeededWorkspace,
    project_id: i64,
    member: &Member,
    hourly_rate: f64,
) {
    let response = server
        .post_auth(
            &format!("/api/v1/projects/{project_id}/members"),
            &ws.owner.token,
            &json!({ "user_id": member.user.id, "hourly_rate": hourly_rate }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
}

async fn log_time(
    server: &TestServer,
    member: &Member,
    project_id: i64,
    duration: f64,
) -> EntryBody {
    let response = server
        .post_auth(
            "/api/v1/timesheet_entries",
            &member.token,
            &json!({
                "project_id": project_id,
                "work_date": today(),
                "duration": duration,
                "note": "pairing",
            }),
        )
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

// ============================================================================
// Health / Auth Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/health").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get("/health/ready").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_unauthenticated_request() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/v1/clients").await.unwrap();
    let body: Value = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(
        body["error"]["message"],
        "You need to sign in or sign up before continuing."
    );

    let response = server
        .get_auth("/api/v1/clients", "garbage.token.value")
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_user_without_workspace_is_forbidden() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let loner = seed_user(&server, None, CompanyRole::Employee).await.unwrap();

    let response = server.get_auth("/api/v1/projects", &loner.token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Client Tests
// ============================================================================

#[tokio::test]
async fn test_client_lifecycle() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let ws = seed_workspace(&server).await.unwrap();

    let client = create_client(&server, &ws, "Acme").await;
    assert_eq!(client.name, "Acme");

    // Rename
    let response = server
        .patch_auth(
            &format!("/api/v1/clients/{}", client.id),
            &ws.owner.token,
            &json!({ "name": "Acme Corp" }),
        )
        .await
        .unwrap();
    let updated: ClientBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.name, "Acme Corp");
    assert_eq!(updated.email, client.email);
    assert_eq!(updated.client_code, client.client_code);

    // Listed with zero minutes this week
    let response = server
        .get_auth("/api/v1/clients?time_frame=week", &ws.employee.token)
        .await
        .unwrap();
    let list: Value = assert_json(response, StatusCode::OK).await.unwrap();
    let details = list["client_details"].as_array().unwrap();
    assert_eq!(details.len(), 1);
    assert_eq!(details[0]["name"], "Acme Corp");
    assert_eq!(list["total_minutes"], 0.0);

    // Discard hides it
    let response = server
        .delete_auth(&format!("/api/v1/clients/{}", client.id), &ws.owner.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .get_auth(&format!("/api/v1/clients/{}", client.id), &ws.owner.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_duplicate_client_email_is_unprocessable() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let ws = seed_workspace(&server).await.unwrap();
    let client = create_client(&server, &ws, "Acme").await;

    let mut body = client_body("Other");
    body["email"] = json!(client.email);

    let response = server
        .post_auth("/api/v1/clients", &ws.owner.token, &body)
        .await
        .unwrap();
    let error: Value = assert_json(response, StatusCode::UNPROCESSABLE_ENTITY)
        .await
        .unwrap();
    assert_eq!(error["error"]["details"]["email"][0]["code"], "taken");
}

#[tokio::test]
async fn test_employee_cannot_manage_clients() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let ws = seed_workspace(&server).await.unwrap();

    let response = server
        .post_auth("/api/v1/clients", &ws.employee.token, &client_body("Nope"))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_other_workspace_client_is_not_found() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let ours = seed_workspace(&server).await.unwrap();
    let theirs = seed_workspace(&server).await.unwrap();
    let foreign = create_client(&server, &theirs, "Foreign").await;

    let response = server
        .get_auth(&format!("/api/v1/clients/{}", foreign.id), &ours.owner.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Project Tests
// ============================================================================

#[tokio::test]
async fn test_project_filters() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let ws = seed_workspace(&server).await.unwrap();

    let acme = create_client(&server, &ws, "Acme").await;
    let globex = create_client(&server, &ws, "Globex").await;
    let website = create_project(&server, &ws, acme.id, "Website", true).await;
    let audit = create_project(&server, &ws, acme.id, "Audit", false).await;
    let app = create_project(&server, &ws, globex.id, "Mobile App", true).await;
    add_member(&server, &ws, website.id, &ws.employee, 80.0).await;
    add_member(&server, &ws, app.id, &ws.employee, 80.0).await;

    let names = |list: &ProjectListBody| -> Vec<String> {
        list.projects.iter().map(|p| p.name.clone()).collect()
    };

    let response = server.get_auth("/api/v1/projects", &ws.owner.token).await.unwrap();
    let all: ProjectListBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(names(&all), ["Audit", "Mobile App", "Website"]);

    let path = format!("/api/v1/projects?client_id[]={}", acme.id);
    let response = server.get_auth(&path, &ws.owner.token).await.unwrap();
    let by_client: ProjectListBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(names(&by_client), ["Audit", "Website"]);
    assert_eq!(by_client.projects[0].id, audit.id);
    assert!(by_client.projects.iter().all(|p| p.client_id == acme.id));

    let path = format!(
        "/api/v1/projects?user_id[]={}&billable=true",
        ws.employee.user.id
    );
    let response = server.get_auth(&path, &ws.owner.token).await.unwrap();
    let by_member: ProjectListBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(names(&by_member), ["Mobile App", "Website"]);
    assert!(by_member.projects.iter().all(|p| p.is_billable));

    let response = server
        .get_auth("/api/v1/projects?search=glob", &ws.owner.token)
        .await
        .unwrap();
    let by_search: ProjectListBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(names(&by_search), ["Mobile App"]);
    assert_eq!(by_search.projects[0].id, app.id);
}

#[tokio::test]
async fn test_project_team_membership() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let ws = seed_workspace(&server).await.unwrap();
    let client = create_client(&server, &ws, "Acme").await;
    let project = create_project(&server, &ws, client.id, "Website", true).await;

    // Outsiders cannot join
    let outsider = seed_user(&server, None, CompanyRole::Employee).await.unwrap();
    let response = server
        .post_auth(
            &format!("/api/v1/projects/{}/members", project.id),
            &ws.owner.token,
            &json!({ "user_id": outsider.user.id, "hourly_rate": 50.0 }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNPROCESSABLE_ENTITY).await.unwrap();

    // Negative rates are rejected before any record is touched
    let response = server
        .post_auth(
            &format!("/api/v1/projects/{}/members", project.id),
            &ws.owner.token,
            &json!({ "user_id": ws.employee.user.id, "hourly_rate": -1.0 }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNPROCESSABLE_ENTITY).await.unwrap();

    add_member(&server, &ws, project.id, &ws.employee, 95.0).await;

    let response = server
        .get_auth(&format!("/api/v1/projects/{}", project.id), &ws.employee.token)
        .await
        .unwrap();
    let shown: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(shown["name"], "Website");
    assert_eq!(shown["client_name"], "Acme");
    assert_eq!(shown["team"].as_array().unwrap().len(), 1);

    let member_path = format!(
        "/api/v1/projects/{}/members/{}",
        project.id, ws.employee.user.id
    );
    let response = server.delete_auth(&member_path, &ws.owner.token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.delete_auth(&member_path, &ws.owner.token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Timesheet Tests
// ============================================================================

#[tokio::test]
async fn test_timesheet_entries() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let ws = seed_workspace(&server).await.unwrap();
    let client = create_client(&server, &ws, "Acme").await;
    let billable = create_project(&server, &ws, client.id, "Website", true).await;
    let internal = create_project(&server, &ws, client.id, "Internal", false).await;

    let entry = log_time(&server, &ws.employee, billable.id, 135.0).await;
    assert_eq!(entry.bill_status, "unbilled");
    assert_eq!(entry.formatted_duration, "02:15");
    assert_eq!(entry.project_id, billable.id);

    let other = log_time(&server, &ws.employee, internal.id, 30.0).await;
    assert_eq!(other.bill_status, "non_billable");

    // Entries cannot start out billed
    let response = server
        .post_auth(
            "/api/v1/timesheet_entries",
            &ws.employee.token,
            &json!({
                "project_id": billable.id,
                "work_date": today(),
                "duration": 10.0,
                "bill_status": "billed",
            }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNPROCESSABLE_ENTITY).await.unwrap();

    // Only the caller's entries are listed
    log_time(&server, &ws.owner, billable.id, 60.0).await;
    let path = format!("/api/v1/timesheet_entries?from={}&to={}", today(), today());
    let response = server.get_auth(&path, &ws.employee.token).await.unwrap();
    let listed: EntriesBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(listed.entries.len(), 2);

    // Edit duration
    let response = server
        .patch_auth(
            &format!("/api/v1/timesheet_entries/{}", entry.id),
            &ws.employee.token,
            &json!({ "duration": 150.0 }),
        )
        .await
        .unwrap();
    let edited: EntryBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(edited.duration, 150.0);

    // Employees cannot bill by hand
    let response = server
        .patch_auth(
            &format!("/api/v1/timesheet_entries/{}", entry.id),
            &ws.employee.token,
            &json!({ "bill_status": "billed" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNPROCESSABLE_ENTITY).await.unwrap();

    // Client report counts the logged minutes
    let response = server
        .get_auth(&format!("/api/v1/clients/{}", client.id), &ws.owner.token)
        .await
        .unwrap();
    let report: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(report["total_minutes"], 240.0);
}

// ============================================================================
// Invoice Tests
// ============================================================================

#[tokio::test]
async fn test_invoice_line_items() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let ws = seed_workspace(&server).await.unwrap();
    let client = create_client(&server, &ws, "Acme").await;
    let project = create_project(&server, &ws, client.id, "Website", true).await;
    add_member(&server, &ws, project.id, &ws.employee, 120.0).await;

    let first = log_time(&server, &ws.employee, project.id, 90.0).await;
    let second = log_time(&server, &ws.employee, project.id, 30.0).await;

    // Employees have no access to invoicing
    let candidates_path = format!("/api/v1/clients/{}/line_item_entries", client.id);
    let response = server
        .get_auth(&candidates_path, &ws.employee.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let path = format!("{candidates_path}?selected_entries[]={}", second.id);
    let response = server.get_auth(&path, &ws.book_keeper.token).await.unwrap();
    let candidates: Value = assert_json(response, StatusCode::OK).await.unwrap();
    let candidates = candidates["new_line_item_entries"].as_array().unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0]["timesheet_entry_id"], first.id);
    assert_eq!(candidates[0]["rate"], 120.0);

    let bill_path = format!("/api/v1/clients/{}/invoice_line_items", client.id);
    let response = server
        .post_auth(
            &bill_path,
            &ws.book_keeper.token,
            &json!({ "timesheet_entry_ids": [first.id] }),
        )
        .await
        .unwrap();
    let billed: LineItemsBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(billed.line_items.len(), 1);
    assert_eq!(billed.line_items[0].timesheet_entry_id, first.id);
    assert_eq!(billed.line_items[0].quantity, 90.0);
    assert_eq!(billed.line_items[0].amount, 180.0);

    // Billing twice is rejected
    let response = server
        .post_auth(
            &bill_path,
            &ws.book_keeper.token,
            &json!({ "timesheet_entry_ids": [first.id] }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNPROCESSABLE_ENTITY).await.unwrap();

    // The billed entry is locked for its author
    let entry_path = format!("/api/v1/timesheet_entries/{}", first.id);
    let response = server
        .patch_auth(&entry_path, &ws.employee.token, &json!({ "bill_status": "unbilled" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNPROCESSABLE_ENTITY).await.unwrap();

    // Owners may revert it
    let response = server
        .patch_auth(&entry_path, &ws.owner.token, &json!({ "bill_status": "unbilled" }))
        .await
        .unwrap();
    let reverted: EntryBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(reverted.bill_status, "unbilled");

    // Empty selections never reach the database
    let response = server
        .post_auth(
            &bill_path,
            &ws.book_keeper.token,
            &json!({ "timesheet_entry_ids": [] }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNPROCESSABLE_ENTITY).await.unwrap();
}
