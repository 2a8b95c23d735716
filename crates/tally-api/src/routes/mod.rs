//! Route definitions
//!
//! All API routes organized by resource and mounted under /api/v1.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::handlers::{clients, health, invoices, projects, timesheet_entries};
use crate::state::AppState;

/// Create the main API router (health routes are kept apart so they skip rate limiting)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(project_routes())
        .merge(client_routes())
        .merge(timesheet_routes())
}

fn project_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route("/projects/:project_id", get(projects::get_project))
        .route("/projects/:project_id/members", post(projects::add_member))
        .route(
            "/projects/:project_id/members/:user_id",
            delete(projects::remove_member),
        )
}

fn client_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/clients",
            get(clients::list_clients).post(clients::create_client),
        )
        .route(
            "/clients/:client_id",
            get(clients::get_client)
                .patch(clients::update_client)
                .delete(clients::discard_client),
        )
        // Invoicing
        .route(
            "/clients/:client_id/line_item_entries",
            get(invoices::line_item_entries),
        )
        .route(
            "/clients/:client_id/invoice_line_items",
            post(invoices::create_line_items),
        )
}

fn timesheet_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/timesheet_entries",
            get(timesheet_entries::list_entries).post(timesheet_entries::create_entry),
        )
        .route(
            "/timesheet_entries/:entry_id",
            patch(timesheet_entries::update_entry),
        )
}
