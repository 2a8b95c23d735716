//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use tally_core::{
    Client, EntryProjectionSource, InvoiceLineItem, LineItemCandidate, Project, TeamMember,
};

use super::responses::{
    ClientResponse, InvoiceLineItemResponse, LineItemEntryResponse, ProjectResponse,
    TeamMemberResponse, TimesheetEntryResponse,
};

// ============================================================================
// Client Mappers
// ============================================================================

impl From<&Client> for ClientResponse {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id,
            name: client.name.clone(),
            email: client.email.clone(),
            phone: client.phone.clone(),
            address: client.address.clone(),
            client_code: client.client_code.clone(),
        }
    }
}

// ============================================================================
// Project Mappers
// ============================================================================

impl From<&Project> for ProjectResponse {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            client_id: project.client_id,
            name: project.name.clone(),
            description: project.description.clone(),
            is_billable: project.billable,
        }
    }
}

impl From<TeamMember> for TeamMemberResponse {
    fn from(member: TeamMember) -> Self {
        Self {
            user_id: member.user_id,
            full_name: member.full_name,
            hourly_rate: member.hourly_rate,
        }
    }
}

// ============================================================================
// Timesheet Mappers
// ============================================================================

impl From<&EntryProjectionSource> for TimesheetEntryResponse {
    fn from(source: &EntryProjectionSource) -> Self {
        let entry = &source.entry;
        Self {
            id: entry.id,
            project: source.project_name.clone(),
            project_id: entry.project_id,
            client: source.client_name.clone(),
            duration: entry.duration,
            formatted_duration: entry.formatted_duration(),
            note: entry.note.clone(),
            work_date: entry.work_date,
            bill_status: entry.bill_status,
            team_member: tally_core::full_name(&source.user_first_name, &source.user_last_name),
        }
    }
}

// ============================================================================
// Invoice Mappers
// ============================================================================

impl From<&LineItemCandidate> for LineItemEntryResponse {
    fn from(candidate: &LineItemCandidate) -> Self {
        Self {
            timesheet_entry_id: candidate.timesheet_entry_id,
            first_name: candidate.first_name.clone(),
            last_name: candidate.last_name.clone(),
            name: candidate.name(),
            date: candidate.date,
            description: candidate.description.clone(),
            rate: candidate.rate,
            qty: candidate.quantity,
        }
    }
}

impl From<&InvoiceLineItem> for InvoiceLineItemResponse {
    fn from(item: &InvoiceLineItem) -> Self {
        Self {
            id: item.id,
            timesheet_entry_id: item.timesheet_entry_id,
            client_id: item.client_id,
            name: item.name.clone(),
            description: item.description.clone(),
            date: item.date,
            rate: item.rate,
            quantity: item.quantity,
            amount: item.amount(),
        }
    }
}
