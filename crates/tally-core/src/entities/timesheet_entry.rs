//! Timesheet entry entity and its bill status guard

use chrono::{DateTime, NaiveDate, Utc};
use std::borrow::Cow;
use validator::{ValidationError, ValidationErrors};

use crate::value_objects::{Actor, BillStatus, ProjectId, TimesheetEntryId, UserId};

/// Upper bound for a single entry, in minutes
pub const MAX_DURATION_MINUTES: f64 = 6_000_000.0;

/// Logged work of one user on one project for one day
#[derive(Debug, Clone, PartialEq)]
pub struct TimesheetEntry {
    pub id: TimesheetEntryId,
    pub project_id: ProjectId,
    pub user_id: UserId,
    pub work_date: NaiveDate,
    /// Minutes
    pub duration: f64,
    pub note: String,
    pub bill_status: BillStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Attributes of an entry about to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewTimesheetEntry {
    pub project_id: ProjectId,
    pub user_id: UserId,
    pub work_date: NaiveDate,
    pub duration: f64,
    pub note: String,
    /// Derived from the project when absent
    pub bill_status: Option<BillStatus>,
}

/// Partial update; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimesheetEntryChanges {
    pub project_id: Option<ProjectId>,
    pub work_date: Option<NaiveDate>,
    pub duration: Option<f64>,
    pub note: Option<String>,
    pub bill_status: Option<BillStatus>,
}

impl TimesheetEntryChanges {
    pub fn is_empty(&self) -> bool {
        self.project_id.is_none()
            && self.work_date.is_none()
            && self.duration.is_none()
            && self.note.is_none()
            && self.bill_status.is_none()
    }
}

fn check_duration(duration: f64) -> Result<(), ValidationError> {
    if duration.is_finite() && (0.0..=MAX_DURATION_MINUTES).contains(&duration) {
        return Ok(());
    }
    let mut err = ValidationError::new("range").with_message(Cow::Borrowed(
        "must be greater than or equal to 0 and less than or equal to 6000000",
    ));
    err.add_param(Cow::Borrowed("value"), &duration);
    Err(err)
}

impl NewTimesheetEntry {
    /// Validate the entry and resolve its initial bill status
    ///
    /// `project_billable` is the billable flag of the owning project.
    pub fn resolve_bill_status(&self, project_billable: bool) -> Result<BillStatus, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(err) = check_duration(self.duration) {
            errors.add("duration", err);
        }

        let status = self
            .bill_status
            .unwrap_or_else(|| BillStatus::initial_for(project_billable));
        if let Err(err) = BillStatus::check_initial(status) {
            errors.add("bill_status", err.into());
        }

        if errors.is_empty() {
            Ok(status)
        } else {
            Err(errors)
        }
    }
}

impl TimesheetEntry {
    /// Apply a partial update on behalf of `actor`
    ///
    /// Nothing is modified when any check fails.
    pub fn apply_changes(
        &mut self,
        changes: TimesheetEntryChanges,
        actor: Actor,
    ) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(duration) = changes.duration {
            if let Err(err) = check_duration(duration) {
                errors.add("duration", err);
            }
        }
        if let Some(next) = changes.bill_status {
            if let Err(err) = BillStatus::check_transition(self.bill_status, next, actor) {
                errors.add("bill_status", err.into());
            }
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        if let Some(project_id) = changes.project_id {
            self.project_id = project_id;
        }
        if let Some(work_date) = changes.work_date {
            self.work_date = work_date;
        }
        if let Some(duration) = changes.duration {
            self.duration = duration;
        }
        if let Some(note) = changes.note {
            self.note = note;
        }
        if let Some(status) = changes.bill_status {
            self.bill_status = status;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Move the entry into `billed` as part of invoicing
    pub fn mark_billed(&mut self) -> Result<(), ValidationErrors> {
        self.apply_changes(
            TimesheetEntryChanges {
                bill_status: Some(BillStatus::Billed),
                ..TimesheetEntryChanges::default()
            },
            Actor::System,
        )
    }

    /// Duration rendered as `HH:MM`
    pub fn formatted_duration(&self) -> String {
        let minutes = self.duration as i64;
        format!("{:02}:{:02}", minutes / 60, minutes % 60)
    }
}
