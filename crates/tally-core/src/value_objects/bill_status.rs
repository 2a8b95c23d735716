//! Bill status - invoicing state of a timesheet entry
//!
//! ```text
//!   non_billable <──any actor──> unbilled
//!        │                          │
//!        └──────── System ─────────>┴──> billed
//!                                          │
//!   <── System / owner / admin only ───────┘
//! ```

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use validator::ValidationError;

use super::role::Actor;

/// Invoicing state of a timesheet entry, stored as `SMALLINT`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum BillStatus {
    NonBillable = 0,
    Unbilled = 1,
    Billed = 2,
}

/// Rejected bill status change
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("You can't create a billed timesheet entry")]
    CreateBilled,

    #[error("Entries can only be billed through an invoice")]
    BillOutsideInvoice,

    #[error("You can't change the bill status of a billed timesheet entry")]
    RevertBilled,
}

impl TransitionError {
    /// Validation code used in field error maps
    pub fn code(self) -> &'static str {
        match self {
            Self::CreateBilled => "create_billed_entry",
            Self::BillOutsideInvoice => "bill_outside_invoice",
            Self::RevertBilled => "bill_status_billed",
        }
    }
}

impl From<TransitionError> for ValidationError {
    fn from(err: TransitionError) -> Self {
        ValidationError::new(err.code()).with_message(Cow::Owned(err.to_string()))
    }
}

impl BillStatus {
    /// Initial state derived from the owning project's billable flag
    #[inline]
    pub fn initial_for(project_billable: bool) -> Self {
        if project_billable {
            Self::Unbilled
        } else {
            Self::NonBillable
        }
    }

    /// Stored numeric value
    #[inline]
    pub fn as_i16(self) -> i16 {
        self as i16
    }

    /// Wire name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NonBillable => "non_billable",
            Self::Unbilled => "unbilled",
            Self::Billed => "billed",
        }
    }

    /// Whether the entry has already been invoiced
    #[inline]
    pub fn is_billed(self) -> bool {
        self == Self::Billed
    }

    /// Check the status an entry may be created with
    pub fn check_initial(requested: Self) -> Result<(), TransitionError> {
        if requested.is_billed() {
            return Err(TransitionError::CreateBilled);
        }
        Ok(())
    }

    /// Check a status change performed by `actor`
    pub fn check_transition(from: Self, to: Self, actor: Actor) -> Result<(), TransitionError> {
        match (from, to) {
            (a, b) if a == b => Ok(()),
            (Self::NonBillable, Self::Unbilled) | (Self::Unbilled, Self::NonBillable) => Ok(()),
            (_, Self::Billed) if actor.may_bill() => Ok(()),
            (_, Self::Billed) => Err(TransitionError::BillOutsideInvoice),
            (Self::Billed, _) if actor.may_revert_billed() => Ok(()),
            (Self::Billed, _) => Err(TransitionError::RevertBilled),
            // all remaining pairs are handled above
            _ => Ok(()),
        }
    }
}

impl TryFrom<i16> for BillStatus {
    type Error = i16;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::NonBillable),
            1 => Ok(Self::Unbilled),
            2 => Ok(Self::Billed),
            other => Err(other),
        }
    }
}

impl From<BillStatus> for i16 {
    fn from(status: BillStatus) -> Self {
        status.as_i16()
    }
}

impl fmt::Display for BillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::role::CompanyRole;

    const EMPLOYEE: Actor = Actor::Member(CompanyRole::Employee);
    const ADMIN: Actor = Actor::Member(CompanyRole::Admin);

    #[test]
    fn test_initial_status_follows_project() {
        assert_eq!(BillStatus::initial_for(true), BillStatus::Unbilled);
        assert_eq!(BillStatus::initial_for(false), BillStatus::NonBillable);
    }

    #[test]
    fn test_cannot_create_billed() {
        assert_eq!(
            BillStatus::check_initial(BillStatus::Billed),
            Err(TransitionError::CreateBilled)
        );
        assert!(BillStatus::check_initial(BillStatus::Unbilled).is_ok());
        assert!(BillStatus::check_initial(BillStatus::NonBillable).is_ok());
    }

    #[test]
    fn test_billable_toggle_allowed_for_everyone() {
        for actor in [EMPLOYEE, ADMIN, Actor::System] {
            assert!(
                BillStatus::check_transition(BillStatus::Unbilled, BillStatus::NonBillable, actor)
                    .is_ok()
            );
            assert!(
                BillStatus::check_transition(BillStatus::NonBillable, BillStatus::Unbilled, actor)
                    .is_ok()
            );
        }
    }

    #[test]
    fn test_employee_cannot_revert_billed() {
        assert_eq!(
            BillStatus::check_transition(BillStatus::Billed, BillStatus::Unbilled, EMPLOYEE),
            Err(TransitionError::RevertBilled)
        );
        assert_eq!(
            BillStatus::check_transition(
                BillStatus::Billed,
                BillStatus::NonBillable,
                Actor::Member(CompanyRole::BookKeeper)
            ),
            Err(TransitionError::RevertBilled)
        );
    }

    #[test]
    fn test_admin_can_revert_billed() {
        assert!(BillStatus::check_transition(BillStatus::Billed, BillStatus::Unbilled, ADMIN).is_ok());
        assert!(BillStatus::check_transition(
            BillStatus::Billed,
            BillStatus::NonBillable,
            Actor::Member(CompanyRole::Owner)
        )
        .is_ok());
    }

    #[test]
    fn test_only_system_bills() {
        assert!(
            BillStatus::check_transition(BillStatus::Unbilled, BillStatus::Billed, Actor::System)
                .is_ok()
        );
        assert_eq!(
            BillStatus::check_transition(BillStatus::Unbilled, BillStatus::Billed, ADMIN),
            Err(TransitionError::BillOutsideInvoice)
        );
    }

    #[test]
    fn test_unchanged_billed_is_not_a_transition() {
        assert!(BillStatus::check_transition(BillStatus::Billed, BillStatus::Billed, EMPLOYEE).is_ok());
    }

    #[test]
    fn test_numeric_round_trip() {
        assert_eq!(BillStatus::try_from(2), Ok(BillStatus::Billed));
        assert_eq!(BillStatus::try_from(7), Err(7));
        assert_eq!(i16::from(BillStatus::NonBillable), 0);
    }

    #[test]
    fn test_transition_error_to_validation_error() {
        let err: ValidationError = TransitionError::RevertBilled.into();
        assert_eq!(err.code, "bill_status_billed");
        assert!(err.message.is_some());
    }
}
