//! Company roles and the acting party of a mutation

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role a user holds inside a company (workspace)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanyRole {
    Owner,
    Admin,
    Employee,
    BookKeeper,
}

impl CompanyRole {
    /// Database / wire name of the role
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Employee => "employee",
            Self::BookKeeper => "book_keeper",
        }
    }

    /// Parse a stored role name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "owner" => Some(Self::Owner),
            "admin" => Some(Self::Admin),
            "employee" => Some(Self::Employee),
            "book_keeper" => Some(Self::BookKeeper),
            _ => None,
        }
    }

    /// Whether the role may revert a billed timesheet entry
    #[inline]
    pub fn manages_billing(self) -> bool {
        matches!(self, Self::Owner | Self::Admin)
    }

    /// Whether the role may manage clients and projects of the workspace
    #[inline]
    pub fn manages_workspace(self) -> bool {
        matches!(self, Self::Owner | Self::Admin)
    }

    /// Whether the role may turn unbilled entries into invoice line items
    #[inline]
    pub fn issues_invoices(self) -> bool {
        matches!(self, Self::Owner | Self::Admin | Self::BookKeeper)
    }
}

impl fmt::Display for CompanyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who performs a mutation
///
/// `System` is the invoicing workflow and other internal jobs. Users act
/// through the role they hold in the owning company.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    System,
    Member(CompanyRole),
}

impl Actor {
    /// Whether this actor may move an entry out of `billed`
    pub fn may_revert_billed(self) -> bool {
        match self {
            Self::System => true,
            Self::Member(role) => role.manages_billing(),
        }
    }

    /// Whether this actor may move an entry into `billed`
    pub fn may_bill(self) -> bool {
        matches!(self, Self::System)
    }
}
