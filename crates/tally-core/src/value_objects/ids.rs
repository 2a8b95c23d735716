//! Typed record identifiers
//!
//! Every table uses a `BIGSERIAL` primary key. Wrapping the raw `i64` per
//! record type keeps a `ClientId` from being passed where a `ProjectId` is
//! expected. IDs serialize as plain JSON numbers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error when parsing an ID from a string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdParseError {
    #[error("invalid id format")]
    InvalidFormat,
}

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw database id
            #[inline]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the inner i64 value
            #[inline]
            pub const fn into_inner(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<i64>()
                    .map(Self)
                    .map_err(|_| IdParseError::InvalidFormat)
            }
        }
    };
}

record_id!(
    /// Company (workspace) id
    CompanyId
);
record_id!(
    /// User id
    UserId
);
record_id!(
    /// Client id
    ClientId
);
record_id!(
    /// Project id
    ProjectId
);
record_id!(
    /// Timesheet entry id
    TimesheetEntryId
);
record_id!(
    /// Invoice line item id
    InvoiceLineItemId
);

/// Collect the raw values of a slice of ids, for binding as a Postgres array
pub fn raw_ids<T: Copy + Into<i64>>(ids: &[T]) -> Vec<i64> {
    ids.iter().map(|&id| id.into()).collect()
}
