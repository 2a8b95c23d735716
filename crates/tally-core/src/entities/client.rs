//! Client entity - a customer billed by a company

use chrono::{DateTime, Utc};
use validator::Validate;

use crate::value_objects::{ClientId, CompanyId};

/// Client entity
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct Client {
    pub id: ClientId,
    pub company_id: CompanyId,
    #[validate(length(min = 1, message = "can't be blank"))]
    pub name: String,
    #[validate(email(message = "is invalid"))]
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    #[validate(length(min = 1, message = "can't be blank"))]
    pub client_code: String,
    pub discarded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Attributes of a client about to be inserted
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct NewClient {
    pub company_id: CompanyId,
    #[validate(length(min = 1, message = "can't be blank"))]
    pub name: String,
    #[validate(email(message = "is invalid"))]
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    #[validate(length(min = 1, message = "can't be blank"))]
    pub client_code: String,
}

/// Partial update; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub client_code: Option<String>,
}

impl Client {
    /// Not soft-deleted
    #[inline]
    pub fn is_kept(&self) -> bool {
        self.discarded_at.is_none()
    }

    /// Apply a partial update in place
    pub fn apply(&mut self, changes: ClientChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(phone) = changes.phone {
            self.phone = Some(phone);
        }
        if let Some(address) = changes.address {
            self.address = Some(address);
        }
        if let Some(client_code) = changes.client_code {
            self.client_code = client_code;
        }
        self.updated_at = Utc::now();
    }

    /// Mark the client discarded; projects are cascaded by the repository
    pub fn discard(&mut self, at: DateTime<Utc>) {
        if self.discarded_at.is_none() {
            self.discarded_at = Some(at);
        }
    }
}
