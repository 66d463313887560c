//! Customer domain model.
//!
//! # Responsibility
//! - Define the persisted customer record and its caller-supplied subset.
//!
//! # Invariants
//! - `id` is immutable once assigned by storage.
//! - `registration_date` is read-only from the repository's perspective.

use serde::{Deserialize, Serialize};

/// Storage-assigned customer identifier (`customers.customer_id`).
pub type CustomerId = i64;

/// Customer record as read back from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Set by the storage default on insert; never written by this crate.
    pub registration_date: String,
}

/// Caller-supplied customer fields, i.e. everything `save` sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl NewCustomer {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }
}

impl Customer {
    /// Returns the mutable contact fields of this record.
    pub fn contact(&self) -> NewCustomer {
        NewCustomer {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
        }
    }
}
