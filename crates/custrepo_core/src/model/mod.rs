//! Domain model for customer records.
//!
//! # Responsibility
//! - Define the record shapes exchanged with the repository layer.
//!
//! # Invariants
//! - `customer_id` and `registration_date` are assigned by storage only.

pub mod customer;
