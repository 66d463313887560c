//! Repository layer contracts and SQLite implementations.
//!
//! # Responsibility
//! - Translate customer use cases into parameterized SQL.
//! - Keep statement text and row mapping inside the persistence boundary.
//!
//! # Invariants
//! - "No matching row" is a successful empty result; failures are errors.

pub mod customer_repo;
