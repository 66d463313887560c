//! Use-case services over repositories.
//!
//! # Responsibility
//! - Give callers intent-named entry points instead of raw CRUD.
//! - Stay storage-agnostic by depending only on repository traits.

pub mod customer_service;
