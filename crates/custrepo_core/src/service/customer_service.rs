//! Customer use-case service.
//!
//! # Invariants
//! - Service APIs never bypass the repository contract.
//! - Repository errors are returned unchanged.

use crate::model::customer::{Customer, CustomerId, NewCustomer};
use crate::repo::customer_repo::{CustomerRepository, RepoResult};

/// Use-case wrapper for customer CRUD operations.
pub struct CustomerService<R: CustomerRepository> {
    repo: R,
}

impl<R: CustomerRepository> CustomerService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a customer and returns the storage-assigned id.
    pub fn register(
        &self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> RepoResult<CustomerId> {
        self.repo
            .save(&NewCustomer::new(first_name, last_name, email))
    }

    pub fn get(&self, id: CustomerId) -> RepoResult<Option<Customer>> {
        self.repo.find_by_id(id)
    }

    pub fn list(&self) -> RepoResult<Vec<Customer>> {
        self.repo.find_all()
    }

    /// Replaces name and email of customer `id`.
    ///
    /// Never creates a row; returns `false` when `id` does not exist.
    pub fn change_contact(&self, id: CustomerId, contact: &NewCustomer) -> RepoResult<bool> {
        self.repo.update(id, contact)
    }

    /// Removes customer `id`; `false` when it did not exist.
    pub fn remove(&self, id: CustomerId) -> RepoResult<bool> {
        self.repo.delete(id)
    }
}
