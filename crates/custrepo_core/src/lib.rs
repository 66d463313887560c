//! Customer data-access layer.
//!
//! Connection acquisition, the `customers` repository and a thin use-case
//! service on top of it.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{AppConfig, DbConfig, LogConfig};
pub use db::{ConnectionError, ConnectionProvider, SqliteConnectionProvider};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget, LoggingError};
pub use model::customer::{Customer, CustomerId, NewCustomer};
pub use repo::customer_repo::{
    CustomerRepository, QueryError, RepoError, RepoResult, SqliteCustomerRepository,
};
pub use service::customer_service::CustomerService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
