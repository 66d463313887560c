//! Customer repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide find/save/update/delete over the `customers` table.
//! - Acquire a private connection per call through a `ConnectionProvider`.
//!
//! # Invariants
//! - SQL is never assembled from caller data; values are bound positionally.
//! - `save`/`update` never write `customer_id` or `registration_date`.
//! - The connection is dropped on every exit path before the call returns.
//! - Read paths reject rows with NULL text columns instead of masking them;
//!   `customer_id` is taken as stored.

use crate::db::{ConnectionError, ConnectionProvider};
use crate::logging::{sanitize_message, MAX_LOGGED_ERROR_CHARS};
use crate::model::customer::{Customer, CustomerId, NewCustomer};
use log::{debug, error};
use rusqlite::{params, Connection, Row};
use std::time::Instant;
use thiserror::Error;

const CUSTOMER_SELECT_SQL: &str = "SELECT
    customer_id,
    first_name,
    last_name,
    email,
    registration_date
FROM customers";

pub type RepoResult<T> = Result<T, RepoError>;

/// A prepared statement failed to prepare, bind or execute.
#[derive(Debug, Error)]
#[error("{operation} query failed: {source}")]
pub struct QueryError {
    pub operation: &'static str,
    #[source]
    pub source: rusqlite::Error,
}

#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    Connection(#[from] ConnectionError),
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error("invalid persisted customer data: {0}")]
    InvalidData(String),
}

impl RepoError {
    fn code(&self) -> &'static str {
        match self {
            Self::Connection(err) => err.code(),
            Self::Query(_) => "query_failed",
            Self::InvalidData(_) => "invalid_data",
        }
    }
}

/// Repository interface for customer CRUD operations.
pub trait CustomerRepository {
    /// Returns the customer with `id`, or `None` when no row matches.
    fn find_by_id(&self, id: CustomerId) -> RepoResult<Option<Customer>>;
    /// Returns every customer in storage order.
    fn find_all(&self) -> RepoResult<Vec<Customer>>;
    /// Inserts `customer` and returns the storage-assigned id.
    fn save(&self, customer: &NewCustomer) -> RepoResult<CustomerId>;
    /// Rewrites name and email of customer `id`; `false` when no row matched.
    fn update(&self, id: CustomerId, customer: &NewCustomer) -> RepoResult<bool>;
    /// Removes the row with `id`; `false` when no row matched.
    fn delete(&self, id: CustomerId) -> RepoResult<bool>;
}

/// SQLite-backed customer repository.
pub struct SqliteCustomerRepository<P> {
    provider: P,
}

impl<P: ConnectionProvider> SqliteCustomerRepository<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Runs `body` on a freshly acquired connection and logs the outcome.
    fn with_connection<T>(
        &self,
        operation: &'static str,
        body: impl FnOnce(&Connection) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let started_at = Instant::now();
        let result = self
            .provider
            .get_connection()
            .map_err(RepoError::from)
            .and_then(|conn| body(&conn));

        match &result {
            Ok(_) => debug!(
                "event=customer_{} module=repo status=ok duration_ms={}",
                operation,
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=customer_{} module=repo status=error duration_ms={} error_code={} error={}",
                operation,
                started_at.elapsed().as_millis(),
                err.code(),
                sanitize_message(&err.to_string(), MAX_LOGGED_ERROR_CHARS)
            ),
        }
        result
    }
}

impl<P: ConnectionProvider> CustomerRepository for SqliteCustomerRepository<P> {
    fn find_by_id(&self, id: CustomerId) -> RepoResult<Option<Customer>> {
        self.with_connection("find_by_id", |conn| {
            let query = query_error("find_by_id");
            let mut stmt = conn
                .prepare(&format!("{CUSTOMER_SELECT_SQL} WHERE customer_id = ?1;"))
                .map_err(query)?;
            let mut rows = stmt.query(params![id]).map_err(query)?;

            if let Some(row) = rows.next().map_err(query)? {
                return Ok(Some(parse_customer_row(row)?));
            }

            Ok(None)
        })
    }

    fn find_all(&self) -> RepoResult<Vec<Customer>> {
        self.with_connection("find_all", |conn| {
            let query = query_error("find_all");
            let mut stmt = conn
                .prepare(&format!("{CUSTOMER_SELECT_SQL};"))
                .map_err(query)?;
            let mut rows = stmt.query([]).map_err(query)?;
            let mut customers = Vec::new();

            while let Some(row) = rows.next().map_err(query)? {
                customers.push(parse_customer_row(row)?);
            }

            Ok(customers)
        })
    }

    fn save(&self, customer: &NewCustomer) -> RepoResult<CustomerId> {
        self.with_connection("save", |conn| {
            let query = query_error("save");
            let mut stmt = conn
                .prepare("INSERT INTO customers (first_name, last_name, email) VALUES (?1, ?2, ?3);")
                .map_err(query)?;
            let id = stmt
                .insert(params![
                    customer.first_name.as_str(),
                    customer.last_name.as_str(),
                    customer.email.as_str(),
                ])
                .map_err(query)?;
            Ok(id)
        })
    }

    fn update(&self, id: CustomerId, customer: &NewCustomer) -> RepoResult<bool> {
        self.with_connection("update", |conn| {
            let query = query_error("update");
            let mut stmt = conn
                .prepare(
                    "UPDATE customers
                     SET
                        first_name = ?1,
                        last_name = ?2,
                        email = ?3
                     WHERE customer_id = ?4;",
                )
                .map_err(query)?;
            let changed = stmt
                .execute(params![
                    customer.first_name.as_str(),
                    customer.last_name.as_str(),
                    customer.email.as_str(),
                    id,
                ])
                .map_err(query)?;
            Ok(changed > 0)
        })
    }

    fn delete(&self, id: CustomerId) -> RepoResult<bool> {
        self.with_connection("delete", |conn| {
            let query = query_error("delete");
            let mut stmt = conn
                .prepare("DELETE FROM customers WHERE customer_id = ?1;")
                .map_err(query)?;
            let changed = stmt.execute(params![id]).map_err(query)?;
            Ok(changed > 0)
        })
    }
}

fn query_error(operation: &'static str) -> impl Fn(rusqlite::Error) -> RepoError + Copy {
    move |source| RepoError::Query(QueryError { operation, source })
}

fn parse_customer_row(row: &Row<'_>) -> RepoResult<Customer> {
    let column = |name: &str, source: rusqlite::Error| {
        RepoError::InvalidData(format!("unreadable customers.{name}: {source}"))
    };

    Ok(Customer {
        id: row
            .get("customer_id")
            .map_err(|err| column("customer_id", err))?,
        first_name: row
            .get("first_name")
            .map_err(|err| column("first_name", err))?,
        last_name: row
            .get("last_name")
            .map_err(|err| column("last_name", err))?,
        email: row.get("email").map_err(|err| column("email", err))?,
        registration_date: row
            .get("registration_date")
            .map_err(|err| column("registration_date", err))?,
    })
}
