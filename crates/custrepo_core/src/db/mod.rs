//! SQLite connection acquisition and schema bootstrap.
//!
//! # Responsibility
//! - Produce ready-to-use connections from a `DbConfig`.
//! - Provide the idempotent `customers` table definition.
//!
//! # Invariants
//! - Connection failures always surface as `ConnectionError`; nothing here
//!   swallows them.

mod provider;
pub mod schema;

pub use provider::{ConnectionProvider, SqliteConnectionProvider};
pub use schema::ensure_schema;

use std::path::PathBuf;
use thiserror::Error;

pub type DbResult<T> = Result<T, ConnectionError>;

/// Failure to establish a usable database session.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("database `{}` does not exist", .path.display())]
    MissingDatabase { path: PathBuf },
    #[error("failed to open database `{}`: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    #[error("failed to configure connection to `{}`: {source}", .path.display())]
    Configure {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
}

impl ConnectionError {
    /// Stable code used in `error_code=` log fields.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingDatabase { .. } => "db_missing",
            Self::Open { .. } => "db_open_failed",
            Self::Configure { .. } => "db_configure_failed",
        }
    }
}
