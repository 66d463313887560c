//! Connection provider contract and SQLite implementation.
//!
//! # Responsibility
//! - Open one private connection per request from fixed configuration.
//! - Apply connection pragmas before handing the session to the caller.
//!
//! # Invariants
//! - A missing database file is an error unless `create_if_missing` is set.
//! - Returned connections have `foreign_keys=ON` and the configured busy
//!   timeout; dropping one closes the session.

use super::{ConnectionError, DbResult};
use crate::config::DbConfig;
use crate::logging::{sanitize_message, MAX_LOGGED_ERROR_CHARS};
use log::{debug, error};
use rusqlite::{Connection, OpenFlags};
use std::time::Instant;

/// Source of database connections for repositories.
///
/// Repositories depend on this seam rather than on a concrete opener, so a
/// pooled implementation can be substituted without touching them.
pub trait ConnectionProvider {
    fn get_connection(&self) -> DbResult<Connection>;
}

impl<P: ConnectionProvider + ?Sized> ConnectionProvider for &P {
    fn get_connection(&self) -> DbResult<Connection> {
        (**self).get_connection()
    }
}

/// Opens a fresh SQLite connection on every call.
#[derive(Debug, Clone)]
pub struct SqliteConnectionProvider {
    config: DbConfig,
}

impl SqliteConnectionProvider {
    pub fn new(config: DbConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DbConfig {
        &self.config
    }

    fn open(&self) -> DbResult<Connection> {
        let path = &self.config.path;
        if !self.config.create_if_missing && !path.exists() {
            return Err(ConnectionError::MissingDatabase { path: path.clone() });
        }

        let mut flags = OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        if self.config.create_if_missing {
            flags |= OpenFlags::SQLITE_OPEN_CREATE;
        }

        let conn =
            Connection::open_with_flags(path, flags).map_err(|source| ConnectionError::Open {
                path: path.clone(),
                source,
            })?;

        configure(&conn, &self.config).map_err(|source| ConnectionError::Configure {
            path: path.clone(),
            source,
        })?;

        Ok(conn)
    }
}

impl ConnectionProvider for SqliteConnectionProvider {
    fn get_connection(&self) -> DbResult<Connection> {
        let started_at = Instant::now();
        debug!("event=db_connect module=db status=start");

        match self.open() {
            Ok(conn) => {
                debug!(
                    "event=db_connect module=db status=ok duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(conn)
            }
            Err(err) => {
                error!(
                    "event=db_connect module=db status=error duration_ms={} error_code={} error={}",
                    started_at.elapsed().as_millis(),
                    err.code(),
                    sanitize_message(&err.to_string(), MAX_LOGGED_ERROR_CHARS)
                );
                Err(err)
            }
        }
    }
}

fn configure(conn: &Connection, config: &DbConfig) -> rusqlite::Result<()> {
    conn.busy_timeout(config.busy_timeout())?;
    // Also the first statement to touch the file header, so a non-database
    // file fails here rather than on the first repository query.
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    let _: i64 = conn.query_row("SELECT count(*) FROM sqlite_master;", [], |row| row.get(0))?;
    Ok(())
}
