// src/db/connection.rs
//
// Database connection management
//
// PRINCIPLES:
// - Explicit connection pooling
// - No hidden connection creation
// - Clear error propagation
// - Thread-safe access

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Type alias for connection pool
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled connection
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Get the database file path
///
/// Database is stored in the application data directory.
/// Path structure: {APP_DATA}/pantryhub/pantryhub.db
pub fn get_database_path() -> AppResult<PathBuf> {
    let app_data_dir = dirs::data_dir()
        .ok_or_else(|| AppError::Other("Could not determine app data directory".to_string()))?;

    let pantryhub_dir = app_data_dir.join("pantryhub");

    // Ensure directory exists
    std::fs::create_dir_all(&pantryhub_dir).map_err(AppError::Io)?;

    Ok(pantryhub_dir.join("pantryhub.db"))
}

/// Create a connection pool at the default location.
pub fn create_connection_pool() -> AppResult<ConnectionPool> {
    let db_path = get_database_path()?;
    create_connection_pool_at(&db_path)
}

/// Create a connection pool for a specific database file.
///
/// Pool configuration:
/// - Max 15 connections (reasonable for a desktop app)
/// - SQLite in WAL mode for better concurrency
/// - Busy timeout set to avoid immediate errors
///
/// Note the storage layer itself is read-modify-write with no optimistic
/// check: the pool makes concurrent reads safe, but the single-writer
/// assumption still holds for mutations.
pub fn create_connection_pool_at(db_path: &Path) -> AppResult<ConnectionPool> {
    let manager = SqliteConnectionManager::file(db_path).with_init(|conn| {
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA busy_timeout = 5000;",
        )?;
        Ok(())
    });

    let pool = Pool::builder()
        .max_size(15)
        .build(manager)
        .map_err(|e| AppError::Other(format!("Failed to create connection pool: {}", e)))?;

    Ok(pool)
}

/// Get a connection from the pool
///
/// This is a convenience wrapper that provides better error messages.
pub fn get_connection(pool: &ConnectionPool) -> AppResult<PooledConn> {
    pool.get()
        .map_err(|e| AppError::Other(format!("Failed to get database connection: {}", e)))
}
