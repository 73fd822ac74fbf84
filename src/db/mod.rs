// src/db/mod.rs
//
// Database module
//
// Provides:
// - Connection pooling
// - Schema initialization
// - Blob-level migrations for the stored JSON document

pub mod connection;
pub mod migrations;

pub use connection::{
    create_connection_pool, create_connection_pool_at, get_connection, get_database_path,
    ConnectionPool, PooledConn,
};

pub use migrations::{initialize_database, migrate_blob, CURRENT_BLOB_VERSION};
