// src/db/migrations.rs
//
// Schema initialization and blob migrations
//
// Two versions are tracked independently:
// - the SQL schema version (the tables in schema.sql);
// - the blob version of the JSON document stored under the inventory key.
//
// Blob migrations run once, at read time, from the stored version up to
// CURRENT_BLOB_VERSION, and the migrated document is written back. Reading
// an already-migrated blob is a no-op (idempotent).

use rusqlite::Connection;
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// Current SQL schema version
const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Current version of the persisted JSON document.
///
/// v1: legacy layout with an `foodItems` array
/// v2: `foodItems` renamed to `inventoryItems`
pub const CURRENT_BLOB_VERSION: i32 = 2;

/// Initialize the database schema
///
/// Safe to call multiple times (idempotent).
pub fn initialize_database(conn: &Connection) -> AppResult<()> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        apply_initial_schema(conn)?;
        set_schema_version(conn, 1)?;
    } else if current_version < CURRENT_SCHEMA_VERSION {
        return Err(AppError::Other(format!(
            "Schema version {} is outdated. Expected {}. Manual migration required.",
            current_version, CURRENT_SCHEMA_VERSION
        )));
    } else if current_version > CURRENT_SCHEMA_VERSION {
        return Err(AppError::Other(format!(
            "Schema version {} is newer than supported {}. Update the application.",
            current_version, CURRENT_SCHEMA_VERSION
        )));
    }

    Ok(())
}

/// Get current schema version
/// Returns 0 if schema_version table doesn't exist (fresh database)
fn get_schema_version(conn: &Connection) -> AppResult<i32> {
    let table_exists: bool = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )
        .map_err(AppError::Database)?;

    if !table_exists {
        return Ok(0);
    }

    let version: Option<i32> = conn
        .query_row("SELECT MAX(version) FROM schema_version", [], |row| {
            row.get(0)
        })
        .map_err(AppError::Database)?;

    Ok(version.unwrap_or(0))
}

fn set_schema_version(conn: &Connection, version: i32) -> AppResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
        [version],
    )
    .map_err(AppError::Database)?;

    Ok(())
}

/// Apply initial schema (version 1)
fn apply_initial_schema(conn: &Connection) -> AppResult<()> {
    let schema = include_str!("../../schema.sql");

    conn.execute_batch(schema)
        .map_err(|e| AppError::Other(format!("Failed to apply initial schema: {}", e)))?;

    Ok(())
}

/// Migrate a stored JSON document from `from_version` to the current blob
/// version, applying each step in order. Returns whether the document was
/// changed.
pub fn migrate_blob(doc: &mut Value, from_version: i32) -> AppResult<bool> {
    let mut version = from_version;
    let mut changed = false;

    while version < CURRENT_BLOB_VERSION {
        match version {
            1 => {
                rename_food_items(doc);
                changed = true;
            }
            other => {
                return Err(AppError::Other(format!(
                    "No migration registered for blob version {}",
                    other
                )));
            }
        }
        version += 1;
    }

    Ok(changed)
}

/// v1 -> v2: the item array used to be called `foodItems`.
fn rename_food_items(doc: &mut Value) {
    if let Some(obj) = doc.as_object_mut() {
        if obj.contains_key("foodItems") && !obj.contains_key("inventoryItems") {
            if let Some(items) = obj.remove("foodItems") {
                log::info!("Migrating stored database: renaming foodItems to inventoryItems");
                obj.insert("inventoryItems".to_string(), items);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;
    use serde_json::json;

    fn test_connection() -> Connection {
        Connection::open_in_memory().unwrap()
    }

    #[test]
    fn test_initialize_fresh_database() {
        let conn = test_connection();

        let version = get_schema_version(&conn).unwrap();
        assert_eq!(version, 0);

        initialize_database(&conn).unwrap();

        let version = get_schema_version(&conn).unwrap();
        assert_eq!(version, 1);

        let table_exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='storage')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!(table_exists);
    }

    #[test]
    fn test_initialize_idempotent() {
        let conn = test_connection();

        initialize_database(&conn).unwrap();
        initialize_database(&conn).unwrap();

        let version = get_schema_version(&conn).unwrap();
        assert_eq!(version, 1);
    }

    #[test]
    fn test_blob_migration_renames_food_items() {
        let mut doc = json!({
            "foodTypes": [],
            "foodItems": [{"serialNumber": "123"}]
        });

        let changed = migrate_blob(&mut doc, 1).unwrap();

        assert!(changed);
        assert!(doc.get("foodItems").is_none());
        assert_eq!(doc["inventoryItems"][0]["serialNumber"], "123");
    }

    #[test]
    fn test_blob_migration_is_idempotent() {
        let mut doc = json!({
            "foodTypes": [],
            "inventoryItems": []
        });

        let changed = migrate_blob(&mut doc, CURRENT_BLOB_VERSION).unwrap();

        assert!(!changed);
        assert!(doc.get("inventoryItems").is_some());
    }

    #[test]
    fn test_blob_migration_does_not_clobber_new_field() {
        // A document that somehow carries both names keeps inventoryItems.
        let mut doc = json!({
            "foodItems": [{"serialNumber": "old"}],
            "inventoryItems": [{"serialNumber": "new"}]
        });

        migrate_blob(&mut doc, 1).unwrap();

        assert_eq!(doc["inventoryItems"][0]["serialNumber"], "new");
    }
}
