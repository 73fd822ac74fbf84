// src/repositories/inventory_store.rs
//
// Inventory persistence
//
// The whole inventory is one JSON document under one storage key. Every
// mutation is read-modify-write of that document: load the aggregate,
// change it in memory, store it back. There is no optimistic-concurrency
// check, so the last writer wins; callers must hold to the single-writer
// assumption. The derived CRUD operations are defined once here in terms of
// `get_database`/`save_database`; implementations supply only the document
// load and store.

use std::sync::Mutex;

use chrono::{Duration, Local, NaiveDate};
use rusqlite::params;
use serde_json::Value;
use std::sync::Arc;

use crate::db::{migrations, ConnectionPool};
use crate::domain::{Database, FoodType, InventoryItem, STORAGE_KEY};
use crate::error::{AppError, AppResult};

pub trait InventoryStore: Send + Sync {
    /// Load the current aggregate, defaulting to empty if none is persisted.
    fn get_database(&self) -> AppResult<Database>;

    /// Replace the entire persisted document.
    fn save_database(&self, db: &Database) -> AppResult<()>;

    // ------------------------------------------------------------------
    // Inventory item operations
    // ------------------------------------------------------------------

    fn all_items(&self) -> AppResult<Vec<InventoryItem>> {
        Ok(self.get_database()?.inventory_items)
    }

    fn item(&self, serial_number: &str) -> AppResult<Option<InventoryItem>> {
        let db = self.get_database()?;
        Ok(db
            .inventory_items
            .into_iter()
            .find(|item| item.serial_number == serial_number))
    }

    /// Append a new item. Fails if the serial number is already present.
    fn insert_item(&self, item: &InventoryItem) -> AppResult<()> {
        let mut db = self.get_database()?;
        if db.item_index(&item.serial_number).is_some() {
            return Err(AppError::AlreadyExists(item.serial_number.clone()));
        }
        db.inventory_items.push(item.clone());
        self.save_database(&db)
    }

    /// Replace an existing item. Fails if the serial number is absent.
    fn update_item(&self, item: &InventoryItem) -> AppResult<()> {
        let mut db = self.get_database()?;
        let index = db
            .item_index(&item.serial_number)
            .ok_or(AppError::NotFound)?;
        db.inventory_items[index] = item.clone();
        self.save_database(&db)
    }

    /// Replace-by-serial-number, or append when not found.
    ///
    /// Defensively collapses duplicate records for the serial number down to
    /// the single updated one, in case an earlier writer violated the
    /// one-record-per-serial invariant.
    fn upsert_item(&self, item: &InventoryItem) -> AppResult<()> {
        let mut db = self.get_database()?;
        match db.item_index(&item.serial_number) {
            Some(index) => {
                db.inventory_items[index] = item.clone();
                let serial = item.serial_number.clone();
                let duplicates = db
                    .inventory_items
                    .iter()
                    .filter(|i| i.serial_number == serial)
                    .count();
                if duplicates > 1 {
                    log::warn!("Collapsing {} duplicate records for {}", duplicates, serial);
                    db.inventory_items = db
                        .inventory_items
                        .into_iter()
                        .enumerate()
                        .filter(|(i, it)| it.serial_number != serial || *i == index)
                        .map(|(_, it)| it)
                        .collect();
                }
            }
            None => db.inventory_items.push(item.clone()),
        }
        self.save_database(&db)
    }

    /// Remove all records matching the serial number. Deleting an absent
    /// serial number is a no-op, not an error.
    fn delete_item(&self, serial_number: &str) -> AppResult<()> {
        let mut db = self.get_database()?;
        db.inventory_items
            .retain(|item| item.serial_number != serial_number);
        self.save_database(&db)
    }

    fn items_by_food_type(&self, food_type_id: i64) -> AppResult<Vec<InventoryItem>> {
        let db = self.get_database()?;
        Ok(db
            .inventory_items
            .into_iter()
            .filter(|item| item.food_type_id == food_type_id)
            .collect())
    }

    fn items_by_expiration(&self, expiration_date: &str) -> AppResult<Vec<InventoryItem>> {
        let db = self.get_database()?;
        Ok(db
            .inventory_items
            .into_iter()
            .filter(|item| item.expiration_date == expiration_date)
            .collect())
    }

    /// Items expiring within the next `days` days (inclusive window starting
    /// today). Items with unparsable dates are skipped.
    fn items_expiring_soon(&self, days: i64) -> AppResult<Vec<InventoryItem>> {
        let today = Local::now().date_naive();
        let cutoff = today + Duration::days(days);
        let db = self.get_database()?;
        Ok(db
            .inventory_items
            .into_iter()
            .filter(|item| {
                NaiveDate::parse_from_str(&item.expiration_date, "%Y-%m-%d")
                    .map(|date| date >= today && date <= cutoff)
                    .unwrap_or(false)
            })
            .collect())
    }

    // ------------------------------------------------------------------
    // FoodType reference data operations (mirrored on food_type_id)
    // ------------------------------------------------------------------

    fn all_food_types(&self) -> AppResult<Vec<FoodType>> {
        Ok(self.get_database()?.food_types)
    }

    fn food_type(&self, food_type_id: i64) -> AppResult<Option<FoodType>> {
        let db = self.get_database()?;
        Ok(db
            .food_types
            .into_iter()
            .find(|ft| ft.food_type_id == food_type_id))
    }

    fn add_food_type(&self, food_type: &FoodType) -> AppResult<()> {
        let mut db = self.get_database()?;
        if db.food_type_index(food_type.food_type_id).is_some() {
            return Err(AppError::AlreadyExists(food_type.food_type_id.to_string()));
        }
        db.food_types.push(food_type.clone());
        self.save_database(&db)
    }

    fn update_food_type(&self, food_type: &FoodType) -> AppResult<()> {
        let mut db = self.get_database()?;
        let index = db
            .food_type_index(food_type.food_type_id)
            .ok_or(AppError::NotFound)?;
        db.food_types[index] = food_type.clone();
        self.save_database(&db)
    }

    fn delete_food_type(&self, food_type_id: i64) -> AppResult<()> {
        let mut db = self.get_database()?;
        db.food_types.retain(|ft| ft.food_type_id != food_type_id);
        self.save_database(&db)
    }
}

// ============================================================================
// SQLITE-BACKED STORE
// ============================================================================

/// Production store: the document lives in the single-row `storage` table.
pub struct SqliteInventoryStore {
    pool: Arc<ConnectionPool>,
    key: String,
}

impl SqliteInventoryStore {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self {
            pool,
            key: STORAGE_KEY.to_string(),
        }
    }

    /// Seed a fresh store with the canonical food type reference data.
    /// Does nothing when a document already exists.
    pub fn initialize_with_defaults(&self) -> AppResult<()> {
        let conn = self.pool.get()?;
        let exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM storage WHERE key = ?1)",
                params![self.key],
                |row| row.get(0),
            )
            .map_err(AppError::Database)?;

        if !exists {
            log::info!("No stored database found, seeding default food types");
            let db = Database {
                food_types: crate::domain::default_food_types(),
                inventory_items: Vec::new(),
            };
            self.save_database(&db)?;
        }

        Ok(())
    }

    fn write_document(&self, doc: &Value) -> AppResult<()> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT OR REPLACE INTO storage (key, value, blob_version, updated_at)
             VALUES (?1, ?2, ?3, datetime('now'))",
            params![self.key, doc.to_string(), migrations::CURRENT_BLOB_VERSION],
        )
        .map_err(AppError::Database)?;
        Ok(())
    }
}

impl InventoryStore for SqliteInventoryStore {
    fn get_database(&self) -> AppResult<Database> {
        let conn = self.pool.get()?;

        let row: Option<(String, i32)> = match conn.query_row(
            "SELECT value, blob_version FROM storage WHERE key = ?1",
            params![self.key],
            |row| Ok((row.get(0)?, row.get(1)?)),
        ) {
            Ok(row) => Some(row),
            Err(rusqlite::Error::QueryReturnedNoRows) => None,
            Err(e) => return Err(AppError::Database(e)),
        };

        let (raw, stored_version) = match row {
            Some(row) => row,
            None => return Ok(Database::default()),
        };
        drop(conn);

        let mut doc: Value = serde_json::from_str(&raw)?;

        // Upgrade older documents once, then persist the migrated form so
        // subsequent reads skip this path.
        if stored_version < migrations::CURRENT_BLOB_VERSION {
            let changed = migrations::migrate_blob(&mut doc, stored_version)?;
            self.write_document(&doc)?;
            if changed {
                log::info!(
                    "Stored database migrated from blob version {} to {}",
                    stored_version,
                    migrations::CURRENT_BLOB_VERSION
                );
            }
        }

        let db: Database = serde_json::from_value(doc)?;
        Ok(db)
    }

    fn save_database(&self, db: &Database) -> AppResult<()> {
        let doc = serde_json::to_value(db)?;
        self.write_document(&doc)
    }
}

// ============================================================================
// IN-MEMORY STORE
// ============================================================================

/// Substitutable fake holding the aggregate in memory. Used by tests and by
/// callers that want the matching pipeline without persistence.
#[derive(Default)]
pub struct InMemoryInventoryStore {
    db: Mutex<Database>,
}

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_database(db: Database) -> Self {
        Self { db: Mutex::new(db) }
    }
}

impl InventoryStore for InMemoryInventoryStore {
    fn get_database(&self) -> AppResult<Database> {
        let guard = self
            .db
            .lock()
            .map_err(|e| AppError::Other(format!("Store lock poisoned: {}", e)))?;
        Ok(guard.clone())
    }

    fn save_database(&self, db: &Database) -> AppResult<()> {
        let mut guard = self
            .db
            .lock()
            .map_err(|e| AppError::Other(format!("Store lock poisoned: {}", e)))?;
        *guard = db.clone();
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
