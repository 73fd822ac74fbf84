// src/services/inventory_service.rs
//
// Inventory orchestration
//
// Owns the scan workflow: scanning a UPC that is already in stock bumps
// the count on the existing record, scanning a new one inserts a record
// with count 1, and checking stock out walks the same path backwards
// until the record disappears. One record per UPC at all times.

use std::sync::Arc;

use crate::domain::{validate_inventory_item, InventoryItem};
use crate::error::{AppError, AppResult};
use crate::integrations::OpenFoodFactsClient;
use crate::repositories::InventoryStore;

pub struct InventoryService {
    store: Arc<dyn InventoryStore>,
    products: Arc<OpenFoodFactsClient>,
}

impl InventoryService {
    pub fn new(store: Arc<dyn InventoryStore>, products: Arc<OpenFoodFactsClient>) -> Self {
        Self { store, products }
    }

    /// Record one scanned unit of a product.
    ///
    /// The draft carries the product data to use when this is the first
    /// unit; when a record already exists only the count changes and the
    /// draft's other fields are ignored.
    pub fn record_scan(&self, draft: &InventoryItem) -> AppResult<InventoryItem> {
        validate_inventory_item(draft)?;

        match self.store.item(&draft.serial_number)? {
            Some(mut existing) => {
                existing.count += 1;
                self.store.update_item(&existing)?;
                Ok(existing)
            }
            None => {
                let mut item = draft.clone();
                item.count = 1;
                self.store.insert_item(&item)?;
                Ok(item)
            }
        }
    }

    /// Bump the count on an existing record.
    pub fn increment(&self, serial_number: &str) -> AppResult<InventoryItem> {
        let mut item = self.store.item(serial_number)?.ok_or(AppError::NotFound)?;
        item.count += 1;
        self.store.update_item(&item)?;
        Ok(item)
    }

    /// Check one unit out. The record is deleted when its last unit goes.
    pub fn decrement(&self, serial_number: &str) -> AppResult<Option<InventoryItem>> {
        let mut item = self.store.item(serial_number)?.ok_or(AppError::NotFound)?;

        if item.count <= 1 {
            self.store.delete_item(serial_number)?;
            return Ok(None);
        }

        item.count -= 1;
        self.store.update_item(&item)?;
        Ok(Some(item))
    }

    /// Drop a product entirely, regardless of count.
    pub fn remove(&self, serial_number: &str) -> AppResult<()> {
        self.store.delete_item(serial_number)
    }

    /// Load a product by UPC alone, looking it up online. A UPC already in
    /// stock is left untouched. `NotFound` means the product database has
    /// no entry for the UPC.
    pub async fn add_product_by_upc(&self, upc: &str) -> AppResult<InventoryItem> {
        if let Some(existing) = self.store.item(upc)? {
            log::info!("Product {} already in inventory, skipping lookup", upc);
            return Ok(existing);
        }

        let draft = self.products.fetch_product(upc).await?.ok_or(AppError::NotFound)?;
        self.record_scan(&draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryInventoryStore;

    fn service_with_store() -> (InventoryService, Arc<InMemoryInventoryStore>) {
        let store = Arc::new(InMemoryInventoryStore::new());
        let service = InventoryService::new(store.clone(), Arc::new(OpenFoodFactsClient::new()));
        (service, store)
    }

    fn draft(upc: &str) -> InventoryItem {
        InventoryItem::new(upc, 2, "Baked Beans, Original")
    }

    #[test]
    fn test_repeated_scans_keep_one_record() {
        let (service, store) = service_with_store();

        for _ in 0..5 {
            service.record_scan(&draft("039400016144")).unwrap();
        }

        let items = store.all_items().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].count, 5);
    }

    #[test]
    fn test_first_scan_inserts_with_count_one() {
        let (service, _) = service_with_store();

        let mut d = draft("039400016144");
        d.count = 7; // the draft's count is not trusted
        let recorded = service.record_scan(&d).unwrap();

        assert_eq!(recorded.count, 1);
    }

    #[test]
    fn test_scan_of_existing_record_ignores_draft_fields() {
        let (service, store) = service_with_store();
        service.record_scan(&draft("039400016144")).unwrap();

        let mut renamed = draft("039400016144");
        renamed.sub_category = "Something else".to_string();
        service.record_scan(&renamed).unwrap();

        let item = store.item("039400016144").unwrap().unwrap();
        assert_eq!(item.sub_category, "Baked Beans, Original");
        assert_eq!(item.count, 2);
    }

    #[test]
    fn test_record_scan_rejects_invalid_draft() {
        let (service, _) = service_with_store();

        let mut bad = draft("");
        bad.serial_number = String::new();

        assert!(service.record_scan(&bad).is_err());
    }

    #[test]
    fn test_increment_requires_existing_record() {
        let (service, _) = service_with_store();

        assert!(matches!(
            service.increment("missing").unwrap_err(),
            AppError::NotFound
        ));
    }

    #[test]
    fn test_decrement_walks_back_to_deletion() {
        let (service, store) = service_with_store();
        service.record_scan(&draft("039400016144")).unwrap();
        service.record_scan(&draft("039400016144")).unwrap();

        let remaining = service.decrement("039400016144").unwrap();
        assert_eq!(remaining.unwrap().count, 1);

        let gone = service.decrement("039400016144").unwrap();
        assert!(gone.is_none());
        assert!(store.item("039400016144").unwrap().is_none());

        assert!(matches!(
            service.decrement("039400016144").unwrap_err(),
            AppError::NotFound
        ));
    }

    #[tokio::test]
    async fn test_add_product_by_upc_skips_existing_record() {
        // Never touches the network: the short-circuit happens before lookup.
        let (service, store) = service_with_store();
        service.record_scan(&draft("039400016144")).unwrap();

        let item = service.add_product_by_upc("039400016144").await.unwrap();

        assert_eq!(item.count, 1);
        assert_eq!(store.all_items().unwrap().len(), 1);
    }

    #[test]
    fn test_remove_drops_record_regardless_of_count() {
        let (service, store) = service_with_store();
        for _ in 0..3 {
            service.record_scan(&draft("039400016144")).unwrap();
        }

        service.remove("039400016144").unwrap();

        assert!(store.item("039400016144").unwrap().is_none());
    }
}
