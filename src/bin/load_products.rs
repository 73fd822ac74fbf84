// src/bin/load_products.rs
//
// Bulk-load products into the local inventory by UPC.
//
//   load-products 039400016144 014800000238 ...
//
// Each UPC is looked up in Open Food Facts and recorded as one scanned
// unit; repeating a UPC bumps its count. Failures are logged per code so
// one bad UPC does not abort the batch.

use std::sync::Arc;

use anyhow::Context;

use pantryhub::db::{create_connection_pool, initialize_database};
use pantryhub::integrations::OpenFoodFactsClient;
use pantryhub::repositories::SqliteInventoryStore;
use pantryhub::services::InventoryService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let upcs: Vec<String> = std::env::args().skip(1).collect();
    if upcs.is_empty() {
        eprintln!("Usage: load-products <UPC> [<UPC> ...]");
        std::process::exit(2);
    }

    let pool = Arc::new(create_connection_pool().context("Failed to open the database")?);
    {
        let conn = pool.get()?;
        initialize_database(&conn)?;
    }

    let store = Arc::new(SqliteInventoryStore::new(pool));
    store
        .initialize_with_defaults()
        .context("Failed to seed food types")?;

    let service = InventoryService::new(store, Arc::new(OpenFoodFactsClient::new()));

    let mut loaded = 0usize;
    let mut failed = 0usize;
    for upc in &upcs {
        match service.add_product_by_upc(upc).await {
            Ok(item) => {
                loaded += 1;
                log::info!("{}: {} (count {})", upc, item.sub_category, item.count);
            }
            Err(e) => {
                failed += 1;
                log::error!("{}: {}", upc, e);
            }
        }
    }

    log::info!("Done: {} loaded, {} failed", loaded, failed);
    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
