//! SQLite-backed offer store implementation.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use crate::normalize::{NormalizedOffer, StockStatus};

use super::{OfferStats, OfferStore, StoreError, StoredOffer};

/// SQLite-backed offer store.
pub struct SqliteOfferStore {
    conn: Mutex<Connection>,
}

impl SqliteOfferStore {
    /// Open (or create) the database file and ensure the schema exists.
    pub fn new(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|e| StoreError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory store (useful for testing).
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn =
            Connection::open_in_memory().map_err(|e| StoreError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), StoreError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS offers (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                query TEXT NOT NULL,
                product_name TEXT NOT NULL,
                brand TEXT,
                model_or_sku TEXT NOT NULL DEFAULT '',
                price_vnd INTEGER NOT NULL,
                currency TEXT NOT NULL,
                retailer TEXT NOT NULL,
                url TEXT NOT NULL,
                stock_status TEXT NOT NULL,
                scraped_at TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_offers_query ON offers(query);
            CREATE INDEX IF NOT EXISTS idx_offers_retailer ON offers(retailer);
            CREATE INDEX IF NOT EXISTS idx_offers_scraped_at ON offers(scraped_at);
            "#,
        )
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn row_to_stored_offer(row: &rusqlite::Row) -> rusqlite::Result<StoredOffer> {
        let scraped_at_str: String = row.get(10)?;
        let scraped_at = DateTime::parse_from_rfc3339(&scraped_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());
        let price_vnd: i64 = row.get(5)?;
        let stock_str: String = row.get(9)?;

        Ok(StoredOffer {
            id: row.get(0)?,
            query: row.get(1)?,
            offer: NormalizedOffer {
                product_name: row.get(2)?,
                brand: row.get(3)?,
                model_or_sku: row.get(4)?,
                price_vnd: price_vnd.max(0) as u64,
                currency: row.get(6)?,
                retailer: row.get(7)?,
                url: row.get(8)?,
                stock_status: stock_from_str(&stock_str),
                scraped_at,
            },
        })
    }
}

impl OfferStore for SqliteOfferStore {
    fn save_batch(&self, query: &str, offers: &[NormalizedOffer]) -> Result<u32, StoreError> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn
            .transaction()
            .map_err(|e| StoreError::Database(e.to_string()))?;
        let created_at = Utc::now().to_rfc3339();

        let mut stored = 0u32;
        for offer in offers {
            tx.execute(
                "INSERT INTO offers
                   (query, product_name, brand, model_or_sku, price_vnd, currency,
                    retailer, url, stock_status, scraped_at, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    query,
                    offer.product_name,
                    offer.brand,
                    offer.model_or_sku,
                    offer.price_vnd as i64,
                    offer.currency,
                    offer.retailer,
                    offer.url,
                    stock_to_str(offer.stock_status),
                    offer.scraped_at.to_rfc3339(),
                    created_at,
                ],
            )
            .map_err(|e| StoreError::Rejected(e.to_string()))?;
            stored += 1;
        }

        tx.commit().map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(stored)
    }

    fn list_recent(&self, limit: u32) -> Result<Vec<StoredOffer>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(
                "SELECT id, query, product_name, brand, model_or_sku, price_vnd, currency,
                        retailer, url, stock_status, scraped_at
                 FROM offers ORDER BY id DESC LIMIT ?1",
            )
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let rows = stmt
            .query_map(params![limit], Self::row_to_stored_offer)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let mut offers = Vec::new();
        for row in rows {
            offers.push(row.map_err(|e| StoreError::Database(e.to_string()))?);
        }
        Ok(offers)
    }

    fn stats(&self) -> Result<OfferStats, StoreError> {
        let conn = self.conn.lock().unwrap();
        let (total_offers, distinct_queries, distinct_retailers): (i64, i64, i64) = conn
            .query_row(
                "SELECT COUNT(*), COUNT(DISTINCT query), COUNT(DISTINCT retailer) FROM offers",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(OfferStats {
            total_offers: total_offers.max(0) as u64,
            distinct_queries: distinct_queries.max(0) as u64,
            distinct_retailers: distinct_retailers.max(0) as u64,
        })
    }
}

fn stock_to_str(status: StockStatus) -> &'static str {
    match status {
        StockStatus::InStock => "in_stock",
        StockStatus::OutOfStock => "out_of_stock",
        StockStatus::Unknown => "unknown",
    }
}

fn stock_from_str(s: &str) -> StockStatus {
    match s {
        "in_stock" => StockStatus::InStock,
        "out_of_stock" => StockStatus::OutOfStock,
        _ => StockStatus::Unknown,
    }
}
