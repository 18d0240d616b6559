//! # Purchase Repository
//!
//! Database operations for restocking purchases.
//!
//! A purchase is the stock-increase mirror of a sale: one purchase row plus
//! a stock increment per restocked medicine, committed as one transaction.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use apotek_core::{Purchase, PurchaseDraft, PurchaseListing};

/// Repository for purchase database operations.
#[derive(Debug, Clone)]
pub struct PurchaseRepository {
    pool: SqlitePool,
}

impl PurchaseRepository {
    /// Creates a new PurchaseRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PurchaseRepository { pool }
    }

    /// Persists a restocking purchase as one atomic unit.
    ///
    /// ## What This Does
    /// 1. Inserts the purchase row (timestamp, supplier, total)
    /// 2. Increments each restocked medicine's stock by the item quantity
    ///
    /// Any failure rolls back the purchase row and every increment.
    pub async fn record_purchase(&self, draft: &PurchaseDraft) -> DbResult<Purchase> {
        let now = Utc::now();

        debug!(
            total = %draft.total,
            items = draft.items.len(),
            supplier_id = ?draft.supplier_id,
            "Recording purchase"
        );

        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            "INSERT INTO purchases (tanggal, supplier_id, total_bayar) VALUES (?1, ?2, ?3)",
        )
        .bind(now)
        .bind(draft.supplier_id)
        .bind(draft.total)
        .execute(&mut *tx)
        .await?;

        let purchase_id = inserted.last_insert_rowid();

        for item in &draft.items {
            let updated = sqlx::query("UPDATE medicines SET stok = stok + ?2 WHERE id = ?1")
                .bind(item.medicine_id)
                .bind(item.quantity)
                .execute(&mut *tx)
                .await?;

            if updated.rows_affected() == 0 {
                return Err(DbError::not_found("Medicine", item.medicine_id.to_string()));
            }
        }

        tx.commit().await?;

        debug!(purchase_id = %purchase_id, "Purchase recorded");

        Ok(Purchase {
            id: purchase_id,
            recorded_at: now,
            supplier_id: draft.supplier_id,
            total: draft.total,
        })
    }

    /// Lists purchases joined with their supplier names, newest first.
    pub async fn list_with_suppliers(&self) -> DbResult<Vec<PurchaseListing>> {
        let purchases = sqlx::query_as::<_, PurchaseListing>(
            "SELECT p.id, p.tanggal AS recorded_at, \
                    s.nama_supplier AS supplier_name, p.total_bayar AS total \
             FROM purchases p \
             LEFT JOIN suppliers s ON p.supplier_id = s.id \
             ORDER BY p.id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(purchases)
    }

    /// Gets a purchase by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Purchase>> {
        let purchase = sqlx::query_as::<_, Purchase>(
            "SELECT id, tanggal AS recorded_at, supplier_id, total_bayar AS total \
             FROM purchases WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(purchase)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use apotek_core::{Money, NewMedicine, NewSupplier, PurchaseDraft, RestockItem};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_record_purchase_increments_stock() {
        let db = test_db().await;

        let supplier = db
            .suppliers()
            .insert(&NewSupplier {
                name: "PT Kimia Farma".to_string(),
                address: String::new(),
                phone: String::new(),
                email: String::new(),
            })
            .await
            .unwrap();

        let medicine = db
            .medicines()
            .insert(&NewMedicine {
                name: "Paracetamol 500mg".to_string(),
                category: "Analgesik".to_string(),
                unit: "Strip".to_string(),
                stock: 3,
                price: Money::from_rupiah(10_000),
                status: None,
            })
            .await
            .unwrap();

        let draft = PurchaseDraft::from_items(
            Some(supplier.id),
            vec![RestockItem {
                medicine_id: medicine.id,
                quantity: 20,
                unit_cost: Money::from_rupiah(6_000),
            }],
        );

        let purchase = db.purchases().record_purchase(&draft).await.unwrap();
        assert_eq!(purchase.total, Money::from_rupiah(120_000));

        let after = db.medicines().get_by_id(medicine.id).await.unwrap().unwrap();
        assert_eq!(after.stock, 23);

        let listings = db.purchases().list_with_suppliers().await.unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].supplier_name.as_deref(), Some("PT Kimia Farma"));
        assert_eq!(listings[0].total, Money::from_rupiah(120_000));
    }

    #[tokio::test]
    async fn test_unknown_medicine_rolls_back_purchase() {
        let db = test_db().await;

        let draft = PurchaseDraft::from_items(
            None,
            vec![RestockItem {
                medicine_id: 777,
                quantity: 5,
                unit_cost: Money::from_rupiah(1_000),
            }],
        );

        assert!(db.purchases().record_purchase(&draft).await.is_err());
        assert!(db.purchases().list_with_suppliers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_purchase_without_supplier() {
        let db = test_db().await;

        let draft = PurchaseDraft::from_items(None, Vec::new());
        let purchase = db.purchases().record_purchase(&draft).await.unwrap();

        let listing = &db.purchases().list_with_suppliers().await.unwrap()[0];
        assert_eq!(listing.id, purchase.id);
        assert!(listing.supplier_name.is_none());
    }
}
