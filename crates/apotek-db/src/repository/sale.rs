//! # Sale Repository
//!
//! Database operations for sales and their line items.
//!
//! ## Checkout Persistence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                record_sale: ONE transaction                             │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    INSERT INTO sales (tanggal, total_harga, uang_bayar, kembalian)      │
//! │    for each line:                                                       │
//! │      INSERT INTO sale_details (sale_id, medicine_id, jumlah, subtotal)  │
//! │      check stock when the policy blocks overselling                     │
//! │      UPDATE medicines SET stok = stok - jumlah                          │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Any failure before COMMIT rolls the whole unit back: no sale row,      │
//! │  no line rows, no stock movement is ever visible on its own.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use apotek_core::{Sale, SaleDraft, SaleLine, StockPolicy};

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Persists a settled sale draft as one atomic unit.
    ///
    /// ## What This Does
    /// 1. Inserts the sale row (timestamp, total, tendered, change)
    /// 2. Inserts one sale_details row per cart line
    /// 3. Decrements each referenced medicine's stock by the line quantity
    ///
    /// All inside a single transaction. The sale id is taken from
    /// `last_insert_rowid()` on the same connection, inside the same
    /// transaction.
    ///
    /// ## Stock Policy
    /// Under [`StockPolicy::Block`], a line whose quantity exceeds the
    /// medicine's current stock aborts with [`DbError::InsufficientStock`]
    /// and the transaction rolls back. Under [`StockPolicy::Allow`] the
    /// decrement is unconditional and stock may go negative.
    ///
    /// ## Returns
    /// The persisted [`Sale`] with its store-assigned id.
    pub async fn record_sale(&self, draft: &SaleDraft, policy: StockPolicy) -> DbResult<Sale> {
        let now = Utc::now();

        debug!(
            total = %draft.total,
            lines = draft.lines.len(),
            ?policy,
            "Recording sale"
        );

        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            "INSERT INTO sales (tanggal, total_harga, uang_bayar, kembalian) \
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(now)
        .bind(draft.total)
        .bind(draft.tendered)
        .bind(draft.change)
        .execute(&mut *tx)
        .await?;

        let sale_id = inserted.last_insert_rowid();

        for line in &draft.lines {
            sqlx::query(
                "INSERT INTO sale_details (sale_id, medicine_id, jumlah, subtotal) \
                 VALUES (?1, ?2, ?3, ?4)",
            )
            .bind(sale_id)
            .bind(line.medicine_id)
            .bind(line.quantity)
            .bind(line.subtotal)
            .execute(&mut *tx)
            .await?;

            if policy == StockPolicy::Block {
                let row: Option<(String, i64)> =
                    sqlx::query_as("SELECT nama_obat, stok FROM medicines WHERE id = ?1")
                        .bind(line.medicine_id)
                        .fetch_optional(&mut *tx)
                        .await?;

                let (name, stock) = row.ok_or_else(|| {
                    DbError::not_found("Medicine", line.medicine_id.to_string())
                })?;

                if stock < line.quantity {
                    // Dropping the transaction rolls back the sale row and
                    // every line written so far
                    return Err(DbError::InsufficientStock {
                        medicine: name,
                        available: stock,
                        requested: line.quantity,
                    });
                }
            }

            let updated = sqlx::query("UPDATE medicines SET stok = stok - ?2 WHERE id = ?1")
                .bind(line.medicine_id)
                .bind(line.quantity)
                .execute(&mut *tx)
                .await?;

            if updated.rows_affected() == 0 {
                return Err(DbError::not_found("Medicine", line.medicine_id.to_string()));
            }
        }

        tx.commit().await?;

        debug!(sale_id = %sale_id, "Sale recorded");

        Ok(Sale {
            id: sale_id,
            recorded_at: now,
            total: draft.total,
            tendered: draft.tendered,
            change: draft.change,
        })
    }

    /// Gets a sale by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(
            "SELECT id, tanggal AS recorded_at, total_harga AS total, \
                    uang_bayar AS tendered, kembalian AS change \
             FROM sales WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Lists the most recent sales, newest first (the sale screen's
    /// history pane).
    pub async fn list_recent(&self, limit: u32) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(
            "SELECT id, tanggal AS recorded_at, total_harga AS total, \
                    uang_bayar AS tendered, kembalian AS change \
             FROM sales ORDER BY id DESC LIMIT ?1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Gets all line items for a sale.
    pub async fn lines(&self, sale_id: i64) -> DbResult<Vec<SaleLine>> {
        let lines = sqlx::query_as::<_, SaleLine>(
            "SELECT sale_id, medicine_id, jumlah AS quantity, subtotal \
             FROM sale_details WHERE sale_id = ?1 ORDER BY rowid",
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Counts sales (for the dashboard).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use apotek_core::{
        Medicine, Money, NewMedicine, SaleDraft, SaleLineDraft, StockPolicy,
    };

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_medicine(db: &Database, name: &str, price: i64, stock: i64) -> Medicine {
        db.medicines()
            .insert(&NewMedicine {
                name: name.to_string(),
                category: "Analgesik".to_string(),
                unit: "Strip".to_string(),
                stock,
                price: Money::from_rupiah(price),
                status: None,
            })
            .await
            .unwrap()
    }

    fn draft_for(medicine: &Medicine, quantity: i64, tendered: i64) -> SaleDraft {
        let subtotal = medicine.price.multiply_quantity(quantity);
        SaleDraft {
            total: subtotal,
            tendered: Money::from_rupiah(tendered),
            change: Money::from_rupiah(tendered) - subtotal,
            lines: vec![SaleLineDraft {
                medicine_id: medicine.id,
                quantity,
                subtotal,
            }],
        }
    }

    #[tokio::test]
    async fn test_record_sale_persists_everything() {
        let db = test_db().await;
        let medicine = seed_medicine(&db, "Paracetamol 500mg", 10_000, 5).await;

        let sale = db
            .sales()
            .record_sale(&draft_for(&medicine, 1, 10_000), StockPolicy::Block)
            .await
            .unwrap();

        assert!(sale.id > 0);
        assert_eq!(sale.total, Money::from_rupiah(10_000));
        assert!(sale.change.is_zero());

        // The sale row round-trips
        let fetched = db.sales().get_by_id(sale.id).await.unwrap().unwrap();
        assert_eq!(fetched.total, sale.total);
        assert_eq!(fetched.tendered, sale.tendered);
        assert_eq!(fetched.change, sale.change);

        // One line per cart line
        let lines = db.sales().lines(sale.id).await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].medicine_id, medicine.id);
        assert_eq!(lines[0].quantity, 1);
        assert_eq!(lines[0].subtotal, Money::from_rupiah(10_000));

        // Stock decremented by exactly the line quantity
        let after = db.medicines().get_by_id(medicine.id).await.unwrap().unwrap();
        assert_eq!(after.stock, 4);
    }

    #[tokio::test]
    async fn test_record_sale_multiple_lines() {
        let db = test_db().await;
        let a = seed_medicine(&db, "Paracetamol 500mg", 10_000, 5).await;
        let b = seed_medicine(&db, "Vitamin C 500mg", 2_500, 9).await;

        let draft = SaleDraft {
            total: Money::from_rupiah(17_500),
            tendered: Money::from_rupiah(20_000),
            change: Money::from_rupiah(2_500),
            lines: vec![
                SaleLineDraft {
                    medicine_id: a.id,
                    quantity: 1,
                    subtotal: Money::from_rupiah(10_000),
                },
                SaleLineDraft {
                    medicine_id: b.id,
                    quantity: 3,
                    subtotal: Money::from_rupiah(7_500),
                },
            ],
        };

        let sale = db
            .sales()
            .record_sale(&draft, StockPolicy::Block)
            .await
            .unwrap();

        let lines = db.sales().lines(sale.id).await.unwrap();
        assert_eq!(lines.len(), 2);
        let line_sum: Money = lines.iter().map(|l| l.subtotal).sum();
        assert_eq!(line_sum, sale.total);

        assert_eq!(
            db.medicines().get_by_id(a.id).await.unwrap().unwrap().stock,
            4
        );
        assert_eq!(
            db.medicines().get_by_id(b.id).await.unwrap().unwrap().stock,
            6
        );
    }

    #[tokio::test]
    async fn test_block_policy_rolls_back_whole_checkout() {
        let db = test_db().await;
        let a = seed_medicine(&db, "Paracetamol 500mg", 10_000, 5).await;
        let b = seed_medicine(&db, "Amoxicillin 500mg", 15_000, 1).await;

        let draft = SaleDraft {
            total: Money::from_rupiah(55_000),
            tendered: Money::from_rupiah(60_000),
            change: Money::from_rupiah(5_000),
            lines: vec![
                SaleLineDraft {
                    medicine_id: a.id,
                    quantity: 1,
                    subtotal: Money::from_rupiah(10_000),
                },
                // Second line oversells: only 1 in stock
                SaleLineDraft {
                    medicine_id: b.id,
                    quantity: 3,
                    subtotal: Money::from_rupiah(45_000),
                },
            ],
        };

        let err = db
            .sales()
            .record_sale(&draft, StockPolicy::Block)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::InsufficientStock {
                available: 1,
                requested: 3,
                ..
            }
        ));

        // Nothing is visible: no sale, no lines, stock untouched (including
        // the first line that had already been written before the failure)
        assert_eq!(db.sales().count().await.unwrap(), 0);
        assert_eq!(
            db.medicines().get_by_id(a.id).await.unwrap().unwrap().stock,
            5
        );
        assert_eq!(
            db.medicines().get_by_id(b.id).await.unwrap().unwrap().stock,
            1
        );
    }

    #[tokio::test]
    async fn test_allow_policy_permits_oversell() {
        let db = test_db().await;
        let medicine = seed_medicine(&db, "Paracetamol 500mg", 10_000, 1).await;

        db.sales()
            .record_sale(&draft_for(&medicine, 3, 30_000), StockPolicy::Allow)
            .await
            .unwrap();

        let after = db.medicines().get_by_id(medicine.id).await.unwrap().unwrap();
        assert_eq!(after.stock, -2);
    }

    #[tokio::test]
    async fn test_unknown_medicine_rolls_back() {
        let db = test_db().await;

        let draft = SaleDraft {
            total: Money::from_rupiah(10_000),
            tendered: Money::from_rupiah(10_000),
            change: Money::zero(),
            lines: vec![SaleLineDraft {
                medicine_id: 424242,
                quantity: 1,
                subtotal: Money::from_rupiah(10_000),
            }],
        };

        assert!(db
            .sales()
            .record_sale(&draft, StockPolicy::Block)
            .await
            .is_err());
        assert_eq!(db.sales().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_recent_newest_first() {
        let db = test_db().await;
        let medicine = seed_medicine(&db, "Paracetamol 500mg", 10_000, 50).await;

        for _ in 0..3 {
            db.sales()
                .record_sale(&draft_for(&medicine, 1, 10_000), StockPolicy::Block)
                .await
                .unwrap();
        }

        let recent = db.sales().list_recent(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert!(recent[0].id > recent[1].id);
    }
}
