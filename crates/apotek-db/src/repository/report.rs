//! # Report Repository
//!
//! Read-only aggregates behind the dashboard. Rendering (charts, progress
//! bars, documents) is a presentation concern and lives outside this crate;
//! these queries only produce the numbers.

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;

use crate::error::DbResult;
use apotek_core::{Money, LOW_STOCK_THRESHOLD};

// =============================================================================
// Read Models
// =============================================================================

/// The dashboard's headline numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub medicine_count: i64,
    pub supplier_count: i64,
    pub sale_count: i64,
    /// Revenue recorded today (sum of sale totals).
    pub revenue_today: Money,
}

/// A medicine running low on stock.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LowStockMedicine {
    pub name: String,
    pub stock: i64,
}

/// Revenue bucketed by calendar day.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DailyRevenue {
    pub day: NaiveDate,
    pub total: Money,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for dashboard aggregates.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Computes the dashboard's headline numbers.
    pub async fn dashboard_summary(&self) -> DbResult<DashboardSummary> {
        let medicine_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM medicines")
            .fetch_one(&self.pool)
            .await?;

        let supplier_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM suppliers")
            .fetch_one(&self.pool)
            .await?;

        let sale_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        // SUM over zero rows is NULL, hence the Option
        let revenue_today: Option<i64> = sqlx::query_scalar(
            "SELECT SUM(total_harga) FROM sales WHERE date(tanggal) = ?1",
        )
        .bind(Utc::now().date_naive())
        .fetch_one(&self.pool)
        .await?;

        Ok(DashboardSummary {
            medicine_count,
            supplier_count,
            sale_count,
            revenue_today: Money::from_rupiah(revenue_today.unwrap_or(0)),
        })
    }

    /// Lists the medicines with the lowest stock below the threshold.
    ///
    /// ## Arguments
    /// * `limit` - How many entries the dashboard shows (3 on the legacy
    ///   layout)
    pub async fn low_stock(&self, limit: u32) -> DbResult<Vec<LowStockMedicine>> {
        self.low_stock_below(LOW_STOCK_THRESHOLD, limit).await
    }

    /// Same as [`low_stock`](Self::low_stock) with an explicit threshold.
    pub async fn low_stock_below(
        &self,
        threshold: i64,
        limit: u32,
    ) -> DbResult<Vec<LowStockMedicine>> {
        let medicines = sqlx::query_as::<_, LowStockMedicine>(
            "SELECT nama_obat AS name, stok AS stock \
             FROM medicines WHERE stok < ?1 ORDER BY stok ASC LIMIT ?2",
        )
        .bind(threshold)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(medicines)
    }

    /// Revenue per calendar day over the most recent `days` days that have
    /// sales, oldest first (the dashboard chart's data series).
    ///
    /// Zero-total sales are excluded, matching the legacy aggregation.
    pub async fn daily_revenue(&self, days: u32) -> DbResult<Vec<DailyRevenue>> {
        let mut buckets = sqlx::query_as::<_, DailyRevenue>(
            "SELECT date(tanggal) AS day, SUM(total_harga) AS total \
             FROM sales WHERE total_harga > 0 \
             GROUP BY date(tanggal) ORDER BY day DESC LIMIT ?1",
        )
        .bind(days)
        .fetch_all(&self.pool)
        .await?;

        // Chronological order for plotting
        buckets.reverse();
        Ok(buckets)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use apotek_core::{
        Money, NewMedicine, NewSupplier, SaleDraft, SaleLineDraft, StockPolicy,
    };

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_and_sell(db: &Database, price: i64, stock: i64) {
        let medicine = db
            .medicines()
            .insert(&NewMedicine {
                name: "Paracetamol 500mg".to_string(),
                category: "Analgesik".to_string(),
                unit: "Strip".to_string(),
                stock,
                price: Money::from_rupiah(price),
                status: None,
            })
            .await
            .unwrap();

        let draft = SaleDraft {
            total: Money::from_rupiah(price),
            tendered: Money::from_rupiah(price),
            change: Money::zero(),
            lines: vec![SaleLineDraft {
                medicine_id: medicine.id,
                quantity: 1,
                subtotal: Money::from_rupiah(price),
            }],
        };
        db.sales()
            .record_sale(&draft, StockPolicy::Block)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_summary_counts_and_revenue() {
        let db = test_db().await;

        db.suppliers()
            .insert(&NewSupplier {
                name: "PT Kimia Farma".to_string(),
                address: String::new(),
                phone: String::new(),
                email: String::new(),
            })
            .await
            .unwrap();
        seed_and_sell(&db, 10_000, 5).await;

        let summary = db.reports().dashboard_summary().await.unwrap();
        assert_eq!(summary.medicine_count, 1);
        assert_eq!(summary.supplier_count, 1);
        assert_eq!(summary.sale_count, 1);
        // The sale was recorded just now, so it counts as today's revenue
        assert_eq!(summary.revenue_today, Money::from_rupiah(10_000));
    }

    #[tokio::test]
    async fn test_summary_on_empty_store() {
        let db = test_db().await;

        let summary = db.reports().dashboard_summary().await.unwrap();
        assert_eq!(summary.medicine_count, 0);
        assert_eq!(summary.sale_count, 0);
        assert!(summary.revenue_today.is_zero());
    }

    #[tokio::test]
    async fn test_low_stock_sorted_ascending() {
        let db = test_db().await;
        let repo = db.medicines();

        for (name, stock) in [("A", 40), ("B", 5), ("C", 70), ("D", 12)] {
            repo.insert(&NewMedicine {
                name: name.to_string(),
                category: String::new(),
                unit: String::new(),
                stock,
                price: Money::from_rupiah(1_000),
                status: None,
            })
            .await
            .unwrap();
        }

        let low = db.reports().low_stock(3).await.unwrap();
        // C (70) is above the threshold; the rest come back lowest-first
        let names: Vec<_> = low.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["B", "D", "A"]);
        assert_eq!(low[0].stock, 5);
    }

    #[tokio::test]
    async fn test_daily_revenue_sums_todays_sales() {
        let db = test_db().await;

        seed_and_sell(&db, 10_000, 5).await;
        seed_and_sell(&db, 2_500, 5).await;

        let series = db.reports().daily_revenue(7).await.unwrap();
        // Both sales land in today's bucket
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].total, Money::from_rupiah(12_500));
        assert_eq!(series[0].day, chrono::Utc::now().date_naive());
    }
}
