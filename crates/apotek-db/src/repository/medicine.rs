//! # Medicine Repository
//!
//! Database operations for medicines.
//!
//! ## Key Operations
//! - Listing (full, and the in-stock subset the sale screen offers)
//! - CRUD operations
//! - Stock adjustment by delta

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use apotek_core::{Medicine, NewMedicine};

/// Every medicine query selects through these aliases so rows decode
/// straight into [`Medicine`].
const MEDICINE_COLUMNS: &str = "id, nama_obat AS name, kategori AS category, \
     satuan AS unit, stok AS stock, harga_jual AS price, status";

/// Repository for medicine database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = MedicineRepository::new(pool);
///
/// // The sale screen's selectable set
/// let sellable = repo.list_in_stock().await?;
///
/// // Get by ID
/// let medicine = repo.get_by_id(1).await?;
/// ```
#[derive(Debug, Clone)]
pub struct MedicineRepository {
    pool: SqlitePool,
}

impl MedicineRepository {
    /// Creates a new MedicineRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MedicineRepository { pool }
    }

    /// Lists all medicines ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Medicine>> {
        let medicines = sqlx::query_as::<_, Medicine>(&format!(
            "SELECT {MEDICINE_COLUMNS} FROM medicines ORDER BY nama_obat"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(medicines)
    }

    /// Lists medicines with stock on hand (the set offered for sale).
    pub async fn list_in_stock(&self) -> DbResult<Vec<Medicine>> {
        let medicines = sqlx::query_as::<_, Medicine>(&format!(
            "SELECT {MEDICINE_COLUMNS} FROM medicines WHERE stok > 0 ORDER BY nama_obat"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = medicines.len(), "Listed in-stock medicines");
        Ok(medicines)
    }

    /// Gets a medicine by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Medicine))` - Medicine found
    /// * `Ok(None)` - Medicine not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Medicine>> {
        let medicine = sqlx::query_as::<_, Medicine>(&format!(
            "SELECT {MEDICINE_COLUMNS} FROM medicines WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(medicine)
    }

    /// Inserts a new medicine and returns it with its store-assigned id.
    pub async fn insert(&self, medicine: &NewMedicine) -> DbResult<Medicine> {
        debug!(name = %medicine.name, "Inserting medicine");

        let result = sqlx::query(
            "INSERT INTO medicines (nama_obat, kategori, satuan, stok, harga_jual, status) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(&medicine.name)
        .bind(&medicine.category)
        .bind(&medicine.unit)
        .bind(medicine.stock)
        .bind(medicine.price)
        .bind(&medicine.status)
        .execute(&self.pool)
        .await?;

        Ok(Medicine {
            id: result.last_insert_rowid(),
            name: medicine.name.clone(),
            category: medicine.category.clone(),
            unit: medicine.unit.clone(),
            stock: medicine.stock,
            price: medicine.price,
            status: medicine.status.clone(),
        })
    }

    /// Updates an existing medicine.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - Medicine doesn't exist
    pub async fn update(&self, medicine: &Medicine) -> DbResult<()> {
        debug!(id = %medicine.id, "Updating medicine");

        let result = sqlx::query(
            "UPDATE medicines SET \
                 nama_obat = ?2, \
                 kategori = ?3, \
                 satuan = ?4, \
                 stok = ?5, \
                 harga_jual = ?6, \
                 status = ?7 \
             WHERE id = ?1",
        )
        .bind(medicine.id)
        .bind(&medicine.name)
        .bind(&medicine.category)
        .bind(&medicine.unit)
        .bind(medicine.stock)
        .bind(medicine.price)
        .bind(&medicine.status)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Medicine", medicine.id.to_string()));
        }

        Ok(())
    }

    /// Deletes a medicine.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - Medicine doesn't exist
    /// * `DbError::ForeignKeyViolation` - Sale history still references it
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting medicine");

        let result = sqlx::query("DELETE FROM medicines WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Medicine", id.to_string()));
        }

        Ok(())
    }

    /// Adjusts a medicine's stock by a delta.
    ///
    /// ## Arguments
    /// * `id` - Medicine ID
    /// * `delta` - Change in stock (positive for restocking; sale decrements
    ///   go through the checkout transaction instead)
    pub async fn adjust_stock(&self, id: i64, delta: i64) -> DbResult<()> {
        debug!(id = %id, delta = %delta, "Adjusting stock");

        let result = sqlx::query("UPDATE medicines SET stok = stok + ?2 WHERE id = ?1")
            .bind(id)
            .bind(delta)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Medicine", id.to_string()));
        }

        Ok(())
    }

    /// Counts medicines (for the dashboard).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM medicines")
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
    use crate::pool::{Database, DbConfig};
    use apotek_core::{Money, NewMedicine};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn paracetamol(stock: i64) -> NewMedicine {
        NewMedicine {
            name: "Paracetamol 500mg".to_string(),
            category: "Analgesik".to_string(),
            unit: "Strip".to_string(),
            stock,
            price: Money::from_rupiah(10_000),
            status: Some("Tersedia".to_string()),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = test_db().await;

        let inserted = db.medicines().insert(&paracetamol(20)).await.unwrap();
        assert!(inserted.id > 0);

        let fetched = db.medicines().get_by_id(inserted.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Paracetamol 500mg");
        assert_eq!(fetched.stock, 20);
        assert_eq!(fetched.price, Money::from_rupiah(10_000));
        assert_eq!(fetched.status.as_deref(), Some("Tersedia"));
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let db = test_db().await;
        assert!(db.medicines().get_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_in_stock_filters_empty() {
        let db = test_db().await;
        let repo = db.medicines();

        repo.insert(&paracetamol(5)).await.unwrap();
        let mut empty = paracetamol(0);
        empty.name = "Amoxicillin 500mg".to_string();
        repo.insert(&empty).await.unwrap();

        let sellable = repo.list_in_stock().await.unwrap();
        assert_eq!(sellable.len(), 1);
        assert_eq!(sellable[0].name, "Paracetamol 500mg");

        // Full listing still shows both
        assert_eq!(repo.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update() {
        let db = test_db().await;
        let repo = db.medicines();

        let mut medicine = repo.insert(&paracetamol(20)).await.unwrap();
        medicine.stock = 35;
        medicine.price = Money::from_rupiah(12_000);
        repo.update(&medicine).await.unwrap();

        let fetched = repo.get_by_id(medicine.id).await.unwrap().unwrap();
        assert_eq!(fetched.stock, 35);
        assert_eq!(fetched.price, Money::from_rupiah(12_000));
    }

    #[tokio::test]
    async fn test_adjust_stock_delta() {
        let db = test_db().await;
        let repo = db.medicines();

        let medicine = repo.insert(&paracetamol(10)).await.unwrap();
        repo.adjust_stock(medicine.id, 15).await.unwrap();
        repo.adjust_stock(medicine.id, -5).await.unwrap();

        let fetched = repo.get_by_id(medicine.id).await.unwrap().unwrap();
        assert_eq!(fetched.stock, 20);
    }

    #[tokio::test]
    async fn test_delete() {
        let db = test_db().await;
        let repo = db.medicines();

        let medicine = repo.insert(&paracetamol(10)).await.unwrap();
        repo.delete(medicine.id).await.unwrap();

        assert!(repo.get_by_id(medicine.id).await.unwrap().is_none());
        assert!(repo.delete(medicine.id).await.is_err());
    }

    #[tokio::test]
    async fn test_count() {
        let db = test_db().await;
        let repo = db.medicines();

        assert_eq!(repo.count().await.unwrap(), 0);
        repo.insert(&paracetamol(10)).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
