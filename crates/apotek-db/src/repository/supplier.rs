//! # Supplier Repository
//!
//! Database operations for the supplier registry.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use apotek_core::{NewSupplier, Supplier};

const SUPPLIER_COLUMNS: &str =
    "id, nama_supplier AS name, alamat AS address, telepon AS phone, email";

/// Repository for supplier database operations.
#[derive(Debug, Clone)]
pub struct SupplierRepository {
    pool: SqlitePool,
}

impl SupplierRepository {
    /// Creates a new SupplierRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SupplierRepository { pool }
    }

    /// Lists all suppliers ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Supplier>> {
        let suppliers = sqlx::query_as::<_, Supplier>(&format!(
            "SELECT {SUPPLIER_COLUMNS} FROM suppliers ORDER BY nama_supplier"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(suppliers)
    }

    /// Gets a supplier by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Supplier>> {
        let supplier = sqlx::query_as::<_, Supplier>(&format!(
            "SELECT {SUPPLIER_COLUMNS} FROM suppliers WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(supplier)
    }

    /// Registers a new supplier and returns it with its store-assigned id.
    pub async fn insert(&self, supplier: &NewSupplier) -> DbResult<Supplier> {
        debug!(name = %supplier.name, "Registering supplier");

        let result = sqlx::query(
            "INSERT INTO suppliers (nama_supplier, alamat, telepon, email) \
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&supplier.name)
        .bind(&supplier.address)
        .bind(&supplier.phone)
        .bind(&supplier.email)
        .execute(&self.pool)
        .await?;

        Ok(Supplier {
            id: result.last_insert_rowid(),
            name: supplier.name.clone(),
            address: supplier.address.clone(),
            phone: supplier.phone.clone(),
            email: supplier.email.clone(),
        })
    }

    /// Counts suppliers (for the dashboard).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM suppliers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use apotek_core::NewSupplier;

    #[tokio::test]
    async fn test_supplier_roundtrip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.suppliers();

        let supplier = repo
            .insert(&NewSupplier {
                name: "PT Kimia Farma".to_string(),
                address: "Jl. Veteran 9".to_string(),
                phone: "021-3847709".to_string(),
                email: "sales@kimiafarma.example".to_string(),
            })
            .await
            .unwrap();

        let fetched = repo.get_by_id(supplier.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "PT Kimia Farma");

        assert_eq!(repo.list().await.unwrap().len(), 1);
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
