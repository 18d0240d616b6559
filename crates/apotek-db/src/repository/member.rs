//! # Member Repository
//!
//! Database operations for the member registry.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use apotek_core::{Member, NewMember};

const MEMBER_COLUMNS: &str =
    "id, nama_member AS name, alamat AS address, telepon AS phone, email";

/// Repository for member database operations.
#[derive(Debug, Clone)]
pub struct MemberRepository {
    pool: SqlitePool,
}

impl MemberRepository {
    /// Creates a new MemberRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MemberRepository { pool }
    }

    /// Lists all members ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Member>> {
        let members = sqlx::query_as::<_, Member>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members ORDER BY nama_member"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    /// Gets a member by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Member>> {
        let member = sqlx::query_as::<_, Member>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(member)
    }

    /// Registers a new member and returns it with its store-assigned id.
    pub async fn insert(&self, member: &NewMember) -> DbResult<Member> {
        debug!(name = %member.name, "Registering member");

        let result = sqlx::query(
            "INSERT INTO members (nama_member, alamat, telepon, email) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&member.name)
        .bind(&member.address)
        .bind(&member.phone)
        .bind(&member.email)
        .execute(&self.pool)
        .await?;

        Ok(Member {
            id: result.last_insert_rowid(),
            name: member.name.clone(),
            address: member.address.clone(),
            phone: member.phone.clone(),
            email: member.email.clone(),
        })
    }

    /// Removes a member.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting member");

        let result = sqlx::query("DELETE FROM members WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Member", id.to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use apotek_core::NewMember;

    #[tokio::test]
    async fn test_member_roundtrip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.members();

        let member = repo
            .insert(&NewMember {
                name: "Budi Santoso".to_string(),
                address: "Jl. Merdeka 1".to_string(),
                phone: "0812-0000-0001".to_string(),
                email: "budi@example.com".to_string(),
            })
            .await
            .unwrap();

        let fetched = repo.get_by_id(member.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Budi Santoso");
        assert_eq!(fetched.phone, "0812-0000-0001");

        assert_eq!(repo.list().await.unwrap().len(), 1);

        repo.delete(member.id).await.unwrap();
        assert!(repo.get_by_id(member.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_member_errors() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.members().delete(42).await.is_err());
    }
}
