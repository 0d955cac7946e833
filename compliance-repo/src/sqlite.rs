//! SQLite repository adapter.
#![allow(clippy::collapsible_if)]

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::str::FromStr;

use cards_types::{
    CardId, CardOwnershipStore, CredentialStore, RepoError, SecretHash, StolenCardLedger,
    UserCredentials, UserId,
};

use crate::types::{DbUser, map_db_error};

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
///
/// Cloning is cheap: clones share the same connection pool.
#[derive(Clone)]
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            // Remove query parameters
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        let repo = Self { pool };
        repo.create_schema().await?;

        Ok(repo)
    }

    /// Creates the database schema (idempotent).
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        let ddl = include_str!("../migrations/0001_create_tables.sql");
        sqlx::raw_sql(ddl)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(())
    }

    /// Runs an arbitrary SQL script, e.g. seed data.
    pub async fn run_script(&self, sql: &str) -> Result<(), RepoError> {
        sqlx::raw_sql(sql)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }

    /// Inserts a user with an already hashed secret.
    pub async fn create_user(
        &self,
        user_name: &str,
        secret_hash: &SecretHash,
    ) -> Result<UserId, RepoError> {
        let result = sqlx::query(r#"INSERT INTO users (user_name, secret_code) VALUES (?, ?)"#)
            .bind(user_name)
            .bind(secret_hash.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(UserId::new(result.last_insert_rowid()))
    }

    /// Issues a new card to a user.
    pub async fn add_card(&self, user_id: UserId) -> Result<CardId, RepoError> {
        let result = sqlx::query(r#"INSERT INTO cards (user_id) VALUES (?)"#)
            .bind(user_id.get())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(CardId::new(result.last_insert_rowid()))
    }

    /// Counts ledger rows for a pair. Used to check idempotency.
    pub async fn count_reports(&self, user_id: UserId, card_id: CardId) -> Result<i64, RepoError> {
        sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM reported_cards WHERE user_id = ? AND card_id = ?"#,
        )
        .bind(user_id.get())
        .bind(card_id.get())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Port implementations
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl CredentialStore for SqliteRepo {
    async fn find_user_by_name(
        &self,
        user_name: &str,
    ) -> Result<Option<UserCredentials>, RepoError> {
        let row: Option<DbUser> =
            sqlx::query_as(r#"SELECT id, user_name, secret_code FROM users WHERE user_name = ?"#)
                .bind(user_name)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(row.map(DbUser::into_domain))
    }
}

#[async_trait]
impl CardOwnershipStore for SqliteRepo {
    async fn cards_for_user(&self, user_id: UserId) -> Result<Vec<CardId>, RepoError> {
        let ids: Vec<i64> =
            sqlx::query_scalar(r#"SELECT id FROM cards WHERE user_id = ? ORDER BY id"#)
                .bind(user_id.get())
                .fetch_all(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(ids.into_iter().map(CardId::new).collect())
    }
}

#[async_trait]
impl StolenCardLedger for SqliteRepo {
    async fn report_stolen(&self, user_id: UserId, card_ids: &[CardId]) -> Result<(), RepoError> {
        let mut db_tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::Transaction(e.to_string()))?;

        for card_id in card_ids {
            let inserted = sqlx::query(r#"INSERT INTO reported_cards (user_id, card_id) VALUES (?, ?)"#)
                .bind(user_id.get())
                .bind(card_id.get())
                .execute(&mut *db_tx)
                .await;

            if let Err(e) = inserted {
                db_tx
                    .rollback()
                    .await
                    .map_err(|e| RepoError::Transaction(e.to_string()))?;
                return Err(map_db_error(e));
            }
        }

        db_tx
            .commit()
            .await
            .map_err(|e| RepoError::Transaction(e.to_string()))?;

        Ok(())
    }

    async fn is_reported(&self, user_id: UserId, card_id: CardId) -> Result<bool, RepoError> {
        let exists: i64 = sqlx::query_scalar(
            r#"SELECT EXISTS(SELECT 1 FROM reported_cards WHERE user_id = ? AND card_id = ?)"#,
        )
        .bind(user_id.get())
        .bind(card_id.get())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(exists != 0)
    }
}
