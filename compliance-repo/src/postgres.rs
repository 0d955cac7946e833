//! PostgreSQL repository adapter.

use async_trait::async_trait;
use sqlx::PgPool;

use cards_types::{
    CardId, CardOwnershipStore, CredentialStore, RepoError, SecretHash, StolenCardLedger,
    UserCredentials, UserId,
};

use crate::types::{DbUser, map_db_error};

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository implementation.
#[derive(Clone)]
pub struct PostgresRepo {
    pool: PgPool,
}

/// Runs all database migrations.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    sqlx::raw_sql(include_str!("../migrations/0001_create_tables_pg.sql"))
        .execute(pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration 0001 failed: {}", e))?;

    Ok(())
}

impl PostgresRepo {
    /// Connects and migrates.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
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
        let id: i64 = sqlx::query_scalar(
            r#"INSERT INTO users (user_name, secret_code) VALUES ($1, $2) RETURNING id"#,
        )
        .bind(user_name)
        .bind(secret_hash.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(UserId::new(id))
    }

    /// Issues a new card to a user.
    pub async fn add_card(&self, user_id: UserId) -> Result<CardId, RepoError> {
        let id: i64 = sqlx::query_scalar(r#"INSERT INTO cards (user_id) VALUES ($1) RETURNING id"#)
            .bind(user_id.get())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(CardId::new(id))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Port implementations
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl CredentialStore for PostgresRepo {
    async fn find_user_by_name(
        &self,
        user_name: &str,
    ) -> Result<Option<UserCredentials>, RepoError> {
        let row: Option<DbUser> =
            sqlx::query_as(r#"SELECT id, user_name, secret_code FROM users WHERE user_name = $1"#)
                .bind(user_name)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(row.map(DbUser::into_domain))
    }
}

#[async_trait]
impl CardOwnershipStore for PostgresRepo {
    async fn cards_for_user(&self, user_id: UserId) -> Result<Vec<CardId>, RepoError> {
        let ids: Vec<i64> =
            sqlx::query_scalar(r#"SELECT id FROM cards WHERE user_id = $1 ORDER BY id"#)
                .bind(user_id.get())
                .fetch_all(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(ids.into_iter().map(CardId::new).collect())
    }
}

#[async_trait]
impl StolenCardLedger for PostgresRepo {
    async fn report_stolen(&self, user_id: UserId, card_ids: &[CardId]) -> Result<(), RepoError> {
        let mut db_tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::Transaction(e.to_string()))?;

        for card_id in card_ids {
            let inserted = sqlx::query(r#"INSERT INTO reported_cards (user_id, card_id) VALUES ($1, $2)"#)
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
        sqlx::query_scalar(
            r#"SELECT EXISTS(SELECT 1 FROM reported_cards WHERE user_id = $1 AND card_id = $2)"#,
        )
        .bind(user_id.get())
        .bind(card_id.get())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }
}
