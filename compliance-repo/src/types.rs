//! Shared database row types and error mapping for the SQL adapters.

use sqlx::FromRow;

use cards_types::{RepoError, SecretHash, UserCredentials, UserId};

/// User row from database.
#[derive(FromRow)]
pub struct DbUser {
    pub id: i64,
    pub user_name: String,
    pub secret_code: String,
}

impl DbUser {
    pub fn into_domain(self) -> UserCredentials {
        UserCredentials {
            id: UserId::new(self.id),
            user_name: self.user_name,
            secret_hash: SecretHash::from_stored(self.secret_code),
        }
    }
}

/// Maps a driver error, keeping uniqueness violations distinguishable so the
/// service can treat a repeated report as already done.
pub fn map_db_error(err: sqlx::Error) -> RepoError {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            RepoError::Conflict(db_err.message().to_string())
        }
        other => RepoError::Database(other.to_string()),
    }
}
