//! Store ports for the compliance service.
//!
//! One trait per store so each can be swapped or mocked on its own.
//! The SQL adapters implement all three on the same connection pool.

use crate::domain::{CardId, UserCredentials, UserId};
use crate::error::RepoError;

/// Looks up users and their hashed secrets.
#[async_trait::async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Finds a user by unique username. `Ok(None)` when no such user exists.
    async fn find_user_by_name(&self, user_name: &str)
    -> Result<Option<UserCredentials>, RepoError>;
}

/// Maps a user to the cards they own.
#[async_trait::async_trait]
pub trait CardOwnershipStore: Send + Sync + 'static {
    /// Lists every card owned by the user. Empty when the user owns none.
    async fn cards_for_user(&self, user_id: UserId) -> Result<Vec<CardId>, RepoError>;
}

/// Append-only record of (user, card) pairs reported stolen.
#[async_trait::async_trait]
pub trait StolenCardLedger: Send + Sync + 'static {
    /// Records every card in one atomic batch: all rows commit or none do.
    ///
    /// Returns [`RepoError::Conflict`] when any pair is already present.
    async fn report_stolen(&self, user_id: UserId, card_ids: &[CardId]) -> Result<(), RepoError>;

    /// Checks whether the pair has been reported.
    async fn is_reported(&self, user_id: UserId, card_id: CardId) -> Result<bool, RepoError>;
}
