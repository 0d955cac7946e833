//! Compliance Application Service
//!
//! Orchestrates credential checks, card ownership and the stolen-card ledger
//! through the store ports. Contains NO infrastructure logic.

use cards_types::{
    CardId, CardOwnershipStore, ComplianceError, ComplianceVerdict, CredentialStore, RepoError,
    StolenCardLedger, UserId,
};

/// Successful result of a stolen-card report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// Every owned card is now in the ledger.
    Blocked { cards: usize },
    /// The user owns no cards; nothing was written.
    NoCards,
    /// The cards were reported before; the ledger is unchanged.
    AlreadyReported { user_name: String },
}

impl ReportOutcome {
    /// Plain-text confirmation returned to the caller.
    pub fn message(&self) -> String {
        match self {
            ReportOutcome::Blocked { .. } => "all the cards linked to the provided user are now blocked. Contact @support-team for more information.".to_string(),
            ReportOutcome::NoCards => "no cards found for the user.".to_string(),
            ReportOutcome::AlreadyReported { user_name } => {
                format!("the report for {} has already been submitted.", user_name)
            }
        }
    }
}

/// Application service for compliance operations.
///
/// Generic over one adapter per store port, injected at compile time.
/// The service keeps no state of its own between calls.
pub struct ComplianceService<U, C, L>
where
    U: CredentialStore,
    C: CardOwnershipStore,
    L: StolenCardLedger,
{
    users: U,
    cards: C,
    ledger: L,
}

impl<U, C, L> ComplianceService<U, C, L>
where
    U: CredentialStore,
    C: CardOwnershipStore,
    L: StolenCardLedger,
{
    /// Creates a new compliance service over the given stores.
    pub fn new(users: U, cards: C, ledger: L) -> Self {
        Self {
            users,
            cards,
            ledger,
        }
    }

    /// Reports every card owned by the user as stolen.
    ///
    /// Requires the user's secret. A repeated report is a success, not an
    /// error.
    pub async fn report_stolen(
        &self,
        user_name: &str,
        secret_code: &str,
    ) -> Result<ReportOutcome, ComplianceError> {
        let user = self
            .users
            .find_user_by_name(user_name)
            .await
            .map_err(ComplianceError::store("error retrieving user"))?
            .ok_or(ComplianceError::UserNotFound)?;

        // bcrypt is slow on purpose; keep it off the async workers.
        let hash = user.secret_hash.clone();
        let secret = secret_code.to_owned();
        let verified = tokio::task::spawn_blocking(move || hash.verify(&secret))
            .await
            .map_err(|e| ComplianceError::Internal(e.to_string()))?;

        if !verified {
            tracing::warn!(user_id = %user.id, "secret verification failed");
            return Err(ComplianceError::InvalidCredentials);
        }

        let card_ids = self
            .cards
            .cards_for_user(user.id)
            .await
            .map_err(ComplianceError::store("error retrieving user cards"))?;

        if card_ids.is_empty() {
            tracing::info!(user_id = %user.id, "no cards to report");
            return Ok(ReportOutcome::NoCards);
        }

        match self.ledger.report_stolen(user.id, &card_ids).await {
            Ok(()) => {
                tracing::info!(user_id = %user.id, cards = card_ids.len(), "cards reported stolen");
                Ok(ReportOutcome::Blocked {
                    cards: card_ids.len(),
                })
            }
            Err(RepoError::Conflict(detail)) => {
                tracing::info!(user_id = %user.id, %detail, "cards already reported");
                Ok(ReportOutcome::AlreadyReported {
                    user_name: user.user_name,
                })
            }
            Err(e) => Err(ComplianceError::store("error reporting stolen cards")(e)),
        }
    }

    /// Computes the compliance verdict for a (user, card) pair.
    ///
    /// Trusts the caller's identifiers; no authentication on this path.
    pub async fn check_status(
        &self,
        user_id: UserId,
        card_id: CardId,
    ) -> Result<ComplianceVerdict, ComplianceError> {
        let owned = self
            .cards
            .cards_for_user(user_id)
            .await
            .map_err(ComplianceError::store("error retrieving user cards"))?;

        if !owned.contains(&card_id) {
            return Ok(ComplianceVerdict::card_not_owned());
        }

        let reported = self
            .ledger
            .is_reported(user_id, card_id)
            .await
            .map_err(ComplianceError::store("error checking compliance status"))?;

        let verdict = if reported {
            ComplianceVerdict::blocked()
        } else {
            ComplianceVerdict::compliant()
        };

        tracing::debug!(%user_id, %card_id, compliant = verdict.compliant, "status checked");
        Ok(verdict)
    }
}
