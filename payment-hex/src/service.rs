//! Payment Application Service
//!
//! Gates every payment on a compliance verdict obtained through the
//! `ComplianceVerdictProvider` port. Contains NO infrastructure logic.

use cards_types::{
    ComplianceVerdictProvider, PaymentError, PaymentReceipt, PaymentRequest,
    TransactionIdGenerator,
};

/// Application service for payment operations.
///
/// Generic over the verdict provider and the id generator; both are injected
/// at compile time so tests can swap in scripted providers and fixed ids.
pub struct PaymentService<V, G>
where
    V: ComplianceVerdictProvider,
    G: TransactionIdGenerator,
{
    verdicts: V,
    ids: G,
}

impl<V, G> PaymentService<V, G>
where
    V: ComplianceVerdictProvider,
    G: TransactionIdGenerator,
{
    /// Creates a new payment service.
    pub fn new(verdicts: V, ids: G) -> Self {
        Self { verdicts, ids }
    }

    /// Returns a reference to the verdict provider.
    pub fn verdicts(&self) -> &V {
        &self.verdicts
    }

    /// Authorizes a payment.
    ///
    /// The request is validated before the provider is contacted. Any
    /// provider failure denies the payment.
    pub async fn process_payment(
        &self,
        req: PaymentRequest,
    ) -> Result<PaymentReceipt, PaymentError> {
        req.validate()?;

        let verdict = self
            .verdicts
            .check_compliance(req.user_id, req.card_id)
            .await
            .map_err(|e| {
                tracing::warn!(
                    user_id = %req.user_id,
                    card_id = %req.card_id,
                    error = ?e,
                    "compliance check failed, denying payment"
                );
                PaymentError::from(e)
            })?;

        if !verdict.compliant {
            tracing::info!(
                user_id = %req.user_id,
                card_id = %req.card_id,
                reason = %verdict.message,
                "payment denied"
            );
            return Err(PaymentError::Denied(verdict.message));
        }

        let receipt = PaymentReceipt::new(self.ids.next_id());
        tracing::info!(
            user_id = %req.user_id,
            card_id = %req.card_id,
            amount = req.amount,
            transaction_id = %receipt.transaction_id,
            "payment authorized"
        );
        Ok(receipt)
    }
}
