//! Compliance verdict returned by the status check.

/// Whether a card may transact for a user, plus the reason.
///
/// A negative verdict is a normal result, not an error: the card may simply
/// belong to someone else or sit in the stolen-card ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplianceVerdict {
    pub compliant: bool,
    pub message: String,
}

impl ComplianceVerdict {
    pub const COMPLIANT: &'static str = "user is compliant";
    pub const CARD_NOT_OWNED: &'static str = "the provided card does not belong to the user";
    pub const BLOCKED: &'static str = "user is currently blocked due to reported stolen card(s)";

    pub fn new(compliant: bool, message: impl Into<String>) -> Self {
        Self {
            compliant,
            message: message.into(),
        }
    }

    /// Card is owned and not reported.
    pub fn compliant() -> Self {
        Self::new(true, Self::COMPLIANT)
    }

    pub fn card_not_owned() -> Self {
        Self::new(false, Self::CARD_NOT_OWNED)
    }

    pub fn blocked() -> Self {
        Self::new(false, Self::BLOCKED)
    }
}
