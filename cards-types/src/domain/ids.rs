//! Numeric identifiers for users and cards.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Unique identifier for a User.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Creates a UserId from a raw database value.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    pub fn get(&self) -> i64 {
        self.0
    }

    /// Ids are assigned by the database starting at 1, so zero or a negative
    /// value means the caller never supplied one.
    pub fn is_valid(&self) -> bool {
        self.0 > 0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Unique identifier for a Card.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct CardId(i64);

impl CardId {
    /// Creates a CardId from a raw database value.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    pub fn get(&self) -> i64 {
        self.0
    }

    pub fn is_valid(&self) -> bool {
        self.0 > 0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CardId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_id() {
        let id: UserId = "42".parse().unwrap();
        assert_eq!(id.get(), 42);
        assert!(id.is_valid());
    }

    #[test]
    fn test_parse_card_id_rejects_text() {
        assert!("abc".parse::<CardId>().is_err());
    }

    #[test]
    fn test_default_id_is_not_valid() {
        assert!(!UserId::default().is_valid());
        assert!(!CardId::new(-3).is_valid());
    }
}
