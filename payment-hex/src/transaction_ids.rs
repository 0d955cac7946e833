//! Random transaction id generator.

use rand::Rng;

use cards_types::{TransactionIdGenerator, TransactionRef};

const ID_RANGE: std::ops::Range<u32> = 1_000_000..10_000_000;

/// Yields `txn_` followed by seven random digits.
///
/// Ids are not guaranteed unique.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTransactionIds;

impl TransactionIdGenerator for RandomTransactionIds {
    fn next_id(&self) -> TransactionRef {
        let n = rand::rng().random_range(ID_RANGE);
        TransactionRef::new(format!("txn_{}", n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_format() {
        for _ in 0..100 {
            let id = RandomTransactionIds.next_id();
            let digits = id.as_str().strip_prefix("txn_").unwrap();
            assert_eq!(digits.len(), 7);
            assert!(digits.chars().all(|c| c.is_ascii_digit()));
            assert!(!digits.starts_with('0'));
        }
    }
}
