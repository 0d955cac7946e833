//! SQLite repository integration tests.

#[cfg(test)]
mod tests {
    use cards_types::{
        CardId, CardOwnershipStore, CredentialStore, RepoError, SecretHash, StolenCardLedger,
        UserId,
    };

    use crate::SqliteRepo;

    async fn setup_repo() -> SqliteRepo {
        SqliteRepo::new("sqlite::memory:").await.unwrap()
    }

    /// Seeds a user owning `cards` cards and returns the ids.
    async fn seed_user(repo: &SqliteRepo, name: &str, cards: usize) -> (UserId, Vec<CardId>) {
        let hash = SecretHash::generate("secure123", 4).unwrap();
        let user_id = repo.create_user(name, &hash).await.unwrap();

        let mut card_ids = Vec::new();
        for _ in 0..cards {
            card_ids.push(repo.add_card(user_id).await.unwrap());
        }
        (user_id, card_ids)
    }

    #[tokio::test]
    async fn test_find_user_by_name() {
        let repo = setup_repo().await;
        let (user_id, _) = seed_user(&repo, "john_doe", 0).await;

        let user = repo.find_user_by_name("john_doe").await.unwrap().unwrap();

        assert_eq!(user.id, user_id);
        assert_eq!(user.user_name, "john_doe");
        assert!(user.secret_hash.verify("secure123"));
    }

    #[tokio::test]
    async fn test_find_user_not_found() {
        let repo = setup_repo().await;

        let result = repo.find_user_by_name("nobody").await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_user_name_is_conflict() {
        let repo = setup_repo().await;
        seed_user(&repo, "john_doe", 0).await;

        let hash = SecretHash::generate("other", 4).unwrap();
        let result = repo.create_user("john_doe", &hash).await;

        assert!(matches!(result, Err(RepoError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_cards_for_user() {
        let repo = setup_repo().await;
        let (john, john_cards) = seed_user(&repo, "john_doe", 2).await;
        let (jane, jane_cards) = seed_user(&repo, "jane_doe", 1).await;

        assert_eq!(repo.cards_for_user(john).await.unwrap(), john_cards);
        assert_eq!(repo.cards_for_user(jane).await.unwrap(), jane_cards);
    }

    #[tokio::test]
    async fn test_cards_for_user_without_cards() {
        let repo = setup_repo().await;
        let (user_id, _) = seed_user(&repo, "john_doe", 0).await;

        assert!(repo.cards_for_user(user_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_report_stolen_and_lookup() {
        let repo = setup_repo().await;
        let (user_id, cards) = seed_user(&repo, "john_doe", 2).await;

        assert!(!repo.is_reported(user_id, cards[0]).await.unwrap());

        repo.report_stolen(user_id, &cards).await.unwrap();

        assert!(repo.is_reported(user_id, cards[0]).await.unwrap());
        assert!(repo.is_reported(user_id, cards[1]).await.unwrap());
    }

    #[tokio::test]
    async fn test_repeat_report_is_conflict_and_keeps_one_row() {
        let repo = setup_repo().await;
        let (user_id, cards) = seed_user(&repo, "john_doe", 2).await;

        repo.report_stolen(user_id, &cards).await.unwrap();
        let result = repo.report_stolen(user_id, &cards).await;

        assert!(matches!(result, Err(RepoError::Conflict(_))));
        for card_id in &cards {
            assert_eq!(repo.count_reports(user_id, *card_id).await.unwrap(), 1);
        }
    }

    #[tokio::test]
    async fn test_partial_duplicate_batch_rolls_back() {
        let repo = setup_repo().await;
        let (user_id, cards) = seed_user(&repo, "john_doe", 2).await;

        // Only the second card is already reported.
        repo.report_stolen(user_id, &cards[1..]).await.unwrap();

        let result = repo.report_stolen(user_id, &cards).await;
        assert!(matches!(result, Err(RepoError::Conflict(_))));

        // The first insert of the failed batch must not have committed.
        assert!(!repo.is_reported(user_id, cards[0]).await.unwrap());
        assert_eq!(repo.count_reports(user_id, cards[1]).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_report_unknown_card_is_database_error() {
        let repo = setup_repo().await;
        let (user_id, _) = seed_user(&repo, "john_doe", 0).await;

        let result = repo.report_stolen(user_id, &[CardId::new(999)]).await;

        assert!(matches!(result, Err(RepoError::Database(_))));
    }

    #[tokio::test]
    async fn test_run_script_seeds_data() {
        let repo = setup_repo().await;
        let hash = SecretHash::generate("secure123", 4).unwrap();

        let script = format!(
            "INSERT INTO users (user_name, secret_code) VALUES ('seeded', '{}');\n\
             INSERT INTO cards (user_id) SELECT id FROM users WHERE user_name = 'seeded';",
            hash.as_str()
        );
        repo.run_script(&script).await.unwrap();

        let user = repo.find_user_by_name("seeded").await.unwrap().unwrap();
        assert_eq!(repo.cards_for_user(user.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_schema_creation_is_idempotent() {
        let repo = setup_repo().await;
        repo.create_schema().await.unwrap();
    }
}
