//! Account registration and authentication.

use crate::error::{Error, Result};
use crate::hasher::digest;
use crate::models::UserId;
use crate::store::{is_unique_violation, SqliteStore};
use rusqlite::{params, OptionalExtension};

/// Trait for account operations.
pub trait AccountService {
    /// Register a new account and return its id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateUsername`] if the username is taken, or a
    /// storage error if the insert fails for any other reason.
    fn register(&self, username: &str, password: &str) -> Result<UserId>;

    /// Look up the account whose username and password digest both match.
    ///
    /// Returns `Ok(None)` both for an unknown username and for a wrong
    /// password; callers cannot tell the two apart.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the lookup itself fails.
    fn authenticate(&self, username: &str, password: &str) -> Result<Option<UserId>>;
}

impl AccountService for SqliteStore {
    fn register(&self, username: &str, password: &str) -> Result<UserId> {
        let password_digest = digest(password);
        self.with_transaction(|conn| {
            match conn.execute(
                "INSERT INTO users (username, password) VALUES (?1, ?2)",
                params![username, password_digest],
            ) {
                Ok(_) => Ok(UserId::new(conn.last_insert_rowid())),
                Err(e) if is_unique_violation(&e) => {
                    Err(Error::DuplicateUsername(username.to_string()))
                }
                Err(e) => Err(e.into()),
            }
        })
    }

    fn authenticate(&self, username: &str, password: &str) -> Result<Option<UserId>> {
        let password_digest = digest(password);
        self.with_transaction(|conn| {
            let id = conn
                .query_row(
                    "SELECT id FROM users WHERE username = ?1 AND password = ?2",
                    params![username, password_digest],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(id.map(UserId::new))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, SqliteStore) {
        let dir = TempDir::new().unwrap();
        let store = SqliteStore::new(dir.path().join("todo.db")).unwrap();
        (dir, store)
    }

    fn stored_password(store: &SqliteStore, username: &str) -> String {
        store
            .with_transaction(|conn| {
                Ok(conn.query_row(
                    "SELECT password FROM users WHERE username = ?1",
                    params![username],
                    |row| row.get(0),
                )?)
            })
            .unwrap()
    }

    #[test]
    fn test_register_then_authenticate() {
        let (_dir, store) = create_test_store();

        let id = store.register("alice", "pw1").unwrap();
        assert_eq!(store.authenticate("alice", "pw1").unwrap(), Some(id));
    }

    #[test]
    fn test_ids_are_distinct_and_increasing() {
        let (_dir, store) = create_test_store();

        let alice = store.register("alice", "pw").unwrap();
        let bob = store.register("bob", "pw").unwrap();
        assert!(bob.get() > alice.get());
    }

    #[test]
    fn test_password_stored_as_digest() {
        let (_dir, store) = create_test_store();

        store.register("alice", "pw1").unwrap();
        assert_eq!(stored_password(&store, "alice"), digest("pw1"));
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let (_dir, store) = create_test_store();

        let original = store.register("alice", "pw1").unwrap();
        let err = store.register("alice", "other").unwrap_err();
        assert!(matches!(err, Error::DuplicateUsername(ref name) if name == "alice"));

        // Existing row untouched
        assert_eq!(stored_password(&store, "alice"), digest("pw1"));
        assert_eq!(store.authenticate("alice", "pw1").unwrap(), Some(original));
        assert_eq!(store.authenticate("alice", "other").unwrap(), None);
    }

    #[test]
    fn test_wrong_password_and_unknown_user_look_the_same() {
        let (_dir, store) = create_test_store();
        store.register("alice", "pw1").unwrap();

        let wrong_password = store.authenticate("alice", "nope").unwrap();
        let unknown_user = store.authenticate("mallory", "pw1").unwrap();
        assert_eq!(wrong_password, None);
        assert_eq!(wrong_password, unknown_user);
    }

    #[test]
    fn test_usernames_are_case_sensitive() {
        let (_dir, store) = create_test_store();
        store.register("alice", "pw1").unwrap();

        assert_eq!(store.authenticate("Alice", "pw1").unwrap(), None);
        assert!(store.register("Alice", "pw1").is_ok());
    }

    #[test]
    fn test_shared_passwords_produce_identical_digests() {
        let (_dir, store) = create_test_store();
        store.register("alice", "same").unwrap();
        store.register("bob", "same").unwrap();

        assert_eq!(stored_password(&store, "alice"), stored_password(&store, "bob"));
    }

    #[test]
    fn test_storage_fault_propagates() {
        let (dir, store) = create_test_store();
        // Replace the database file with a directory.
        std::fs::remove_file(store.db_path()).unwrap();
        std::fs::create_dir(dir.path().join("todo.db")).unwrap();

        let err = store.register("alice", "pw1").unwrap_err();
        assert!(err.is_storage_fault());
        assert!(store.authenticate("alice", "pw1").is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn register_then_authenticate_roundtrip(
            username in "[a-zA-Z0-9_]{1,16}",
            password in ".{0,32}",
        ) {
            let (_dir, store) = create_test_store();
            let id = store.register(&username, &password).unwrap();
            prop_assert_eq!(store.authenticate(&username, &password).unwrap(), Some(id));
        }
    }
}
