//! In-memory user store adapter.
//!
//! Reference implementation of the [`UserStore`] port used by tests and the
//! default server wiring; a production deployment substitutes a
//! database-backed adapter behind the same port. Rows live in a `BTreeMap`
//! keyed by id, which makes the ascending-id listing contract free.
//!
//! Email uniqueness is checked inside the mutex critical section, so
//! check-then-write is atomic with respect to concurrent callers. This is
//! the collaboration contract the orchestrator relies on. Soft-deleted rows stay
//! in the map with a `deleted_at` marker and are excluded from every read,
//! including the uniqueness lookup.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{NewUser, UserStore, UserStoreError};
use crate::domain::user::{User, UserId};

#[derive(Debug, Clone)]
struct Row {
    user: User,
    deleted_at: Option<DateTime<Utc>>,
}

impl Row {
    fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}

#[derive(Debug, Default)]
struct Inner {
    rows: BTreeMap<i64, Row>,
    last_id: i64,
}

impl Inner {
    fn active_email_taken(&self, email: &str, excluding: Option<i64>) -> bool {
        self.rows.iter().any(|(id, row)| {
            row.is_active() && row.user.email() == email && Some(*id) != excluding
        })
    }
}

/// Mutex-guarded map of users, ids assigned sequentially from 1.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    inner: Mutex<Inner>,
}

impl InMemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned lock surfaces as a port error; the port never panics.
    fn lock(&self) -> Result<MutexGuard<'_, Inner>, UserStoreError> {
        self.inner
            .lock()
            .map_err(|_| UserStoreError::query("store mutex poisoned"))
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, user: NewUser) -> Result<User, UserStoreError> {
        let mut inner = self.lock()?;
        if inner.active_email_taken(&user.email, None) {
            return Err(UserStoreError::duplicate_email(user.email));
        }

        let raw_id = inner.last_id + 1;
        let id = UserId::new(raw_id).map_err(|err| UserStoreError::query(err.to_string()))?;
        let now = Utc::now();
        let persisted = User::new(
            id,
            user.name,
            user.email,
            user.credential,
            user.age,
            now,
            now,
        );
        inner.last_id = raw_id;
        inner.rows.insert(
            raw_id,
            Row {
                user: persisted.clone(),
                deleted_at: None,
            },
        );
        Ok(persisted)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserStoreError> {
        let inner = self.lock()?;
        Ok(inner
            .rows
            .get(&id.get())
            .filter(|row| row.is_active())
            .map(|row| row.user.clone()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserStoreError> {
        let inner = self.lock()?;
        Ok(inner
            .rows
            .values()
            .find(|row| row.is_active() && row.user.email() == email)
            .map(|row| row.user.clone()))
    }

    async fn list_all(&self) -> Result<Vec<User>, UserStoreError> {
        let inner = self.lock()?;
        Ok(inner
            .rows
            .values()
            .filter(|row| row.is_active())
            .map(|row| row.user.clone())
            .collect())
    }

    async fn save(&self, user: &User) -> Result<User, UserStoreError> {
        let mut inner = self.lock()?;
        let id = user.id().get();
        match inner.rows.get(&id) {
            Some(row) if row.is_active() => {}
            _ => {
                return Err(UserStoreError::query(format!("no active user with id {id}")));
            }
        }
        if inner.active_email_taken(user.email(), Some(id)) {
            return Err(UserStoreError::duplicate_email(user.email()));
        }

        let persisted = User::new(
            user.id(),
            user.name(),
            user.email(),
            user.credential().clone(),
            user.age(),
            user.created_at(),
            Utc::now(),
        );
        inner.rows.insert(
            id,
            Row {
                user: persisted.clone(),
                deleted_at: None,
            },
        );
        Ok(persisted)
    }

    async fn soft_delete(&self, id: UserId) -> Result<(), UserStoreError> {
        let mut inner = self.lock()?;
        match inner.rows.get_mut(&id.get()) {
            Some(row) if row.is_active() => {
                row.deleted_at = Some(Utc::now());
                Ok(())
            }
            _ => Err(UserStoreError::query(format!(
                "no active user with id {}",
                id.get()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Credential;

    fn new_user(name: &str, email: &str) -> NewUser {
        NewUser {
            name: name.into(),
            email: email.into(),
            credential: Credential::derive("Passw0rd!"),
            age: 30,
        }
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids_and_timestamps() {
        let store = InMemoryUserStore::new();

        let first = store
            .insert(new_user("John Doe", "john@example.com"))
            .await
            .expect("first insert");
        let second = store
            .insert(new_user("Jane Doe", "jane@example.com"))
            .await
            .expect("second insert");

        assert_eq!(first.id().get(), 1);
        assert_eq!(second.id().get(), 2);
        assert_eq!(first.created_at(), first.updated_at());
    }

    #[tokio::test]
    async fn insert_rejects_active_duplicate_email() {
        let store = InMemoryUserStore::new();
        store
            .insert(new_user("John Doe", "john@example.com"))
            .await
            .expect("first insert");

        let err = store
            .insert(new_user("Jane Doe", "john@example.com"))
            .await
            .expect_err("duplicate");
        assert_eq!(
            err,
            UserStoreError::duplicate_email("john@example.com")
        );
    }

    #[tokio::test]
    async fn soft_deleted_rows_are_invisible_to_reads_and_uniqueness() {
        let store = InMemoryUserStore::new();
        let user = store
            .insert(new_user("John Doe", "john@example.com"))
            .await
            .expect("insert");

        store.soft_delete(user.id()).await.expect("delete");

        assert!(store.find_by_id(user.id()).await.expect("lookup").is_none());
        assert!(
            store
                .find_by_email("john@example.com")
                .await
                .expect("lookup")
                .is_none()
        );
        assert!(store.list_all().await.expect("list").is_empty());

        // The email is reusable and the old id is never handed out again.
        let replacement = store
            .insert(new_user("John Doe", "john@example.com"))
            .await
            .expect("reinsert");
        assert_eq!(replacement.id().get(), 2);
    }

    #[tokio::test]
    async fn save_bumps_updated_at_and_keeps_created_at() {
        let store = InMemoryUserStore::new();
        let mut user = store
            .insert(new_user("John Doe", "john@example.com"))
            .await
            .expect("insert");

        user.merge(crate::domain::UserPatch {
            age: Some(31),
            ..crate::domain::UserPatch::default()
        });
        let saved = store.save(&user).await.expect("save");

        assert_eq!(saved.age(), 31);
        assert_eq!(saved.created_at(), user.created_at());
        assert!(saved.updated_at() >= user.updated_at());
    }

    #[tokio::test]
    async fn save_enforces_uniqueness_excluding_self() {
        let store = InMemoryUserStore::new();
        let john = store
            .insert(new_user("John Doe", "john@example.com"))
            .await
            .expect("insert john");
        store
            .insert(new_user("Jane Doe", "jane@example.com"))
            .await
            .expect("insert jane");

        // Saving john under his own email is fine.
        store.save(&john).await.expect("self save");

        let mut hijack = john.clone();
        hijack.merge(crate::domain::UserPatch {
            email: Some("jane@example.com".into()),
            ..crate::domain::UserPatch::default()
        });
        let err = store.save(&hijack).await.expect_err("duplicate");
        assert_eq!(err, UserStoreError::duplicate_email("jane@example.com"));
    }

    #[tokio::test]
    async fn list_is_ordered_by_ascending_id() {
        let store = InMemoryUserStore::new();
        for (name, email) in [
            ("Ada Lovelace", "ada@example.com"),
            ("Grace Hopper", "grace@example.com"),
            ("Alan Turing", "alan@example.com"),
        ] {
            store.insert(new_user(name, email)).await.expect("insert");
        }

        let ids: Vec<_> = store
            .list_all()
            .await
            .expect("list")
            .iter()
            .map(|user| user.id().get())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn save_and_delete_reject_unknown_ids() {
        let store = InMemoryUserStore::new();
        let ghost = User::new(
            UserId::new(9).expect("positive id"),
            "Ghost",
            "ghost@example.com",
            Credential::derive("Passw0rd!"),
            30,
            Utc::now(),
            Utc::now(),
        );

        assert!(matches!(
            store.save(&ghost).await,
            Err(UserStoreError::Query { .. })
        ));
        assert!(matches!(
            store.soft_delete(ghost.id()).await,
            Err(UserStoreError::Query { .. })
        ));
    }
}
