//! Driven port for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::credential::Credential;
use crate::domain::user::{User, UserId};

/// Persistence errors raised by user store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserStoreError {
    /// Store connection could not be established.
    #[error("user store connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("user store query failed: {message}")]
    Query { message: String },
    /// The email uniqueness constraint rejected a write.
    #[error("email already stored: {email}")]
    DuplicateEmail { email: String },
}

impl UserStoreError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    pub fn duplicate_email(email: impl Into<String>) -> Self {
        Self::DuplicateEmail {
            email: email.into(),
        }
    }
}

/// Insert payload for a user the store has not yet assigned an id to.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub credential: Credential,
    pub age: i64,
}

/// Narrow persistence contract the orchestrator depends on.
///
/// Every read excludes soft-deleted rows, including `find_by_email`: a
/// soft-deleted user's email does not block reuse.
///
/// # Atomicity
///
/// The orchestrator's check-then-write sequence is not atomic on its own.
/// Implementations must enforce email uniqueness inside `insert` and `save`
/// (a database constraint, or a check under the store's own lock) and report
/// a lost race as [`UserStoreError::DuplicateEmail`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new user. The store assigns the id and both timestamps.
    async fn insert(&self, user: NewUser) -> Result<User, UserStoreError>;

    /// Fetch an active user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserStoreError>;

    /// Fetch an active user by exact email match.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserStoreError>;

    /// Every active user in ascending id order.
    async fn list_all(&self) -> Result<Vec<User>, UserStoreError>;

    /// Full-record overwrite of an existing active user. The store bumps
    /// `updated_at` and returns the persisted record.
    async fn save(&self, user: &User) -> Result<User, UserStoreError>;

    /// Mark an active user deleted, excluding it from all future reads.
    async fn soft_delete(&self, id: UserId) -> Result<(), UserStoreError>;
}
