//! Driving port: the typed remote-call interface for user operations.
//!
//! Transport adapters (the HTTP/JSON gateway, remote-call servers) consume
//! this port and translate its outcomes to their wire formats. Implementors
//! hold all the business rules; adapters hold none.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::error::Error;
use crate::domain::user::User;

/// Request payload for creating a user. Every field is mandatory.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "john@example.com")]
    pub email: String,
    #[schema(example = "Passw0rd!")]
    pub password: String,
    #[schema(example = 30)]
    pub age: i64,
}

/// Partial update payload.
///
/// Absence is `Option::None`, never a zero or empty-string sentinel, so an
/// omitted field and an explicitly supplied empty value stay distinguishable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub age: Option<i64>,
}

/// Typed interface over the five user operations.
///
/// Each call is a self-contained transaction; implementors hold no cross-call
/// mutable state. Callers cancel by dropping the returned future, which
/// aborts the operation before its next store call.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Validate, enforce email uniqueness, hash the password and persist a
    /// new user.
    async fn create_user(&self, request: CreateUserRequest) -> Result<User, Error>;

    /// Fetch an active user by id.
    async fn get_user(&self, id: i64) -> Result<User, Error>;

    /// Every active user in ascending id order; an empty store yields an
    /// empty sequence.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// Validate the supplied fields, re-check uniqueness when the email
    /// changes, merge onto the stored record and persist.
    async fn update_user(&self, request: UpdateUserRequest) -> Result<User, Error>;

    /// Soft-delete an active user after an existence check.
    async fn delete_user(&self, id: i64) -> Result<(), Error>;
}
