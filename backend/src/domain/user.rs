//! User aggregate and identifier.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::domain::credential::Credential;

/// Errors raised by [`UserId::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserIdError {
    /// Identifiers are assigned by the store starting at 1.
    NotPositive,
}

impl fmt::Display for UserIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPositive => write!(f, "user id must be a positive integer"),
        }
    }
}

impl std::error::Error for UserIdError {}

/// Store-assigned user identifier, strictly positive and never reused while a
/// row logically exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(i64);

impl UserId {
    /// Validate and construct a [`UserId`] from a raw identifier.
    ///
    /// Rejecting non-positive values here means no store call can ever be
    /// issued for a structurally invalid id.
    pub fn new(raw: i64) -> Result<Self, UserIdError> {
        if raw <= 0 {
            return Err(UserIdError::NotPositive);
        }
        Ok(Self(raw))
    }

    /// Access the underlying identifier.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Supplied fields of a partial update.
///
/// Absence is `None`; there are no zero or empty-string sentinels. A supplied
/// password has already been hashed into a [`Credential`] by the caller.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub credential: Option<Credential>,
    pub age: Option<i64>,
}

/// Application user.
///
/// ## Invariants
/// - Every persisted user satisfies the create ruleset (name, email, age
///   constraints) and carries a derived credential, never a plaintext
///   password.
/// - `email` is unique among non-deleted users at every observable moment.
/// - Timestamps are owned by the store: `created_at` is set on insert and
///   `updated_at` on every write.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    credential: Credential,
    age: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Build a [`User`] from validated components. Called by store adapters
    /// when materialising a persisted row.
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        credential: Credential,
        age: i64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            credential,
            age,
            created_at,
            updated_at,
        }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Display name, letters and spaces only.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Unique email address.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Derived credential. Never serialized outward; outward projections omit
    /// the field entirely.
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Age in years.
    pub fn age(&self) -> i64 {
        self.age
    }

    /// Insertion timestamp assigned by the store.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last modification timestamp assigned by the store.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Merge a partial update onto this user.
    ///
    /// Each supplied field overwrites the stored attribute; absent fields are
    /// left unchanged. `updated_at` is bumped by the store when the merged
    /// record is saved, not here.
    pub fn merge(&mut self, patch: UserPatch) {
        let UserPatch {
            name,
            email,
            credential,
            age,
        } = patch;
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(credential) = credential {
            self.credential = credential;
        }
        if let Some(age) = age {
            self.age = age;
        }
    }
}
