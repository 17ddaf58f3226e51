//! User directory domain service.
//!
//! The orchestrator combines validation, uniqueness enforcement, credential
//! hashing and partial-update merging; it is the only place business rules
//! live. Each operation is a self-contained transaction against the injected
//! store, so concurrent calls need no locking here. Racing writes on the
//! same email are resolved by the store's atomic uniqueness check.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::error;

use crate::domain::credential::Credential;
use crate::domain::error::Error;
use crate::domain::ports::{
    CreateUserRequest, NewUser, UpdateUserRequest, UserDirectory, UserStore, UserStoreError,
};
use crate::domain::user::{User, UserId, UserPatch};
use crate::domain::validation::{CREATE_RULES, FieldValue, UPDATE_RULES, validate};

/// Service implementing the [`UserDirectory`] driving port.
///
/// The store is constructor-injected rather than ambient global state, so tests
/// can substitute mocks at the port seam.
#[derive(Clone)]
pub struct UserDirectoryService<S> {
    store: Arc<S>,
}

impl<S> UserDirectoryService<S> {
    /// Create a new service over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S: UserStore> UserDirectoryService<S> {
    /// Translate store failures into caller-facing outcomes.
    ///
    /// A lost uniqueness race surfaces as the same conflict the pre-check
    /// produces; everything else is logged with full context and reported
    /// with a generic message so storage internals never leak outward.
    fn map_store_error(store_error: UserStoreError) -> Error {
        match store_error {
            UserStoreError::DuplicateEmail { .. } => Error::conflict("email already exists"),
            other => {
                error!(error = %other, "user store operation failed");
                Error::internal("database error")
            }
        }
    }

    /// Gate every id-bearing operation before any store call is issued.
    fn parse_id(raw: i64) -> Result<UserId, Error> {
        UserId::new(raw).map_err(|err| Error::invalid_argument(err.to_string()))
    }

    async fn find_existing(&self, id: UserId) -> Result<User, Error> {
        self.store
            .find_by_id(id)
            .await
            .map_err(Self::map_store_error)?
            .ok_or_else(|| Error::not_found("user not found"))
    }

    async fn ensure_email_available(&self, email: &str) -> Result<(), Error> {
        let existing = self
            .store
            .find_by_email(email)
            .await
            .map_err(Self::map_store_error)?;
        if existing.is_some() {
            return Err(Error::conflict("email already exists"));
        }
        Ok(())
    }
}

fn create_payload(request: &CreateUserRequest) -> [(&'static str, FieldValue<'_>); 4] {
    [
        ("name", FieldValue::Text(&request.name)),
        ("email", FieldValue::Text(&request.email)),
        ("password", FieldValue::Text(&request.password)),
        ("age", FieldValue::Number(request.age)),
    ]
}

fn update_payload(request: &UpdateUserRequest) -> [(&'static str, FieldValue<'_>); 4] {
    fn text(value: Option<&str>) -> FieldValue<'_> {
        value.map_or(FieldValue::Absent, FieldValue::Text)
    }

    [
        ("name", text(request.name.as_deref())),
        ("email", text(request.email.as_deref())),
        ("password", text(request.password.as_deref())),
        ("age", request.age.map_or(FieldValue::Absent, FieldValue::Number)),
    ]
}

#[async_trait]
impl<S: UserStore> UserDirectory for UserDirectoryService<S> {
    async fn create_user(&self, request: CreateUserRequest) -> Result<User, Error> {
        let violations = validate(&create_payload(&request), &CREATE_RULES);
        if !violations.is_empty() {
            return Err(Error::validation(violations));
        }

        self.ensure_email_available(&request.email).await?;

        let credential = Credential::derive(&request.password);
        let CreateUserRequest {
            name, email, age, ..
        } = request;
        self.store
            .insert(NewUser {
                name,
                email,
                credential,
                age,
            })
            .await
            .map_err(Self::map_store_error)
    }

    async fn get_user(&self, id: i64) -> Result<User, Error> {
        let id = Self::parse_id(id)?;
        self.find_existing(id).await
    }

    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.store.list_all().await.map_err(Self::map_store_error)
    }

    async fn update_user(&self, request: UpdateUserRequest) -> Result<User, Error> {
        let id = Self::parse_id(request.id)?;
        let mut user = self.find_existing(id).await?;

        let violations = validate(&update_payload(&request), &UPDATE_RULES);
        if !violations.is_empty() {
            return Err(Error::validation(violations));
        }

        // Uniqueness is only at stake when the email actually changes.
        if let Some(email) = request.email.as_deref() {
            if email != user.email() {
                self.ensure_email_available(email).await?;
            }
        }

        let credential = request.password.as_deref().map(Credential::derive);
        let UpdateUserRequest {
            name, email, age, ..
        } = request;
        user.merge(UserPatch {
            name,
            email,
            credential,
            age,
        });

        self.store.save(&user).await.map_err(Self::map_store_error)
    }

    async fn delete_user(&self, id: i64) -> Result<(), Error> {
        let id = Self::parse_id(id)?;
        self.find_existing(id).await?;
        self.store
            .soft_delete(id)
            .await
            .map_err(Self::map_store_error)
    }
}
