//! Typed call envelopes shared by remote-call clients and the HTTP gateway.
//!
//! Every operation answers with `{ success, message, ... }`. Failures share
//! one envelope, [`FailureResponse`], pairing `success = false` and the
//! caller-facing message with the structured
//! [`ErrorCode`](crate::domain::ErrorCode), so callers can branch on either
//! signal. The HTTP gateway emits it for every error response.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode, User};

/// Outward projection of a user.
///
/// Credential material is absent by construction: the type has no field for
/// it, so no serializer configuration can leak it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "john@example.com")]
    pub email: String,
    #[schema(example = 30)]
    pub age: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().get(),
            name: user.name().to_owned(),
            email: user.email().to_owned(),
            age: user.age(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}

/// Envelope for operations returning a single user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserView>,
}

impl UserResponse {
    /// Success envelope carrying the operation's confirmation message.
    pub fn ok(user: &User, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            user: Some(UserView::from(user)),
        }
    }
}

/// Envelope for the bulk read.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserListResponse {
    pub success: bool,
    pub message: String,
    pub users: Vec<UserView>,
}

impl UserListResponse {
    /// Success envelope over every active user.
    pub fn ok(users: &[User], message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            users: users.iter().map(UserView::from).collect(),
        }
    }
}

/// Envelope for deletion; success carries a confirmation message and no user
/// payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteUserResponse {
    pub success: bool,
    pub message: String,
}

impl DeleteUserResponse {
    /// Success envelope with a confirmation message.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Envelope for any failed operation.
///
/// The single failure representation on the wire: `success = false`, the
/// caller-facing message, the structured code, and any supplementary details
/// (violation lists, for instance). Built from the domain [`Error`] by the
/// transport adapter.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FailureResponse {
    pub success: bool,
    pub message: String,
    pub code: ErrorCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl From<&Error> for FailureResponse {
    fn from(error: &Error) -> Self {
        Self {
            success: false,
            message: error.message().to_owned(),
            code: error.code(),
            details: error.details().cloned(),
        }
    }
}
