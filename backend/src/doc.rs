//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct which generates the OpenAPI specification
//! for the HTTP/JSON gateway. The generated document backs Swagger UI in
//! debug builds.

use utoipa::OpenApi;

use crate::domain::ErrorCode;
use crate::domain::ports::CreateUserRequest;
use crate::inbound::http::users::UpdateUserBody;
use crate::inbound::rpc::{
    DeleteUserResponse, FailureResponse, UserListResponse, UserResponse, UserView,
};

/// OpenAPI document for the user directory gateway.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Roster user directory API",
        description = "HTTP/JSON gateway over the user directory remote-call interface."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::health,
    ),
    components(schemas(
        CreateUserRequest,
        UpdateUserBody,
        UserView,
        UserResponse,
        UserListResponse,
        DeleteUserResponse,
        FailureResponse,
        ErrorCode,
    ))
)]
pub struct ApiDoc;
