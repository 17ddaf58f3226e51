//! User CRUD handlers for the HTTP/JSON gateway.
//!
//! Handlers are pass-through adapters: decode the request, call the
//! [`UserDirectory`](crate::domain::ports::UserDirectory) port, encode the
//! envelope. No business rules live here.
//!
//! ```text
//! POST   /users      create
//! GET    /users      list
//! GET    /users/{id} get
//! PUT    /users/{id} update
//! DELETE /users/{id} delete
//! ```

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{CreateUserRequest, UpdateUserRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::rpc::{DeleteUserResponse, FailureResponse, UserListResponse, UserResponse};

/// Update request body; the user id comes from the path segment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateUserBody {
    #[schema(example = "John Doe Updated")]
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    #[schema(example = 31)]
    pub age: Option<i64>,
}

impl UpdateUserBody {
    fn into_request(self, id: i64) -> UpdateUserRequest {
        let Self {
            name,
            email,
            password,
            age,
        } = self;
        UpdateUserRequest {
            id,
            name,
            email,
            password,
            age,
        }
    }
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created", body = UserResponse),
        (status = 400, description = "Validation failed", body = FailureResponse),
        (status = 409, description = "Email already exists", body = FailureResponse),
        (status = 500, description = "Internal server error", body = FailureResponse)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state.directory().create_user(payload.into_inner()).await?;
    Ok(web::Json(UserResponse::ok(
        &user,
        "user created successfully",
    )))
}

/// List every active user.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users", body = UserListResponse),
        (status = 500, description = "Internal server error", body = FailureResponse)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<UserListResponse>> {
    let users = state.directory().list_users().await?;
    Ok(web::Json(UserListResponse::ok(
        &users,
        "users retrieved successfully",
    )))
}

/// Fetch a single user by id.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 400, description = "Invalid identifier", body = FailureResponse),
        (status = 404, description = "User not found", body = FailureResponse),
        (status = 500, description = "Internal server error", body = FailureResponse)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state.directory().get_user(path.into_inner()).await?;
    Ok(web::Json(UserResponse::ok(
        &user,
        "user retrieved successfully",
    )))
}

/// Apply a partial update to a user.
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    request_body = UpdateUserBody,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Validation failed", body = FailureResponse),
        (status = 404, description = "User not found", body = FailureResponse),
        (status = 409, description = "Email already exists", body = FailureResponse),
        (status = 500, description = "Internal server error", body = FailureResponse)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<UpdateUserBody>,
) -> ApiResult<web::Json<UserResponse>> {
    let request = payload.into_inner().into_request(path.into_inner());
    let user = state.directory().update_user(request).await?;
    Ok(web::Json(UserResponse::ok(
        &user,
        "user updated successfully",
    )))
}

/// Soft-delete a user.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User deleted", body = DeleteUserResponse),
        (status = 400, description = "Invalid identifier", body = FailureResponse),
        (status = 404, description = "User not found", body = FailureResponse),
        (status = 500, description = "Internal server error", body = FailureResponse)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<DeleteUserResponse>> {
    state.directory().delete_user(path.into_inner()).await?;
    Ok(web::Json(DeleteUserResponse::ok(
        "user deleted successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserDirectoryService;
    use crate::domain::ports::UserDirectory;
    use crate::outbound::persistence::InMemoryUserStore;
    use actix_web::{App, http::StatusCode, test as actix_test};
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let directory: Arc<dyn UserDirectory> = Arc::new(UserDirectoryService::new(Arc::new(
            InMemoryUserStore::new(),
        )));
        App::new()
            .app_data(web::Data::new(HttpState::new(directory)))
            .service(create_user)
            .service(list_users)
            .service(get_user)
            .service(update_user)
            .service(delete_user)
    }

    async fn read_json(response: actix_web::dev::ServiceResponse) -> Value {
        let body = actix_test::read_body(response).await;
        serde_json::from_slice(&body).expect("JSON body")
    }

    fn john_payload() -> Value {
        json!({
            "name": "John Doe",
            "email": "john@example.com",
            "password": "Passw0rd!",
            "age": 30,
        })
    }

    #[actix_web::test]
    async fn create_returns_envelope_without_credential_material() {
        let app = actix_test::init_service(test_app()).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/users")
                .set_json(john_payload())
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let value = read_json(response).await;
        assert_eq!(value["success"], Value::from(true));
        assert_eq!(value["message"], Value::from("user created successfully"));
        let user = value["user"].as_object().expect("user view");
        assert_eq!(user["id"], Value::from(1));
        assert_eq!(user["email"], Value::from("john@example.com"));
        assert!(!user.contains_key("password"));
        assert!(!user.contains_key("credential"));
    }

    #[actix_web::test]
    async fn create_reports_every_violation_in_one_response() {
        let app = actix_test::init_service(test_app()).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/users")
                .set_json(json!({
                    "name": "J",
                    "email": "not-an-email",
                    "password": "Passw0rd!",
                    "age": 5,
                }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let value = read_json(response).await;
        assert_eq!(value["success"], Value::from(false));
        assert_eq!(value["code"], Value::from("validation_failed"));
        let violations = value["details"]["violations"]
            .as_array()
            .expect("violations array");
        assert_eq!(violations.len(), 3);
    }

    #[actix_web::test]
    async fn duplicate_email_answers_conflict() {
        let app = actix_test::init_service(test_app()).await;

        let first = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/users")
                .set_json(john_payload())
                .to_request(),
        )
        .await;
        assert!(first.status().is_success());

        let second = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/users")
                .set_json(john_payload())
                .to_request(),
        )
        .await;
        assert_eq!(second.status(), StatusCode::CONFLICT);
        let value = read_json(second).await;
        assert_eq!(value["message"], Value::from("email already exists"));
        assert_eq!(value["code"], Value::from("conflict"));
    }

    #[actix_web::test]
    async fn get_missing_user_answers_not_found_envelope() {
        let app = actix_test::init_service(test_app()).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/users/42").to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let value = read_json(response).await;
        assert_eq!(value["success"], Value::from(false));
        assert_eq!(value["message"], Value::from("user not found"));
        assert_eq!(value["code"], Value::from("not_found"));
    }

    #[actix_web::test]
    async fn non_positive_id_answers_bad_request() {
        let app = actix_test::init_service(test_app()).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/users/0").to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let value = read_json(response).await;
        assert_eq!(value["code"], Value::from("invalid_argument"));
    }

    #[actix_web::test]
    async fn update_merges_only_supplied_fields() {
        let app = actix_test::init_service(test_app()).await;

        let created = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/users")
                .set_json(john_payload())
                .to_request(),
        )
        .await;
        assert!(created.status().is_success());

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri("/users/1")
                .set_json(json!({ "age": 31 }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let value = read_json(response).await;
        assert_eq!(value["user"]["age"], Value::from(31));
        assert_eq!(value["user"]["name"], Value::from("John Doe"));
        assert_eq!(value["user"]["email"], Value::from("john@example.com"));
    }

    #[actix_web::test]
    async fn delete_answers_confirmation_without_user_payload() {
        let app = actix_test::init_service(test_app()).await;

        let created = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/users")
                .set_json(john_payload())
                .to_request(),
        )
        .await;
        assert!(created.status().is_success());

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete().uri("/users/1").to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let value = read_json(response).await;
        assert_eq!(value["success"], Value::from(true));
        assert_eq!(value["message"], Value::from("user deleted successfully"));
        assert!(value.get("user").is_none());
    }
}
