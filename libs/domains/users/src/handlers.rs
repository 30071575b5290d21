use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use axum_helpers::{
    IdPath, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse, ServiceUnavailableResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{User, UserDto};
use crate::repository::UserRepository;
use crate::service::UserService;

const TAG: &str = "users";

/// OpenAPI documentation for Users API
#[derive(OpenApi)]
#[openapi(
    paths(create_user, list_users, get_user, update_user, delete_user),
    components(
        schemas(User, UserDto),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            InternalServerErrorResponse,
            ServiceUnavailableResponse
        )
    ),
    tags(
        (name = TAG, description = "User management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the users router with all HTTP endpoints
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
        .with_state(shared_service)
}

/// Create a new user
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = UserDto,
    responses(
        (status = 200, description = "Created user", body = User),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<UserDto>,
) -> UserResult<Json<User>> {
    let user = service.create(input).await?;
    Ok(Json(user))
}

/// List all users
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "List of Users", body = Vec<User>),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> UserResult<Json<Vec<User>>> {
    let users = service.find_all().await?;
    Ok(Json(users))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "User details", body = User),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    IdPath(id): IdPath,
) -> UserResult<Json<User>> {
    let user = service.find_one(id).await?;
    Ok(Json(user))
}

/// Replace every field of an existing user
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "User id")
    ),
    request_body = UserDto,
    responses(
        (status = 200, description = "Updated user"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UserDto>,
) -> UserResult<StatusCode> {
    service.update(id, input).await?;
    Ok(StatusCode::OK)
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "User id")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, response = BadRequestIdResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    IdPath(id): IdPath,
) -> UserResult<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
