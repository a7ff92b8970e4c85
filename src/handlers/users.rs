use axum::{
    extract::{Json, Path, Query, State},
    response::IntoResponse,
    routing::{get, post},
    Router,
};

use super::common::{created_response, no_content_response, ListParams, PaginatedResponse};
use crate::{
    dto::{CreateUserInput, UpdateUserInput, UserResponse},
    errors::ServiceError,
    handlers::AppState,
};

/// Register a user
///
/// Open endpoint; the new account is active and can log in right away.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserInput,
    responses(
        (status = 201, description = "User created", body = UserResponse,
            headers(("X-Request-Id" = String, description = "Unique request id"))
        ),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 409, description = "Email already registered", body = crate::errors::ErrorResponse)
    ),
    tag = "users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let user = state.services.users.create(payload).await?;
    Ok(created_response(user))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User returned", body = UserResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<UserResponse>, ServiceError> {
    Ok(Json(state.services.users.get(id).await?))
}

/// List users ordered by id
#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(ListParams),
    responses(
        (status = 200, description = "Page of users")
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<PaginatedResponse<UserResponse>>, ServiceError> {
    let window = state.list_window(&params);
    let page = state.services.users.list(window.offset, window.limit).await?;
    Ok(Json(PaginatedResponse::new(page, window)))
}

/// List active users
#[utoipa::path(
    get,
    path = "/api/v1/users/active",
    params(ListParams),
    responses(
        (status = 200, description = "Active users", body = [UserResponse])
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn list_active_users(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<UserResponse>>, ServiceError> {
    let window = state.list_window(&params);
    Ok(Json(
        state
            .services
            .users
            .list_active(window.offset, window.limit)
            .await?,
    ))
}

/// Update a user
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    request_body = UpdateUserInput,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Email already registered", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateUserInput>,
) -> Result<Json<UserResponse>, ServiceError> {
    Ok(Json(state.services.users.update(id, payload).await?))
}

/// Deactivate a user
#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/deactivate",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User deactivated", body = UserResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn deactivate_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<UserResponse>, ServiceError> {
    Ok(Json(state.services.users.deactivate(id).await?))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.users.delete(id).await?;
    Ok(no_content_response())
}

/// Registration, mounted outside the auth layer.
pub fn public_user_routes() -> Router<AppState> {
    Router::new().route("/", post(create_user))
}

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/active", get(list_active_users))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
        .route("/:id/deactivate", post(deactivate_user))
}
