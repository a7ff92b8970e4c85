use axum::{
    extract::{Json, State},
    routing::{get, post},
    Router,
};
use tracing::info;

use crate::{
    auth::{AuthRouterExt, AuthUser, LoginRequest, TokenResponse},
    dto::UserResponse,
    errors::ServiceError,
    handlers::AppState,
};

/// Exchange credentials for an access token
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 401, description = "Invalid credentials", body = crate::errors::ErrorResponse),
        (status = 403, description = "Account inactive", body = crate::errors::ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ServiceError> {
    let user = state
        .services
        .users
        .authenticate(&credentials.email, &credentials.password)
        .await?;
    let token = state.auth.generate_token(&user)?;
    info!(user_id = user.id, "token issued");
    Ok(Json(token))
}

/// The account behind the bearer token
#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn me(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<UserResponse>, ServiceError> {
    Ok(Json(state.services.users.get(caller.user_id).await?))
}

pub fn auth_routes(state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/me", get(me))
        .with_auth(state.auth.clone());

    Router::new().route("/login", post(login)).merge(protected)
}
