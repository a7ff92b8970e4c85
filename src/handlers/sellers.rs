use axum::{
    extract::{Json, Path, Query, State},
    response::IntoResponse,
    routing::get,
    Router,
};

use super::common::{created_response, no_content_response, ListParams, PaginatedResponse};
use crate::{
    dto::{CreateSellerInput, SellerResponse, UpdateSellerInput},
    errors::ServiceError,
    handlers::AppState,
};

/// Register a seller
#[utoipa::path(
    post,
    path = "/api/v1/sellers",
    request_body = CreateSellerInput,
    responses(
        (status = 201, description = "Seller created", body = SellerResponse),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 409, description = "CPF already registered", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "sellers"
)]
pub async fn create_seller(
    State(state): State<AppState>,
    Json(payload): Json<CreateSellerInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let seller = state.services.sellers.create(payload).await?;
    Ok(created_response(seller))
}

/// Get a seller by id
#[utoipa::path(
    get,
    path = "/api/v1/sellers/{id}",
    params(("id" = i32, Path, description = "Seller id")),
    responses(
        (status = 200, description = "Seller returned", body = SellerResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "sellers"
)]
pub async fn get_seller(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SellerResponse>, ServiceError> {
    Ok(Json(state.services.sellers.get(id).await?))
}

/// Find a seller by CPF
#[utoipa::path(
    get,
    path = "/api/v1/sellers/by-cpf/{cpf}",
    params(("cpf" = String, Path, description = "CPF, 11 digits")),
    responses(
        (status = 200, description = "Seller returned", body = SellerResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "sellers"
)]
pub async fn get_seller_by_cpf(
    State(state): State<AppState>,
    Path(cpf): Path<String>,
) -> Result<Json<SellerResponse>, ServiceError> {
    Ok(Json(state.services.sellers.get_by_cpf(&cpf).await?))
}

/// List sellers ordered by id
#[utoipa::path(
    get,
    path = "/api/v1/sellers",
    params(ListParams),
    responses(
        (status = 200, description = "Page of sellers")
    ),
    security(("bearer_auth" = [])),
    tag = "sellers"
)]
pub async fn list_sellers(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<PaginatedResponse<SellerResponse>>, ServiceError> {
    let window = state.list_window(&params);
    let page = state.services.sellers.list(window.offset, window.limit).await?;
    Ok(Json(PaginatedResponse::new(page, window)))
}

/// Update a seller; absent fields are left unchanged
#[utoipa::path(
    put,
    path = "/api/v1/sellers/{id}",
    params(("id" = i32, Path, description = "Seller id")),
    request_body = UpdateSellerInput,
    responses(
        (status = 200, description = "Seller updated", body = SellerResponse),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "CPF already registered", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "sellers"
)]
pub async fn update_seller(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateSellerInput>,
) -> Result<Json<SellerResponse>, ServiceError> {
    Ok(Json(state.services.sellers.update(id, payload).await?))
}

/// Delete a seller
#[utoipa::path(
    delete,
    path = "/api/v1/sellers/{id}",
    params(("id" = i32, Path, description = "Seller id")),
    responses(
        (status = 204, description = "Seller deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "sellers"
)]
pub async fn delete_seller(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.sellers.delete(id).await?;
    Ok(no_content_response())
}

pub fn seller_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sellers).post(create_seller))
        .route("/by-cpf/:cpf", get(get_seller_by_cpf))
        .route("/:id", get(get_seller).put(update_seller).delete(delete_seller))
}
