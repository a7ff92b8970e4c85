use axum::{
    extract::{Json, Path, Query, State},
    response::IntoResponse,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use super::common::{created_response, no_content_response, ListParams, PaginatedResponse};
use crate::{
    dto::{BuyerResponse, CreateBuyerInput, UpdateBuyerInput},
    errors::ServiceError,
    handlers::AppState,
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BuyerSearchParams {
    /// Substring of the buyer name, case-insensitive
    pub name: String,
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

/// Register a buyer
#[utoipa::path(
    post,
    path = "/api/v1/buyers",
    request_body = CreateBuyerInput,
    responses(
        (status = 201, description = "Buyer created", body = BuyerResponse),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 409, description = "Phone already registered", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "buyers"
)]
pub async fn create_buyer(
    State(state): State<AppState>,
    Json(payload): Json<CreateBuyerInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let buyer = state.services.buyers.create(payload).await?;
    Ok(created_response(buyer))
}

/// Get a buyer by id
#[utoipa::path(
    get,
    path = "/api/v1/buyers/{id}",
    params(("id" = i32, Path, description = "Buyer id")),
    responses(
        (status = 200, description = "Buyer returned", body = BuyerResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "buyers"
)]
pub async fn get_buyer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<BuyerResponse>, ServiceError> {
    Ok(Json(state.services.buyers.get(id).await?))
}

/// Find a buyer by phone number
#[utoipa::path(
    get,
    path = "/api/v1/buyers/by-phone/{phone}",
    params(("phone" = String, Path, description = "Phone number, digits only")),
    responses(
        (status = 200, description = "Buyer returned", body = BuyerResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "buyers"
)]
pub async fn get_buyer_by_phone(
    State(state): State<AppState>,
    Path(phone): Path<String>,
) -> Result<Json<BuyerResponse>, ServiceError> {
    Ok(Json(state.services.buyers.get_by_phone(&phone).await?))
}

/// Search buyers by name
#[utoipa::path(
    get,
    path = "/api/v1/buyers/search",
    params(BuyerSearchParams),
    responses(
        (status = 200, description = "Matching buyers", body = [BuyerResponse])
    ),
    security(("bearer_auth" = [])),
    tag = "buyers"
)]
pub async fn search_buyers(
    State(state): State<AppState>,
    Query(params): Query<BuyerSearchParams>,
) -> Result<Json<Vec<BuyerResponse>>, ServiceError> {
    let window = state.list_window(&ListParams {
        skip: params.skip,
        limit: params.limit,
        ..Default::default()
    });
    let buyers = state
        .services
        .buyers
        .search_by_name(&params.name, window.offset, window.limit)
        .await?;
    Ok(Json(buyers))
}

/// List buyers ordered by id
#[utoipa::path(
    get,
    path = "/api/v1/buyers",
    params(ListParams),
    responses(
        (status = 200, description = "Page of buyers")
    ),
    security(("bearer_auth" = [])),
    tag = "buyers"
)]
pub async fn list_buyers(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<PaginatedResponse<BuyerResponse>>, ServiceError> {
    let window = state.list_window(&params);
    let page = state.services.buyers.list(window.offset, window.limit).await?;
    Ok(Json(PaginatedResponse::new(page, window)))
}

/// Update a buyer; absent fields are left unchanged
#[utoipa::path(
    put,
    path = "/api/v1/buyers/{id}",
    params(("id" = i32, Path, description = "Buyer id")),
    request_body = UpdateBuyerInput,
    responses(
        (status = 200, description = "Buyer updated", body = BuyerResponse),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Phone already registered", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "buyers"
)]
pub async fn update_buyer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateBuyerInput>,
) -> Result<Json<BuyerResponse>, ServiceError> {
    Ok(Json(state.services.buyers.update(id, payload).await?))
}

/// Delete a buyer
#[utoipa::path(
    delete,
    path = "/api/v1/buyers/{id}",
    params(("id" = i32, Path, description = "Buyer id")),
    responses(
        (status = 204, description = "Buyer deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "buyers"
)]
pub async fn delete_buyer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.buyers.delete(id).await?;
    Ok(no_content_response())
}

pub fn buyer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_buyers).post(create_buyer))
        .route("/search", get(search_buyers))
        .route("/by-phone/:phone", get(get_buyer_by_phone))
        .route("/:id", get(get_buyer).put(update_buyer).delete(delete_buyer))
}
