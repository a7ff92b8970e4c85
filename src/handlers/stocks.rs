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
    dto::{CreateStockInput, StockResponse, UpdateStockInput},
    errors::ServiceError,
    handlers::AppState,
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LowStockParams {
    /// Quantity at or below which a stock counts as low; defaults to the configured threshold
    pub threshold: Option<i32>,
}

/// Create the stock record of a car
#[utoipa::path(
    post,
    path = "/api/v1/stocks",
    request_body = CreateStockInput,
    responses(
        (status = 201, description = "Stock created", body = StockResponse),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "Car not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Car already has a stock record", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "stocks"
)]
pub async fn create_stock(
    State(state): State<AppState>,
    Json(payload): Json<CreateStockInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let stock = state.services.stocks.create(payload).await?;
    Ok(created_response(stock))
}

/// Get a stock record by id
#[utoipa::path(
    get,
    path = "/api/v1/stocks/{id}",
    params(("id" = i32, Path, description = "Stock id")),
    responses(
        (status = 200, description = "Stock returned", body = StockResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "stocks"
)]
pub async fn get_stock(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<StockResponse>, ServiceError> {
    Ok(Json(state.services.stocks.get(id).await?))
}

/// Get the stock record of a car
#[utoipa::path(
    get,
    path = "/api/v1/stocks/by-car/{car_id}",
    params(("car_id" = i32, Path, description = "Car id")),
    responses(
        (status = 200, description = "Stock returned", body = StockResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "stocks"
)]
pub async fn get_stock_by_car(
    State(state): State<AppState>,
    Path(car_id): Path<i32>,
) -> Result<Json<StockResponse>, ServiceError> {
    Ok(Json(state.services.stocks.get_by_car(car_id).await?))
}

/// Stocks at or below a threshold
#[utoipa::path(
    get,
    path = "/api/v1/stocks/low",
    params(LowStockParams),
    responses(
        (status = 200, description = "Low stocks", body = [StockResponse])
    ),
    security(("bearer_auth" = [])),
    tag = "stocks"
)]
pub async fn low_stock(
    State(state): State<AppState>,
    Query(params): Query<LowStockParams>,
) -> Result<Json<Vec<StockResponse>>, ServiceError> {
    Ok(Json(state.services.stocks.low_stock(params.threshold).await?))
}

/// Stocks with at least one unit
#[utoipa::path(
    get,
    path = "/api/v1/stocks/available",
    params(ListParams),
    responses(
        (status = 200, description = "Available stocks", body = [StockResponse])
    ),
    security(("bearer_auth" = [])),
    tag = "stocks"
)]
pub async fn available_stock(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<StockResponse>>, ServiceError> {
    let window = state.list_window(&params);
    Ok(Json(
        state
            .services
            .stocks
            .available(window.offset, window.limit)
            .await?,
    ))
}

/// List stocks ordered by id
#[utoipa::path(
    get,
    path = "/api/v1/stocks",
    params(ListParams),
    responses(
        (status = 200, description = "Page of stocks")
    ),
    security(("bearer_auth" = [])),
    tag = "stocks"
)]
pub async fn list_stocks(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<PaginatedResponse<StockResponse>>, ServiceError> {
    let window = state.list_window(&params);
    let page = state.services.stocks.list(window.offset, window.limit).await?;
    Ok(Json(PaginatedResponse::new(page, window)))
}

/// Set the quantity of a stock record
#[utoipa::path(
    put,
    path = "/api/v1/stocks/{id}",
    params(("id" = i32, Path, description = "Stock id")),
    request_body = UpdateStockInput,
    responses(
        (status = 200, description = "Stock updated", body = StockResponse),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "stocks"
)]
pub async fn update_stock(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateStockInput>,
) -> Result<Json<StockResponse>, ServiceError> {
    Ok(Json(state.services.stocks.update(id, payload).await?))
}

/// Delete a stock record
#[utoipa::path(
    delete,
    path = "/api/v1/stocks/{id}",
    params(("id" = i32, Path, description = "Stock id")),
    responses(
        (status = 204, description = "Stock deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "stocks"
)]
pub async fn delete_stock(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.stocks.delete(id).await?;
    Ok(no_content_response())
}

pub fn stock_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stocks).post(create_stock))
        .route("/low", get(low_stock))
        .route("/available", get(available_stock))
        .route("/by-car/:car_id", get(get_stock_by_car))
        .route("/:id", get(get_stock).put(update_stock).delete(delete_stock))
}
