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
    dto::{CreateSaleInput, SaleDetail},
    errors::ServiceError,
    handlers::AppState,
    repositories::SaleFilter,
};

/// Pagination plus optional equality filters. Kept flat: query strings do not
/// deserialize numbers through `#[serde(flatten)]`.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SaleListParams {
    pub car_id: Option<i32>,
    pub buyer_id: Option<i32>,
    pub seller_id: Option<i32>,
    pub skip: Option<u64>,
    pub limit: Option<u64>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

impl SaleListParams {
    fn split(self) -> (SaleFilter, ListParams) {
        (
            SaleFilter {
                car_id: self.car_id,
                buyer_id: self.buyer_id,
                seller_id: self.seller_id,
            },
            ListParams {
                skip: self.skip,
                limit: self.limit,
                page: self.page,
                per_page: self.per_page,
            },
        )
    }
}

/// Record a sale
///
/// Takes one unit from the car's stock. Every missing reference is listed
/// in `errors`; an empty stock is rejected with 422.
#[utoipa::path(
    post,
    path = "/api/v1/sales",
    request_body = CreateSaleInput,
    responses(
        (status = 201, description = "Sale recorded", body = SaleDetail),
        (status = 404, description = "Car, buyer, seller or stock missing", body = crate::errors::ErrorResponse),
        (status = 422, description = "Car out of stock", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "sales"
)]
pub async fn create_sale(
    State(state): State<AppState>,
    Json(payload): Json<CreateSaleInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let sale = state.services.sales.create_sale(payload).await?;
    Ok(created_response(sale))
}

/// Get a sale with its car, buyer and seller
#[utoipa::path(
    get,
    path = "/api/v1/sales/{id}",
    params(("id" = i32, Path, description = "Sale id")),
    responses(
        (status = 200, description = "Sale returned", body = SaleDetail),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "sales"
)]
pub async fn get_sale(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SaleDetail>, ServiceError> {
    Ok(Json(state.services.sales.get(id).await?))
}

/// List sales ordered by id
#[utoipa::path(
    get,
    path = "/api/v1/sales",
    params(SaleListParams),
    responses(
        (status = 200, description = "Page of sales")
    ),
    security(("bearer_auth" = [])),
    tag = "sales"
)]
pub async fn list_sales(
    State(state): State<AppState>,
    Query(params): Query<SaleListParams>,
) -> Result<Json<PaginatedResponse<SaleDetail>>, ServiceError> {
    let (filter, list) = params.split();
    let window = state.list_window(&list);
    let page = state
        .services
        .sales
        .list(filter, window.offset, window.limit)
        .await?;
    Ok(Json(PaginatedResponse::new(page, window)))
}

/// Delete a sale record; stock is not restored
#[utoipa::path(
    delete,
    path = "/api/v1/sales/{id}",
    params(("id" = i32, Path, description = "Sale id")),
    responses(
        (status = 204, description = "Sale deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "sales"
)]
pub async fn delete_sale(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.sales.delete(id).await?;
    Ok(no_content_response())
}

pub fn sale_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sales).post(create_sale))
        .route("/:id", get(get_sale).delete(delete_sale))
}
