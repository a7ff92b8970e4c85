use axum::{
    extract::{Json, Path, Query, State},
    response::IntoResponse,
    routing::get,
    Router,
};

use super::common::{created_response, no_content_response, ListParams, PaginatedResponse};
use crate::{
    dto::{CarResponse, CreateCarInput, UpdateCarInput},
    errors::ServiceError,
    handlers::AppState,
};

/// Create a car
#[utoipa::path(
    post,
    path = "/api/v1/cars",
    request_body = CreateCarInput,
    responses(
        (status = 201, description = "Car created", body = CarResponse),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 409, description = "Same name, year and brand already registered", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "cars"
)]
pub async fn create_car(
    State(state): State<AppState>,
    Json(payload): Json<CreateCarInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let car = state.services.cars.create(payload).await?;
    Ok(created_response(car))
}

/// Get a car by id
#[utoipa::path(
    get,
    path = "/api/v1/cars/{id}",
    params(("id" = i32, Path, description = "Car id")),
    responses(
        (status = 200, description = "Car returned", body = CarResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "cars"
)]
pub async fn get_car(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CarResponse>, ServiceError> {
    Ok(Json(state.services.cars.get(id).await?))
}

/// List cars ordered by id
#[utoipa::path(
    get,
    path = "/api/v1/cars",
    params(ListParams),
    responses(
        (status = 200, description = "Page of cars")
    ),
    security(("bearer_auth" = [])),
    tag = "cars"
)]
pub async fn list_cars(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<PaginatedResponse<CarResponse>>, ServiceError> {
    let window = state.list_window(&params);
    let page = state.services.cars.list(window.offset, window.limit).await?;
    Ok(Json(PaginatedResponse::new(page, window)))
}

/// Update a car; absent fields are left unchanged
#[utoipa::path(
    put,
    path = "/api/v1/cars/{id}",
    params(("id" = i32, Path, description = "Car id")),
    request_body = UpdateCarInput,
    responses(
        (status = 200, description = "Car updated", body = CarResponse),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Conflicts with another car", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "cars"
)]
pub async fn update_car(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCarInput>,
) -> Result<Json<CarResponse>, ServiceError> {
    Ok(Json(state.services.cars.update(id, payload).await?))
}

/// Delete a car
#[utoipa::path(
    delete,
    path = "/api/v1/cars/{id}",
    params(("id" = i32, Path, description = "Car id")),
    responses(
        (status = 204, description = "Car deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "cars"
)]
pub async fn delete_car(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.cars.delete(id).await?;
    Ok(no_content_response())
}

pub fn car_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_cars).post(create_car))
        .route("/:id", get(get_car).put(update_car).delete(delete_car))
}
