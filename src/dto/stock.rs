use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::CarResponse;
use crate::entities::{car, stock};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateStockInput {
    #[validate(range(min = 1))]
    #[schema(example = 1)]
    pub car_id: i32,
    #[validate(range(min = 0))]
    #[schema(example = 10)]
    pub quantity: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateStockInput {
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,
}

/// Stock view with its car embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StockResponse {
    pub id: i32,
    pub car: CarResponse,
    pub quantity: i32,
}

impl StockResponse {
    pub fn new(stock: stock::Model, car: car::Model) -> Self {
        Self {
            id: stock.id,
            car: car.into(),
            quantity: stock.quantity,
        }
    }
}
