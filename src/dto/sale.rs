use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{BuyerResponse, CarResponse, SellerResponse};
use crate::entities::{buyer, car, sale, seller};

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct CreateSaleInput {
    #[schema(example = 1)]
    pub car_id: i32,
    #[schema(example = 1)]
    pub buyer_id: i32,
    #[schema(example = 1)]
    pub seller_id: i32,
}

/// Row to insert; `created_at` is stamped by the sale service.
#[derive(Debug, Clone)]
pub struct NewSale {
    pub car_id: i32,
    pub buyer_id: i32,
    pub seller_id: i32,
    pub created_at: DateTime<Utc>,
}

/// Reassigns sale references; `created_at` is immutable.
#[derive(Debug, Clone, Default)]
pub struct SalePatch {
    pub car_id: Option<i32>,
    pub buyer_id: Option<i32>,
    pub seller_id: Option<i32>,
}

/// A sale together with the car, buyer, and seller it references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SaleDetail {
    pub id: i32,
    pub car: CarResponse,
    pub buyer: BuyerResponse,
    pub seller: SellerResponse,
    pub created_at: DateTime<Utc>,
}

impl SaleDetail {
    pub fn new(
        sale: sale::Model,
        car: car::Model,
        buyer: buyer::Model,
        seller: seller::Model,
    ) -> Self {
        Self {
            id: sale.id,
            car: car.into(),
            buyer: buyer.into(),
            seller: seller.into(),
            created_at: sale.created_at,
        }
    }
}
