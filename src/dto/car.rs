use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::entities::car;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCarInput {
    #[validate(length(min = 1, max = 100))]
    #[schema(example = "Ram 3")]
    pub name: String,
    #[validate(range(min = 1886, max = 2100))]
    #[schema(example = 2020)]
    pub year: i32,
    #[validate(length(min = 1, max = 100))]
    #[schema(example = "Dodge")]
    pub brand: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCarInput {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(range(min = 1886, max = 2100))]
    pub year: Option<i32>,
    #[validate(length(min = 1, max = 100))]
    pub brand: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CarResponse {
    pub id: i32,
    pub name: String,
    pub year: i32,
    pub brand: String,
}

impl From<car::Model> for CarResponse {
    fn from(model: car::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            year: model.year,
            brand: model.brand,
        }
    }
}
