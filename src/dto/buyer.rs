use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::validate_digits;
use crate::entities::buyer;

/// Postal address of a buyer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Address {
    #[validate(length(min = 1, max = 20))]
    #[schema(example = "73770-000")]
    pub cep: String,
    #[validate(length(min = 1, max = 200))]
    #[schema(example = "Banbusal")]
    pub public_place: String,
    #[validate(length(min = 1, max = 100))]
    #[schema(example = "Alto Paraiso de Goias")]
    pub city: String,
    #[validate(length(min = 1, max = 100))]
    #[schema(example = "Cidade Baixa")]
    pub district: String,
    #[validate(length(min = 1, max = 50))]
    #[schema(example = "Goias")]
    pub state: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct AddressPatch {
    #[validate(length(min = 1, max = 20))]
    pub cep: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub public_place: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub city: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub district: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub state: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBuyerInput {
    #[validate(length(min = 1, max = 150))]
    #[schema(example = "Bruce Lee")]
    pub name: String,
    #[validate(length(min = 8, max = 20), custom = "validate_digits")]
    #[schema(example = "12996651234")]
    pub phone: String,
    #[validate]
    pub address: Address,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBuyerInput {
    #[validate(length(min = 1, max = 150))]
    pub name: Option<String>,
    #[validate(length(min = 8, max = 20), custom = "validate_digits")]
    pub phone: Option<String>,
    #[validate]
    pub address: Option<AddressPatch>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BuyerResponse {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub address: Address,
}

impl From<buyer::Model> for BuyerResponse {
    fn from(model: buyer::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            phone: model.phone,
            address: Address {
                cep: model.address_cep,
                public_place: model.address_public_place,
                city: model.address_city,
                district: model.address_district,
                state: model.address_state,
            },
        }
    }
}
