use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::validate_digits;
use crate::entities::seller;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateSellerInput {
    #[validate(length(min = 1, max = 150))]
    #[schema(example = "João da Silva")]
    pub name: String,
    /// Brazilian individual taxpayer number, digits only
    #[validate(length(equal = 11), custom = "validate_digits")]
    #[schema(example = "69285717640")]
    pub cpf: String,
    #[validate(length(min = 8, max = 20), custom = "validate_digits")]
    #[schema(example = "1299871234")]
    pub phone: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateSellerInput {
    #[validate(length(min = 1, max = 150))]
    pub name: Option<String>,
    #[validate(length(equal = 11), custom = "validate_digits")]
    pub cpf: Option<String>,
    #[validate(length(min = 8, max = 20), custom = "validate_digits")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SellerResponse {
    pub id: i32,
    pub name: String,
    pub cpf: String,
    pub phone: String,
}

impl From<seller::Model> for SellerResponse {
    fn from(model: seller::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            cpf: model.cpf,
            phone: model.phone,
        }
    }
}
