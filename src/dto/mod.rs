//! Request payloads and response views.
//!
//! Every response view is built from its entity model by an explicit
//! conversion; nothing here is derived from column names at runtime.

pub mod buyer;
pub mod car;
pub mod sale;
pub mod seller;
pub mod stock;
pub mod user;

pub use buyer::{Address, AddressPatch, BuyerResponse, CreateBuyerInput, UpdateBuyerInput};
pub use car::{CarResponse, CreateCarInput, UpdateCarInput};
pub use sale::{CreateSaleInput, NewSale, SaleDetail, SalePatch};
pub use seller::{CreateSellerInput, SellerResponse, UpdateSellerInput};
pub use stock::{CreateStockInput, StockResponse, UpdateStockInput};
pub use user::{CreateUserInput, NewUser, UpdateUserInput, UserPatch, UserResponse};

use validator::ValidationError;

pub(crate) fn validate_digits(value: &str) -> Result<(), ValidationError> {
    if value.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("digits");
        err.message = Some("must contain only digits".into());
        Err(err)
    }
}
