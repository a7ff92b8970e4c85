pub mod auth;
pub mod buyers;
pub mod cars;
pub mod common;
pub mod sales;
pub mod sellers;
pub mod stocks;
pub mod users;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::DbPool;
use crate::services::{
    BuyerService, CarService, SaleService, SellerService, StockService, UserService,
};

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub cars: Arc<CarService>,
    pub buyers: Arc<BuyerService>,
    pub sellers: Arc<SellerService>,
    pub stocks: Arc<StockService>,
    pub sales: Arc<SaleService>,
    pub users: Arc<UserService>,
}

impl AppServices {
    /// Builds every service once over the shared pool.
    pub fn new(db_pool: Arc<DbPool>, config: &AppConfig) -> Self {
        Self {
            cars: Arc::new(CarService::new(db_pool.clone())),
            buyers: Arc::new(BuyerService::new(db_pool.clone())),
            sellers: Arc::new(SellerService::new(db_pool.clone())),
            stocks: Arc::new(StockService::new(
                db_pool.clone(),
                config.low_stock_threshold,
            )),
            sales: Arc::new(SaleService::new(db_pool.clone())),
            users: Arc::new(UserService::new(db_pool)),
        }
    }
}
