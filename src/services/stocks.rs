use sea_orm::{ConnectionTrait, DatabaseConnection};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

use super::{unique_violation_as, Page};
use crate::dto::{CreateStockInput, StockResponse, UpdateStockInput};
use crate::entities::stock;
use crate::errors::{EntityKind, ServiceError};
use crate::repositories::{CarRepository, CrudRepository, StockRepository};

/// Service for managing per-car stock levels
#[derive(Clone)]
pub struct StockService {
    db: Arc<DatabaseConnection>,
    stocks: StockRepository,
    cars: CarRepository,
    low_stock_threshold: i32,
}

impl StockService {
    pub fn new(db: Arc<DatabaseConnection>, low_stock_threshold: i32) -> Self {
        Self {
            db,
            stocks: StockRepository,
            cars: CarRepository,
            low_stock_threshold,
        }
    }

    /// Creates the stock record for a car. A car has at most one.
    #[instrument(skip(self))]
    pub async fn create(&self, input: CreateStockInput) -> Result<StockResponse, ServiceError> {
        input.validate()?;
        ensure_non_negative(input.quantity)?;
        let db = &*self.db;

        let car = self.cars.require(db, input.car_id).await?;
        if self.stocks.get_by_car_id(db, input.car_id).await?.is_some() {
            return Err(ServiceError::already_exists(
                EntityKind::Stock,
                "car_id",
                input.car_id,
            ));
        }

        let car_id = input.car_id;
        let stock = self.stocks.create(db, input).await.map_err(|e| {
            unique_violation_as(e, || {
                ServiceError::already_exists(EntityKind::Stock, "car_id", car_id)
            })
        })?;
        info!(stock_id = stock.id, car_id, quantity = stock.quantity, "stock created");
        Ok(StockResponse::new(stock, car))
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<StockResponse, ServiceError> {
        let stock = self.stocks.require(&*self.db, id).await?;
        self.with_car(stock).await
    }

    #[instrument(skip(self))]
    pub async fn get_by_car(&self, car_id: i32) -> Result<StockResponse, ServiceError> {
        let stock = self
            .stocks
            .get_by_car_id(&*self.db, car_id)
            .await?
            .ok_or_else(|| ServiceError::NotFoundBy {
                entity: EntityKind::Stock,
                field: "car_id",
                value: car_id.to_string(),
            })?;
        self.with_car(stock).await
    }

    #[instrument(skip(self))]
    pub async fn list(&self, offset: u64, limit: u64) -> Result<Page<StockResponse>, ServiceError> {
        let db = &*self.db;
        let total = self.stocks.count(db).await?;
        let stocks = self.stocks.list(db, offset, limit).await?;
        Ok(Page::new(self.with_cars(db, stocks).await?, total))
    }

    /// Stocks at or below `threshold`, defaulting to the configured threshold.
    #[instrument(skip(self))]
    pub async fn low_stock(&self, threshold: Option<i32>) -> Result<Vec<StockResponse>, ServiceError> {
        let threshold = threshold.unwrap_or(self.low_stock_threshold);
        ensure_non_negative(threshold)?;
        let db = &*self.db;
        let stocks = self.stocks.list_low_stock(db, threshold).await?;
        self.with_cars(db, stocks).await
    }

    /// Stocks that can currently be sold.
    #[instrument(skip(self))]
    pub async fn available(&self, offset: u64, limit: u64) -> Result<Vec<StockResponse>, ServiceError> {
        let db = &*self.db;
        let stocks = self.stocks.list_available(db, offset, limit).await?;
        self.with_cars(db, stocks).await
    }

    #[instrument(skip(self))]
    pub async fn update(&self, id: i32, patch: UpdateStockInput) -> Result<StockResponse, ServiceError> {
        patch.validate()?;
        if let Some(quantity) = patch.quantity {
            ensure_non_negative(quantity)?;
        }
        let stock = self.stocks.update(&*self.db, id, patch).await?;
        self.with_car(stock).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        self.stocks.delete(&*self.db, id).await?;
        info!(stock_id = id, "stock deleted");
        Ok(())
    }

    async fn with_car(&self, stock: stock::Model) -> Result<StockResponse, ServiceError> {
        let car = self.cars.get_by_id(&*self.db, stock.car_id).await?.ok_or_else(|| {
            ServiceError::InternalError(format!(
                "stock {} references missing car {}",
                stock.id, stock.car_id
            ))
        })?;
        Ok(StockResponse::new(stock, car))
    }

    async fn with_cars<C>(
        &self,
        db: &C,
        stocks: Vec<stock::Model>,
    ) -> Result<Vec<StockResponse>, ServiceError>
    where
        C: ConnectionTrait,
    {
        let car_ids: Vec<i32> = stocks.iter().map(|s| s.car_id).collect();
        let cars: HashMap<i32, _> = self
            .cars
            .get_many(db, &car_ids)
            .await?
            .into_iter()
            .map(|car| (car.id, car))
            .collect();

        stocks
            .into_iter()
            .map(|stock| -> Result<StockResponse, ServiceError> {
                let car = cars.get(&stock.car_id).cloned().ok_or_else(|| {
                    ServiceError::InternalError(format!(
                        "stock {} references missing car {}",
                        stock.id, stock.car_id
                    ))
                })?;
                Ok(StockResponse::new(stock, car))
            })
            .collect()
    }
}

fn ensure_non_negative(quantity: i32) -> Result<(), ServiceError> {
    if quantity < 0 {
        return Err(ServiceError::ValidationError(format!(
            "quantity must not be negative, got {}",
            quantity
        )));
    }
    Ok(())
}
