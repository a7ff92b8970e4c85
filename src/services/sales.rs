/*!
 * Sale orchestration
 *
 * Recording a sale touches four tables. Existence checks, the stock
 * decrement, and the sale insert all run on one transaction: either the
 * sale row exists and the stock went down by one, or nothing changed.
 */

use chrono::Utc;
use metrics::counter;
use sea_orm::{ConnectionTrait, DatabaseConnection};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::Page;
use crate::db::with_transaction;
use crate::dto::{CreateSaleInput, NewSale, SaleDetail};
use crate::entities::sale;
use crate::errors::{SaleViolation, ServiceError};
use crate::repositories::{
    BuyerRepository, CarRepository, CrudRepository, SaleFilter, SaleRepository,
    SellerRepository, StockRepository,
};

/// Units taken from stock by one sale.
pub const UNITS_PER_SALE: i32 = 1;

/// The repositories a sale reads and writes. Stateless, so it is copied
/// into the transaction closure.
#[derive(Debug, Clone, Copy, Default)]
struct SaleRepositories {
    cars: CarRepository,
    buyers: BuyerRepository,
    sellers: SellerRepository,
    stocks: StockRepository,
    sales: SaleRepository,
}

impl SaleRepositories {
    /// Checks car, buyer, seller, and stock in that order and reports every
    /// missing one, then takes one unit of stock and inserts the sale.
    async fn record_sale<C>(&self, db: &C, input: CreateSaleInput) -> Result<SaleDetail, ServiceError>
    where
        C: ConnectionTrait,
    {
        let car = self.cars.get_by_id(db, input.car_id).await?;
        let buyer = self.buyers.get_by_id(db, input.buyer_id).await?;
        let seller = self.sellers.get_by_id(db, input.seller_id).await?;
        let stock = self.stocks.get_by_car_id(db, input.car_id).await?;

        let (car, buyer, seller, stock) = match (car, buyer, seller, stock) {
            (Some(car), Some(buyer), Some(seller), Some(stock)) => (car, buyer, seller, stock),
            (car, buyer, seller, stock) => {
                let mut violations = Vec::new();
                if car.is_none() {
                    violations.push(SaleViolation::CarNotFound(input.car_id));
                }
                if buyer.is_none() {
                    violations.push(SaleViolation::BuyerNotFound(input.buyer_id));
                }
                if seller.is_none() {
                    violations.push(SaleViolation::SellerNotFound(input.seller_id));
                }
                if stock.is_none() {
                    violations.push(SaleViolation::StockNotFound(input.car_id));
                }
                return Err(ServiceError::SaleRejected(violations));
            }
        };

        if stock.quantity < UNITS_PER_SALE {
            return Err(ServiceError::InsufficientStock {
                car_id: car.id,
                requested: UNITS_PER_SALE,
                available: stock.quantity,
            });
        }

        // The guarded update is the real check; the read above only produces
        // the error for the common case.
        if !self.stocks.decrement(db, car.id, UNITS_PER_SALE).await? {
            let available = self
                .stocks
                .get_by_car_id(db, car.id)
                .await?
                .map(|s| s.quantity)
                .unwrap_or(0);
            return Err(ServiceError::InsufficientStock {
                car_id: car.id,
                requested: UNITS_PER_SALE,
                available,
            });
        }

        let sale = self
            .sales
            .create(
                db,
                NewSale {
                    car_id: car.id,
                    buyer_id: buyer.id,
                    seller_id: seller.id,
                    created_at: Utc::now(),
                },
            )
            .await?;

        Ok(SaleDetail::new(sale, car, buyer, seller))
    }

    /// Resolves the car, buyer, and seller of each sale with one query per table.
    async fn compose<C>(&self, db: &C, sales: Vec<sale::Model>) -> Result<Vec<SaleDetail>, ServiceError>
    where
        C: ConnectionTrait,
    {
        fn ids(sales: &[sale::Model], key: impl Fn(&sale::Model) -> i32) -> Vec<i32> {
            let mut ids: Vec<i32> = sales.iter().map(key).collect();
            ids.sort_unstable();
            ids.dedup();
            ids
        }

        let cars: HashMap<_, _> = self
            .cars
            .get_many(db, &ids(&sales, |s| s.car_id))
            .await?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();
        let buyers: HashMap<_, _> = self
            .buyers
            .get_many(db, &ids(&sales, |s| s.buyer_id))
            .await?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();
        let sellers: HashMap<_, _> = self
            .sellers
            .get_many(db, &ids(&sales, |s| s.seller_id))
            .await?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

        sales
            .into_iter()
            .map(|sale| -> Result<SaleDetail, ServiceError> {
                let dangling = |what: &str, id: i32| {
                    ServiceError::InternalError(format!(
                        "sale {} references missing {} {}",
                        sale.id, what, id
                    ))
                };
                let car = cars
                    .get(&sale.car_id)
                    .cloned()
                    .ok_or_else(|| dangling("car", sale.car_id))?;
                let buyer = buyers
                    .get(&sale.buyer_id)
                    .cloned()
                    .ok_or_else(|| dangling("buyer", sale.buyer_id))?;
                let seller = sellers
                    .get(&sale.seller_id)
                    .cloned()
                    .ok_or_else(|| dangling("seller", sale.seller_id))?;
                Ok(SaleDetail::new(sale, car, buyer, seller))
            })
            .collect()
    }
}

/// Service that records and queries sales
#[derive(Clone)]
pub struct SaleService {
    db: Arc<DatabaseConnection>,
    repos: SaleRepositories,
}

impl SaleService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            db,
            repos: SaleRepositories::default(),
        }
    }

    /// Records the sale of one unit of `input.car_id`.
    ///
    /// Missing car, buyer, seller, or stock are all reported together in
    /// `SaleRejected`. An empty stock yields `InsufficientStock`. Neither
    /// case writes anything.
    #[instrument(skip(self), fields(car_id = input.car_id, buyer_id = input.buyer_id, seller_id = input.seller_id))]
    pub async fn create_sale(&self, input: CreateSaleInput) -> Result<SaleDetail, ServiceError> {
        let repos = self.repos;
        let result = with_transaction::<_, SaleDetail, ServiceError>(&self.db, move |txn| {
            Box::pin(async move { repos.record_sale(txn, input).await })
        })
        .await;

        match &result {
            Ok(detail) => {
                counter!("carshop_sales.created", 1);
                info!(sale_id = detail.id, "sale recorded");
            }
            Err(err @ ServiceError::DatabaseError(_)) => {
                counter!("carshop_sales.failed", 1);
                tracing::error!(error = %err, "sale failed on storage");
            }
            Err(err) => {
                counter!("carshop_sales.rejected", 1);
                warn!(error = %err, "sale rejected");
            }
        }

        result
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<SaleDetail, ServiceError> {
        let db = &*self.db;
        let sale = self.repos.sales.require(db, id).await?;
        let mut details = self.repos.compose(db, vec![sale]).await?;
        details
            .pop()
            .ok_or_else(|| ServiceError::InternalError(format!("sale {} vanished", id)))
    }

    /// Sales ordered by id, optionally narrowed to a car, buyer, or seller.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        filter: SaleFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Page<SaleDetail>, ServiceError> {
        let db = &*self.db;
        let (sales, total) = self.repos.sales.list_filtered(db, filter, offset, limit).await?;
        Ok(Page::new(self.repos.compose(db, sales).await?, total))
    }

    /// Every sale of one car.
    #[instrument(skip(self))]
    pub async fn list_by_car(&self, car_id: i32) -> Result<Vec<SaleDetail>, ServiceError> {
        let db = &*self.db;
        let sales = self.repos.sales.list_by_car(db, car_id).await?;
        self.repos.compose(db, sales).await
    }

    #[instrument(skip(self))]
    pub async fn list_by_buyer(&self, buyer_id: i32) -> Result<Vec<SaleDetail>, ServiceError> {
        let db = &*self.db;
        let sales = self.repos.sales.list_by_buyer(db, buyer_id).await?;
        self.repos.compose(db, sales).await
    }

    #[instrument(skip(self))]
    pub async fn list_by_seller(&self, seller_id: i32) -> Result<Vec<SaleDetail>, ServiceError> {
        let db = &*self.db;
        let sales = self.repos.sales.list_by_seller(db, seller_id).await?;
        self.repos.compose(db, sales).await
    }

    /// Removes the sale record. Stock is not given back.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        self.repos.sales.delete(&*self.db, id).await?;
        info!(sale_id = id, "sale deleted");
        Ok(())
    }
}
