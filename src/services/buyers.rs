use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

use super::{unique_violation_as, Page};
use crate::dto::{BuyerResponse, CreateBuyerInput, UpdateBuyerInput};
use crate::errors::{EntityKind, ServiceError};
use crate::repositories::{BuyerRepository, CrudRepository};

/// Service for managing buyers. The phone number is the dedup key.
#[derive(Clone)]
pub struct BuyerService {
    db: Arc<DatabaseConnection>,
    buyers: BuyerRepository,
}

impl BuyerService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            db,
            buyers: BuyerRepository,
        }
    }

    #[instrument(skip(self))]
    pub async fn create(&self, input: CreateBuyerInput) -> Result<BuyerResponse, ServiceError> {
        input.validate()?;
        let db = &*self.db;

        if self.buyers.get_by_phone(db, &input.phone).await?.is_some() {
            return Err(ServiceError::already_exists(
                EntityKind::Buyer,
                "phone",
                &input.phone,
            ));
        }

        let phone = input.phone.clone();
        let buyer = self.buyers.create(db, input).await.map_err(|e| {
            unique_violation_as(e, || {
                ServiceError::already_exists(EntityKind::Buyer, "phone", &phone)
            })
        })?;
        info!(buyer_id = buyer.id, "buyer created");
        Ok(buyer.into())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<BuyerResponse, ServiceError> {
        Ok(self.buyers.require(&*self.db, id).await?.into())
    }

    #[instrument(skip(self))]
    pub async fn get_by_phone(&self, phone: &str) -> Result<BuyerResponse, ServiceError> {
        self.buyers
            .get_by_phone(&*self.db, phone)
            .await?
            .map(BuyerResponse::from)
            .ok_or_else(|| ServiceError::NotFoundBy {
                entity: EntityKind::Buyer,
                field: "phone",
                value: phone.to_string(),
            })
    }

    /// Buyers whose name contains `name`, ignoring case.
    #[instrument(skip(self))]
    pub async fn search_by_name(
        &self,
        name: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<BuyerResponse>, ServiceError> {
        let buyers = self
            .buyers
            .search_by_name(&*self.db, name.trim(), offset, limit)
            .await?;
        Ok(buyers.into_iter().map(BuyerResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn list(&self, offset: u64, limit: u64) -> Result<Page<BuyerResponse>, ServiceError> {
        let db = &*self.db;
        let total = self.buyers.count(db).await?;
        let buyers = self.buyers.list(db, offset, limit).await?;
        Ok(Page::new(buyers, total).map(BuyerResponse::from))
    }

    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: i32,
        patch: UpdateBuyerInput,
    ) -> Result<BuyerResponse, ServiceError> {
        patch.validate()?;
        let db = &*self.db;
        let existing = self.buyers.require(db, id).await?;

        let new_phone = patch
            .phone
            .clone()
            .filter(|phone| *phone != existing.phone);
        if let Some(phone) = &new_phone {
            if self.buyers.get_by_phone(db, phone).await?.is_some() {
                return Err(ServiceError::already_exists(
                    EntityKind::Buyer,
                    "phone",
                    phone,
                ));
            }
        }

        let buyer = self.buyers.update(db, id, patch).await.map_err(|e| {
            unique_violation_as(e, || {
                ServiceError::already_exists(
                    EntityKind::Buyer,
                    "phone",
                    new_phone.clone().unwrap_or_default(),
                )
            })
        })?;
        Ok(buyer.into())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        self.buyers.delete(&*self.db, id).await?;
        info!(buyer_id = id, "buyer deleted");
        Ok(())
    }
}
