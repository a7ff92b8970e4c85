use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

use super::{unique_violation_as, Page};
use crate::dto::{CreateSellerInput, SellerResponse, UpdateSellerInput};
use crate::errors::{EntityKind, ServiceError};
use crate::repositories::{CrudRepository, SellerRepository};

/// Service for managing sellers. The CPF is unique.
#[derive(Clone)]
pub struct SellerService {
    db: Arc<DatabaseConnection>,
    sellers: SellerRepository,
}

impl SellerService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            db,
            sellers: SellerRepository,
        }
    }

    #[instrument(skip(self))]
    pub async fn create(&self, input: CreateSellerInput) -> Result<SellerResponse, ServiceError> {
        input.validate()?;
        let db = &*self.db;

        if self.sellers.get_by_cpf(db, &input.cpf).await?.is_some() {
            return Err(ServiceError::already_exists(
                EntityKind::Seller,
                "cpf",
                &input.cpf,
            ));
        }

        let cpf = input.cpf.clone();
        let seller = self.sellers.create(db, input).await.map_err(|e| {
            unique_violation_as(e, || {
                ServiceError::already_exists(EntityKind::Seller, "cpf", &cpf)
            })
        })?;
        info!(seller_id = seller.id, "seller created");
        Ok(seller.into())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<SellerResponse, ServiceError> {
        Ok(self.sellers.require(&*self.db, id).await?.into())
    }

    #[instrument(skip(self))]
    pub async fn get_by_cpf(&self, cpf: &str) -> Result<SellerResponse, ServiceError> {
        self.sellers
            .get_by_cpf(&*self.db, cpf)
            .await?
            .map(SellerResponse::from)
            .ok_or_else(|| ServiceError::NotFoundBy {
                entity: EntityKind::Seller,
                field: "cpf",
                value: cpf.to_string(),
            })
    }

    #[instrument(skip(self))]
    pub async fn list(&self, offset: u64, limit: u64) -> Result<Page<SellerResponse>, ServiceError> {
        let db = &*self.db;
        let total = self.sellers.count(db).await?;
        let sellers = self.sellers.list(db, offset, limit).await?;
        Ok(Page::new(sellers, total).map(SellerResponse::from))
    }

    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: i32,
        patch: UpdateSellerInput,
    ) -> Result<SellerResponse, ServiceError> {
        patch.validate()?;
        let db = &*self.db;
        let existing = self.sellers.require(db, id).await?;

        let new_cpf = patch.cpf.clone().filter(|cpf| *cpf != existing.cpf);
        if let Some(cpf) = &new_cpf {
            if self.sellers.get_by_cpf(db, cpf).await?.is_some() {
                return Err(ServiceError::already_exists(EntityKind::Seller, "cpf", cpf));
            }
        }

        let seller = self.sellers.update(db, id, patch).await.map_err(|e| {
            unique_violation_as(e, || {
                ServiceError::already_exists(
                    EntityKind::Seller,
                    "cpf",
                    new_cpf.clone().unwrap_or_default(),
                )
            })
        })?;
        Ok(seller.into())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        self.sellers.delete(&*self.db, id).await?;
        info!(seller_id = id, "seller deleted");
        Ok(())
    }
}
