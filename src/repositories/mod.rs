use async_trait::async_trait;
use sea_orm::ConnectionTrait;

use crate::errors::{EntityKind, ServiceError};

pub mod buyer_repository;
pub mod car_repository;
pub mod sale_repository;
pub mod seller_repository;
pub mod stock_repository;
pub mod user_repository;

pub use buyer_repository::BuyerRepository;
pub use car_repository::CarRepository;
pub use sale_repository::{SaleFilter, SaleRepository};
pub use seller_repository::SellerRepository;
pub use stock_repository::StockRepository;
pub use user_repository::UserRepository;

/// Data access contract shared by every entity repository.
///
/// Repositories hold no connection of their own: each call names the
/// connection to run on, so the same repository works against the pool or
/// inside a transaction. They translate rows and nothing else; uniqueness and
/// cross-entity rules belong to the services.
#[async_trait]
pub trait CrudRepository: Send + Sync {
    type Model: Send + Sync;
    type Create: Send;
    type Patch: Send;

    /// Entity kind reported in `NotFound` errors.
    const ENTITY: EntityKind;

    /// Persists a new row with a generated id.
    async fn create<C>(&self, db: &C, input: Self::Create) -> Result<Self::Model, ServiceError>
    where
        C: ConnectionTrait;

    /// Absence is `Ok(None)`, not an error.
    async fn get_by_id<C>(&self, db: &C, id: i32) -> Result<Option<Self::Model>, ServiceError>
    where
        C: ConnectionTrait;

    /// One page ordered by id ascending. An empty page is not an error.
    async fn list<C>(
        &self,
        db: &C,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Self::Model>, ServiceError>
    where
        C: ConnectionTrait;

    async fn count<C>(&self, db: &C) -> Result<u64, ServiceError>
    where
        C: ConnectionTrait;

    /// Applies only the fields present in `patch`.
    async fn update<C>(
        &self,
        db: &C,
        id: i32,
        patch: Self::Patch,
    ) -> Result<Self::Model, ServiceError>
    where
        C: ConnectionTrait;

    async fn delete<C>(&self, db: &C, id: i32) -> Result<(), ServiceError>
    where
        C: ConnectionTrait;

    /// Like [`CrudRepository::get_by_id`] but treats absence as `NotFound`.
    async fn require<C>(&self, db: &C, id: i32) -> Result<Self::Model, ServiceError>
    where
        C: ConnectionTrait,
    {
        self.get_by_id(db, id)
            .await?
            .ok_or_else(|| ServiceError::not_found(Self::ENTITY, id))
    }
}

/// Fails with `NotFound` when a delete touched no row.
pub(crate) fn ensure_deleted(
    rows_affected: u64,
    entity: EntityKind,
    id: i32,
) -> Result<(), ServiceError> {
    if rows_affected == 0 {
        Err(ServiceError::not_found(entity, id))
    } else {
        Ok(())
    }
}
