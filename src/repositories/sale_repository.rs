use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::{ensure_deleted, CrudRepository};
use crate::dto::{NewSale, SalePatch};
use crate::entities::sale::{self, Column, Entity as Sale};
use crate::errors::{EntityKind, ServiceError};

/// Optional equality filters for sale listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaleFilter {
    pub car_id: Option<i32>,
    pub buyer_id: Option<i32>,
    pub seller_id: Option<i32>,
}

impl SaleFilter {
    fn condition(&self) -> Condition {
        let mut condition = Condition::all();
        if let Some(car_id) = self.car_id {
            condition = condition.add(Column::CarId.eq(car_id));
        }
        if let Some(buyer_id) = self.buyer_id {
            condition = condition.add(Column::BuyerId.eq(buyer_id));
        }
        if let Some(seller_id) = self.seller_id {
            condition = condition.add(Column::SellerId.eq(seller_id));
        }
        condition
    }
}

/// Repository for sale rows
#[derive(Debug, Clone, Copy, Default)]
pub struct SaleRepository;

impl SaleRepository {
    /// Filtered page ordered by id, plus the filtered total.
    pub async fn list_filtered<C>(
        &self,
        db: &C,
        filter: SaleFilter,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<sale::Model>, u64), ServiceError>
    where
        C: ConnectionTrait,
    {
        let total = Sale::find().filter(filter.condition()).count(db).await?;
        let rows = Sale::find()
            .filter(filter.condition())
            .order_by_asc(Column::Id)
            .offset(offset)
            .limit(limit)
            .all(db)
            .await?;
        Ok((rows, total))
    }

    pub async fn list_by_car<C>(&self, db: &C, car_id: i32) -> Result<Vec<sale::Model>, ServiceError>
    where
        C: ConnectionTrait,
    {
        self.list_all_matching(db, Column::CarId.eq(car_id)).await
    }

    pub async fn list_by_buyer<C>(
        &self,
        db: &C,
        buyer_id: i32,
    ) -> Result<Vec<sale::Model>, ServiceError>
    where
        C: ConnectionTrait,
    {
        self.list_all_matching(db, Column::BuyerId.eq(buyer_id)).await
    }

    pub async fn list_by_seller<C>(
        &self,
        db: &C,
        seller_id: i32,
    ) -> Result<Vec<sale::Model>, ServiceError>
    where
        C: ConnectionTrait,
    {
        self.list_all_matching(db, Column::SellerId.eq(seller_id)).await
    }

    async fn list_all_matching<C>(
        &self,
        db: &C,
        condition: sea_orm::sea_query::SimpleExpr,
    ) -> Result<Vec<sale::Model>, ServiceError>
    where
        C: ConnectionTrait,
    {
        Ok(Sale::find()
            .filter(condition)
            .order_by_asc(Column::Id)
            .all(db)
            .await?)
    }
}

#[async_trait]
impl CrudRepository for SaleRepository {
    type Model = sale::Model;
    type Create = NewSale;
    type Patch = SalePatch;

    const ENTITY: EntityKind = EntityKind::Sale;

    async fn create<C>(&self, db: &C, input: NewSale) -> Result<sale::Model, ServiceError>
    where
        C: ConnectionTrait,
    {
        let model = sale::ActiveModel {
            id: NotSet,
            car_id: Set(input.car_id),
            buyer_id: Set(input.buyer_id),
            seller_id: Set(input.seller_id),
            created_at: Set(input.created_at),
        };
        Ok(model.insert(db).await?)
    }

    async fn get_by_id<C>(&self, db: &C, id: i32) -> Result<Option<sale::Model>, ServiceError>
    where
        C: ConnectionTrait,
    {
        Ok(Sale::find_by_id(id).one(db).await?)
    }

    async fn list<C>(&self, db: &C, offset: u64, limit: u64) -> Result<Vec<sale::Model>, ServiceError>
    where
        C: ConnectionTrait,
    {
        Ok(Sale::find()
            .order_by_asc(Column::Id)
            .offset(offset)
            .limit(limit)
            .all(db)
            .await?)
    }

    async fn count<C>(&self, db: &C) -> Result<u64, ServiceError>
    where
        C: ConnectionTrait,
    {
        Ok(Sale::find().count(db).await?)
    }

    async fn update<C>(&self, db: &C, id: i32, patch: SalePatch) -> Result<sale::Model, ServiceError>
    where
        C: ConnectionTrait,
    {
        let existing = self.require(db, id).await?;
        let mut model: sale::ActiveModel = existing.clone().into();

        if let Some(car_id) = patch.car_id {
            model.car_id = Set(car_id);
        }
        if let Some(buyer_id) = patch.buyer_id {
            model.buyer_id = Set(buyer_id);
        }
        if let Some(seller_id) = patch.seller_id {
            model.seller_id = Set(seller_id);
        }

        if !model.is_changed() {
            return Ok(existing);
        }
        Ok(model.update(db).await?)
    }

    async fn delete<C>(&self, db: &C, id: i32) -> Result<(), ServiceError>
    where
        C: ConnectionTrait,
    {
        let result = Sale::delete_by_id(id).exec(db).await?;
        ensure_deleted(result.rows_affected, EntityKind::Sale, id)
    }
}
