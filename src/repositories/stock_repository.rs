use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::{ensure_deleted, CrudRepository};
use crate::dto::{CreateStockInput, UpdateStockInput};
use crate::entities::stock::{self, Column, Entity as Stock};
use crate::errors::{EntityKind, ServiceError};

/// Repository for stock rows
#[derive(Debug, Clone, Copy, Default)]
pub struct StockRepository;

impl StockRepository {
    pub async fn get_by_car_id<C>(
        &self,
        db: &C,
        car_id: i32,
    ) -> Result<Option<stock::Model>, ServiceError>
    where
        C: ConnectionTrait,
    {
        Ok(Stock::find()
            .filter(Column::CarId.eq(car_id))
            .one(db)
            .await?)
    }

    /// Stocks whose quantity is at or below `threshold`, lowest first.
    pub async fn list_low_stock<C>(
        &self,
        db: &C,
        threshold: i32,
    ) -> Result<Vec<stock::Model>, ServiceError>
    where
        C: ConnectionTrait,
    {
        Ok(Stock::find()
            .filter(Column::Quantity.lte(threshold))
            .order_by_asc(Column::Quantity)
            .order_by_asc(Column::Id)
            .all(db)
            .await?)
    }

    /// Stocks with at least one unit on hand.
    pub async fn list_available<C>(
        &self,
        db: &C,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<stock::Model>, ServiceError>
    where
        C: ConnectionTrait,
    {
        Ok(Stock::find()
            .filter(Column::Quantity.gt(0))
            .order_by_asc(Column::Id)
            .offset(offset)
            .limit(limit)
            .all(db)
            .await?)
    }

    /// Takes `amount` units from the car's stock in a single guarded statement.
    ///
    /// Returns `false` without touching the row when fewer than `amount` units
    /// remain (or no stock row exists), so quantity can never go negative even
    /// when sales race for the last unit.
    pub async fn decrement<C>(&self, db: &C, car_id: i32, amount: i32) -> Result<bool, ServiceError>
    where
        C: ConnectionTrait,
    {
        let result = Stock::update_many()
            .col_expr(Column::Quantity, Expr::col(Column::Quantity).sub(amount))
            .filter(Column::CarId.eq(car_id))
            .filter(Column::Quantity.gte(amount))
            .exec(db)
            .await?;
        Ok(result.rows_affected == 1)
    }
}

#[async_trait]
impl CrudRepository for StockRepository {
    type Model = stock::Model;
    type Create = CreateStockInput;
    type Patch = UpdateStockInput;

    const ENTITY: EntityKind = EntityKind::Stock;

    async fn create<C>(&self, db: &C, input: CreateStockInput) -> Result<stock::Model, ServiceError>
    where
        C: ConnectionTrait,
    {
        let model = stock::ActiveModel {
            id: NotSet,
            car_id: Set(input.car_id),
            quantity: Set(input.quantity),
        };
        Ok(model.insert(db).await?)
    }

    async fn get_by_id<C>(&self, db: &C, id: i32) -> Result<Option<stock::Model>, ServiceError>
    where
        C: ConnectionTrait,
    {
        Ok(Stock::find_by_id(id).one(db).await?)
    }

    async fn list<C>(
        &self,
        db: &C,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<stock::Model>, ServiceError>
    where
        C: ConnectionTrait,
    {
        Ok(Stock::find()
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
        Ok(Stock::find().count(db).await?)
    }

    async fn update<C>(
        &self,
        db: &C,
        id: i32,
        patch: UpdateStockInput,
    ) -> Result<stock::Model, ServiceError>
    where
        C: ConnectionTrait,
    {
        let existing = self.require(db, id).await?;
        let mut model: stock::ActiveModel = existing.clone().into();

        if let Some(quantity) = patch.quantity {
            model.quantity = Set(quantity);
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
        let result = Stock::delete_by_id(id).exec(db).await?;
        ensure_deleted(result.rows_affected, EntityKind::Stock, id)
    }
}
