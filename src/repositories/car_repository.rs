use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::{ensure_deleted, CrudRepository};
use crate::dto::{CreateCarInput, UpdateCarInput};
use crate::entities::car::{self, Column, Entity as Car};
use crate::errors::{EntityKind, ServiceError};

/// Repository for car rows
#[derive(Debug, Clone, Copy, Default)]
pub struct CarRepository;

impl CarRepository {
    /// Loads every row whose id is in `ids`; missing ids are skipped.
    pub async fn get_many<C>(&self, db: &C, ids: &[i32]) -> Result<Vec<car::Model>, ServiceError>
    where
        C: ConnectionTrait,
    {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(Car::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .all(db)
            .await?)
    }

    /// Finds the car with this exact (name, year, brand) triple.
    pub async fn get_by_identity<C>(
        &self,
        db: &C,
        name: &str,
        year: i32,
        brand: &str,
    ) -> Result<Option<car::Model>, ServiceError>
    where
        C: ConnectionTrait,
    {
        Ok(Car::find()
            .filter(Column::Name.eq(name))
            .filter(Column::Year.eq(year))
            .filter(Column::Brand.eq(brand))
            .one(db)
            .await?)
    }
}

#[async_trait]
impl CrudRepository for CarRepository {
    type Model = car::Model;
    type Create = CreateCarInput;
    type Patch = UpdateCarInput;

    const ENTITY: EntityKind = EntityKind::Car;

    async fn create<C>(&self, db: &C, input: CreateCarInput) -> Result<car::Model, ServiceError>
    where
        C: ConnectionTrait,
    {
        let model = car::ActiveModel {
            id: NotSet,
            name: Set(input.name),
            year: Set(input.year),
            brand: Set(input.brand),
        };
        Ok(model.insert(db).await?)
    }

    async fn get_by_id<C>(&self, db: &C, id: i32) -> Result<Option<car::Model>, ServiceError>
    where
        C: ConnectionTrait,
    {
        Ok(Car::find_by_id(id).one(db).await?)
    }

    async fn list<C>(&self, db: &C, offset: u64, limit: u64) -> Result<Vec<car::Model>, ServiceError>
    where
        C: ConnectionTrait,
    {
        Ok(Car::find()
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
        Ok(Car::find().count(db).await?)
    }

    async fn update<C>(
        &self,
        db: &C,
        id: i32,
        patch: UpdateCarInput,
    ) -> Result<car::Model, ServiceError>
    where
        C: ConnectionTrait,
    {
        let existing = self.require(db, id).await?;
        let mut model: car::ActiveModel = existing.clone().into();

        if let Some(name) = patch.name {
            model.name = Set(name);
        }
        if let Some(year) = patch.year {
            model.year = Set(year);
        }
        if let Some(brand) = patch.brand {
            model.brand = Set(brand);
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
        let result = Car::delete_by_id(id).exec(db).await?;
        ensure_deleted(result.rows_affected, EntityKind::Car, id)
    }
}
