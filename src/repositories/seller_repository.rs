use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::{ensure_deleted, CrudRepository};
use crate::dto::{CreateSellerInput, UpdateSellerInput};
use crate::entities::seller::{self, Column, Entity as Seller};
use crate::errors::{EntityKind, ServiceError};

/// Repository for seller rows
#[derive(Debug, Clone, Copy, Default)]
pub struct SellerRepository;

impl SellerRepository {
    /// Loads every row whose id is in `ids`; missing ids are skipped.
    pub async fn get_many<C>(&self, db: &C, ids: &[i32]) -> Result<Vec<seller::Model>, ServiceError>
    where
        C: ConnectionTrait,
    {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(Seller::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .all(db)
            .await?)
    }

    pub async fn get_by_cpf<C>(&self, db: &C, cpf: &str) -> Result<Option<seller::Model>, ServiceError>
    where
        C: ConnectionTrait,
    {
        Ok(Seller::find().filter(Column::Cpf.eq(cpf)).one(db).await?)
    }
}

#[async_trait]
impl CrudRepository for SellerRepository {
    type Model = seller::Model;
    type Create = CreateSellerInput;
    type Patch = UpdateSellerInput;

    const ENTITY: EntityKind = EntityKind::Seller;

    async fn create<C>(
        &self,
        db: &C,
        input: CreateSellerInput,
    ) -> Result<seller::Model, ServiceError>
    where
        C: ConnectionTrait,
    {
        let model = seller::ActiveModel {
            id: NotSet,
            name: Set(input.name),
            cpf: Set(input.cpf),
            phone: Set(input.phone),
        };
        Ok(model.insert(db).await?)
    }

    async fn get_by_id<C>(&self, db: &C, id: i32) -> Result<Option<seller::Model>, ServiceError>
    where
        C: ConnectionTrait,
    {
        Ok(Seller::find_by_id(id).one(db).await?)
    }

    async fn list<C>(
        &self,
        db: &C,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<seller::Model>, ServiceError>
    where
        C: ConnectionTrait,
    {
        Ok(Seller::find()
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
        Ok(Seller::find().count(db).await?)
    }

    async fn update<C>(
        &self,
        db: &C,
        id: i32,
        patch: UpdateSellerInput,
    ) -> Result<seller::Model, ServiceError>
    where
        C: ConnectionTrait,
    {
        let existing = self.require(db, id).await?;
        let mut model: seller::ActiveModel = existing.clone().into();

        if let Some(name) = patch.name {
            model.name = Set(name);
        }
        if let Some(cpf) = patch.cpf {
            model.cpf = Set(cpf);
        }
        if let Some(phone) = patch.phone {
            model.phone = Set(phone);
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
        let result = Seller::delete_by_id(id).exec(db).await?;
        ensure_deleted(result.rows_affected, EntityKind::Seller, id)
    }
}
