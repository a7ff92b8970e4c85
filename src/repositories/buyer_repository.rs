use async_trait::async_trait;
use sea_orm::{
    sea_query::{Expr, Func},
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::{ensure_deleted, CrudRepository};
use crate::dto::{CreateBuyerInput, UpdateBuyerInput};
use crate::entities::buyer::{self, Column, Entity as Buyer};
use crate::errors::{EntityKind, ServiceError};

/// Repository for buyer rows
#[derive(Debug, Clone, Copy, Default)]
pub struct BuyerRepository;

impl BuyerRepository {
    /// Loads every row whose id is in `ids`; missing ids are skipped.
    pub async fn get_many<C>(&self, db: &C, ids: &[i32]) -> Result<Vec<buyer::Model>, ServiceError>
    where
        C: ConnectionTrait,
    {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(Buyer::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .all(db)
            .await?)
    }

    pub async fn get_by_phone<C>(
        &self,
        db: &C,
        phone: &str,
    ) -> Result<Option<buyer::Model>, ServiceError>
    where
        C: ConnectionTrait,
    {
        Ok(Buyer::find()
            .filter(Column::Phone.eq(phone))
            .one(db)
            .await?)
    }

    /// Case-insensitive substring match on the buyer name, ordered by id.
    pub async fn search_by_name<C>(
        &self,
        db: &C,
        name: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<buyer::Model>, ServiceError>
    where
        C: ConnectionTrait,
    {
        let pattern = format!("%{}%", name.to_lowercase());
        Ok(Buyer::find()
            .filter(Expr::expr(Func::lower(Expr::col(Column::Name))).like(pattern))
            .order_by_asc(Column::Id)
            .offset(offset)
            .limit(limit)
            .all(db)
            .await?)
    }
}

#[async_trait]
impl CrudRepository for BuyerRepository {
    type Model = buyer::Model;
    type Create = CreateBuyerInput;
    type Patch = UpdateBuyerInput;

    const ENTITY: EntityKind = EntityKind::Buyer;

    async fn create<C>(&self, db: &C, input: CreateBuyerInput) -> Result<buyer::Model, ServiceError>
    where
        C: ConnectionTrait,
    {
        let address = input.address;
        let model = buyer::ActiveModel {
            id: NotSet,
            name: Set(input.name),
            phone: Set(input.phone),
            address_cep: Set(address.cep),
            address_public_place: Set(address.public_place),
            address_city: Set(address.city),
            address_district: Set(address.district),
            address_state: Set(address.state),
        };
        Ok(model.insert(db).await?)
    }

    async fn get_by_id<C>(&self, db: &C, id: i32) -> Result<Option<buyer::Model>, ServiceError>
    where
        C: ConnectionTrait,
    {
        Ok(Buyer::find_by_id(id).one(db).await?)
    }

    async fn list<C>(
        &self,
        db: &C,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<buyer::Model>, ServiceError>
    where
        C: ConnectionTrait,
    {
        Ok(Buyer::find()
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
        Ok(Buyer::find().count(db).await?)
    }

    async fn update<C>(
        &self,
        db: &C,
        id: i32,
        patch: UpdateBuyerInput,
    ) -> Result<buyer::Model, ServiceError>
    where
        C: ConnectionTrait,
    {
        let existing = self.require(db, id).await?;
        let mut model: buyer::ActiveModel = existing.clone().into();

        if let Some(name) = patch.name {
            model.name = Set(name);
        }
        if let Some(phone) = patch.phone {
            model.phone = Set(phone);
        }
        if let Some(address) = patch.address {
            if let Some(cep) = address.cep {
                model.address_cep = Set(cep);
            }
            if let Some(public_place) = address.public_place {
                model.address_public_place = Set(public_place);
            }
            if let Some(city) = address.city {
                model.address_city = Set(city);
            }
            if let Some(district) = address.district {
                model.address_district = Set(district);
            }
            if let Some(state) = address.state {
                model.address_state = Set(state);
            }
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
        let result = Buyer::delete_by_id(id).exec(db).await?;
        ensure_deleted(result.rows_affected, EntityKind::Buyer, id)
    }
}
