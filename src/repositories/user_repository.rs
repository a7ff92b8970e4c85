use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::{ensure_deleted, CrudRepository};
use crate::dto::{NewUser, UserPatch};
use crate::entities::user::{self, Column, Entity as User};
use crate::errors::{EntityKind, ServiceError};

/// Repository for user rows
#[derive(Debug, Clone, Copy, Default)]
pub struct UserRepository;

impl UserRepository {
    pub async fn get_by_email<C>(&self, db: &C, email: &str) -> Result<Option<user::Model>, ServiceError>
    where
        C: ConnectionTrait,
    {
        Ok(User::find().filter(Column::Email.eq(email)).one(db).await?)
    }

    pub async fn list_active<C>(
        &self,
        db: &C,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<user::Model>, ServiceError>
    where
        C: ConnectionTrait,
    {
        Ok(User::find()
            .filter(Column::IsActive.eq(true))
            .order_by_asc(Column::Id)
            .offset(offset)
            .limit(limit)
            .all(db)
            .await?)
    }
}

#[async_trait]
impl CrudRepository for UserRepository {
    type Model = user::Model;
    type Create = NewUser;
    type Patch = UserPatch;

    const ENTITY: EntityKind = EntityKind::User;

    async fn create<C>(&self, db: &C, input: NewUser) -> Result<user::Model, ServiceError>
    where
        C: ConnectionTrait,
    {
        let model = user::ActiveModel {
            id: NotSet,
            email: Set(input.email),
            hashed_password: Set(input.hashed_password),
            is_active: Set(input.is_active),
        };
        Ok(model.insert(db).await?)
    }

    async fn get_by_id<C>(&self, db: &C, id: i32) -> Result<Option<user::Model>, ServiceError>
    where
        C: ConnectionTrait,
    {
        Ok(User::find_by_id(id).one(db).await?)
    }

    async fn list<C>(&self, db: &C, offset: u64, limit: u64) -> Result<Vec<user::Model>, ServiceError>
    where
        C: ConnectionTrait,
    {
        Ok(User::find()
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
        Ok(User::find().count(db).await?)
    }

    async fn update<C>(&self, db: &C, id: i32, patch: UserPatch) -> Result<user::Model, ServiceError>
    where
        C: ConnectionTrait,
    {
        let existing = self.require(db, id).await?;
        let mut model: user::ActiveModel = existing.clone().into();

        if let Some(email) = patch.email {
            model.email = Set(email);
        }
        if let Some(hashed_password) = patch.hashed_password {
            model.hashed_password = Set(hashed_password);
        }
        if let Some(is_active) = patch.is_active {
            model.is_active = Set(is_active);
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
        let result = User::delete_by_id(id).exec(db).await?;
        ensure_deleted(result.rows_affected, EntityKind::User, id)
    }
}
