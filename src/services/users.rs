use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use validator::Validate;

use super::{unique_violation_as, Page};
use crate::auth::password::{hash_password, verify_password};
use crate::dto::{CreateUserInput, NewUser, UpdateUserInput, UserPatch, UserResponse};
use crate::entities::user;
use crate::errors::{EntityKind, ServiceError};
use crate::repositories::{CrudRepository, UserRepository};

/// Service for API users and their credentials
#[derive(Clone)]
pub struct UserService {
    db: Arc<DatabaseConnection>,
    users: UserRepository,
}

impl UserService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            db,
            users: UserRepository,
        }
    }

    /// Registers a user. The email must be unused; the account starts active.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn create(&self, input: CreateUserInput) -> Result<UserResponse, ServiceError> {
        input.validate()?;
        let db = &*self.db;

        if self.users.get_by_email(db, &input.email).await?.is_some() {
            return Err(ServiceError::already_exists(
                EntityKind::User,
                "email",
                &input.email,
            ));
        }

        let email = input.email;
        let new_user = NewUser {
            email: email.clone(),
            hashed_password: hash_password(&input.password)?,
            is_active: true,
        };
        let user = self.users.create(db, new_user).await.map_err(|e| {
            unique_violation_as(e, || {
                ServiceError::already_exists(EntityKind::User, "email", &email)
            })
        })?;
        info!(user_id = user.id, "user created");
        Ok(user.into())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<UserResponse, ServiceError> {
        Ok(self.users.require(&*self.db, id).await?.into())
    }

    #[instrument(skip(self))]
    pub async fn list(&self, offset: u64, limit: u64) -> Result<Page<UserResponse>, ServiceError> {
        let db = &*self.db;
        let total = self.users.count(db).await?;
        let users = self.users.list(db, offset, limit).await?;
        Ok(Page::new(users, total).map(UserResponse::from))
    }

    #[instrument(skip(self))]
    pub async fn list_active(&self, offset: u64, limit: u64) -> Result<Vec<UserResponse>, ServiceError> {
        let users = self.users.list_active(&*self.db, offset, limit).await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// Partial update. A new password is re-hashed; a new email must be unused.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: i32, patch: UpdateUserInput) -> Result<UserResponse, ServiceError> {
        patch.validate()?;
        let db = &*self.db;
        let existing = self.users.require(db, id).await?;

        if let Some(email) = patch.email.as_deref() {
            if email != existing.email {
                if let Some(other) = self.users.get_by_email(db, email).await? {
                    if other.id != id {
                        return Err(ServiceError::already_exists(
                            EntityKind::User,
                            "email",
                            email,
                        ));
                    }
                }
            }
        }

        let hashed_password = patch.password.as_deref().map(hash_password).transpose()?;
        let email = patch.email.clone();
        let user = self
            .users
            .update(
                db,
                id,
                UserPatch {
                    email: patch.email,
                    hashed_password,
                    is_active: patch.is_active,
                },
            )
            .await
            .map_err(|e| {
                unique_violation_as(e, || {
                    ServiceError::already_exists(
                        EntityKind::User,
                        "email",
                        email.unwrap_or_default(),
                    )
                })
            })?;
        Ok(user.into())
    }

    /// Marks the account inactive. Existing tokens stop working at the next
    /// credential check, not immediately.
    #[instrument(skip(self))]
    pub async fn deactivate(&self, id: i32) -> Result<UserResponse, ServiceError> {
        let user = self
            .users
            .update(
                &*self.db,
                id,
                UserPatch {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await?;
        info!(user_id = id, "user deactivated");
        Ok(user.into())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        self.users.delete(&*self.db, id).await?;
        info!(user_id = id, "user deleted");
        Ok(())
    }

    /// Checks an email/password pair. Unknown email and wrong password are
    /// indistinguishable to the caller.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<user::Model, ServiceError> {
        let Some(user) = self.users.get_by_email(&*self.db, email).await? else {
            warn!("login for unknown email");
            return Err(ServiceError::InvalidCredentials);
        };

        if !verify_password(password, &user.hashed_password)? {
            warn!(user_id = user.id, "login with wrong password");
            return Err(ServiceError::InvalidCredentials);
        }
        if !user.is_active {
            return Err(ServiceError::InactiveUser(user.id));
        }
        Ok(user)
    }
}
