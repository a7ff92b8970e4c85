use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

use super::{unique_violation_as, Page};
use crate::dto::{CarResponse, CreateCarInput, UpdateCarInput};
use crate::errors::{EntityKind, ServiceError};
use crate::repositories::{CarRepository, CrudRepository};

const IDENTITY_FIELD: &str = "name, year, brand";

fn identity_value(name: &str, year: i32, brand: &str) -> String {
    format!("{}, {}, {}", name, year, brand)
}

/// Service for managing cars
#[derive(Clone)]
pub struct CarService {
    db: Arc<DatabaseConnection>,
    cars: CarRepository,
}

impl CarService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            db,
            cars: CarRepository,
        }
    }

    /// Creates a car; the (name, year, brand) triple must be new.
    #[instrument(skip(self))]
    pub async fn create(&self, input: CreateCarInput) -> Result<CarResponse, ServiceError> {
        input.validate()?;
        let db = &*self.db;

        let identity = identity_value(&input.name, input.year, &input.brand);
        if self
            .cars
            .get_by_identity(db, &input.name, input.year, &input.brand)
            .await?
            .is_some()
        {
            return Err(ServiceError::already_exists(
                EntityKind::Car,
                IDENTITY_FIELD,
                identity,
            ));
        }

        let car = self.cars.create(db, input).await.map_err(|e| {
            unique_violation_as(e, || {
                ServiceError::already_exists(EntityKind::Car, IDENTITY_FIELD, identity.clone())
            })
        })?;
        info!(car_id = car.id, "car created");
        Ok(car.into())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<CarResponse, ServiceError> {
        Ok(self.cars.require(&*self.db, id).await?.into())
    }

    #[instrument(skip(self))]
    pub async fn list(&self, offset: u64, limit: u64) -> Result<Page<CarResponse>, ServiceError> {
        let db = &*self.db;
        let total = self.cars.count(db).await?;
        let cars = self.cars.list(db, offset, limit).await?;
        Ok(Page::new(cars, total).map(CarResponse::from))
    }

    /// Applies a partial update, re-checking the triple when any part of it changes.
    #[instrument(skip(self))]
    pub async fn update(&self, id: i32, patch: UpdateCarInput) -> Result<CarResponse, ServiceError> {
        patch.validate()?;
        let db = &*self.db;
        let existing = self.cars.require(db, id).await?;

        let name = patch.name.as_deref().unwrap_or(&existing.name);
        let year = patch.year.unwrap_or(existing.year);
        let brand = patch.brand.as_deref().unwrap_or(&existing.brand);
        let identity = identity_value(name, year, brand);

        if (name, year, brand) != (existing.name.as_str(), existing.year, existing.brand.as_str()) {
            if let Some(other) = self.cars.get_by_identity(db, name, year, brand).await? {
                if other.id != id {
                    return Err(ServiceError::already_exists(
                        EntityKind::Car,
                        IDENTITY_FIELD,
                        identity,
                    ));
                }
            }
        }

        let car = self.cars.update(db, id, patch).await.map_err(|e| {
            unique_violation_as(e, || {
                ServiceError::already_exists(EntityKind::Car, IDENTITY_FIELD, identity.clone())
            })
        })?;
        Ok(car.into())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        self.cars.delete(&*self.db, id).await?;
        info!(car_id = id, "car deleted");
        Ok(())
    }
}
