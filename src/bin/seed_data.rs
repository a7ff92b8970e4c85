//! Seed data script - populates the database with a small showroom
//!
//! Run with: cargo run --bin seed-data
//!
//! Goes through the services, so the same uniqueness rules apply; running it
//! twice reports the conflicts and leaves the data as it was.

use std::sync::Arc;
use tracing::{info, warn};

use carshop_api::{
    config, db,
    dto::{Address, CreateBuyerInput, CreateCarInput, CreateSaleInput, CreateSellerInput, CreateStockInput},
    errors::ServiceError,
    handlers::AppServices,
};

fn report<T>(what: &str, result: Result<T, ServiceError>) -> Option<T> {
    match result {
        Ok(value) => {
            info!("  created {}", what);
            Some(value)
        }
        Err(ServiceError::AlreadyExists { .. }) => {
            warn!("  {} already present, skipping", what);
            None
        }
        Err(err) => {
            warn!("  {} failed: {}", what, err);
            None
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = config::load_config()?;
    config::init_tracing(cfg.log_level(), cfg.log_json);

    info!("=== Carshop seed data ===");
    let pool = db::establish_connection_from_app_config(&cfg).await?;
    db::run_migrations(&pool).await?;
    let services = AppServices::new(Arc::new(pool), &cfg);

    let cars = [("Ram 3", 2020, "Dodge", 10), ("Uno", 2012, "Fiat", 3), ("Civic", 2018, "Honda", 0)];
    let mut first_car = None;
    for (name, year, brand, quantity) in cars {
        let created = services
            .cars
            .create(CreateCarInput {
                name: name.to_string(),
                year,
                brand: brand.to_string(),
            })
            .await;
        if let Some(car) = report(&format!("car {} {} {}", brand, name, year), created) {
            first_car.get_or_insert(car.id);
            report(
                &format!("stock for car {}", car.id),
                services
                    .stocks
                    .create(CreateStockInput {
                        car_id: car.id,
                        quantity,
                    })
                    .await,
            );
        }
    }

    let buyer = report(
        "buyer Bruce Lee",
        services
            .buyers
            .create(CreateBuyerInput {
                name: "Bruce Lee".to_string(),
                phone: "11987654321".to_string(),
                address: Address {
                    cep: "01001000".to_string(),
                    public_place: "Praça da Sé".to_string(),
                    city: "São Paulo".to_string(),
                    district: "Sé".to_string(),
                    state: "SP".to_string(),
                },
            })
            .await,
    );

    let seller = report(
        "seller João da Silva",
        services
            .sellers
            .create(CreateSellerInput {
                name: "João da Silva".to_string(),
                cpf: "69285717640".to_string(),
                phone: "11912345678".to_string(),
            })
            .await,
    );

    if let (Some(car_id), Some(buyer), Some(seller)) = (first_car, buyer, seller) {
        report(
            "first sale",
            services
                .sales
                .create_sale(CreateSaleInput {
                    car_id,
                    buyer_id: buyer.id,
                    seller_id: seller.id,
                })
                .await,
        );
    }

    info!("Seeding complete");
    Ok(())
}
