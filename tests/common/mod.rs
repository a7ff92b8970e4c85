#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request},
    Router,
};
use carshop_api::{
    app_router,
    config::AppConfig,
    db,
    dto::{
        Address, BuyerResponse, CarResponse, CreateBuyerInput, CreateCarInput, CreateSellerInput,
        CreateStockInput, CreateUserInput, SellerResponse, StockResponse,
    },
    AppState,
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test_secret_key_for_testing_purposes_only_32chars";
pub const ADMIN_EMAIL: &str = "admin@carshop.test";
pub const ADMIN_PASSWORD: &str = "correct-horse-battery";

/// Application harness over a throwaway SQLite file.
///
/// The pool holds a single connection, so every statement of a sale runs on
/// the transaction and concurrent sales queue for it.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    token: String,
    _dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Builds the app after letting `adjust` tweak the test configuration.
    pub async fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let db_path = dir.path().join("carshop_test.db");

        let mut cfg = AppConfig::new(
            format!("sqlite://{}?mode=rwc", db_path.display()),
            TEST_SECRET.to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;
        adjust(&mut cfg);

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let state = AppState::new(Arc::new(pool), cfg);
        let router = app_router(state.clone());

        state
            .services
            .users
            .create(CreateUserInput {
                email: ADMIN_EMAIL.to_string(),
                password: ADMIN_PASSWORD.to_string(),
            })
            .await
            .expect("failed to create admin user");
        let admin = state
            .services
            .users
            .authenticate(ADMIN_EMAIL, ADMIN_PASSWORD)
            .await
            .expect("admin credentials rejected");
        let token = state
            .auth
            .generate_token(&admin)
            .expect("failed to mint token")
            .access_token;

        Self {
            router,
            state,
            token,
            _dir: dir,
        }
    }

    /// Bearer token for the admin user.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Send a request against the router with an optional bearer token.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(tok) = token {
            builder = builder.header("authorization", format!("Bearer {}", tok));
        }

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Convenience helper for authenticated JSON requests.
    pub async fn request_authenticated(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> axum::response::Response {
        self.request(method, uri, body, Some(self.token())).await
    }

    pub async fn seed_car(&self, name: &str, year: i32, brand: &str) -> CarResponse {
        self.state
            .services
            .cars
            .create(CreateCarInput {
                name: name.to_string(),
                year,
                brand: brand.to_string(),
            })
            .await
            .expect("failed to seed car")
    }

    pub async fn seed_stock(&self, car_id: i32, quantity: i32) -> StockResponse {
        self.state
            .services
            .stocks
            .create(CreateStockInput { car_id, quantity })
            .await
            .expect("failed to seed stock")
    }

    pub async fn seed_buyer(&self, name: &str, phone: &str) -> BuyerResponse {
        self.state
            .services
            .buyers
            .create(CreateBuyerInput {
                name: name.to_string(),
                phone: phone.to_string(),
                address: test_address(),
            })
            .await
            .expect("failed to seed buyer")
    }

    pub async fn seed_seller(&self, name: &str, cpf: &str) -> SellerResponse {
        self.state
            .services
            .sellers
            .create(CreateSellerInput {
                name: name.to_string(),
                cpf: cpf.to_string(),
                phone: "1299871234".to_string(),
            })
            .await
            .expect("failed to seed seller")
    }

    /// Car with stock, a buyer, and a seller; returns their ids.
    pub async fn seed_showroom(&self, quantity: i32) -> (i32, i32, i32) {
        let car = self.seed_car("Galardo", 1999, "lamborghini").await;
        self.seed_stock(car.id, quantity).await;
        let buyer = self.seed_buyer("Bruce Lee", "12996651234").await;
        let seller = self.seed_seller("João da Silva", "69285717640").await;
        (car.id, buyer.id, seller.id)
    }

    pub async fn stock_quantity(&self, car_id: i32) -> i32 {
        self.state
            .services
            .stocks
            .get_by_car(car_id)
            .await
            .expect("stock missing")
            .quantity
    }
}

pub fn test_address() -> Address {
    Address {
        cep: "73770-000".to_string(),
        public_place: "Banbusal".to_string(),
        city: "Alto Paraiso de Goias".to_string(),
        district: "Cidade Baixa".to_string(),
        state: "Goias".to_string(),
    }
}

pub async fn read_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).expect("response body is not JSON")
}
