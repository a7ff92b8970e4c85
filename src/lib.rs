//! Carshop API Library
//!
//! Back office for a car dealership: cars, their stock, buyers, sellers,
//! and the transactional recording of sales.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod auth;
pub mod config;
pub mod db;
pub mod dto;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod health;
pub mod middleware_helpers;
pub mod migrator;
pub mod openapi;
pub mod repositories;
pub mod services;
pub mod tracing;

use axum::{routing::get, Router};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;

use crate::auth::{AuthConfig, AuthRouterExt, AuthService};
use crate::handlers::common::{ListParams, Window};

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub services: handlers::AppServices,
    pub auth: Arc<AuthService>,
}

impl AppState {
    /// Wires every service over `db`.
    pub fn new(db: Arc<DatabaseConnection>, config: config::AppConfig) -> Self {
        let services = handlers::AppServices::new(db.clone(), &config);
        let auth = Arc::new(AuthService::new(AuthConfig::from(&config)));
        Self {
            db,
            config,
            services,
            auth,
        }
    }

    /// Resolves list parameters against the configured page sizes.
    pub fn list_window(&self, params: &ListParams) -> Window {
        params.window(self.config.default_page_size, self.config.max_page_size)
    }
}

/// Entity routes, mounted under `/api/v1`.
///
/// Everything except user registration sits behind the bearer-token layer
/// unless `require_auth` is off.
pub fn api_v1_routes(state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .nest("/cars", handlers::cars::car_routes())
        .nest("/buyers", handlers::buyers::buyer_routes())
        .nest("/sellers", handlers::sellers::seller_routes())
        .nest("/stocks", handlers::stocks::stock_routes())
        .nest("/sales", handlers::sales::sale_routes())
        .nest("/users", handlers::users::user_routes());

    let protected = if state.config.require_auth {
        protected.with_auth(state.auth.clone())
    } else {
        protected
    };

    let public = Router::new().nest("/users", handlers::users::public_user_routes());

    protected.merge(public)
}

/// The complete application: API, auth, health, docs, and the shared
/// request-id, tracing, and compression layers. CORS is left to the caller.
pub fn app_router(state: AppState) -> Router {
    let health = health::health_routes(state.db.clone(), &state.config.environment);

    Router::<AppState>::new()
        .route("/", get(|| async { "carshop-api up" }))
        .nest("/api/v1", api_v1_routes(&state))
        .nest("/auth", handlers::auth::auth_routes(&state))
        .with_state(state)
        .nest("/health", health)
        .merge(openapi::swagger_ui())
        // HTTP tracing layer for consistent request/response telemetry
        .layer(tracing::configure_http_tracing())
        .layer(CompressionLayer::new())
        // Ensure every request carries a request id for traceability
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id::request_id_middleware,
        ))
}
