//! docu-api: GraphQL gateway over a relational catalogue of customers,
//! products, orders, invoices and notices, with a Redis read-through cache
//! in front of the hot order listings.

use std::sync::Arc;

use axum::{
    response::Json,
    routing::get,
    Router,
};
use serde_json::json;

pub mod cache;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod migrator;
pub mod schema;
pub mod services;

use cache::{CacheBackend, CacheManager};
use config::AppConfig;
use db::DbPool;
use services::{
    CustomerService, InvoiceService, NoticeService, OrderService, ProductService,
};

/// Shared application state: the connection pool, the cache facade and one
/// repository per entity. Cloning is cheap, everything inside is an Arc or
/// a small value.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbPool>,
    pub config: AppConfig,
    pub cache: CacheManager,
    pub customers: CustomerService,
    pub products: ProductService,
    pub orders: OrderService,
    pub invoices: InvoiceService,
    pub notices: NoticeService,
}

impl AppState {
    pub fn new(db: Arc<DbPool>, config: AppConfig, backend: Arc<dyn CacheBackend>) -> Self {
        Self {
            customers: CustomerService::new(db.clone()),
            products: ProductService::new(db.clone()),
            orders: OrderService::new(db.clone()),
            invoices: InvoiceService::new(db.clone()),
            notices: NoticeService::new(db.clone()),
            cache: CacheManager::new(backend),
            db,
            config,
        }
    }
}

/// Assembles the HTTP surface: the GraphQL endpoint plus the operational
/// endpoints. Middleware (CORS, tracing) is layered in `main`.
pub fn create_router(state: AppState) -> Router {
    let graphql = schema::build_schema(state.clone());

    let graphql_routes = Router::new()
        .route(
            "/graphql",
            get(handlers::graphql::graphql_playground).post(handlers::graphql::graphql_handler),
        )
        .with_state(graphql);

    let ops_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/health/ready", get(handlers::health::readiness_check))
        .route("/stats", get(handlers::health::cache_stats))
        .with_state(state);

    Router::new()
        .route("/", get(root))
        .merge(graphql_routes)
        .merge(ops_routes)
}

/// Service banner.
async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "service": "docu-api",
        "version": env!("CARGO_PKG_VERSION"),
        "graphql": "/graphql",
        "health": "/health",
        "stats": "/stats",
    }))
}
