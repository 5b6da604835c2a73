//! End-to-end behavior of the cached order listing: read-through fills,
//! cache hits, targeted invalidation on writes, and graceful degradation
//! when the store is down.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal_macros::dec;
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;

use docu_api::cache::{CacheBackend, CacheError, CacheStats, InMemoryCache};
use docu_api::config::{AppConfig, CacheTtlConfig};
use docu_api::migrator::Migrator;
use docu_api::schema::{build_schema, ApiSchema};
use docu_api::services::customers::CreateCustomerInput;
use docu_api::services::orders::CreateOrderInput;
use docu_api::AppState;

fn test_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".to_string(),
        redis_url: "redis://localhost:6379".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: "test".to_string(),
        log_level: "debug".to_string(),
        log_json: false,
        auto_migrate: true,
        cors_allowed_origins: None,
        cache_ttl: CacheTtlConfig::default(),
    }
}

async fn setup(backend: Arc<dyn CacheBackend>) -> (AppState, ApiSchema) {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    Migrator::up(&db, None).await.expect("migrations");

    let state = AppState::new(Arc::new(db), test_config(), backend);
    let schema = build_schema(state.clone());
    (state, schema)
}

fn customer_input(vat_number: &str) -> CreateCustomerInput {
    CreateCustomerInput {
        business_name: "Acme Distribution SL".to_string(),
        vat_number: vat_number.to_string(),
        name: None,
        email: Some("billing@acme.example".to_string()),
        street_name: None,
        postal_code: None,
        city: None,
        province_id: None,
        country_id: None,
        phone: None,
    }
}

fn order_input(customer_id: i32) -> CreateOrderInput {
    CreateOrderInput {
        customer_id,
        total_amount: dec!(120.50),
        reference: None,
        status: None,
        notes: None,
    }
}

async fn execute(schema: &ApiSchema, query: &str) -> serde_json::Value {
    let response = schema.execute(query).await;
    assert!(
        response.errors.is_empty(),
        "unexpected GraphQL errors: {:?}",
        response.errors
    );
    response.data.into_json().expect("response data as JSON")
}

#[tokio::test]
async fn second_read_is_served_from_cache() {
    let backend = Arc::new(InMemoryCache::new());
    let (state, schema) = setup(backend).await;

    let customer = state
        .customers
        .create(customer_input("B11111111"))
        .await
        .expect("seed customer");
    state
        .orders
        .create(order_input(customer.id))
        .await
        .expect("seed order");

    let data = execute(&schema, "{ orders { id } }").await;
    assert_eq!(data["orders"].as_array().map(Vec::len), Some(1));

    // A row inserted behind the cache's back must NOT show up: the second
    // read has to come from the cached entry.
    state
        .orders
        .create(order_input(customer.id))
        .await
        .expect("second order");

    let data = execute(&schema, "{ orders { id } }").await;
    assert_eq!(data["orders"].as_array().map(Vec::len), Some(1));

    // A different limit is a different key, so it misses and sees both rows.
    let data = execute(&schema, "{ orders(limit: 10) { id } }").await;
    assert_eq!(data["orders"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn empty_listing_is_never_cached() {
    let backend = Arc::new(InMemoryCache::new());
    let (state, schema) = setup(backend.clone()).await;

    let data = execute(&schema, "{ orders { id } }").await;
    assert_eq!(data["orders"].as_array().map(Vec::len), Some(0));
    assert_eq!(
        backend.get("orders_50_all_all").await.expect("cache get"),
        None
    );

    let customer = state
        .customers
        .create(customer_input("B22222222"))
        .await
        .expect("seed customer");
    state
        .orders
        .create(order_input(customer.id))
        .await
        .expect("seed order");

    // Because the empty result was not cached, the new row is visible
    // immediately.
    let data = execute(&schema, "{ orders { id } }").await;
    assert_eq!(data["orders"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn create_order_invalidates_default_and_customer_listings() {
    let backend = Arc::new(InMemoryCache::new());
    let (state, schema) = setup(backend.clone()).await;

    let customer = state
        .customers
        .create(customer_input("B33333333"))
        .await
        .expect("seed customer");
    state
        .orders
        .create(order_input(customer.id))
        .await
        .expect("seed order");

    // Warm the unfiltered, per-customer and status-filtered listings.
    execute(&schema, "{ orders { id } }").await;
    execute(
        &schema,
        &format!("{{ orders(customerId: {}) {{ id }} }}", customer.id),
    )
    .await;
    execute(&schema, "{ orders(status: \"pending\") { id } }").await;

    let all_key = "orders_50_all_all".to_string();
    let customer_key = format!("orders_50_{}_all", customer.id);
    let status_key = "orders_50_all_pending".to_string();
    assert!(backend.get(&all_key).await.expect("get").is_some());
    assert!(backend.get(&customer_key).await.expect("get").is_some());
    assert!(backend.get(&status_key).await.expect("get").is_some());

    let mutation = format!(
        "mutation {{ createOrder(input: {{ customerId: {}, totalAmount: \"45.00\" }}) {{ success }} }}",
        customer.id
    );
    let data = execute(&schema, &mutation).await;
    assert_eq!(data["createOrder"]["success"].as_bool(), Some(true));

    // The two default listings are gone; the status-filtered one is left to
    // expire via TTL.
    assert!(backend.get(&all_key).await.expect("get").is_none());
    assert!(backend.get(&customer_key).await.expect("get").is_none());
    assert!(backend.get(&status_key).await.expect("get").is_some());

    let data = execute(&schema, "{ orders { id } }").await;
    assert_eq!(data["orders"].as_array().map(Vec::len), Some(2));
}

/// Backend that fails every operation, standing in for a Redis outage.
struct FailingCache;

#[async_trait::async_trait]
impl CacheBackend for FailingCache {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Err(CacheError::Unavailable)
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<(), CacheError> {
        Err(CacheError::Unavailable)
    }

    async fn delete(&self, _key: &str) -> Result<(), CacheError> {
        Err(CacheError::Unavailable)
    }

    async fn stats(&self) -> CacheStats {
        CacheStats {
            store_type: "Failing".to_string(),
            connected: false,
            keys: 0,
            memory_usage: "n/a".to_string(),
            uptime_secs: 0,
        }
    }
}

#[tokio::test]
async fn broken_cache_never_fails_a_request() {
    let (state, schema) = setup(Arc::new(FailingCache)).await;

    let customer = state
        .customers
        .create(customer_input("B44444444"))
        .await
        .expect("seed customer");
    state
        .orders
        .create(order_input(customer.id))
        .await
        .expect("seed order");

    // Every read misses and every write-side invalidation fails, but the
    // request outcomes are identical to the healthy-cache case.
    for _ in 0..2 {
        let data = execute(&schema, "{ orders { id } }").await;
        assert_eq!(data["orders"].as_array().map(Vec::len), Some(1));
    }

    let mutation = format!(
        "mutation {{ createOrder(input: {{ customerId: {}, totalAmount: \"10.00\" }}) {{ success }} }}",
        customer.id
    );
    let data = execute(&schema, &mutation).await;
    assert_eq!(data["createOrder"]["success"].as_bool(), Some(true));

    let data = execute(&schema, "{ cacheStats { connected storeType } }").await;
    assert_eq!(data["cacheStats"]["connected"].as_bool(), Some(false));
}
