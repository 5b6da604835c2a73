//! Mutation semantics: structured payloads instead of thrown errors, no
//! partial writes on rejection, and referential checks at the write path.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal_macros::dec;
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;

use docu_api::cache::{CacheBackend, InMemoryCache};
use docu_api::config::{AppConfig, CacheTtlConfig};
use docu_api::errors::ServiceError;
use docu_api::migrator::Migrator;
use docu_api::schema::{build_schema, ApiSchema};
use docu_api::services::orders::CreateOrderItemInput;
use docu_api::services::products::CreateProductInput;
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

async fn setup() -> (AppState, ApiSchema, Arc<InMemoryCache>) {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    Migrator::up(&db, None).await.expect("migrations");

    let backend = Arc::new(InMemoryCache::new());
    let state = AppState::new(Arc::new(db), test_config(), backend.clone());
    let schema = build_schema(state.clone());
    (state, schema, backend)
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
async fn create_customer_then_order_round_trip() {
    let (_state, schema, _backend) = setup().await;

    let data = execute(
        &schema,
        r#"mutation {
            createCustomer(input: { businessName: "Acme Distribution SL", vatNumber: "B76365789" }) {
                success
                message
                customer { id businessName name countryId }
            }
        }"#,
    )
    .await;
    let payload = &data["createCustomer"];
    assert_eq!(payload["success"].as_bool(), Some(true));
    // name defaults to the business name, country to ES.
    assert_eq!(
        payload["customer"]["name"].as_str(),
        Some("Acme Distribution SL")
    );
    assert_eq!(payload["customer"]["countryId"].as_str(), Some("ES"));
    let customer_id = payload["customer"]["id"].as_i64().expect("customer id");

    let mutation = format!(
        r#"mutation {{
            createOrder(input: {{
                customerId: {},
                totalAmount: "999.99",
                reference: "TEST-ORDER-001"
            }}) {{
                success
                order {{ reference status totalAmount }}
            }}
        }}"#,
        customer_id
    );
    let data = execute(&schema, &mutation).await;
    let order = &data["createOrder"]["order"];
    assert_eq!(data["createOrder"]["success"].as_bool(), Some(true));
    assert_eq!(order["reference"].as_str(), Some("TEST-ORDER-001"));
    assert_eq!(order["status"].as_str(), Some("pending"));
    assert_eq!(order["totalAmount"].as_str(), Some("999.99"));
}

#[tokio::test]
async fn duplicate_vat_number_is_rejected_without_side_effects() {
    let (state, schema, backend) = setup().await;

    let mutation = r#"mutation {
        createCustomer(input: { businessName: "First SL", vatNumber: "B00000001" }) {
            success
            message
        }
    }"#;
    let data = execute(&schema, mutation).await;
    assert_eq!(data["createCustomer"]["success"].as_bool(), Some(true));

    // Warm the customer listing so the failed retry can prove it left the
    // cache alone.
    execute(&schema, "{ customers { id } }").await;
    backend
        .set("customers_100_all", "[]", Duration::from_secs(60))
        .await
        .expect("warm cache");

    let duplicate = r#"mutation {
        createCustomer(input: { businessName: "Second SL", vatNumber: "B00000001" }) {
            success
            message
            customer { id }
        }
    }"#;
    let data = execute(&schema, duplicate).await;
    let payload = &data["createCustomer"];
    assert_eq!(payload["success"].as_bool(), Some(false));
    assert!(
        payload["message"]
            .as_str()
            .is_some_and(|m| m.contains("already exists")),
        "message was: {:?}",
        payload["message"]
    );
    assert!(payload["customer"].is_null());

    let customers = state.customers.list(100, None).await.expect("list");
    assert_eq!(customers.len(), 1);
    assert!(backend
        .get("customers_100_all")
        .await
        .expect("get")
        .is_some());
}

#[tokio::test]
async fn order_for_missing_customer_is_rejected() {
    let (state, schema, backend) = setup().await;

    backend
        .set("orders_50_all_all", "[]", Duration::from_secs(60))
        .await
        .expect("warm cache");

    let mutation = r#"mutation {
        createOrder(input: { customerId: 999, totalAmount: "10.00" }) {
            success
            message
            order { id }
        }
    }"#;
    let data = execute(&schema, mutation).await;
    let payload = &data["createOrder"];
    assert_eq!(payload["success"].as_bool(), Some(false));
    assert!(
        payload["message"]
            .as_str()
            .is_some_and(|m| m.contains("No customer with id 999")),
        "message was: {:?}",
        payload["message"]
    );
    assert!(payload["order"].is_null());

    // Nothing was written and nothing was invalidated.
    let orders = state.orders.list_by_customer(999).await.expect("list");
    assert!(orders.is_empty());
    assert!(backend
        .get("orders_50_all_all")
        .await
        .expect("get")
        .is_some());
}

#[tokio::test]
async fn unknown_order_status_is_rejected() {
    let (state, schema, _backend) = setup().await;

    let customer = state
        .customers
        .create(docu_api::services::customers::CreateCustomerInput {
            business_name: "Status Check SL".to_string(),
            vat_number: "B55555555".to_string(),
            name: None,
            email: None,
            street_name: None,
            postal_code: None,
            city: None,
            province_id: None,
            country_id: None,
            phone: None,
        })
        .await
        .expect("seed customer");

    let mutation = format!(
        r#"mutation {{
            createOrder(input: {{ customerId: {}, totalAmount: "10.00", status: "bogus" }}) {{
                success
                message
            }}
        }}"#,
        customer.id
    );
    let data = execute(&schema, &mutation).await;
    let payload = &data["createOrder"];
    assert_eq!(payload["success"].as_bool(), Some(false));
    assert!(
        payload["message"]
            .as_str()
            .is_some_and(|m| m.contains("Unknown order status")),
        "message was: {:?}",
        payload["message"]
    );
}

#[tokio::test]
async fn order_item_total_must_match_quantity_times_unit_price() {
    let (state, _schema, _backend) = setup().await;

    let customer = state
        .customers
        .create(docu_api::services::customers::CreateCustomerInput {
            business_name: "Items SL".to_string(),
            vat_number: "B66666666".to_string(),
            name: None,
            email: None,
            street_name: None,
            postal_code: None,
            city: None,
            province_id: None,
            country_id: None,
            phone: None,
        })
        .await
        .expect("seed customer");
    let order = state
        .orders
        .create(docu_api::services::orders::CreateOrderInput {
            customer_id: customer.id,
            total_amount: dec!(25.00),
            reference: None,
            status: None,
            notes: None,
        })
        .await
        .expect("seed order");
    state
        .products
        .create(CreateProductInput {
            id: "SKU-001".to_string(),
            reference: Some("WIDGET".to_string()),
            description: None,
            price: dec!(12.50),
            stock: 10,
            active: None,
        })
        .await
        .expect("seed product");

    let bad_total = state
        .orders
        .add_item(CreateOrderItemInput {
            order_id: order.id,
            product_id: "SKU-001".to_string(),
            quantity: 2,
            unit_price: dec!(12.50),
            total_price: dec!(30.00),
        })
        .await;
    assert!(matches!(bad_total, Err(ServiceError::ValidationError(_))));

    let zero_quantity = state
        .orders
        .add_item(CreateOrderItemInput {
            order_id: order.id,
            product_id: "SKU-001".to_string(),
            quantity: 0,
            unit_price: dec!(12.50),
            total_price: dec!(0.00),
        })
        .await;
    assert!(matches!(
        zero_quantity,
        Err(ServiceError::ValidationError(_))
    ));

    let missing_product = state
        .orders
        .add_item(CreateOrderItemInput {
            order_id: order.id,
            product_id: "SKU-MISSING".to_string(),
            quantity: 1,
            unit_price: dec!(5.00),
            total_price: dec!(5.00),
        })
        .await;
    assert!(matches!(
        missing_product,
        Err(ServiceError::InvalidReference(_))
    ));

    let item = state
        .orders
        .add_item(CreateOrderItemInput {
            order_id: order.id,
            product_id: "SKU-001".to_string(),
            quantity: 2,
            unit_price: dec!(12.50),
            total_price: dec!(25.00),
        })
        .await
        .expect("valid item");
    assert_eq!(item.total_price, dec!(25.00));

    let items = state.orders.items(order.id).await.expect("items");
    assert_eq!(items.len(), 1);
}
