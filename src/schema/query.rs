use async_graphql::{Context, Object, Result};
use chrono::{DateTime, Utc};
use metrics::counter;
use std::time::Duration;
use tracing::{debug, info};

use crate::cache::keys;
use crate::entities::order;
use crate::errors::ServiceError;
use crate::schema::types::{
    CacheStats, Customer, Invoice, Notice, Order, Product,
};
use crate::services::orders::OrderFilter;
use crate::AppState;

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Customers, optionally filtered by a free-text search.
    async fn customers(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = 100)] limit: u64,
        search: Option<String>,
    ) -> Result<Vec<Customer>> {
        let state = ctx.data_unchecked::<AppState>();
        let customers = state
            .customers
            .list(limit, search.as_deref())
            .await
            .map_err(ServiceError::into_graphql)?;
        Ok(customers.into_iter().map(Customer::from).collect())
    }

    async fn customer(&self, ctx: &Context<'_>, customer_id: i32) -> Result<Option<Customer>> {
        let state = ctx.data_unchecked::<AppState>();
        let customer = state
            .customers
            .get(customer_id)
            .await
            .map_err(ServiceError::into_graphql)?;
        Ok(customer.map(Customer::from))
    }

    /// Active products, optionally filtered by a free-text search.
    async fn products(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = 100)] limit: u64,
        search: Option<String>,
    ) -> Result<Vec<Product>> {
        let state = ctx.data_unchecked::<AppState>();
        let products = state
            .products
            .list(limit, search.as_deref())
            .await
            .map_err(ServiceError::into_graphql)?;
        Ok(products.into_iter().map(Product::from).collect())
    }

    async fn product(&self, ctx: &Context<'_>, product_id: String) -> Result<Option<Product>> {
        let state = ctx.data_unchecked::<AppState>();
        let product = state
            .products
            .get(&product_id)
            .await
            .map_err(ServiceError::into_graphql)?;
        Ok(product.map(Product::from))
    }

    /// Orders, newest first. This is the cached read path: results are served
    /// from the cache when a matching entry exists, otherwise fetched from
    /// the repository and cached for the configured TTL. Empty results are
    /// never cached so transient absence cannot stick.
    async fn orders(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = 50)] limit: u64,
        customer_id: Option<i32>,
        status: Option<String>,
    ) -> Result<Vec<Order>> {
        let state = ctx.data_unchecked::<AppState>();
        let key = keys::order_list_key(limit, customer_id, status.as_deref());

        if let Some(cached) = state.cache.get_json::<Vec<order::Model>>(&key).await {
            counter!("docu_api_cache_hits_total", 1, "query" => "orders");
            info!(key = %key, count = cached.len(), "Orders served from cache");
            return Ok(cached.into_iter().map(Order::from).collect());
        }
        counter!("docu_api_cache_misses_total", 1, "query" => "orders");

        let filter = OrderFilter {
            customer_id,
            status,
        };
        let orders = state
            .orders
            .list(&filter, limit)
            .await
            .map_err(ServiceError::into_graphql)?;

        if !orders.is_empty() {
            let ttl = Duration::from_secs(state.config.cache_ttl.orders_secs);
            if state.cache.set_json(&key, &orders, ttl).await {
                info!(key = %key, count = orders.len(), "Orders stored in cache");
            }
        } else {
            debug!(key = %key, "Empty order listing not cached");
        }

        Ok(orders.into_iter().map(Order::from).collect())
    }

    async fn order(&self, ctx: &Context<'_>, order_id: i32) -> Result<Option<Order>> {
        let state = ctx.data_unchecked::<AppState>();
        let order = state
            .orders
            .get(order_id)
            .await
            .map_err(ServiceError::into_graphql)?;
        Ok(order.map(Order::from))
    }

    /// All orders of one customer, newest first, uncached.
    async fn orders_by_customer(
        &self,
        ctx: &Context<'_>,
        customer_id: i32,
    ) -> Result<Vec<Order>> {
        let state = ctx.data_unchecked::<AppState>();
        let orders = state
            .orders
            .list_by_customer(customer_id)
            .await
            .map_err(ServiceError::into_graphql)?;
        Ok(orders.into_iter().map(Order::from).collect())
    }

    /// Invoices by issue date descending.
    async fn invoices(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = 50)] limit: u64,
        from_date: Option<DateTime<Utc>>,
    ) -> Result<Vec<Invoice>> {
        let state = ctx.data_unchecked::<AppState>();
        let invoices = state
            .invoices
            .list(limit, from_date)
            .await
            .map_err(ServiceError::into_graphql)?;
        Ok(invoices.into_iter().map(Invoice::from).collect())
    }

    async fn invoice(&self, ctx: &Context<'_>, invoice_id: i32) -> Result<Option<Invoice>> {
        let state = ctx.data_unchecked::<AppState>();
        let invoice = state
            .invoices
            .get(invoice_id)
            .await
            .map_err(ServiceError::into_graphql)?;
        Ok(invoice.map(Invoice::from))
    }

    /// Notices, newest first, optionally filtered by status and priority.
    async fn notices(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = 50)] limit: u64,
        status: Option<String>,
        priority: Option<String>,
    ) -> Result<Vec<Notice>> {
        let state = ctx.data_unchecked::<AppState>();
        let notices = state
            .notices
            .list(limit, status.as_deref(), priority.as_deref())
            .await
            .map_err(ServiceError::into_graphql)?;
        Ok(notices.into_iter().map(Notice::from).collect())
    }

    async fn notice(&self, ctx: &Context<'_>, notice_id: i32) -> Result<Option<Notice>> {
        let state = ctx.data_unchecked::<AppState>();
        let notice = state
            .notices
            .get(notice_id)
            .await
            .map_err(ServiceError::into_graphql)?;
        Ok(notice.map(Notice::from))
    }

    /// Cache store statistics.
    async fn cache_stats(&self, ctx: &Context<'_>) -> CacheStats {
        let state = ctx.data_unchecked::<AppState>();
        state.cache.stats().await.into()
    }
}
