//! GraphQL object and input types.
//!
//! These are explicit DTOs converted from the sea-orm models; nothing is
//! lazily fetched through relationships. Related rows are exposed through
//! resolver methods that make the extra query visible.

use crate::entities::{customer, invoice, notice, order, order_item, product};
use crate::errors::ServiceError;
use async_graphql::{ComplexObject, Context, InputObject, Result, SimpleObject};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::AppState;

#[derive(Debug, Clone, SimpleObject)]
pub struct Customer {
    pub id: i32,
    pub business_name: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub vat_number: String,
    pub street_name: Option<String>,
    pub postal_code: Option<i32>,
    pub city: Option<String>,
    pub province_id: Option<i32>,
    pub country_id: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<customer::Model> for Customer {
    fn from(m: customer::Model) -> Self {
        Self {
            id: m.id,
            business_name: m.business_name,
            name: m.name,
            email: m.email,
            vat_number: m.vat_number,
            street_name: m.street_name,
            postal_code: m.postal_code,
            city: m.city,
            province_id: m.province_id,
            country_id: m.country_id,
            phone: m.phone,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
pub struct Product {
    pub id: String,
    pub reference: Option<String>,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<product::Model> for Product {
    fn from(m: product::Model) -> Self {
        Self {
            id: m.id,
            reference: m.reference,
            description: m.description,
            price: m.price,
            stock: m.stock,
            active: m.active,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Order {
    pub id: i32,
    pub reference: String,
    pub customer_id: i32,
    pub order_date: Option<DateTime<Utc>>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub total_amount: Decimal,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[ComplexObject]
impl Order {
    /// Line items of this order, fetched explicitly.
    async fn items(&self, ctx: &Context<'_>) -> Result<Vec<OrderItem>> {
        let state = ctx.data_unchecked::<AppState>();
        let items = state
            .orders
            .items(self.id)
            .await
            .map_err(ServiceError::into_graphql)?;
        Ok(items.into_iter().map(OrderItem::from).collect())
    }
}

impl From<order::Model> for Order {
    fn from(m: order::Model) -> Self {
        Self {
            id: m.id,
            reference: m.reference,
            customer_id: m.customer_id,
            order_date: m.order_date,
            delivery_date: m.delivery_date,
            total_amount: m.total_amount,
            status: m.status,
            notes: m.notes,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    pub product_id: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

impl From<order_item::Model> for OrderItem {
    fn from(m: order_item::Model) -> Self {
        Self {
            id: m.id,
            order_id: m.order_id,
            product_id: m.product_id,
            quantity: m.quantity,
            unit_price: m.unit_price,
            total_price: m.total_price,
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
pub struct Invoice {
    pub id: i32,
    pub reference: String,
    pub customer_id: i32,
    pub customer_name: Option<String>,
    pub amount: Decimal,
    pub date: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<invoice::Model> for Invoice {
    fn from(m: invoice::Model) -> Self {
        Self {
            id: m.id,
            reference: m.reference,
            customer_id: m.customer_id,
            customer_name: m.customer_name,
            amount: m.amount,
            date: m.date,
            due_date: m.due_date,
            status: m.status,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
pub struct Notice {
    pub id: i32,
    pub customer_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub priority: String,
    pub status: String,
    pub assigned_to: Option<String>,
    pub created_date: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    pub resolution: Option<String>,
    pub resolved_date: Option<DateTime<Utc>>,
}

impl From<notice::Model> for Notice {
    fn from(m: notice::Model) -> Self {
        Self {
            id: m.id,
            customer_id: m.customer_id,
            title: m.title,
            description: m.description,
            priority: m.priority,
            status: m.status,
            assigned_to: m.assigned_to,
            created_date: m.created_date,
            due_date: m.due_date,
            resolution: m.resolution,
            resolved_date: m.resolved_date,
        }
    }
}

/// Cache store observability read.
#[derive(Debug, Clone, SimpleObject)]
pub struct CacheStats {
    pub store_type: String,
    pub connected: bool,
    pub keys: u64,
    pub memory_usage: String,
    pub uptime_secs: u64,
}

impl From<crate::cache::CacheStats> for CacheStats {
    fn from(s: crate::cache::CacheStats) -> Self {
        Self {
            store_type: s.store_type,
            connected: s.connected,
            keys: s.keys,
            memory_usage: s.memory_usage,
            uptime_secs: s.uptime_secs,
        }
    }
}

/// Typed argument record for createCustomer.
#[derive(Debug, Clone, InputObject)]
pub struct CreateCustomerInput {
    pub business_name: String,
    pub vat_number: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub street_name: Option<String>,
    pub postal_code: Option<i32>,
    pub city: Option<String>,
    pub province_id: Option<i32>,
    pub country_id: Option<String>,
    pub phone: Option<String>,
}

impl From<CreateCustomerInput> for crate::services::customers::CreateCustomerInput {
    fn from(input: CreateCustomerInput) -> Self {
        Self {
            business_name: input.business_name,
            vat_number: input.vat_number,
            name: input.name,
            email: input.email,
            street_name: input.street_name,
            postal_code: input.postal_code,
            city: input.city,
            province_id: input.province_id,
            country_id: input.country_id,
            phone: input.phone,
        }
    }
}

/// Typed argument record for createOrder.
#[derive(Debug, Clone, InputObject)]
pub struct CreateOrderInput {
    pub customer_id: i32,
    pub total_amount: Decimal,
    pub reference: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

impl From<CreateOrderInput> for crate::services::orders::CreateOrderInput {
    fn from(input: CreateOrderInput) -> Self {
        Self {
            customer_id: input.customer_id,
            total_amount: input.total_amount,
            reference: input.reference,
            status: input.status,
            notes: input.notes,
        }
    }
}

/// Mutation envelope: failures come back as success=false with a message
/// instead of a thrown error.
#[derive(Debug, Clone, SimpleObject)]
pub struct CreateCustomerPayload {
    pub success: bool,
    pub message: String,
    pub customer: Option<Customer>,
}

#[derive(Debug, Clone, SimpleObject)]
pub struct CreateOrderPayload {
    pub success: bool,
    pub message: String,
    pub order: Option<Order>,
}
