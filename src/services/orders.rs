use crate::{
    db::DbPool,
    entities::{
        customer::Entity as CustomerEntity,
        order::{self, Entity as OrderEntity, Model as OrderModel, OrderStatus},
        order_item::{self, Entity as OrderItemEntity, Model as OrderItemModel},
        product::Entity as ProductEntity,
    },
    errors::ServiceError,
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, instrument};

/// Optional filters for order listing.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub customer_id: Option<i32>,
    pub status: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateOrderInput {
    pub customer_id: i32,
    pub total_amount: Decimal,
    pub reference: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateOrderItemInput {
    pub order_id: i32,
    pub product_id: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

/// Repository for orders and their items.
#[derive(Clone)]
pub struct OrderService {
    db_pool: Arc<DbPool>,
}

impl OrderService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Lists orders newest-first, optionally filtered by customer and status.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        filter: &OrderFilter,
        limit: u64,
    ) -> Result<Vec<OrderModel>, ServiceError> {
        let db = &*self.db_pool;
        let mut query = OrderEntity::find();

        if let Some(customer_id) = filter.customer_id {
            query = query.filter(order::Column::CustomerId.eq(customer_id));
        }
        if let Some(status) = &filter.status {
            query = query.filter(order::Column::Status.eq(status.clone()));
        }

        let orders = query
            .order_by_desc(order::Column::CreatedAt)
            .limit(limit)
            .all(db)
            .await?;
        Ok(orders)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<OrderModel>, ServiceError> {
        let db = &*self.db_pool;
        let order = OrderEntity::find_by_id(id).one(db).await?;
        Ok(order)
    }

    /// All orders of one customer, newest-first, no limit.
    #[instrument(skip(self))]
    pub async fn list_by_customer(&self, customer_id: i32) -> Result<Vec<OrderModel>, ServiceError> {
        let db = &*self.db_pool;
        let orders = OrderEntity::find()
            .filter(order::Column::CustomerId.eq(customer_id))
            .order_by_desc(order::Column::CreatedAt)
            .all(db)
            .await?;
        Ok(orders)
    }

    /// Creates an order. The customer must exist (`InvalidReference`
    /// otherwise). A missing reference defaults to
    /// `ORD-<customer_id>-<unix_timestamp>`, a missing status to pending.
    #[instrument(skip(self, input), fields(customer_id = input.customer_id))]
    pub async fn create(&self, input: CreateOrderInput) -> Result<OrderModel, ServiceError> {
        let db = &*self.db_pool;

        let status = match input.status {
            Some(raw) => OrderStatus::from_str(&raw)
                .map_err(|_| ServiceError::ValidationError(format!("Unknown order status: {}", raw)))?,
            None => OrderStatus::Pending,
        };

        let customer = CustomerEntity::find_by_id(input.customer_id).one(db).await?;
        if customer.is_none() {
            return Err(ServiceError::InvalidReference(format!(
                "No customer with id {}",
                input.customer_id
            )));
        }

        let now = Utc::now();
        let reference = input
            .reference
            .unwrap_or_else(|| format!("ORD-{}-{}", input.customer_id, now.timestamp()));

        let active_model = order::ActiveModel {
            reference: Set(reference),
            customer_id: Set(input.customer_id),
            order_date: Set(Some(now)),
            delivery_date: Set(None),
            total_amount: Set(input.total_amount),
            status: Set(status.to_string()),
            notes: Set(input.notes),
            created_at: Set(now),
            updated_at: Set(None),
            ..Default::default()
        };

        let model = active_model.insert(db).await?;
        info!(order_id = model.id, customer_id = model.customer_id, "Order created");
        Ok(model)
    }

    /// Items belonging to an order.
    #[instrument(skip(self))]
    pub async fn items(&self, order_id: i32) -> Result<Vec<OrderItemModel>, ServiceError> {
        let db = &*self.db_pool;
        let items = OrderItemEntity::find()
            .filter(order_item::Column::OrderId.eq(order_id))
            .all(db)
            .await?;
        Ok(items)
    }

    /// Adds a line to an order. The caller-supplied total is not trusted:
    /// total_price must equal quantity * unit_price.
    #[instrument(skip(self, input), fields(order_id = input.order_id, product_id = %input.product_id))]
    pub async fn add_item(&self, input: CreateOrderItemInput) -> Result<OrderItemModel, ServiceError> {
        let db = &*self.db_pool;

        if input.quantity <= 0 {
            return Err(ServiceError::ValidationError(
                "Quantity must be positive".to_string(),
            ));
        }

        let expected = input.unit_price * Decimal::from(input.quantity);
        if input.total_price != expected {
            return Err(ServiceError::ValidationError(format!(
                "total_price {} does not match quantity * unit_price = {}",
                input.total_price, expected
            )));
        }

        let order = OrderEntity::find_by_id(input.order_id).one(db).await?;
        if order.is_none() {
            return Err(ServiceError::InvalidReference(format!(
                "No order with id {}",
                input.order_id
            )));
        }

        let product = ProductEntity::find_by_id(input.product_id.clone()).one(db).await?;
        if product.is_none() {
            return Err(ServiceError::InvalidReference(format!(
                "No product with id {}",
                input.product_id
            )));
        }

        let active_model = order_item::ActiveModel {
            order_id: Set(input.order_id),
            product_id: Set(input.product_id),
            quantity: Set(input.quantity),
            unit_price: Set(input.unit_price),
            total_price: Set(input.total_price),
            ..Default::default()
        };

        let model = active_model.insert(db).await?;
        info!(item_id = model.id, order_id = model.order_id, "Order item added");
        Ok(model)
    }
}
