use crate::{
    db::DbPool,
    entities::{
        customer::Entity as CustomerEntity,
        invoice::{self, Entity as InvoiceEntity, InvoiceStatus, Model as InvoiceModel},
    },
    errors::ServiceError,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct CreateInvoiceInput {
    pub customer_id: i32,
    pub amount: Decimal,
    pub reference: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: Option<String>,
}

/// Repository for invoices.
#[derive(Clone)]
pub struct InvoiceService {
    db_pool: Arc<DbPool>,
}

impl InvoiceService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Lists invoices by issue date descending, optionally from a date on.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        limit: u64,
        from_date: Option<DateTime<Utc>>,
    ) -> Result<Vec<InvoiceModel>, ServiceError> {
        let db = &*self.db_pool;
        let mut query = InvoiceEntity::find();

        if let Some(from) = from_date {
            query = query.filter(invoice::Column::Date.gte(from));
        }

        let invoices = query
            .order_by_desc(invoice::Column::Date)
            .limit(limit)
            .all(db)
            .await?;
        Ok(invoices)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<InvoiceModel>, ServiceError> {
        let db = &*self.db_pool;
        let invoice = InvoiceEntity::find_by_id(id).one(db).await?;
        Ok(invoice)
    }

    /// Creates an invoice for an existing customer. The customer's business
    /// name is denormalized onto the row.
    #[instrument(skip(self, input), fields(customer_id = input.customer_id))]
    pub async fn create(&self, input: CreateInvoiceInput) -> Result<InvoiceModel, ServiceError> {
        let db = &*self.db_pool;

        let status = match input.status {
            Some(raw) => InvoiceStatus::from_str(&raw).map_err(|_| {
                ServiceError::ValidationError(format!("Unknown invoice status: {}", raw))
            })?,
            None => InvoiceStatus::Pending,
        };

        let customer = CustomerEntity::find_by_id(input.customer_id).one(db).await?;
        let customer = customer.ok_or_else(|| {
            ServiceError::InvalidReference(format!("No customer with id {}", input.customer_id))
        })?;

        let now = Utc::now();
        let date = input.date.unwrap_or(now);
        let reference = input
            .reference
            .unwrap_or_else(|| format!("INV-{}-{}", input.customer_id, now.timestamp()));

        let active_model = invoice::ActiveModel {
            reference: Set(reference),
            customer_id: Set(input.customer_id),
            customer_name: Set(Some(customer.business_name)),
            amount: Set(input.amount),
            date: Set(date),
            due_date: Set(input.due_date),
            status: Set(status.to_string()),
            created_at: Set(now),
            updated_at: Set(None),
            ..Default::default()
        };

        let model = active_model.insert(db).await?;
        info!(invoice_id = model.id, customer_id = model.customer_id, "Invoice created");
        Ok(model)
    }
}
