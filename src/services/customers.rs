use crate::{
    db::DbPool,
    entities::customer::{self, Entity as CustomerEntity, Model as CustomerModel},
    errors::ServiceError,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QuerySelect, Set,
};
use std::sync::Arc;
use tracing::{info, instrument};

/// Fields accepted when creating a customer. `business_name` and `vat_number`
/// are required; the rest default sensibly.
#[derive(Debug, Clone)]
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

/// Repository for customers. Cache-agnostic: invalidation is the gateway's
/// concern.
#[derive(Clone)]
pub struct CustomerService {
    db_pool: Arc<DbPool>,
}

impl CustomerService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Lists customers, optionally filtered by a free-text search over
    /// business name, VAT number and email.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        limit: u64,
        search: Option<&str>,
    ) -> Result<Vec<CustomerModel>, ServiceError> {
        let db = &*self.db_pool;
        let mut query = CustomerEntity::find();

        if let Some(term) = search.filter(|t| !t.trim().is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(customer::Column::BusinessName.contains(term))
                    .add(customer::Column::VatNumber.contains(term))
                    .add(customer::Column::Email.contains(term)),
            );
        }

        let customers = query.limit(limit).all(db).await?;
        Ok(customers)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<CustomerModel>, ServiceError> {
        let db = &*self.db_pool;
        let customer = CustomerEntity::find_by_id(id).one(db).await?;
        Ok(customer)
    }

    /// Returns true if a customer with the given id exists.
    pub async fn exists(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(self.get(id).await?.is_some())
    }

    /// Creates a customer. Fails with `Conflict` when the VAT number is
    /// already registered; no state is mutated in that case.
    #[instrument(skip(self, input), fields(vat_number = %input.vat_number))]
    pub async fn create(&self, input: CreateCustomerInput) -> Result<CustomerModel, ServiceError> {
        let db = &*self.db_pool;

        let existing = CustomerEntity::find()
            .filter(customer::Column::VatNumber.eq(input.vat_number.clone()))
            .one(db)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::Conflict(format!(
                "A customer with VAT number {} already exists",
                input.vat_number
            )));
        }

        let now = Utc::now();
        let name = input.name.or_else(|| Some(input.business_name.clone()));
        let active_model = customer::ActiveModel {
            business_name: Set(input.business_name),
            name: Set(name),
            email: Set(input.email),
            vat_number: Set(input.vat_number),
            street_name: Set(input.street_name),
            postal_code: Set(input.postal_code),
            city: Set(input.city),
            province_id: Set(input.province_id),
            country_id: Set(input.country_id.unwrap_or_else(|| "ES".to_string())),
            phone: Set(input.phone),
            created_at: Set(now),
            updated_at: Set(None),
            ..Default::default()
        };

        let model = active_model.insert(db).await?;
        info!(customer_id = model.id, "Customer created");
        Ok(model)
    }
}
