use crate::{
    db::DbPool,
    entities::product::{self, Entity as ProductEntity, Model as ProductModel},
    errors::ServiceError,
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QuerySelect, Set,
};
use std::sync::Arc;
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct CreateProductInput {
    pub id: String,
    pub reference: Option<String>,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub active: Option<bool>,
}

/// Repository for products.
#[derive(Clone)]
pub struct ProductService {
    db_pool: Arc<DbPool>,
}

impl ProductService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Lists active products, optionally filtered by a free-text search over
    /// reference and description.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        limit: u64,
        search: Option<&str>,
    ) -> Result<Vec<ProductModel>, ServiceError> {
        let db = &*self.db_pool;
        let mut query = ProductEntity::find().filter(product::Column::Active.eq(true));

        if let Some(term) = search.filter(|t| !t.trim().is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(product::Column::Reference.contains(term))
                    .add(product::Column::Description.contains(term)),
            );
        }

        let products = query.limit(limit).all(db).await?;
        Ok(products)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Option<ProductModel>, ServiceError> {
        let db = &*self.db_pool;
        let product = ProductEntity::find_by_id(id.to_string()).one(db).await?;
        Ok(product)
    }

    /// Creates a product. Price and stock must be non-negative; the id must
    /// be free.
    #[instrument(skip(self, input), fields(product_id = %input.id))]
    pub async fn create(&self, input: CreateProductInput) -> Result<ProductModel, ServiceError> {
        let db = &*self.db_pool;

        if input.price < Decimal::ZERO {
            return Err(ServiceError::ValidationError(
                "Price must not be negative".to_string(),
            ));
        }
        if input.stock < 0 {
            return Err(ServiceError::ValidationError(
                "Stock must not be negative".to_string(),
            ));
        }

        let existing = ProductEntity::find_by_id(input.id.clone()).one(db).await?;
        if existing.is_some() {
            return Err(ServiceError::Conflict(format!(
                "A product with id {} already exists",
                input.id
            )));
        }

        let active_model = product::ActiveModel {
            id: Set(input.id),
            reference: Set(input.reference),
            description: Set(input.description),
            price: Set(input.price),
            stock: Set(input.stock),
            active: Set(input.active.unwrap_or(true)),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
        };

        let model = active_model.insert(db).await?;
        info!(product_id = %model.id, "Product created");
        Ok(model)
    }
}
