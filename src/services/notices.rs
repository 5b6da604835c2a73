use crate::{
    db::DbPool,
    entities::{
        customer::Entity as CustomerEntity,
        notice::{self, Entity as NoticeEntity, Model as NoticeModel, NoticePriority, NoticeStatus},
    },
    errors::ServiceError,
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct CreateNoticeInput {
    pub customer_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub assigned_to: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

/// Repository for notices.
#[derive(Clone)]
pub struct NoticeService {
    db_pool: Arc<DbPool>,
}

impl NoticeService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Lists notices newest-first, optionally filtered by status and priority.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        limit: u64,
        status: Option<&str>,
        priority: Option<&str>,
    ) -> Result<Vec<NoticeModel>, ServiceError> {
        let db = &*self.db_pool;
        let mut query = NoticeEntity::find();

        if let Some(status) = status {
            query = query.filter(notice::Column::Status.eq(status));
        }
        if let Some(priority) = priority {
            query = query.filter(notice::Column::Priority.eq(priority));
        }

        let notices = query
            .order_by_desc(notice::Column::CreatedDate)
            .limit(limit)
            .all(db)
            .await?;
        Ok(notices)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<NoticeModel>, ServiceError> {
        let db = &*self.db_pool;
        let notice = NoticeEntity::find_by_id(id).one(db).await?;
        Ok(notice)
    }

    /// Creates a notice for an existing customer. Priority defaults to
    /// medium, status to open; both are validated against their enums.
    #[instrument(skip(self, input), fields(customer_id = input.customer_id))]
    pub async fn create(&self, input: CreateNoticeInput) -> Result<NoticeModel, ServiceError> {
        let db = &*self.db_pool;

        let priority = match input.priority {
            Some(raw) => NoticePriority::from_str(&raw).map_err(|_| {
                ServiceError::ValidationError(format!("Unknown notice priority: {}", raw))
            })?,
            None => NoticePriority::Medium,
        };
        let status = match input.status {
            Some(raw) => NoticeStatus::from_str(&raw).map_err(|_| {
                ServiceError::ValidationError(format!("Unknown notice status: {}", raw))
            })?,
            None => NoticeStatus::Open,
        };

        let customer = CustomerEntity::find_by_id(input.customer_id).one(db).await?;
        if customer.is_none() {
            return Err(ServiceError::InvalidReference(format!(
                "No customer with id {}",
                input.customer_id
            )));
        }

        let active_model = notice::ActiveModel {
            customer_id: Set(input.customer_id),
            title: Set(input.title),
            description: Set(input.description),
            priority: Set(priority.to_string()),
            status: Set(status.to_string()),
            assigned_to: Set(input.assigned_to),
            created_date: Set(Utc::now()),
            due_date: Set(input.due_date),
            resolution: Set(None),
            resolved_date: Set(None),
            ..Default::default()
        };

        let model = active_model.insert(db).await?;
        info!(notice_id = model.id, customer_id = model.customer_id, "Notice created");
        Ok(model)
    }
}
