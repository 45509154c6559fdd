//! Audit Trail Service
//!
//! Append-only record of who did what to which entity. Entries are never
//! updated or deleted once written.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::db::DbPool;
use crate::entities::audit_log::{self, AuditEntityType, Entity as AuditLog};
use crate::errors::ServiceError;

pub struct AuditService {
    db_pool: Arc<DbPool>,
}

impl AuditService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Appends an entry to the audit trail using the caller's connection.
    ///
    /// When `conn` is an open transaction the entry commits or rolls back
    /// together with the caller's other writes; it is never a separately
    /// committed side effect.
    pub async fn append<C: ConnectionTrait>(
        &self,
        conn: &C,
        action: &str,
        entity_type: AuditEntityType,
        entity_id: Uuid,
        performed_by: Uuid,
        details: Option<serde_json::Value>,
    ) -> Result<audit_log::Model, ServiceError> {
        let entry = audit_log::ActiveModel {
            id: Set(Uuid::new_v4()),
            action: Set(action.to_string()),
            entity_type: Set(entity_type.as_str().to_string()),
            entity_id: Set(entity_id),
            performed_by: Set(performed_by),
            details: Set(details),
            created_at: Set(Utc::now()),
        };

        entry.insert(conn).await.map_err(ServiceError::db_error)
    }

    /// Lists audit entries newest first, optionally filtered by entity type.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        page: u64,
        limit: u64,
        entity_type: Option<AuditEntityType>,
    ) -> Result<(Vec<audit_log::Model>, u64), ServiceError> {
        if page == 0 {
            return Err(ServiceError::ValidationError(
                "Page number must be greater than 0".to_string(),
            ));
        }
        if limit == 0 || limit > 100 {
            return Err(ServiceError::ValidationError(
                "Limit must be between 1 and 100".to_string(),
            ));
        }

        let db = &*self.db_pool;

        let mut query = AuditLog::find();

        if let Some(entity_type) = entity_type {
            query = query.filter(audit_log::Column::EntityType.eq(entity_type.as_str()));
        }

        query = query.order_by_desc(audit_log::Column::CreatedAt);

        let paginator = query.paginate(db, limit);
        let total = paginator.num_items().await.map_err(|e| {
            ServiceError::InternalError(format!("Failed to count audit entries: {}", e))
        })?;

        let entries = paginator.fetch_page(page - 1).await.map_err(|e| {
            ServiceError::InternalError(format!("Failed to fetch audit page: {}", e))
        })?;

        Ok((entries, total))
    }
}
