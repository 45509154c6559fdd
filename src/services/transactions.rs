//! Ledger read path: paginated transaction listing with type and
//! medication filters.

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::db::DbPool;
use crate::entities::transaction::{self, Entity as Transaction, TransactionType};
use crate::errors::ServiceError;

pub struct TransactionService {
    db_pool: Arc<DbPool>,
}

impl TransactionService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Lists transactions newest first, optionally filtered by type and/or
    /// medication.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        page: u64,
        limit: u64,
        r#type: Option<TransactionType>,
        medication_id: Option<Uuid>,
    ) -> Result<(Vec<transaction::Model>, u64), ServiceError> {
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

        let mut query = Transaction::find();

        if let Some(r#type) = r#type {
            query = query.filter(transaction::Column::Type.eq(r#type.as_str()));
        }

        if let Some(medication_id) = medication_id {
            query = query.filter(transaction::Column::MedicationId.eq(medication_id));
        }

        query = query.order_by_desc(transaction::Column::CreatedAt);

        let paginator = query.paginate(db, limit);
        let total = paginator.num_items().await.map_err(|e| {
            ServiceError::InternalError(format!("Failed to count transactions: {}", e))
        })?;

        let transactions = paginator.fetch_page(page - 1).await.map_err(|e| {
            ServiceError::InternalError(format!("Failed to fetch transactions page: {}", e))
        })?;

        Ok((transactions, total))
    }
}
