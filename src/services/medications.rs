//! Formulary read paths: paginated listing and single-medication lookup
//! with its full dispensing history.

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::db::DbPool;
use crate::entities::medication::{self, Entity as Medication, Schedule};
use crate::entities::transaction::{self, Entity as Transaction};
use crate::errors::ServiceError;

pub struct MedicationService {
    db_pool: Arc<DbPool>,
}

impl MedicationService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Lists medications alphabetically, optionally filtered by schedule.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        page: u64,
        limit: u64,
        schedule: Option<Schedule>,
    ) -> Result<(Vec<medication::Model>, u64), ServiceError> {
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

        let mut query = Medication::find();

        if let Some(schedule) = schedule {
            query = query.filter(medication::Column::Schedule.eq(schedule.as_str()));
        }

        query = query.order_by_asc(medication::Column::Name);

        let paginator = query.paginate(db, limit);
        let total = paginator.num_items().await.map_err(|e| {
            ServiceError::InternalError(format!("Failed to count medications: {}", e))
        })?;

        let medications = paginator.fetch_page(page - 1).await.map_err(|e| {
            ServiceError::InternalError(format!("Failed to fetch medications page: {}", e))
        })?;

        Ok((medications, total))
    }

    /// Fetches one medication plus its transaction history, newest first.
    #[instrument(skip(self))]
    pub async fn get_with_history(
        &self,
        id: Uuid,
    ) -> Result<(medication::Model, Vec<transaction::Model>), ServiceError> {
        let db = &*self.db_pool;

        let medication = Medication::find_by_id(id)
            .one(db)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound("Medication not found".to_string()))?;

        let history = Transaction::find()
            .filter(transaction::Column::MedicationId.eq(id))
            .order_by_desc(transaction::Column::CreatedAt)
            .all(db)
            .await
            .map_err(ServiceError::db_error)?;

        Ok((medication, history))
    }
}
