//! Controlled-substance stock ledger.
//!
//! Every dispensing event is recorded as one atomic unit of work: load the
//! medication row, derive the stock delta, insert the immutable transaction
//! record, apply the stock update, and append the audit entry. Any failure
//! rolls the whole workflow back, so a transaction row never exists without
//! its matching stock value and audit entry.

use chrono::Utc;
use sea_orm::{Set, TransactionTrait, *};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::db::DbPool;
use crate::entities::audit_log::AuditEntityType;
use crate::entities::medication::{self, Entity as Medication};
use crate::entities::transaction::{self, TransactionType};
use crate::errors::ServiceError;
use crate::services::audit::AuditService;

/// Validated input for recording a dispensing event.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub medication_id: Uuid,
    pub nurse_id: Uuid,
    pub witness_id: Uuid,
    pub r#type: TransactionType,
    pub quantity: i32,
    pub notes: Option<String>,
}

/// Computes the stock value a medication should hold after a transaction.
///
/// Returns `None` for `WASTE`, which documents disposal without touching
/// stock. `CHECKOUT` fails rather than let stock go negative.
pub fn compute_new_stock(
    current_stock: i32,
    r#type: TransactionType,
    quantity: i32,
) -> Result<Option<i32>, ServiceError> {
    match r#type {
        TransactionType::Checkout => {
            if current_stock < quantity {
                return Err(ServiceError::InsufficientStock(
                    "Insufficient stock".to_string(),
                ));
            }
            Ok(Some(current_stock - quantity))
        }
        TransactionType::Return => Ok(Some(current_stock + quantity)),
        TransactionType::Waste => Ok(None),
    }
}

/// Checks the business rules that do not need database state.
fn validate_preconditions(input: &NewTransaction) -> Result<(), ServiceError> {
    if input.nurse_id == input.witness_id {
        return Err(ServiceError::ValidationError(
            "Witness must be different from nurse".to_string(),
        ));
    }

    if input.r#type == TransactionType::Waste
        && input.notes.as_deref().map_or(true, |n| n.trim().is_empty())
    {
        return Err(ServiceError::ValidationError(
            "Waste transaction requires notes".to_string(),
        ));
    }

    if input.quantity <= 0 {
        return Err(ServiceError::ValidationError(
            "Quantity must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

pub struct LedgerService {
    db_pool: Arc<DbPool>,
    audit: Arc<AuditService>,
}

impl LedgerService {
    pub fn new(db_pool: Arc<DbPool>, audit: Arc<AuditService>) -> Self {
        Self { db_pool, audit }
    }

    /// Records a dispensing event and returns the stored transaction.
    ///
    /// Serialization of concurrent writes against the same medication is
    /// delegated to the store's transaction isolation; there is no
    /// application-level locking here.
    #[instrument(skip(self))]
    pub async fn record_transaction(
        &self,
        input: NewTransaction,
    ) -> Result<transaction::Model, ServiceError> {
        validate_preconditions(&input)?;

        let db = self.db_pool.as_ref();
        let audit = Arc::clone(&self.audit);

        db.transaction::<_, transaction::Model, ServiceError>(move |txn| {
            Box::pin(async move {
                let medication = Medication::find_by_id(input.medication_id)
                    .one(txn)
                    .await
                    .map_err(ServiceError::db_error)?
                    .ok_or_else(|| ServiceError::NotFound("Medication not found".to_string()))?;

                let new_stock = compute_new_stock(
                    medication.current_stock,
                    input.r#type,
                    input.quantity,
                )?;

                let record = transaction::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    medication_id: Set(input.medication_id),
                    nurse_id: Set(input.nurse_id),
                    witness_id: Set(input.witness_id),
                    r#type: Set(input.r#type.as_str().to_string()),
                    quantity: Set(input.quantity),
                    notes: Set(input.notes.clone()),
                    created_at: Set(Utc::now()),
                }
                .insert(txn)
                .await
                .map_err(ServiceError::db_error)?;

                // WASTE documents disposal without changing stock
                if let Some(stock) = new_stock {
                    let mut active_medication: medication::ActiveModel = medication.clone().into();
                    active_medication.current_stock = Set(stock);
                    active_medication.updated_at = Set(Utc::now());
                    active_medication
                        .update(txn)
                        .await
                        .map_err(ServiceError::db_error)?;
                }

                audit
                    .append(
                        txn,
                        input.r#type.as_str(),
                        AuditEntityType::Transaction,
                        record.id,
                        input.nurse_id,
                        Some(serde_json::json!({
                            "quantity": input.quantity,
                            "medicationId": input.medication_id,
                        })),
                    )
                    .await?;

                info!(
                    "Recorded {} of {} x{} (stock {} -> {})",
                    input.r#type.as_str(),
                    medication.name,
                    input.quantity,
                    medication.current_stock,
                    new_stock.unwrap_or(medication.current_stock),
                );

                Ok(record)
            })
        })
        .await
        .map_err(|e| match e {
            TransactionError::Connection(db_err) => ServiceError::db_error(db_err),
            TransactionError::Transaction(service_err) => service_err,
        })
    }
}
