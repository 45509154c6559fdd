pub mod audit_log;
pub mod common;
pub mod medications;
pub mod transactions;

use crate::db::DbPool;
use crate::services::audit::AuditService;
use crate::services::ledger::LedgerService;
use crate::services::medications::MedicationService;
use crate::services::transactions::TransactionService;
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub ledger: Arc<LedgerService>,
    pub medications: Arc<MedicationService>,
    pub transactions: Arc<TransactionService>,
    pub audit: Arc<AuditService>,
}

impl AppServices {
    /// Build the service container. The ledger shares the audit service so
    /// every recorded transaction appends its audit entry in the same
    /// database transaction.
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        let audit = Arc::new(AuditService::new(Arc::clone(&db_pool)));
        let ledger = Arc::new(LedgerService::new(
            Arc::clone(&db_pool),
            Arc::clone(&audit),
        ));
        let medications = Arc::new(MedicationService::new(Arc::clone(&db_pool)));
        let transactions = Arc::new(TransactionService::new(db_pool));

        Self {
            ledger,
            medications,
            transactions,
            audit,
        }
    }
}
