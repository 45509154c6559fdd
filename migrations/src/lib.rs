pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_users_table;
mod m20250301_000002_create_medications_table;
mod m20250301_000003_create_transactions_table;
mod m20250301_000004_create_audit_logs_table;
mod m20250315_000005_add_lookup_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_users_table::Migration),
            Box::new(m20250301_000002_create_medications_table::Migration),
            Box::new(m20250301_000003_create_transactions_table::Migration),
            Box::new(m20250301_000004_create_audit_logs_table::Migration),
            Box::new(m20250315_000005_add_lookup_indexes::Migration),
        ]
    }
}
