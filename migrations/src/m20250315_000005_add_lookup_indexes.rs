use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Foreign key index for a medication's transaction history
        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_medication_id")
                    .table(Transactions::Table)
                    .col(Transactions::MedicationId)
                    .to_owned(),
            )
            .await?;

        // Recent-first listing of the ledger
        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_created_at")
                    .table(Transactions::Table)
                    .col((Transactions::CreatedAt, IndexOrder::Desc))
                    .to_owned(),
            )
            .await?;

        // Audit trail filtered by entity type
        manager
            .create_index(
                Index::create()
                    .name("idx_audit_logs_entity_type")
                    .table(AuditLogs::Table)
                    .col(AuditLogs::EntityType)
                    .to_owned(),
            )
            .await?;

        // Recent-first listing of the audit trail
        manager
            .create_index(
                Index::create()
                    .name("idx_audit_logs_created_at")
                    .table(AuditLogs::Table)
                    .col((AuditLogs::CreatedAt, IndexOrder::Desc))
                    .to_owned(),
            )
            .await?;

        // Alphabetical medication listing
        manager
            .create_index(
                Index::create()
                    .name("idx_medications_name")
                    .table(Medications::Table)
                    .col(Medications::Name)
                    .to_owned(),
            )
            .await?;

        // Email lookups for staff accounts
        manager
            .create_index(
                Index::create()
                    .name("idx_users_email")
                    .table(Users::Table)
                    .col(Users::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_users_email").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_medications_name").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_audit_logs_created_at").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_audit_logs_entity_type").to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_transactions_created_at")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_transactions_medication_id")
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Transactions {
    Table,
    MedicationId,
    CreatedAt,
}

#[derive(Iden)]
enum AuditLogs {
    Table,
    EntityType,
    CreatedAt,
}

#[derive(Iden)]
enum Medications {
    Table,
    Name,
}

#[derive(Iden)]
enum Users {
    Table,
    Email,
}
