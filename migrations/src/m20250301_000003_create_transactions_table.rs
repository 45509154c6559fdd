use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::MedicationId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transactions::NurseId).uuid().not_null())
                    .col(ColumnDef::new(Transactions::WitnessId).uuid().not_null())
                    .col(ColumnDef::new(Transactions::Type).string().not_null())
                    .col(ColumnDef::new(Transactions::Quantity).integer().not_null())
                    .col(ColumnDef::new(Transactions::Notes).text())
                    .col(
                        ColumnDef::new(Transactions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transactions_medication_id")
                            .from(Transactions::Table, Transactions::MedicationId)
                            .to(
                                super::m20250301_000002_create_medications_table::Medications::Table,
                                super::m20250301_000002_create_medications_table::Medications::Id,
                            ),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Transactions {
    Table,
    Id,
    MedicationId,
    NurseId,
    WitnessId,
    Type,
    Quantity,
    Notes,
    CreatedAt,
}
