use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelBehavior, ActiveValue, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Entity classes an audit entry can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditEntityType {
    Medication,
    User,
    Transaction,
    AuditLog,
}

impl AuditEntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditEntityType::Medication => "MEDICATION",
            AuditEntityType::User => "USER",
            AuditEntityType::Transaction => "TRANSACTION",
            AuditEntityType::AuditLog => "AUDITLOG",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "MEDICATION" => Some(AuditEntityType::Medication),
            "USER" => Some(AuditEntityType::User),
            "TRANSACTION" => Some(AuditEntityType::Transaction),
            "AUDITLOG" => Some(AuditEntityType::AuditLog),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "audit_logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub action: String,
    pub entity_type: String, // Storing as string in DB, but will convert to/from enum
    pub entity_id: Uuid,
    pub performed_by: Uuid,
    pub details: Option<Json>,
    pub created_at: DateTime<Utc>,
}

// Audit entries reference rows across tables by (entity_type, entity_id),
// so no typed relations are defined.

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C: ConnectionTrait>(self, _db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut active_model = self;
        if let ActiveValue::NotSet = active_model.created_at {
            active_model.created_at = Set(Utc::now());
        }
        Ok(active_model)
    }
}
