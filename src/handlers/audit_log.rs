use crate::entities::audit_log::{self, AuditEntityType};
use crate::errors::ServiceError;
use crate::handlers::common::PageMeta;
use crate::services::audit::AuditService;
use crate::ApiResponse;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

// Trait for audit log handler state that provides access to the audit service
pub trait AuditLogHandlerState: Clone + Send + Sync + 'static {
    fn audit_service(&self) -> &AuditService;
}

/// An audit trail entry as returned on the wire.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntryResponse {
    pub id: Uuid,
    #[schema(example = "CHECKOUT")]
    pub action: String,
    /// MEDICATION, USER, TRANSACTION or AUDITLOG.
    pub entity_type: String,
    pub entity_id: Uuid,
    pub performed_by: Uuid,
    pub details: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl From<audit_log::Model> for AuditLogEntryResponse {
    fn from(model: audit_log::Model) -> Self {
        Self {
            id: model.id,
            action: model.action,
            entity_type: model.entity_type,
            entity_id: model.entity_id,
            performed_by: model.performed_by,
            details: model.details,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListAuditLogQuery {
    /// Filter by entity type (MEDICATION, USER, TRANSACTION, AUDITLOG).
    pub entity_type: Option<String>,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    25
}

/// Create the audit log router
pub fn audit_log_router<S>() -> Router<S>
where
    S: AuditLogHandlerState,
{
    Router::new().route("/", get(list_audit_log::<S>))
}

/// List audit trail entries with optional entity type filtering
#[utoipa::path(
    get,
    path = "/api/audit-log",
    params(ListAuditLogQuery),
    responses(
        (status = 200, description = "Paginated list of audit entries"),
        (status = 400, description = "Invalid query parameters", body = crate::errors::ErrorResponse),
        (status = 429, description = "Rate limit exceeded", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "audit-log"
)]
pub async fn list_audit_log<S>(
    State(state): State<S>,
    Query(query): Query<ListAuditLogQuery>,
) -> Result<impl IntoResponse, ServiceError>
where
    S: AuditLogHandlerState,
{
    let entity_type = query
        .entity_type
        .as_deref()
        .map(|s| {
            AuditEntityType::from_str(s)
                .ok_or_else(|| ServiceError::InvalidInput(format!("Invalid entity type: {}", s)))
        })
        .transpose()?;

    let (entries, total) = state
        .audit_service()
        .list(query.page, query.limit, entity_type)
        .await?;

    let data: Vec<AuditLogEntryResponse> = entries.into_iter().map(Into::into).collect();

    Ok((
        StatusCode::OK,
        Json(ApiResponse::paginated(
            data,
            PageMeta::new(query.page, query.limit, total),
        )),
    ))
}
