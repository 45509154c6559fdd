use crate::entities::medication::{self, Schedule};
use crate::entities::transaction;
use crate::errors::ServiceError;
use crate::handlers::common::PageMeta;
use crate::handlers::transactions::TransactionResponse;
use crate::services::medications::MedicationService;
use crate::ApiResponse;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

// Trait for medications handler state that provides access to the medication service
pub trait MedicationsHandlerState: Clone + Send + Sync + 'static {
    fn medication_service(&self) -> &MedicationService;
}

/// A formulary entry as returned on the wire.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MedicationResponse {
    pub id: Uuid,
    pub name: String,
    /// DEA schedule: II, III, IV or V.
    pub schedule: String,
    #[schema(example = "mg")]
    pub unit: String,
    pub current_stock: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<medication::Model> for MedicationResponse {
    fn from(model: medication::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            schedule: model.schedule,
            unit: model.unit,
            current_stock: model.current_stock,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// A formulary entry with its full dispensing history, newest first.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MedicationDetailResponse {
    #[serde(flatten)]
    pub medication: MedicationResponse,
    pub transactions: Vec<TransactionResponse>,
}

impl MedicationDetailResponse {
    pub fn new(medication: medication::Model, history: Vec<transaction::Model>) -> Self {
        Self {
            medication: medication.into(),
            transactions: history.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListMedicationsQuery {
    /// Filter by DEA schedule (II, III, IV, V).
    pub schedule: Option<String>,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    10
}

/// Create the medications router
pub fn medications_router<S>() -> Router<S>
where
    S: MedicationsHandlerState,
{
    Router::new()
        .route("/", get(list_medications::<S>))
        .route("/:id", get(get_medication::<S>))
}

/// List medications with optional schedule filtering
#[utoipa::path(
    get,
    path = "/api/medications",
    params(ListMedicationsQuery),
    responses(
        (status = 200, description = "Paginated list of medications"),
        (status = 400, description = "Invalid query parameters", body = crate::errors::ErrorResponse),
        (status = 429, description = "Rate limit exceeded", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "medications"
)]
pub async fn list_medications<S>(
    State(state): State<S>,
    Query(query): Query<ListMedicationsQuery>,
) -> Result<impl IntoResponse, ServiceError>
where
    S: MedicationsHandlerState,
{
    let schedule = query
        .schedule
        .as_deref()
        .map(|s| {
            Schedule::from_str(s)
                .ok_or_else(|| ServiceError::InvalidInput(format!("Invalid schedule: {}", s)))
        })
        .transpose()?;

    let (medications, total) = state
        .medication_service()
        .list(query.page, query.limit, schedule)
        .await?;

    let data: Vec<MedicationResponse> = medications.into_iter().map(Into::into).collect();

    Ok((
        StatusCode::OK,
        Json(ApiResponse::paginated(
            data,
            PageMeta::new(query.page, query.limit, total),
        )),
    ))
}

/// Get a single medication with its transaction history
#[utoipa::path(
    get,
    path = "/api/medications/{id}",
    params(
        ("id" = Uuid, Path, description = "Medication id")
    ),
    responses(
        (status = 200, description = "Medication with transaction history", body = MedicationDetailResponse),
        (status = 404, description = "Medication not found", body = crate::errors::ErrorResponse),
        (status = 429, description = "Rate limit exceeded", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "medications"
)]
pub async fn get_medication<S>(
    State(state): State<S>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError>
where
    S: MedicationsHandlerState,
{
    let (medication, history) = state.medication_service().get_with_history(id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(MedicationDetailResponse::new(
            medication, history,
        ))),
    ))
}
