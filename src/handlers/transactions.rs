use crate::entities::transaction::{self, TransactionType};
use crate::errors::ServiceError;
use crate::handlers::common::{validate_input, PageMeta};
use crate::services::ledger::{LedgerService, NewTransaction};
use crate::services::transactions::TransactionService;
use crate::ApiResponse;
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

// Trait for transactions handler state that provides access to the ledger
// (write path) and the transaction read service.
pub trait TransactionsHandlerState: Clone + Send + Sync + 'static {
    fn ledger_service(&self) -> &LedgerService;
    fn transaction_service(&self) -> &TransactionService;
}

/// A ledger entry as returned on the wire.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub id: Uuid,
    pub medication_id: Uuid,
    pub nurse_id: Uuid,
    pub witness_id: Uuid,
    /// CHECKOUT, RETURN or WASTE.
    pub r#type: String,
    pub quantity: i32,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<transaction::Model> for TransactionResponse {
    fn from(model: transaction::Model) -> Self {
        Self {
            id: model.id,
            medication_id: model.medication_id,
            nurse_id: model.nurse_id,
            witness_id: model.witness_id,
            r#type: model.r#type,
            quantity: model.quantity,
            notes: model.notes,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    pub medication_id: Uuid,
    /// Nurse initiating the transaction.
    pub nurse_id: Uuid,
    /// Independent witness; must differ from the nurse.
    pub witness_id: Uuid,
    /// CHECKOUT, RETURN or WASTE.
    pub r#type: String,
    #[validate(range(min = 1))]
    pub quantity: i32,
    /// Mandatory for WASTE.
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListTransactionsQuery {
    /// Filter by transaction type (CHECKOUT, RETURN, WASTE).
    pub r#type: Option<String>,
    /// Filter by medication.
    pub medication_id: Option<Uuid>,
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

/// Create the transactions router
pub fn transactions_router<S>() -> Router<S>
where
    S: TransactionsHandlerState,
{
    Router::new().route(
        "/",
        get(list_transactions::<S>).post(create_transaction::<S>),
    )
}

/// Record a checkout, return or waste transaction
#[utoipa::path(
    post,
    path = "/api/transactions",
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Transaction recorded", body = TransactionResponse),
        (status = 400, description = "Invalid input or business rule violation", body = crate::errors::ErrorResponse),
        (status = 404, description = "Medication not found", body = crate::errors::ErrorResponse),
        (status = 429, description = "Rate limit exceeded", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "transactions"
)]
pub async fn create_transaction<S>(
    State(state): State<S>,
    payload: Result<Json<CreateTransactionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError>
where
    S: TransactionsHandlerState,
{
    let Json(request) = payload.map_err(|rejection| {
        ServiceError::InvalidInput(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    validate_input(&request)?;

    let r#type = TransactionType::from_str(&request.r#type).ok_or_else(|| {
        ServiceError::InvalidInput(format!("Invalid transaction type: {}", request.r#type))
    })?;

    let transaction = state
        .ledger_service()
        .record_transaction(NewTransaction {
            medication_id: request.medication_id,
            nurse_id: request.nurse_id,
            witness_id: request.witness_id,
            r#type,
            quantity: request.quantity,
            notes: request.notes,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(TransactionResponse::from(transaction))),
    ))
}

/// List transactions with optional type and medication filters
#[utoipa::path(
    get,
    path = "/api/transactions",
    params(ListTransactionsQuery),
    responses(
        (status = 200, description = "Paginated list of transactions"),
        (status = 400, description = "Invalid query parameters", body = crate::errors::ErrorResponse),
        (status = 429, description = "Rate limit exceeded", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "transactions"
)]
pub async fn list_transactions<S>(
    State(state): State<S>,
    Query(query): Query<ListTransactionsQuery>,
) -> Result<impl IntoResponse, ServiceError>
where
    S: TransactionsHandlerState,
{
    let r#type = query
        .r#type
        .as_deref()
        .map(|s| {
            TransactionType::from_str(s)
                .ok_or_else(|| ServiceError::InvalidInput(format!("Invalid transaction type: {}", s)))
        })
        .transpose()?;

    let (transactions, total) = state
        .transaction_service()
        .list(query.page, query.limit, r#type, query.medication_id)
        .await?;

    let data: Vec<TransactionResponse> = transactions.into_iter().map(Into::into).collect();

    Ok((
        StatusCode::OK,
        Json(ApiResponse::paginated(
            data,
            PageMeta::new(query.page, query.limit, total),
        )),
    ))
}
