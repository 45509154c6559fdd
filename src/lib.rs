//! Medication Inventory API Library
//!
//! Controlled-substance stock tracking: a dual-signature transaction ledger
//! that adjusts stock atomically, an append-only audit trail, and read
//! endpoints over both.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod openapi;
pub mod rate_limiter;
pub mod services;

use axum::{extract::State, response::Json, routing::get, Router};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use utoipa::ToSchema;

use handlers::audit_log::AuditLogHandlerState;
use handlers::common::PageMeta;
use handlers::medications::MedicationsHandlerState;
use handlers::transactions::TransactionsHandlerState;
use services::audit::AuditService;
use services::ledger::LedgerService;
use services::medications::MedicationService;
use services::transactions::TransactionService;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: Arc<config::AppConfig>,
    pub services: handlers::AppServices,
}

impl MedicationsHandlerState for AppState {
    fn medication_service(&self) -> &MedicationService {
        &self.services.medications
    }
}

impl TransactionsHandlerState for AppState {
    fn ledger_service(&self) -> &LedgerService {
        &self.services.ledger
    }

    fn transaction_service(&self) -> &TransactionService {
        &self.services.transactions
    }
}

impl AuditLogHandlerState for AppState {
    fn audit_service(&self) -> &AuditService {
        &self.services.audit
    }
}

/// Response envelope shared by every endpoint. `meta` is present only on
/// paginated list responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            meta: None,
        }
    }

    pub fn paginated(data: T, meta: PageMeta) -> Self {
        Self {
            success: true,
            data: Some(data),
            meta: Some(meta),
        }
    }
}

/// Standard API result type for JSON responses
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, errors::ServiceError>;

/// Build the route tree mounted under the `/api` prefix.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/status", get(api_status))
        .nest(
            "/medications",
            handlers::medications::medications_router::<AppState>(),
        )
        .nest(
            "/transactions",
            handlers::transactions::transactions_router::<AppState>(),
        )
        .nest(
            "/audit-log",
            handlers::audit_log::audit_log_router::<AppState>(),
        )
}

async fn api_status() -> ApiResult<Value> {
    let status_data = json!({
        "status": "ok",
        "service": "medledger-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339(),
    });

    Ok(Json(ApiResponse::success(status_data)))
}

/// Liveness check with a database ping.
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Value> {
    let database = match state.db.ping().await {
        Ok(_) => "healthy",
        Err(_) => "unhealthy",
    };

    let health_data = json!({
        "status": database,
        "database": database,
        "timestamp": Utc::now().to_rfc3339(),
    });

    Ok(Json(ApiResponse::success(health_data)))
}

#[cfg(test)]
mod response_tests {
    use super::*;

    #[test]
    fn success_envelope_omits_meta() {
        let value = serde_json::to_value(ApiResponse::success(json!({"id": 1}))).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["data"]["id"], 1);
        assert!(value.get("meta").is_none());
    }

    #[test]
    fn paginated_envelope_carries_camel_case_meta() {
        let response = ApiResponse::paginated(vec![1, 2, 3], PageMeta::new(1, 10, 3));
        let value = serde_json::to_value(response).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["data"].as_array().map(Vec::len), Some(3));
        assert_eq!(value["meta"]["total"], 3);
        assert_eq!(value["meta"]["totalPages"], 1);
    }
}
