use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Medication Inventory API",
        version = "1.0.0",
        description = r#"
# Medication Inventory API

API for tracking medication inventory with transactions and audit logs.

## Features

- **Formulary**: Schedule II-V medications with live stock counts
- **Transaction Ledger**: Dual-signature checkout, return and waste records
- **Audit Trail**: Append-only log written atomically with each transaction

## Rate Limiting

API requests are rate-limited per client IP. Check the response headers:
- `X-RateLimit-Limit`: Maximum requests per window
- `X-RateLimit-Remaining`: Remaining requests in current window
- `X-RateLimit-Reset`: Seconds until the window resets

## Error Handling

Failures share one response shape with appropriate HTTP status codes:

```json
{
  "success": false,
  "message": "Medication not found"
}
```

## Pagination

List endpoints accept `page` and `limit` query parameters (limit capped at
100) and return a `meta` object with `page`, `limit`, `total` and
`totalPages`.
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development")
    ),
    tags(
        (name = "medications", description = "Formulary and stock levels"),
        (name = "transactions", description = "Dual-signature dispensing ledger"),
        (name = "audit-log", description = "Append-only audit trail")
    ),
    paths(
        crate::handlers::medications::list_medications,
        crate::handlers::medications::get_medication,
        crate::handlers::transactions::create_transaction,
        crate::handlers::transactions::list_transactions,
        crate::handlers::audit_log::list_audit_log,
    ),
    components(
        schemas(
            crate::ApiResponse<serde_json::Value>,
            crate::handlers::common::PageMeta,
            crate::handlers::medications::MedicationResponse,
            crate::handlers::medications::MedicationDetailResponse,
            crate::handlers::transactions::TransactionResponse,
            crate::handlers::transactions::CreateTransactionRequest,
            crate::handlers::audit_log::AuditLogEntryResponse,
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_covers_the_api_surface() {
        let openapi = ApiDoc::openapi();
        let json = serde_json::to_string_pretty(&openapi).unwrap();
        assert!(json.contains("Medication Inventory API"));
        assert!(json.contains("/api/medications"));
        assert!(json.contains("/api/transactions"));
        assert!(json.contains("/api/audit-log"));
    }
}
