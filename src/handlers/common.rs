use crate::errors::ServiceError;
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

/// Validate request input before it reaches a service.
pub fn validate_input<T: Validate>(input: &T) -> Result<(), ServiceError> {
    input
        .validate()
        .map_err(|e| ServiceError::ValidationError(format!("Validation failed: {}", e)))
}

/// Pagination metadata attached to every list response.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl PageMeta {
    pub fn new(page: u64, limit: u64, total: u64) -> Self {
        let total_pages = if total == 0 {
            0
        } else {
            (total + limit - 1) / limit
        };
        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(PageMeta::new(1, 10, 25).total_pages, 3);
        assert_eq!(PageMeta::new(1, 10, 30).total_pages, 3);
        assert_eq!(PageMeta::new(1, 10, 31).total_pages, 4);
        assert_eq!(PageMeta::new(1, 25, 1).total_pages, 1);
    }

    #[test]
    fn empty_result_has_zero_pages() {
        let meta = PageMeta::new(1, 10, 0);
        assert_eq!(meta.total, 0);
        assert_eq!(meta.total_pages, 0);
    }

    #[test]
    fn meta_serializes_with_camel_case_keys() {
        let value = serde_json::to_value(PageMeta::new(2, 25, 60)).unwrap();
        assert_eq!(value["page"], 2);
        assert_eq!(value["limit"], 25);
        assert_eq!(value["total"], 60);
        assert_eq!(value["totalPages"], 3);
    }
}
