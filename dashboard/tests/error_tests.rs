//! Error display tests
//!
//! Every service failure maps to an `ErrorDetail` the views can show.

use shared::parse_location;
use warehouse_dashboard::{AppError, Config, ErrorDetail};

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Validation errors carry the offending field
    #[test]
    fn test_validation_detail() {
        let detail = AppError::validation("sku", "SKU must look like ABC-123").detail();

        assert_eq!(
            detail,
            ErrorDetail {
                code: "VALIDATION_ERROR".to_string(),
                message: "SKU must look like ABC-123".to_string(),
                field: Some("sku".to_string()),
            }
        );
    }

    /// Stock shortfalls point at the quantity input
    #[test]
    fn test_insufficient_stock_detail() {
        let detail = AppError::InsufficientStock("only 12 on hand".to_string()).detail();
        assert_eq!(detail.code, "INSUFFICIENT_STOCK");
        assert_eq!(detail.field.as_deref(), Some("quantity"));
    }

    /// Domain errors keep their own code
    #[test]
    fn test_core_error_detail() {
        let err: AppError = parse_location("ZZ").unwrap_err().into();
        let detail = err.detail();

        assert_eq!(detail.code, "MALFORMED_LOCATION");
        assert!(detail.message.contains("ZZ"));
        assert_eq!(detail.field, None);
    }

    /// Internal failures never leak their cause
    #[test]
    fn test_internal_detail_is_opaque() {
        let err: AppError = anyhow::anyhow!("disk on fire").into();
        let detail = err.detail();

        assert_eq!(detail.code, "INTERNAL_ERROR");
        assert!(!detail.message.contains("disk"));
    }

    /// Absent fields are left out of the serialized form
    #[test]
    fn test_detail_serialization() {
        let json = serde_json::to_value(AppError::NotFound("Item CX-999".to_string()).detail()).unwrap();

        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Item CX-999 not found");
        assert!(json.get("field").is_none());
    }

    /// In-code defaults match the development profile
    #[test]
    fn test_config_defaults() {
        let config = Config::default();

        assert_eq!(config.environment, "development");
        assert_eq!(config.labels.copies, 1);
        assert!(config.labels.include_date);
        assert!(!config.logging.json);
        assert!(config.validate().is_ok());
    }

    /// A configured copy count outside 1..=10 is a configuration error
    #[test]
    fn test_config_rejects_copy_count() {
        let mut config = Config::default();
        config.labels.copies = 11;

        let err: AppError = config.validate().unwrap_err().into();
        let detail = err.detail();
        assert_eq!(detail.code, "CONFIGURATION_ERROR");
        assert!(detail.message.contains("labels.copies"));

        config.labels.copies = 0;
        assert!(config.validate().is_err());
    }
}
