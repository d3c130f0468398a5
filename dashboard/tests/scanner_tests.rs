//! Barcode scanner tests
//!
//! Tests for the scanner session including:
//! - Property 12: Scanner Stock Actions

use proptest::prelude::*;

use shared::StockStatus;
use warehouse_dashboard::services::inventory::InventoryService;
use warehouse_dashboard::services::scanner::{CameraStream, ScanMode, ScanOutcome, ScannerSession, CAMERA_DENIED};
use warehouse_dashboard::AppError;

const ORIGIN: &str = "https://wms.example.com";

// Barcode of Widget Pro A, 847 units in stock
const WIDGET_BARCODE: &str = "123456789012";

// Barcode of Premium Kit, 12 units in stock
const KIT_BARCODE: &str = "345678901234";

fn scanned(mode: ScanMode, barcode: &str) -> (InventoryService, ScannerSession) {
    let inventory = InventoryService::seeded(ORIGIN);
    let mut session = ScannerSession::new(mode);
    session.process_barcode(&inventory, barcode);
    (inventory, session)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Known barcodes resolve to their item
    #[test]
    fn test_process_known_barcode() {
        let inventory = InventoryService::seeded(ORIGIN);
        let mut session = ScannerSession::default();

        let outcome = session.process_barcode(&inventory, WIDGET_BARCODE);
        match outcome {
            ScanOutcome::Found { barcode, item } => {
                assert_eq!(barcode, WIDGET_BARCODE);
                assert_eq!(item.sku, "WPA-001");
            }
            other => panic!("expected a match, got {:?}", other),
        }
    }

    /// Unknown barcodes report the code back to the user
    #[test]
    fn test_process_unknown_barcode() {
        let inventory = InventoryService::seeded(ORIGIN);
        let mut session = ScannerSession::default();

        let outcome = session.process_barcode(&inventory, "000000000000");
        assert_eq!(
            outcome,
            &ScanOutcome::NotFound {
                barcode: "000000000000".to_string(),
                message: "Item not found for barcode: 000000000000".to_string(),
            }
        );
    }

    /// Manual entry trims input and ignores blanks
    #[test]
    fn test_manual_entry() {
        let inventory = InventoryService::seeded(ORIGIN);
        let mut session = ScannerSession::default();

        assert!(session.manual_entry(&inventory, "   ").unwrap().is_none());
        assert!(session.last_result().is_none());

        let outcome = session.manual_entry(&inventory, "  234567890123 \n").unwrap().unwrap();
        assert!(outcome.is_found());
    }

    /// Typed input that is not a barcode never reaches the lookup
    #[test]
    fn test_manual_entry_rejects_malformed_barcodes() {
        let inventory = InventoryService::seeded(ORIGIN);
        let mut session = ScannerSession::default();
        session.process_barcode(&inventory, WIDGET_BARCODE);

        for raw in ["WPA-001", "1234", "123456789012345", "12345678901a"] {
            let err = session.manual_entry(&inventory, raw).unwrap_err();
            assert!(matches!(err, AppError::Validation { ref field, .. } if field == "barcode"), "{raw:?}");
        }
        // the previous scan is left in place
        assert!(session.last_result().unwrap().is_found());

        let outcome = session.manual_entry(&inventory, "00000000").unwrap().unwrap();
        assert!(!outcome.is_found());
    }

    /// Camera acquisition settles once; a hit stops the camera
    #[test]
    fn test_camera_lifecycle() {
        let inventory = InventoryService::seeded(ORIGIN);
        let mut session = ScannerSession::default();

        session.start_camera().unwrap();
        assert!(!session.is_scanning());
        assert!(session.start_camera().is_err());

        session.camera_ready(CameraStream::default()).unwrap();
        assert!(session.is_scanning());
        assert!(session.camera_ready(CameraStream::default()).is_err());

        session.process_barcode(&inventory, WIDGET_BARCODE);
        assert!(!session.is_scanning());
        assert!(session.camera().is_none());
    }

    /// A refused camera surfaces the permission message
    #[test]
    fn test_camera_denied() {
        let mut session = ScannerSession::default();
        assert!(session.camera_failed("NotAllowedError").is_err());

        session.start_camera().unwrap();
        session.camera_failed("NotAllowedError").unwrap();

        assert!(!session.is_scanning());
        match session.last_result() {
            Some(ScanOutcome::NotFound { message, .. }) => assert_eq!(message, CAMERA_DENIED),
            other => panic!("expected camera failure, got {:?}", other),
        }
    }

    /// Receiving adds the quantity to stock
    #[test]
    fn test_receive() {
        let (inventory, mut session) = scanned(ScanMode::Receive, KIT_BARCODE);
        let (updated, receipt) = session.apply_action(&inventory, 20).unwrap();

        assert_eq!(receipt.previous_stock, 12);
        assert_eq!(receipt.new_stock, 32);
        assert_eq!(updated.get("PK-150").unwrap().stock, 32);
        assert_eq!(updated.get("PK-150").unwrap().status(), StockStatus::InStock);
        assert_eq!(inventory.get("PK-150").unwrap().stock, 12);
        assert!(session.last_result().is_none());
    }

    /// Picking more than is on hand is rejected and changes nothing
    #[test]
    fn test_pick_beyond_stock() {
        let (inventory, mut session) = scanned(ScanMode::Pick, KIT_BARCODE);
        let err = session.apply_action(&inventory, 13).unwrap_err();

        match err {
            AppError::InsufficientStock(message) => assert_eq!(message, "Only 12 units of Premium Kit available"),
            other => panic!("expected insufficient stock, got {:?}", other),
        }
        assert!(session.last_result().is_some());

        let (updated, receipt) = session.apply_action(&inventory, 12).unwrap();
        assert_eq!(receipt.new_stock, 0);
        assert_eq!(updated.get("PK-150").unwrap().status(), StockStatus::OutOfStock);
    }

    /// Cycle counts set stock to the counted quantity
    #[test]
    fn test_cycle_count() {
        let (inventory, mut session) = scanned(ScanMode::Count, WIDGET_BARCODE);
        let (updated, receipt) = session.apply_action(&inventory, 840).unwrap();

        assert_eq!(receipt.difference, Some(-7));
        assert_eq!(
            receipt.message,
            "Cycle count recorded. System: 847 | Counted: 840 | Difference: -7"
        );
        assert_eq!(updated.get("WPA-001").unwrap().stock, 840);
    }

    /// Quantity must be positive and an item must have been scanned
    #[test]
    fn test_action_preconditions() {
        let (inventory, mut session) = scanned(ScanMode::Receive, WIDGET_BARCODE);
        assert!(matches!(
            session.apply_action(&inventory, 0),
            Err(AppError::Validation { .. })
        ));

        let mut idle = ScannerSession::new(ScanMode::Pick);
        assert!(matches!(
            idle.apply_action(&inventory, 1),
            Err(AppError::InvalidStateTransition(_))
        ));
    }

    /// Lookup mode reports stock without changing it
    #[test]
    fn test_lookup_mode_is_read_only() {
        let (inventory, mut session) = scanned(ScanMode::Lookup, WIDGET_BARCODE);
        let (updated, receipt) = session.apply_action(&inventory, 1).unwrap();

        assert_eq!(receipt.new_stock, receipt.previous_stock);
        assert!(updated.items().shares_snapshot(inventory.items()));
    }

    /// Lookup has no quantity input, so any quantity is accepted
    #[test]
    fn test_lookup_mode_ignores_quantity() {
        let (inventory, mut session) = scanned(ScanMode::Lookup, WIDGET_BARCODE);
        let (_, receipt) = session.apply_action(&inventory, 0).unwrap();

        assert_eq!(receipt.message, "Widget Pro A has 847 units in stock");
    }

    /// An exact count reports a plain zero difference
    #[test]
    fn test_count_difference_sign() {
        let (inventory, mut session) = scanned(ScanMode::Count, WIDGET_BARCODE);
        let (_, receipt) = session.apply_action(&inventory, 847).unwrap();
        assert_eq!(
            receipt.message,
            "Cycle count recorded. System: 847 | Counted: 847 | Difference: 0"
        );

        let (inventory, mut session) = scanned(ScanMode::Count, WIDGET_BARCODE);
        let (_, receipt) = session.apply_action(&inventory, 850).unwrap();
        assert!(receipt.message.ends_with("Difference: +3"));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property 12: Scanner Stock Actions
        /// *For any* quantity, receive adds exactly that many units
        #[test]
        fn prop_receive_adds_quantity(quantity in 1u32..10_000) {
            let (inventory, mut session) = scanned(ScanMode::Receive, WIDGET_BARCODE);
            let (updated, receipt) = session.apply_action(&inventory, quantity).unwrap();

            prop_assert_eq!(receipt.new_stock, 847 + quantity);
            prop_assert_eq!(updated.get("WPA-001").unwrap().stock, 847 + quantity);
        }

        /// Property 12: Scanner Stock Actions
        /// *For any* quantity, a pick succeeds iff it does not exceed stock
        #[test]
        fn prop_pick_never_goes_negative(quantity in 1u32..30) {
            let (inventory, mut session) = scanned(ScanMode::Pick, KIT_BARCODE);
            let result = session.apply_action(&inventory, quantity);

            if quantity <= 12 {
                let (updated, _) = result.unwrap();
                prop_assert_eq!(updated.get("PK-150").unwrap().stock, 12 - quantity);
            } else {
                prop_assert!(matches!(result, Err(AppError::InsufficientStock(_))));
                prop_assert_eq!(inventory.get("PK-150").unwrap().stock, 12);
            }
        }

        /// Property 12: Scanner Stock Actions
        /// *For any* count, the difference is counted minus system stock
        #[test]
        fn prop_count_difference(counted in 1u32..2_000) {
            let (inventory, mut session) = scanned(ScanMode::Count, WIDGET_BARCODE);
            let (updated, receipt) = session.apply_action(&inventory, counted).unwrap();

            prop_assert_eq!(receipt.difference, Some(i64::from(counted) - 847));
            prop_assert_eq!(updated.get("WPA-001").unwrap().stock, counted);
        }
    }
}
