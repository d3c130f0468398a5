//! QR label tests
//!
//! Tests for the label modal including:
//! - Property 4: Label Payload Round-Trip
//! - Property 11: Modal Transitions and Copy Clamping

use chrono::{NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use shared::seed::seed_inventory;
use shared::{decode_label_payload, encode_label_payload, InventoryItem, LabelSize, LabelTemplate, Location};
use warehouse_dashboard::config::LabelConfig;
use warehouse_dashboard::services::labels::{render_label, LabelModal, LabelSettings, ModalState, ModalView};
use warehouse_dashboard::AppError;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 27).unwrap()
}

fn item(index: usize) -> InventoryItem {
    seed_inventory().remove(index)
}

fn open_modal() -> LabelModal {
    let mut modal = LabelModal::new(item(0), LabelSettings::default());
    modal.open().unwrap();
    modal
}

fn template_strategy() -> impl Strategy<Value = LabelTemplate> {
    prop_oneof![
        Just(LabelTemplate::Basic),
        Just(LabelTemplate::Detailed),
        Just(LabelTemplate::Compact),
    ]
}

fn location_strategy() -> impl Strategy<Value = Location> {
    let side = (prop::char::range('A', 'Z'), 0u8..=9);
    (side.clone(), side).prop_map(|((pa, ps), (sa, ss))| Location::new(pa, ps, sa, ss).unwrap())
}

fn item_strategy() -> impl Strategy<Value = InventoryItem> {
    (
        "[A-Z]{2,4}-[0-9]{3}",
        prop_oneof![any::<String>(), r#"["\\ \t\n\x00-\x1fé漢🙂a-z]{0,24}"#],
        any::<String>(),
        any::<i64>(),
        0u32..6,
        location_strategy(),
    )
        .prop_map(|(sku, name, category, mantissa, scale, location)| InventoryItem {
            sku,
            name,
            category,
            stock: 10,
            min_stock: 5,
            location,
            unit_value: Decimal::new(mantissa, scale),
            last_updated: Utc.with_ymd_and_hms(2024, 12, 27, 12, 0, 0).unwrap(),
            supplier: None,
        })
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Modal opens on the preview tab and toggles to settings
    #[test]
    fn test_modal_transitions() {
        let mut modal = LabelModal::new(item(0), LabelSettings::default());
        assert_eq!(modal.state(), ModalState::Closed);

        modal.open().unwrap();
        assert_eq!(modal.state(), ModalState::Open(ModalView::Preview));

        modal.show_settings().unwrap();
        assert_eq!(modal.state(), ModalState::Open(ModalView::Settings));

        modal.show_preview().unwrap();
        modal.close().unwrap();
        assert_eq!(modal.state(), ModalState::Closed);
    }

    /// Tab switches and edits need an open modal
    #[test]
    fn test_invalid_transitions() {
        let mut modal = LabelModal::new(item(0), LabelSettings::default());

        assert!(matches!(modal.show_settings(), Err(AppError::InvalidStateTransition(_))));
        assert!(matches!(modal.close(), Err(AppError::InvalidStateTransition(_))));
        assert!(modal.set_copies(3).is_err());
        assert!(modal.preview(today()).is_err());

        modal.open().unwrap();
        assert!(modal.open().is_err());
        assert!(modal.show_preview().is_err());
    }

    /// Closing throws away the session's edits
    #[test]
    fn test_close_resets_settings() {
        let mut modal = open_modal();
        modal.set_size(LabelSize::Large).unwrap();
        modal.set_copies(4).unwrap();
        modal.close().unwrap();

        assert_eq!(modal.settings(), LabelSettings::default());
    }

    /// Configured defaults seed the modal
    #[test]
    fn test_settings_from_config() {
        let config = LabelConfig {
            size: LabelSize::Small,
            template: LabelTemplate::Compact,
            copies: 25,
            include_date: false,
        };
        let settings = LabelSettings::from(&config);

        assert_eq!(settings.size, LabelSize::Small);
        assert_eq!(settings.copies, 10);
        assert!(!settings.include_date);
    }

    /// Preview renders one label per copy at the chosen size
    #[test]
    fn test_preview_copies_and_size() {
        let mut modal = open_modal();
        modal.set_copies(3).unwrap();
        modal.set_size(LabelSize::Small).unwrap();

        let preview = modal.preview(today()).unwrap();
        assert_eq!(preview.filename, "WPA-001-label.pdf");
        assert_eq!(preview.labels.len(), 3);
        assert_eq!(preview.dimensions.width, "2.5in");
        assert_eq!(preview.labels[0].qr_size, 60);
    }

    /// Detailed labels print every field and the date
    #[test]
    fn test_detailed_label_lines() {
        let label = render_label(&item(2), &LabelSettings::default(), today()).unwrap();

        assert_eq!(
            label.lines,
            vec![
                "Premium Kit",
                "SKU: PK-150",
                "Category: Kits",
                "Value: $89.99",
                "Status: Low Stock",
                "Stock: 12 / Min: 25",
                "Location: C2-D4",
            ]
        );
        assert_eq!(label.date.as_deref(), Some("12/27/2024"));
    }

    /// Only the detailed template has room for the date
    #[test]
    fn test_compact_label_has_no_date() {
        let settings = LabelSettings {
            template: LabelTemplate::Compact,
            ..LabelSettings::default()
        };
        let label = render_label(&item(1), &settings, today()).unwrap();

        assert_eq!(label.lines, vec!["Component X", "SKU: CX-205", "Loc: B3-C1", "Qty: 623", "$12.50"]);
        assert!(label.date.is_none());
    }

    /// The embedded payload decodes to the item
    #[test]
    fn test_payload_decodes() {
        let label = render_label(&item(3), &LabelSettings::default(), today()).unwrap();
        let payload = decode_label_payload(&label.payload).unwrap();

        assert_eq!(payload.template(), LabelTemplate::Detailed);
        assert_eq!(payload.id(), "WB-300");
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

        /// Property 11: Modal Transitions and Copy Clamping
        /// *For any* requested copy count, the preview holds 1..=10 labels
        #[test]
        fn prop_copies_are_clamped(copies in 0u32..1_000) {
            let mut modal = open_modal();
            modal.set_copies(copies).unwrap();

            let preview = modal.preview(today()).unwrap();
            prop_assert!((1..=10).contains(&preview.labels.len()));
            prop_assert_eq!(preview.labels.len() as u32, copies.clamp(1, 10));
        }

        /// Property 4: Label Payload Round-Trip
        /// *For any* seed item and template, the rendered payload decodes to that template
        #[test]
        fn prop_rendered_payload_round_trips(index in 0usize..5, template in template_strategy()) {
            let item = item(index);
            let settings = LabelSettings { template, ..LabelSettings::default() };
            let label = render_label(&item, &settings, today()).unwrap();

            let decoded = decode_label_payload(&label.payload).unwrap();
            prop_assert_eq!(decoded.template(), template);
            prop_assert_eq!(decoded.id(), item.sku.as_str());
            prop_assert_eq!(decoded.location(), &item.location);
        }

        /// Property 4: Label Payload Round-Trip
        /// *For any* item, including names with quotes, unicode and control characters,
        /// the payload JSON has no raw control characters and decodes to itself
        #[test]
        fn prop_generated_items_round_trip(item in item_strategy(), template in template_strategy()) {
            let payload = encode_label_payload(&item, template);
            let json = payload.to_json().unwrap();

            prop_assert!(!json.chars().any(|c| c < ' '));
            let decoded = decode_label_payload(&json).unwrap();
            prop_assert_eq!(decoded.template(), template);
            prop_assert_eq!(decoded, payload);
        }
    }
}
