//! QR label payloads and print settings

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{InventoryItem, Location};
use crate::error::{CoreError, CoreResult};
use crate::types::Labeled;

/// Path segment of the product lookup URL
pub const LOOKUP_PATH: &str = "/inventory/product/";

/// Smallest and largest number of copies a print job accepts
pub const MIN_COPIES: u32 = 1;
pub const MAX_COPIES: u32 = 10;

/// Which fields a structured label carries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum LabelTemplate {
    Basic,
    #[default]
    Detailed,
    Compact,
}

impl Labeled for LabelTemplate {
    const KIND: &'static str = "label template";
    const ALL: &'static [Self] = &[LabelTemplate::Basic, LabelTemplate::Detailed, LabelTemplate::Compact];

    fn label(&self) -> &'static str {
        match self {
            LabelTemplate::Basic => "Basic",
            LabelTemplate::Detailed => "Detailed",
            LabelTemplate::Compact => "Compact",
        }
    }
}

/// Physical label stock
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum LabelSize {
    Small,
    #[default]
    Medium,
    Large,
}

/// Printed dimensions of a label size
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct LabelDimensions {
    pub width: &'static str,
    pub height: &'static str,
    /// Edge length of the QR code in pixels
    pub qr_size: u32,
}

impl LabelSize {
    pub fn dimensions(&self) -> LabelDimensions {
        match self {
            LabelSize::Small => LabelDimensions {
                width: "2.5in",
                height: "1.5in",
                qr_size: 60,
            },
            LabelSize::Medium => LabelDimensions {
                width: "4in",
                height: "2.5in",
                qr_size: 100,
            },
            LabelSize::Large => LabelDimensions {
                width: "4in",
                height: "3in",
                qr_size: 120,
            },
        }
    }
}

impl Labeled for LabelSize {
    const KIND: &'static str = "label size";
    const ALL: &'static [Self] = &[LabelSize::Small, LabelSize::Medium, LabelSize::Large];

    fn label(&self) -> &'static str {
        match self {
            LabelSize::Small => "Small",
            LabelSize::Medium => "Medium",
            LabelSize::Large => "Large",
        }
    }
}

/// Clamp a requested copy count into the printable range
pub fn clamp_copies(requested: u32) -> u32 {
    requested.clamp(MIN_COPIES, MAX_COPIES)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BasicPayload {
    pub id: String,
    pub name: String,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetailedPayload {
    pub id: String,
    pub name: String,
    pub location: Location,
    pub category: String,
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompactPayload {
    pub id: String,
    pub location: Location,
}

/// Structured record embedded in a label's QR code.
///
/// The JSON form carries no template tag; the field set identifies it.
/// Variant order matters for decoding: widest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LabelPayload {
    Detailed(DetailedPayload),
    Basic(BasicPayload),
    Compact(CompactPayload),
}

impl LabelPayload {
    pub fn template(&self) -> LabelTemplate {
        match self {
            LabelPayload::Basic(_) => LabelTemplate::Basic,
            LabelPayload::Detailed(_) => LabelTemplate::Detailed,
            LabelPayload::Compact(_) => LabelTemplate::Compact,
        }
    }

    /// Item id the label points at
    pub fn id(&self) -> &str {
        match self {
            LabelPayload::Basic(p) => &p.id,
            LabelPayload::Detailed(p) => &p.id,
            LabelPayload::Compact(p) => &p.id,
        }
    }

    pub fn location(&self) -> &Location {
        match self {
            LabelPayload::Basic(p) => &p.location,
            LabelPayload::Detailed(p) => &p.location,
            LabelPayload::Compact(p) => &p.location,
        }
    }

    /// Compact JSON handed to the QR renderer
    pub fn to_json(&self) -> CoreResult<String> {
        serde_json::to_string(self).map_err(|e| CoreError::InvalidLabelPayload(e.to_string()))
    }
}

/// Project an item onto the fields of a label template
pub fn encode_label_payload(item: &InventoryItem, template: LabelTemplate) -> LabelPayload {
    match template {
        LabelTemplate::Basic => LabelPayload::Basic(BasicPayload {
            id: item.sku.clone(),
            name: item.name.clone(),
            location: item.location,
        }),
        LabelTemplate::Detailed => LabelPayload::Detailed(DetailedPayload {
            id: item.sku.clone(),
            name: item.name.clone(),
            location: item.location,
            category: item.category.clone(),
            value: item.unit_value,
        }),
        LabelTemplate::Compact => LabelPayload::Compact(CompactPayload {
            id: item.sku.clone(),
            location: item.location,
        }),
    }
}

/// Decode a scanned QR payload back into its structured record
pub fn decode_label_payload(json: &str) -> CoreResult<LabelPayload> {
    serde_json::from_str(json).map_err(|_| {
        CoreError::InvalidLabelPayload("payload does not match any label template".to_string())
    })
}

/// URL-mode label content: `<origin>/inventory/product/<id>`
pub fn build_lookup_url(origin: &str, item_id: &str) -> String {
    format!("{}{}{}", origin.trim_end_matches('/'), LOOKUP_PATH, item_id)
}

/// Item id from a lookup URL built by [`build_lookup_url`]
pub fn parse_lookup_url(url: &str) -> Option<&str> {
    let (_, id) = url.rsplit_once(LOOKUP_PATH)?;
    (!id.is_empty() && !id.contains('/')).then_some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_inventory;

    fn widget() -> InventoryItem {
        seed_inventory().remove(0)
    }

    #[test]
    fn test_encode_field_sets() {
        let item = widget();

        let basic: serde_json::Value =
            serde_json::from_str(&encode_label_payload(&item, LabelTemplate::Basic).to_json().unwrap()).unwrap();
        let mut keys: Vec<_> = basic.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["id", "location", "name"]);

        let detailed: serde_json::Value =
            serde_json::from_str(&encode_label_payload(&item, LabelTemplate::Detailed).to_json().unwrap()).unwrap();
        assert_eq!(detailed["id"], "WPA-001");
        assert_eq!(detailed["location"], "A1-B2");
        assert_eq!(detailed["category"], "Electronics");
        assert_eq!(detailed["value"], "25.99");

        let compact: serde_json::Value =
            serde_json::from_str(&encode_label_payload(&item, LabelTemplate::Compact).to_json().unwrap()).unwrap();
        assert_eq!(compact.as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_round_trip_every_template() {
        let item = widget();
        for &template in LabelTemplate::ALL {
            let payload = encode_label_payload(&item, template);
            let decoded = decode_label_payload(&payload.to_json().unwrap()).unwrap();
            assert_eq!(decoded, payload);
            assert_eq!(decoded.template(), template);
        }
    }

    #[test]
    fn test_decode_rejects_unknown_shapes() {
        assert!(decode_label_payload(r#"{"id":"WPA-001"}"#).is_err());
        assert!(decode_label_payload(r#"{"id":"WPA-001","location":"A1-B2","stock":3}"#).is_err());
        assert!(decode_label_payload(r#"{"id":"WPA-001","location":"ZZ"}"#).is_err());
        assert!(decode_label_payload("not json").is_err());
    }

    #[test]
    fn test_payload_json_has_no_control_characters() {
        let mut item = widget();
        item.name = "Widget\nPro\tA".to_string();
        let json = encode_label_payload(&item, LabelTemplate::Basic).to_json().unwrap();
        assert!(!json.chars().any(char::is_control));

        let decoded = decode_label_payload(&json).unwrap();
        assert_eq!(decoded, encode_label_payload(&item, LabelTemplate::Basic));
    }

    #[test]
    fn test_lookup_url() {
        assert_eq!(
            build_lookup_url("https://wms.example.com", "WPA-001"),
            "https://wms.example.com/inventory/product/WPA-001"
        );
        assert_eq!(
            build_lookup_url("https://wms.example.com/", "WPA-001"),
            "https://wms.example.com/inventory/product/WPA-001"
        );
        assert_eq!(
            parse_lookup_url("https://wms.example.com/inventory/product/CX-205"),
            Some("CX-205")
        );
        assert_eq!(parse_lookup_url("https://wms.example.com/orders/ORD-1"), None);
        assert_eq!(parse_lookup_url("https://wms.example.com/inventory/product/"), None);
    }

    #[test]
    fn test_lookup_url_is_not_a_structured_payload() {
        let url = build_lookup_url("https://wms.example.com", "WPA-001");
        assert!(decode_label_payload(&url).is_err());
    }

    #[test]
    fn test_clamp_copies() {
        assert_eq!(clamp_copies(0), 1);
        assert_eq!(clamp_copies(4), 4);
        assert_eq!(clamp_copies(25), 10);
    }

    #[test]
    fn test_label_dimensions() {
        assert_eq!(LabelSize::Small.dimensions().qr_size, 60);
        assert_eq!(LabelSize::default().dimensions().width, "4in");
        assert_eq!(LabelSize::Large.dimensions().height, "3in");
        assert_eq!(LabelTemplate::default(), LabelTemplate::Detailed);
    }
}
