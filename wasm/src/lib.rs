//! WebAssembly module for the Warehouse Dashboard
//!
//! Provides client-side computation for:
//! - Stock status classification
//! - Location parsing and the warehouse map
//! - Filtering and summaries over JSON record lists
//! - QR label payload encoding and decoding
//!
//! Every export takes and returns JSON strings; errors surface as JS strings.

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

use shared::{
    apply_filters, FilterState, Filterable, InventorySummary, OrderSummary, ShipmentSummary, StaffSummary,
};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    log("warehouse dashboard core loaded");
}

fn log(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&JsValue::from_str(message));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}

fn to_js(message: String) -> JsValue {
    log(&message);
    JsValue::from_str(&message)
}

fn from_json<T: DeserializeOwned>(what: &str, json: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization failed: {}", e))
}

// ============================================================================
// Stock classification and locations
// ============================================================================

/// Stock status label for a stock level and its minimum
#[wasm_bindgen]
pub fn classify_stock_status(stock: u32, min_stock: u32) -> String {
    classify_stock(stock, min_stock).to_string()
}

fn location_json(raw: &str) -> Result<String, String> {
    let location = parse_location(raw).map_err(|e| e.to_string())?;
    to_json(&serde_json::json!({
        "code": location.code(),
        "aisle": location.aisle_label(),
        "shelf": location.shelf_label(),
        "mapped": location.is_mapped(),
    }))
}

/// Parse a location code such as `A1-B2`
#[wasm_bindgen]
pub fn parse_location_code(raw: &str) -> Result<String, JsValue> {
    location_json(raw).map_err(to_js)
}

/// Map grid for a location; `undefined` when there is no location data
#[wasm_bindgen]
pub fn warehouse_map(raw: &str) -> Option<String> {
    WarehouseGrid::for_raw(raw).and_then(|grid| to_json(&grid).ok())
}

/// Whether two locations share a primary aisle. Malformed codes never match.
#[wasm_bindgen]
pub fn same_aisle(a: &str, b: &str) -> bool {
    match (parse_location(a), parse_location(b)) {
        (Ok(a), Ok(b)) => adjacent_aisle(&a, &b),
        _ => false,
    }
}

// ============================================================================
// Filtering and summaries
// ============================================================================

fn filter_as<T>(records_json: &str, filter_json: &str) -> Result<String, String>
where
    T: Filterable + Clone + Serialize + DeserializeOwned,
{
    let records: Vec<T> = from_json("records", records_json)?;
    let filter: FilterState = from_json("filter", filter_json)?;
    to_json(&apply_filters(&records, &filter))
}

fn filter_entity(entity: &str, records_json: &str, filter_json: &str) -> Result<String, String> {
    match entity {
        "inventory" => filter_as::<InventoryItem>(records_json, filter_json),
        "orders" => filter_as::<Order>(records_json, filter_json),
        "shipments" => filter_as::<Shipment>(records_json, filter_json),
        "staff" => filter_as::<StaffMember>(records_json, filter_json),
        other => Err(format!("Unknown entity: {}", other)),
    }
}

/// Apply a filter state to a list of `inventory`, `orders`, `shipments` or `staff`
#[wasm_bindgen]
pub fn filter_records(entity: &str, records_json: &str, filter_json: &str) -> Result<String, JsValue> {
    filter_entity(entity, records_json, filter_json).map_err(to_js)
}

fn summarize_entity(entity: &str, records_json: &str) -> Result<String, String> {
    match entity {
        "inventory" => {
            let items: Vec<InventoryItem> = from_json("records", records_json)?;
            to_json(&InventorySummary::from_items(&items))
        }
        "orders" => {
            let orders: Vec<Order> = from_json("records", records_json)?;
            to_json(&OrderSummary::from_orders(&orders))
        }
        "shipments" => {
            let shipments: Vec<Shipment> = from_json("records", records_json)?;
            to_json(&ShipmentSummary::from_shipments(&shipments))
        }
        "staff" => {
            let staff: Vec<StaffMember> = from_json("records", records_json)?;
            to_json(&StaffSummary::from_staff(&staff))
        }
        other => Err(format!("Unknown entity: {}", other)),
    }
}

/// Aggregate summary cards for a record list
#[wasm_bindgen]
pub fn summarize_records(entity: &str, records_json: &str) -> Result<String, JsValue> {
    summarize_entity(entity, records_json).map_err(to_js)
}

// ============================================================================
// Labels
// ============================================================================

fn encode_label_json(item_json: &str, template: &str) -> Result<String, String> {
    let item: InventoryItem = from_json("item", item_json)?;
    let template = LabelTemplate::parse_label(template).map_err(|e| e.to_string())?;
    encode_label_payload(&item, template).to_json().map_err(|e| e.to_string())
}

/// QR payload for an item under a label template
#[wasm_bindgen]
pub fn encode_label(item_json: &str, template: &str) -> Result<String, JsValue> {
    encode_label_json(item_json, template).map_err(to_js)
}

fn decode_label_json(payload: &str) -> Result<String, String> {
    let decoded = decode_label_payload(payload).map_err(|e| e.to_string())?;
    to_json(&serde_json::json!({
        "template": decoded.template().slug(),
        "payload": decoded,
    }))
}

/// Decode a scanned payload into `{ template, payload }`
#[wasm_bindgen]
pub fn decode_label(payload: &str) -> Result<String, JsValue> {
    decode_label_json(payload).map_err(to_js)
}

/// URL-mode label content
#[wasm_bindgen]
pub fn lookup_url(origin: &str, item_id: &str) -> String {
    build_lookup_url(origin, item_id)
}

/// Item id from a product lookup URL
#[wasm_bindgen]
pub fn lookup_url_item(url: &str) -> Option<String> {
    parse_lookup_url(url).map(str::to_string)
}

/// Template names for the settings select
#[wasm_bindgen]
pub fn label_templates() -> js_sys::Array {
    LabelTemplate::ALL
        .iter()
        .map(|t| JsValue::from_str(&t.slug()))
        .collect()
}

/// Validate a SKU typed into a form; returns the error message if invalid
#[wasm_bindgen]
pub fn check_sku(sku: &str) -> Option<String> {
    validate_sku(sku).err().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::seed::{seed_inventory, seed_orders};

    #[test]
    fn test_classify_stock_status() {
        assert_eq!(classify_stock_status(0, 100), "Out of Stock");
        assert_eq!(classify_stock_status(12, 25), "Low Stock");
        assert_eq!(classify_stock_status(847, 100), "In Stock");
    }

    #[test]
    fn test_location_helpers() {
        let parsed: serde_json::Value = serde_json::from_str(&location_json("a1-b2").unwrap()).unwrap();
        assert_eq!(parsed["code"], "A1-B2");
        assert_eq!(parsed["mapped"], true);

        assert!(location_json("ZZ").is_err());
        assert!(warehouse_map("ZZ").is_none());
        assert!(warehouse_map("C2-D4").is_some());
        assert!(same_aisle("A1-B2", "A2-C3"));
        assert!(!same_aisle("A1-B2", "nonsense"));
    }

    #[test]
    fn test_filter_records_by_search() {
        let records = serde_json::to_string(&seed_inventory()).unwrap();
        let out = filter_entity("inventory", &records, r#"{"search":"pro"}"#).unwrap();
        let items: Vec<InventoryItem> = serde_json::from_str(&out).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].sku, "WPA-001");

        assert!(filter_entity("pallets", &records, "{}").is_err());
    }

    #[test]
    fn test_summarize_orders() {
        let records = serde_json::to_string(&seed_orders()).unwrap();
        let summary: serde_json::Value = serde_json::from_str(&summarize_entity("orders", &records).unwrap()).unwrap();
        assert_eq!(summary["orders"], 9);
    }

    #[test]
    fn test_label_round_trip() {
        let item = serde_json::to_string(&seed_inventory()[0]).unwrap();
        let payload = encode_label_json(&item, "compact").unwrap();
        let decoded: serde_json::Value = serde_json::from_str(&decode_label_json(&payload).unwrap()).unwrap();
        assert_eq!(decoded["template"], "compact");
        assert_eq!(decoded["payload"]["id"], "WPA-001");

        assert!(decode_label_json(r#"{"sku":"WPA-001"}"#).is_err());
    }

    #[test]
    fn test_lookup_urls() {
        let url = lookup_url("https://wms.example.com/", "CX-205");
        assert_eq!(url, "https://wms.example.com/inventory/product/CX-205");
        assert_eq!(lookup_url_item(&url).as_deref(), Some("CX-205"));
        assert_eq!(check_sku("CX-205"), None);
        assert!(check_sku("cx205").is_some());
    }
}
