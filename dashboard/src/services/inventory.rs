//! Inventory service: item lookup, warehouse map and stock updates

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::seed::{seed_barcodes, seed_inventory};
use shared::{
    adjacent_aisle, apply_filters, build_lookup_url, parse_location, parse_lookup_url, validate_barcode,
    validate_category, validate_location, validate_sku, warehouse_grid, FilterState,
    InventoryItem, InventorySummary, Location, StockStatus, WarehouseGrid,
};
use validator::{Validate, ValidationError};

use crate::error::{AppError, AppResult};
use crate::services::{check_plain_text, to_validation_error};
use crate::store::Collection;

/// Inventory service over an immutable item snapshot
#[derive(Debug, Clone)]
pub struct InventoryService {
    items: Collection<InventoryItem>,
    /// Barcode -> SKU
    barcodes: Arc<HashMap<String, String>>,
    origin: String,
}

/// Low-stock or out-of-stock item shown on the alert list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockAlert {
    pub sku: String,
    pub name: String,
    pub location: Location,
    pub stock: u32,
    pub min_stock: u32,
    pub status: StockStatus,
    /// Units needed to get back to the minimum
    pub shortfall: u32,
}

/// Location panel of the product detail view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationDetails {
    pub aisle: String,
    pub shelf: String,
    pub position: String,
    pub grid: WarehouseGrid,
}

fn check_sku(sku: &str) -> Result<(), ValidationError> {
    to_validation_error("sku", validate_sku(sku))
}

fn check_location(location: &str) -> Result<(), ValidationError> {
    to_validation_error("location", validate_location(location))
}

fn check_category(category: &str) -> Result<(), ValidationError> {
    to_validation_error("category", validate_category(category))?;
    check_plain_text(category)
}

fn check_barcode(code: &str) -> Result<(), ValidationError> {
    to_validation_error("barcode", validate_barcode(code))
}

fn check_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price >= Decimal::ZERO {
        Ok(())
    } else {
        let mut err = ValidationError::new("range");
        err.message = Some("Price cannot be negative".into());
        Err(err)
    }
}

/// Input from the add item form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewItemInput {
    #[validate(custom = "check_sku")]
    pub sku: String,
    #[validate(length(min = 1, max = 100, message = "Product name is required"), custom = "check_plain_text")]
    pub name: String,
    #[validate(custom = "check_category")]
    pub category: String,
    pub stock: u32,
    pub min_stock: u32,
    #[validate(custom = "check_location")]
    pub location: String,
    #[validate(custom = "check_price")]
    pub price: Decimal,
    #[validate(custom = "check_plain_text")]
    pub supplier: Option<String>,
    #[validate(custom = "check_barcode")]
    pub barcode: Option<String>,
}

impl InventoryService {
    /// Create a new InventoryService instance
    pub fn new(items: Collection<InventoryItem>, barcodes: HashMap<String, String>, origin: impl Into<String>) -> Self {
        Self {
            items,
            barcodes: Arc::new(barcodes),
            origin: origin.into(),
        }
    }

    /// Service over the reference dataset
    pub fn seeded(origin: impl Into<String>) -> Self {
        Self::new(
            Collection::new(seed_inventory()),
            seed_barcodes().into_iter().collect(),
            origin,
        )
    }

    pub fn items(&self) -> &Collection<InventoryItem> {
        &self.items
    }

    /// Same barcodes and origin over a different snapshot
    pub fn with_items(&self, items: Collection<InventoryItem>) -> Self {
        Self {
            items,
            barcodes: Arc::clone(&self.barcodes),
            origin: self.origin.clone(),
        }
    }

    pub fn list(&self, filter: &FilterState) -> Vec<InventoryItem> {
        let items = apply_filters(self.items.as_slice(), filter);
        tracing::debug!(matched = items.len(), total = self.items.len(), "Listed inventory");
        items
    }

    /// Distinct categories, sorted, for the category select
    pub fn categories(&self) -> Vec<String> {
        self.items
            .iter()
            .map(|i| i.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn get(&self, sku: &str) -> AppResult<&InventoryItem> {
        let sku = sku.trim();
        self.items
            .find(|i| i.sku.eq_ignore_ascii_case(sku))
            .ok_or_else(|| AppError::NotFound(format!("Item {}", sku)))
    }

    /// Item for a scanned barcode
    pub fn lookup_barcode(&self, code: &str) -> AppResult<&InventoryItem> {
        let code = code.trim();
        let sku = self.barcodes.get(code).ok_or_else(|| {
            tracing::warn!(barcode = code, "Unknown barcode");
            AppError::NotFound(format!("Item for barcode {}", code))
        })?;
        self.get(sku)
    }

    /// URL-mode label content for an item
    pub fn lookup_url(&self, sku: &str) -> AppResult<String> {
        let item = self.get(sku)?;
        Ok(build_lookup_url(&self.origin, &item.sku))
    }

    /// Item addressed by a product lookup URL
    pub fn resolve_lookup_url(&self, url: &str) -> AppResult<&InventoryItem> {
        let id = parse_lookup_url(url.trim())
            .ok_or_else(|| AppError::validation("url", "Not a product lookup URL"))?;
        self.get(id)
    }

    /// Other items in the same aisle, in list order
    pub fn nearby(&self, sku: &str) -> AppResult<Vec<&InventoryItem>> {
        let item = self.get(sku)?;
        Ok(self
            .items
            .iter()
            .filter(|other| other.sku != item.sku && adjacent_aisle(&item.location, &other.location))
            .collect())
    }

    pub fn warehouse_map(&self, sku: &str) -> AppResult<WarehouseGrid> {
        let item = self.get(sku)?;
        Ok(warehouse_grid(&item.location))
    }

    pub fn location_details(&self, sku: &str) -> AppResult<LocationDetails> {
        let item = self.get(sku)?;
        Ok(LocationDetails {
            aisle: item.location.aisle_label(),
            shelf: item.location.shelf_label(),
            position: item.location.code(),
            grid: warehouse_grid(&item.location),
        })
    }

    pub fn summary(&self, filter: &FilterState) -> InventorySummary {
        InventorySummary::from_items(&self.list(filter))
    }

    /// Items at or below their minimum, out-of-stock first
    pub fn low_stock_alerts(&self) -> Vec<StockAlert> {
        let mut alerts: Vec<StockAlert> = self
            .items
            .iter()
            .filter(|i| i.needs_restock())
            .map(|i| StockAlert {
                sku: i.sku.clone(),
                name: i.name.clone(),
                location: i.location,
                stock: i.stock,
                min_stock: i.min_stock,
                status: i.status(),
                shortfall: i.min_stock.saturating_sub(i.stock),
            })
            .collect();
        // stable sort keeps list order within a status
        alerts.sort_by_key(|a| std::cmp::Reverse(a.status));
        alerts
    }

    /// Add a new item. Returns the service over the new snapshot.
    pub fn add_item(&self, input: NewItemInput) -> AppResult<Self> {
        input.validate()?;

        let sku = input.sku.trim().to_string();
        if self.items.contains(|i| i.sku.eq_ignore_ascii_case(&sku)) {
            tracing::warn!(sku = %sku, "Rejected duplicate SKU");
            return Err(AppError::DuplicateEntry("sku".to_string()));
        }
        let barcode = input.barcode.as_deref().map(str::trim).map(str::to_string);
        if let Some(code) = &barcode {
            if self.barcodes.contains_key(code) {
                return Err(AppError::DuplicateEntry("barcode".to_string()));
            }
        }

        let item = InventoryItem {
            sku: sku.clone(),
            name: input.name.trim().to_string(),
            category: input.category.trim().to_string(),
            stock: input.stock,
            min_stock: input.min_stock,
            location: parse_location(&input.location)?,
            unit_value: input.price,
            last_updated: Utc::now(),
            supplier: input.supplier.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
        };

        let mut barcodes = (*self.barcodes).clone();
        if let Some(code) = barcode {
            barcodes.insert(code, sku.clone());
        }

        tracing::info!(sku = %sku, status = %item.status(), "Added inventory item");
        Ok(Self {
            items: self.items.with_pushed(item),
            barcodes: Arc::new(barcodes),
            origin: self.origin.clone(),
        })
    }

    /// Set an item's stock level. Returns the service over the new snapshot.
    pub fn with_stock(&self, sku: &str, stock: u32) -> AppResult<Self> {
        let target = self.get(sku)?.sku.clone();
        let items = self
            .items
            .with_updated(
                |i| i.sku == target,
                |i| InventoryItem {
                    stock,
                    last_updated: Utc::now(),
                    ..i.clone()
                },
            )
            .ok_or_else(|| AppError::NotFound(format!("Item {}", target)))?;

        tracing::info!(sku = %target, stock, "Updated stock level");
        Ok(self.with_items(items))
    }
}
