//! Barcode scanner session: lookup, receiving, picking and cycle counts
//!
//! Camera acquisition is an [`Operation`] settled by whoever owns the
//! device; decoding itself happens outside this crate.

use serde::{Deserialize, Serialize};
use shared::{validate_barcode, validate_quantity, InventoryItem, Operation};

use crate::error::{AppError, AppResult};
use crate::services::inventory::InventoryService;

/// Message shown when camera access is refused
pub const CAMERA_DENIED: &str = "Camera access denied. Please enable camera permissions or use manual entry.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanMode {
    #[default]
    Lookup,
    Receive,
    Pick,
    Count,
}

impl ScanMode {
    pub fn description(&self) -> &'static str {
        match self {
            ScanMode::Lookup => "View item information and current stock levels",
            ScanMode::Receive => "Add received inventory to stock levels",
            ScanMode::Pick => "Remove items from inventory for order fulfillment",
            ScanMode::Count => "Perform cycle counting and inventory audits",
        }
    }
}

/// An acquired camera stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CameraStream {
    /// Requested facing mode; the back camera on phones
    pub facing_mode: String,
}

impl Default for CameraStream {
    fn default() -> Self {
        Self {
            facing_mode: "environment".to_string(),
        }
    }
}

/// Result of processing one barcode
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ScanOutcome {
    Found { barcode: String, item: InventoryItem },
    NotFound { barcode: String, message: String },
}

impl ScanOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, ScanOutcome::Found { .. })
    }
}

/// What an inventory action did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionReceipt {
    pub mode: ScanMode,
    pub sku: String,
    pub quantity: u32,
    pub previous_stock: u32,
    pub new_stock: u32,
    /// Counted minus system stock; cycle counts only
    pub difference: Option<i64>,
    pub message: String,
}

/// Scanner state for one user at one device
#[derive(Debug, Clone, Default)]
pub struct ScannerSession {
    mode: ScanMode,
    camera: Option<Operation<CameraStream>>,
    last_result: Option<ScanOutcome>,
}

impl ScannerSession {
    pub fn new(mode: ScanMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> ScanMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ScanMode) {
        tracing::debug!(?mode, "Scan mode changed");
        self.mode = mode;
    }

    pub fn last_result(&self) -> Option<&ScanOutcome> {
        self.last_result.as_ref()
    }

    pub fn camera(&self) -> Option<&Operation<CameraStream>> {
        self.camera.as_ref()
    }

    /// True while a camera stream is live
    pub fn is_scanning(&self) -> bool {
        self.camera.as_ref().and_then(Operation::output).is_some()
    }

    /// Request the camera; the device owner settles the operation
    pub fn start_camera(&mut self) -> AppResult<()> {
        if self.camera.as_ref().map_or(false, Operation::is_pending) {
            return Err(AppError::InvalidStateTransition(
                "Camera acquisition already in progress".to_string(),
            ));
        }
        self.camera = Some(Operation::pending());
        Ok(())
    }

    pub fn camera_ready(&mut self, stream: CameraStream) -> AppResult<()> {
        let camera = self.pending_camera()?;
        camera.succeed(stream)?;
        tracing::info!("Camera stream acquired");
        Ok(())
    }

    /// Camera refused; shown to the user as a failed scan
    pub fn camera_failed(&mut self, reason: &str) -> AppResult<()> {
        let camera = self.pending_camera()?;
        camera.fail(reason)?;
        tracing::warn!(reason, "Camera acquisition failed");
        self.last_result = Some(ScanOutcome::NotFound {
            barcode: String::new(),
            message: CAMERA_DENIED.to_string(),
        });
        Ok(())
    }

    fn pending_camera(&mut self) -> AppResult<&mut Operation<CameraStream>> {
        self.camera
            .as_mut()
            .ok_or_else(|| AppError::InvalidStateTransition("Camera was not requested".to_string()))
    }

    pub fn stop_camera(&mut self) {
        self.camera = None;
    }

    /// Look up a decoded barcode. A hit stops the camera.
    pub fn process_barcode(&mut self, inventory: &InventoryService, barcode: &str) -> &ScanOutcome {
        let barcode = barcode.trim().to_string();
        let outcome = match inventory.lookup_barcode(&barcode) {
            Ok(item) => {
                tracing::info!(barcode = %barcode, sku = %item.sku, "Barcode matched");
                ScanOutcome::Found {
                    item: item.clone(),
                    barcode,
                }
            }
            Err(_) => ScanOutcome::NotFound {
                message: format!("Item not found for barcode: {}", barcode),
                barcode,
            },
        };
        if outcome.is_found() {
            self.stop_camera();
        }
        self.last_result.insert(outcome)
    }

    /// Typed barcode entry; blank input is ignored and anything that is
    /// not a barcode is rejected before the lookup
    pub fn manual_entry(&mut self, inventory: &InventoryService, raw: &str) -> AppResult<Option<&ScanOutcome>> {
        let code = raw.trim();
        if code.is_empty() {
            return Ok(None);
        }
        validate_barcode(code).map_err(|msg| AppError::validation("barcode", msg))?;
        Ok(Some(self.process_barcode(inventory, code)))
    }

    /// Apply the current mode's action to the scanned item.
    ///
    /// Returns the inventory over the new snapshot. The scan result is
    /// cleared on success so the next item can be scanned.
    pub fn apply_action(
        &mut self,
        inventory: &InventoryService,
        quantity: u32,
    ) -> AppResult<(InventoryService, ActionReceipt)> {
        // lookup has no quantity input
        if self.mode != ScanMode::Lookup {
            validate_quantity(quantity).map_err(|msg| AppError::validation("quantity", msg))?;
        }

        let sku = match &self.last_result {
            Some(ScanOutcome::Found { item, .. }) => item.sku.clone(),
            _ => {
                return Err(AppError::InvalidStateTransition(
                    "No scanned item to act on".to_string(),
                ))
            }
        };
        let item = inventory.get(&sku)?;
        let previous = item.stock;

        let (new_stock, difference, message) = match self.mode {
            ScanMode::Lookup => (previous, None, format!("{} has {} units in stock", item.name, previous)),
            ScanMode::Receive => {
                let new_stock = previous.checked_add(quantity).ok_or_else(|| {
                    AppError::validation("quantity", "Quantity would overflow the stock level")
                })?;
                (
                    new_stock,
                    None,
                    format!("Received {} units of {}. New stock: {}", quantity, item.name, new_stock),
                )
            }
            ScanMode::Pick => {
                if quantity > previous {
                    tracing::warn!(sku = %sku, quantity, stock = previous, "Pick exceeds stock");
                    return Err(AppError::InsufficientStock(format!(
                        "Only {} units of {} available",
                        previous, item.name
                    )));
                }
                let new_stock = previous - quantity;
                (
                    new_stock,
                    None,
                    format!("Picked {} units of {}. Remaining stock: {}", quantity, item.name, new_stock),
                )
            }
            ScanMode::Count => {
                let difference = i64::from(quantity) - i64::from(previous);
                (
                    quantity,
                    Some(difference),
                    format!(
                        "Cycle count recorded. System: {} | Counted: {} | Difference: {}",
                        previous,
                        quantity,
                        signed(difference)
                    ),
                )
            }
        };

        let updated = if new_stock == previous {
            inventory.clone()
        } else {
            inventory.with_stock(&sku, new_stock)?
        };

        tracing::info!(mode = ?self.mode, sku = %sku, previous, new_stock, "Scanner action applied");
        self.last_result = None;

        Ok((
            updated,
            ActionReceipt {
                mode: self.mode,
                sku,
                quantity,
                previous_stock: previous,
                new_stock,
                difference,
                message,
            },
        ))
    }
}

/// `+3`, `0` or `-3`
fn signed(difference: i64) -> String {
    if difference > 0 {
        format!("+{}", difference)
    } else {
        difference.to_string()
    }
}
