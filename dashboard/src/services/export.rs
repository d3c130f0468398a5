//! Data export: field catalogue, CSV/JSON rendering and export jobs

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use shared::{DateRange, InventoryItem, Operation, Order, Shipment, StaffMember};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// What is being exported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportEntity {
    Inventory,
    Orders,
    Shipments,
    Staff,
}

impl ExportEntity {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportEntity::Inventory => "inventory",
            ExportEntity::Orders => "orders",
            ExportEntity::Shipments => "shipments",
            ExportEntity::Staff => "staff",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
        }
    }
}

/// Date window applied to each record's primary date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExportRange {
    #[default]
    All,
    Today,
    Week,
    Month,
    Quarter,
    Year,
    Custom {
        start: NaiveDate,
        end: NaiveDate,
    },
}

impl ExportRange {
    /// Inclusive window ending today; `None` for all time
    pub fn window(&self, today: NaiveDate) -> Option<DateRange> {
        let trailing = |days: i64| DateRange::new(today - Duration::days(days - 1), today);
        match self {
            ExportRange::All => None,
            ExportRange::Today => Some(trailing(1)),
            ExportRange::Week => Some(trailing(7)),
            ExportRange::Month => Some(trailing(30)),
            ExportRange::Quarter => Some(trailing(90)),
            ExportRange::Year => Some(trailing(365)),
            ExportRange::Custom { start, end } => Some(DateRange::new(*start, *end)),
        }
    }
}

/// One selectable export column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExportField {
    pub key: &'static str,
    pub label: &'static str,
    /// Pre-selected when the dialog opens
    pub default: bool,
}

const fn field(key: &'static str, label: &'static str, default: bool) -> ExportField {
    ExportField { key, label, default }
}

const INVENTORY_FIELDS: &[ExportField] = &[
    field("sku", "SKU", true),
    field("name", "Product Name", true),
    field("category", "Category", true),
    field("stock", "Current Stock", true),
    field("min_stock", "Minimum Stock", true),
    field("location", "Location", true),
    field("value", "Unit Value", true),
    field("supplier", "Supplier", false),
    field("last_updated", "Last Updated", false),
];

const ORDER_FIELDS: &[ExportField] = &[
    field("order_id", "Order ID", true),
    field("customer", "Customer", true),
    field("items", "Items Count", true),
    field("total", "Order Total", true),
    field("status", "Status", true),
    field("priority", "Priority", true),
    field("date", "Order Date", true),
    field("due_date", "Due Date", true),
    field("assigned_to", "Assigned To", false),
];

const SHIPMENT_FIELDS: &[ExportField] = &[
    field("shipment_id", "Shipment ID", true),
    field("order_id", "Order ID", true),
    field("customer", "Customer", true),
    field("destination", "Destination", true),
    field("carrier", "Carrier", true),
    field("tracking_number", "Tracking Number", true),
    field("status", "Status", true),
    field("shipped_date", "Shipped Date", true),
    field("estimated_delivery", "Estimated Delivery", true),
];

const STAFF_FIELDS: &[ExportField] = &[
    field("employee_id", "Employee ID", true),
    field("name", "Full Name", true),
    field("email", "Email", true),
    field("department", "Department", true),
    field("position", "Position", true),
    field("status", "Status", true),
    field("hire_date", "Hire Date", true),
    field("phone", "Phone Number", false),
    field("performance", "Performance Rating", false),
];

/// A record that can be written by the exporter
pub trait Exportable: Serialize {
    const ENTITY: ExportEntity;

    /// Cell text for a catalogue key; empty when the record has no value
    fn export_value(&self, key: &str) -> Option<String>;

    /// Date used by the export range
    fn export_date(&self) -> Option<NaiveDate>;
}

impl Exportable for InventoryItem {
    const ENTITY: ExportEntity = ExportEntity::Inventory;

    fn export_value(&self, key: &str) -> Option<String> {
        let value = match key {
            "sku" => self.sku.clone(),
            "name" => self.name.clone(),
            "category" => self.category.clone(),
            "stock" => self.stock.to_string(),
            "min_stock" => self.min_stock.to_string(),
            "location" => self.location.code(),
            "value" => self.unit_value.to_string(),
            "supplier" => self.supplier.clone().unwrap_or_default(),
            "last_updated" => self.last_updated.to_rfc3339(),
            _ => return None,
        };
        Some(value)
    }

    fn export_date(&self) -> Option<NaiveDate> {
        Some(self.last_updated.date_naive())
    }
}

impl Exportable for Order {
    const ENTITY: ExportEntity = ExportEntity::Orders;

    fn export_value(&self, key: &str) -> Option<String> {
        let value = match key {
            "order_id" => self.id.clone(),
            "customer" => self.customer.clone(),
            "items" => self.items.to_string(),
            "total" => self.total.to_string(),
            "status" => self.status.to_string(),
            "priority" => self.priority.to_string(),
            "date" => self.date.to_string(),
            "due_date" => self.due_date.to_string(),
            "assigned_to" => self.assigned_to.clone(),
            _ => return None,
        };
        Some(value)
    }

    fn export_date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }
}

impl Exportable for Shipment {
    const ENTITY: ExportEntity = ExportEntity::Shipments;

    fn export_value(&self, key: &str) -> Option<String> {
        let value = match key {
            "shipment_id" => self.id.clone(),
            "order_id" => self.order_id.clone(),
            "customer" => self.customer.clone(),
            "destination" => self.destination.clone(),
            "carrier" => self.carrier.to_string(),
            "tracking_number" => self.tracking_number.clone(),
            "status" => self.status.to_string(),
            "shipped_date" => self.shipped_date.map(|d| d.to_string()).unwrap_or_default(),
            "estimated_delivery" => self.estimated_delivery.to_string(),
            _ => return None,
        };
        Some(value)
    }

    fn export_date(&self) -> Option<NaiveDate> {
        self.shipped_date.or(Some(self.estimated_delivery))
    }
}

impl Exportable for StaffMember {
    const ENTITY: ExportEntity = ExportEntity::Staff;

    fn export_value(&self, key: &str) -> Option<String> {
        let value = match key {
            "employee_id" => self.id.clone(),
            "name" => self.name.clone(),
            "email" => self.email.clone(),
            "department" => self.department.to_string(),
            "position" => self.position.clone(),
            "status" => self.status.to_string(),
            "hire_date" => self.hire_date.to_string(),
            "phone" => self.phone.clone(),
            "performance" => self.performance.to_string(),
            _ => return None,
        };
        Some(value)
    }

    fn export_date(&self) -> Option<NaiveDate> {
        Some(self.hire_date)
    }
}

/// Every column the dialog offers for an entity
pub fn export_fields(entity: ExportEntity) -> &'static [ExportField] {
    match entity {
        ExportEntity::Inventory => INVENTORY_FIELDS,
        ExportEntity::Orders => ORDER_FIELDS,
        ExportEntity::Shipments => SHIPMENT_FIELDS,
        ExportEntity::Staff => STAFF_FIELDS,
    }
}

/// Keys pre-selected when the dialog opens
pub fn default_fields(entity: ExportEntity) -> Vec<String> {
    export_fields(entity)
        .iter()
        .filter(|f| f.default)
        .map(|f| f.key.to_string())
        .collect()
}

/// Options chosen in the export dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRequest {
    pub entity: ExportEntity,
    #[serde(default)]
    pub format: ExportFormat,
    pub fields: Vec<String>,
    #[serde(default = "default_true")]
    pub include_headers: bool,
    #[serde(default)]
    pub range: ExportRange,
}

fn default_true() -> bool {
    true
}

impl ExportRequest {
    /// Request with the entity's default columns
    pub fn new(entity: ExportEntity) -> Self {
        Self {
            entity,
            format: ExportFormat::Csv,
            fields: default_fields(entity),
            include_headers: true,
            range: ExportRange::All,
        }
    }

    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_headers(mut self, include_headers: bool) -> Self {
        self.include_headers = include_headers;
        self
    }

    pub fn with_range(mut self, range: ExportRange) -> Self {
        self.range = range;
        self
    }

    /// `<entity>_export_<YYYY-MM-DD>.<ext>`
    pub fn filename(&self, today: NaiveDate) -> String {
        format!(
            "{}_export_{}.{}",
            self.entity.as_str(),
            today.format("%Y-%m-%d"),
            self.format.extension()
        )
    }

    /// Selected columns in catalogue order
    fn columns(&self) -> AppResult<Vec<&'static ExportField>> {
        if self.fields.is_empty() {
            return Err(AppError::validation("fields", "Select at least one field to export"));
        }
        let catalogue = export_fields(self.entity);
        if let Some(unknown) = self
            .fields
            .iter()
            .find(|key| !catalogue.iter().any(|f| f.key == key.as_str()))
        {
            return Err(AppError::validation(
                "fields",
                format!("Unknown {} field: {}", self.entity.as_str(), unknown),
            ));
        }
        Ok(catalogue
            .iter()
            .filter(|f| self.fields.iter().any(|key| key == f.key))
            .collect())
    }
}

/// A rendered export file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportArtifact {
    pub filename: String,
    pub content_type: String,
    pub records: usize,
    pub content: String,
}

/// Render records into an export file
pub fn export_records<T: Exportable>(
    records: &[T],
    request: &ExportRequest,
    today: NaiveDate,
) -> AppResult<ExportArtifact> {
    if request.entity != T::ENTITY {
        return Err(AppError::validation(
            "entity",
            format!("Cannot export {} as {}", T::ENTITY.as_str(), request.entity.as_str()),
        ));
    }
    let columns = request.columns()?;
    let window = request.range.window(today);
    let selected: Vec<&T> = records
        .iter()
        .filter(|r| match (&window, r.export_date()) {
            (None, _) => true,
            (Some(range), Some(date)) => range.contains(date),
            (Some(_), None) => false,
        })
        .collect();

    let content = match request.format {
        ExportFormat::Csv => render_csv(&selected, &columns, request.include_headers)?,
        ExportFormat::Json => render_json(&selected, &columns)?,
    };

    tracing::info!(
        entity = request.entity.as_str(),
        format = request.format.extension(),
        records = selected.len(),
        "Export rendered"
    );

    Ok(ExportArtifact {
        filename: request.filename(today),
        content_type: request.format.content_type().to_string(),
        records: selected.len(),
        content,
    })
}

fn render_csv<T: Exportable>(records: &[&T], columns: &[&ExportField], include_headers: bool) -> AppResult<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    if include_headers {
        wtr.write_record(columns.iter().map(|c| c.label))?;
    }
    for record in records {
        wtr.write_record(
            columns
                .iter()
                .map(|c| record.export_value(c.key).unwrap_or_default()),
        )?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("CSV writer error: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| AppError::Internal(anyhow::anyhow!("UTF-8 conversion error: {}", e)))
}

fn render_json<T: Exportable>(records: &[&T], columns: &[&ExportField]) -> AppResult<String> {
    let rows: Vec<serde_json::Map<String, serde_json::Value>> = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|c| {
                    let value = record.export_value(c.key).unwrap_or_default();
                    (c.key.to_string(), serde_json::Value::String(value))
                })
                .collect()
        })
        .collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

/// An export run tracked through the workflow contract
#[derive(Debug, Clone, Serialize)]
pub struct ExportJob {
    pub id: Uuid,
    pub request: ExportRequest,
    pub operation: Operation<ExportArtifact>,
}

impl ExportJob {
    pub fn new(request: ExportRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            request,
            operation: Operation::pending(),
        }
    }

    /// Render the file and settle the job. A rendering failure settles
    /// the job as failed and is also returned.
    pub fn run<T: Exportable>(&mut self, records: &[T], today: NaiveDate) -> AppResult<&ExportArtifact> {
        tracing::debug!(job = %self.id, entity = self.request.entity.as_str(), "Export started");
        match export_records(records, &self.request, today) {
            Ok(artifact) => {
                self.operation.succeed(artifact)?;
            }
            Err(err) => {
                self.operation.fail(err.to_string())?;
                return Err(err);
            }
        }
        self.operation
            .output()
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Export job {} has no output", self.id)))
    }
}
