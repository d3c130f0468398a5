//! CSV import of inventory items and staff records
//!
//! Rows are validated here; a bad row is counted and skipped, never
//! fatal to the rest of the file.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use csv::StringRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{
    employee_sequence, parse_location, validate_category, validate_email, validate_no_control_chars, validate_phone,
    validate_sku, Department, EmploymentStatus, InventoryItem, Labeled, Operation, Performance, StaffMember,
};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::inventory::InventoryService;
use crate::services::staff::StaffService;
use crate::store::Collection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportEntity {
    Inventory,
    Staff,
}

impl ImportEntity {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportEntity::Inventory => "inventory",
            ImportEntity::Staff => "staff",
        }
    }

    /// Column headers of the downloadable template
    pub fn template_headers(&self) -> &'static [&'static str] {
        match self {
            ImportEntity::Inventory => &["SKU", "Product Name", "Category", "Stock", "Min Stock", "Location", "Price"],
            ImportEntity::Staff => &["Employee ID", "Name", "Email", "Department", "Position", "Hire Date"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOptions {
    /// Apply the form validation rules to every row
    pub validate_data: bool,
    /// Leave existing records alone instead of replacing them
    pub skip_duplicates: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            validate_data: true,
            skip_duplicates: true,
        }
    }
}

/// A rejected row; `line` counts the header as line 1
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Outcome counts. `successful == total - errors - duplicates`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportResults {
    pub total: usize,
    pub successful: usize,
    pub errors: usize,
    pub duplicates: usize,
    pub failures: Vec<RowError>,
}

impl ImportResults {
    fn reject(&mut self, line: usize, err: AppError) {
        let message = match err {
            AppError::Validation { message, .. } => message,
            other => other.to_string(),
        };
        tracing::warn!(line, message = %message, "Rejected import row");
        self.errors += 1;
        self.failures.push(RowError { line, message });
    }
}

// ============================================================================
// Column mapping
// ============================================================================

struct ColumnSpec {
    key: &'static str,
    aliases: &'static [&'static str],
    required: bool,
}

const fn column(key: &'static str, aliases: &'static [&'static str], required: bool) -> ColumnSpec {
    ColumnSpec { key, aliases, required }
}

const INVENTORY_COLUMNS: &[ColumnSpec] = &[
    column("sku", &["sku"], true),
    column("name", &["productname", "name"], true),
    column("category", &["category"], true),
    column("stock", &["stock", "currentstock"], true),
    column("min_stock", &["minstock", "minimumstock"], true),
    column("location", &["location"], true),
    column("price", &["price", "unitvalue", "value"], true),
    column("supplier", &["supplier"], false),
    column("last_updated", &["lastupdated"], false),
];

const STAFF_COLUMNS: &[ColumnSpec] = &[
    column("id", &["employeeid", "id"], true),
    column("name", &["name", "fullname"], true),
    column("email", &["email"], true),
    column("department", &["department"], true),
    column("position", &["position"], true),
    column("hire_date", &["hiredate"], true),
    column("phone", &["phone", "phonenumber"], false),
    column("status", &["status"], false),
    column("performance", &["performance", "performancerating"], false),
];

/// Header text reduced to lowercase alphanumerics, so "Min Stock",
/// "min_stock" and "MinStock" all match
fn header_key(header: &str) -> String {
    header
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

struct Columns {
    index: HashMap<&'static str, usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord, specs: &[ColumnSpec]) -> AppResult<Self> {
        let keys: Vec<String> = headers.iter().map(header_key).collect();
        let mut index = HashMap::new();
        for spec in specs {
            match keys.iter().position(|k| spec.aliases.contains(&k.as_str())) {
                Some(i) => {
                    index.insert(spec.key, i);
                }
                None if spec.required => {
                    return Err(AppError::validation(
                        "columns",
                        format!("Missing required column: {}", spec.key),
                    ))
                }
                None => {}
            }
        }
        Ok(Self { index })
    }

    /// Cell text, empty when the column or cell is absent
    fn get<'r>(&self, record: &'r StringRecord, key: &str) -> &'r str {
        self.index
            .get(key)
            .and_then(|&i| record.get(i))
            .map(str::trim)
            .unwrap_or("")
    }

    fn optional<'r>(&self, record: &'r StringRecord, key: &str) -> Option<&'r str> {
        Some(self.get(record, key)).filter(|v| !v.is_empty())
    }
}

fn reader(data: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data.as_bytes())
}

fn required<'r>(columns: &Columns, record: &'r StringRecord, key: &'static str) -> AppResult<&'r str> {
    let value = columns.get(record, key);
    if value.is_empty() {
        Err(AppError::validation(key, format!("{} is required", key)))
    } else {
        Ok(value)
    }
}

fn number<T: FromStr>(columns: &Columns, record: &StringRecord, key: &'static str) -> AppResult<T> {
    let raw = required(columns, record, key)?;
    raw.parse()
        .map_err(|_| AppError::validation(key, format!("{} must be a whole number, got '{}'", key, raw)))
}

fn rule(field: &'static str, result: Result<(), &'static str>) -> AppResult<()> {
    result.map_err(|msg| AppError::validation(field, msg))
}

// ============================================================================
// Row parsing
// ============================================================================

fn parse_inventory_row(
    columns: &Columns,
    record: &StringRecord,
    validate: bool,
    now: DateTime<Utc>,
) -> AppResult<InventoryItem> {
    let sku = required(columns, record, "sku")?;
    let name = required(columns, record, "name")?;
    let category = required(columns, record, "category")?;
    let stock: u32 = number(columns, record, "stock")?;
    let min_stock: u32 = number(columns, record, "min_stock")?;
    let location = parse_location(required(columns, record, "location")?)?;

    let raw_price = required(columns, record, "price")?;
    let price = Decimal::from_str(raw_price.trim_start_matches('$'))
        .map_err(|_| AppError::validation("price", format!("Price must be a number, got '{}'", raw_price)))?;

    let supplier = columns.optional(record, "supplier");
    let last_updated = match columns.optional(record, "last_updated") {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| AppError::validation("last_updated", format!("Invalid timestamp '{}'", raw)))?,
        None => now,
    };

    if validate {
        rule("sku", validate_sku(sku))?;
        rule("name", validate_no_control_chars(name))?;
        rule("category", validate_category(category))?;
        if price < Decimal::ZERO {
            return Err(AppError::validation("price", "Price cannot be negative"));
        }
        if let Some(supplier) = supplier {
            rule("supplier", validate_no_control_chars(supplier))?;
        }
    }

    Ok(InventoryItem {
        sku: sku.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        stock,
        min_stock,
        location,
        unit_value: price,
        last_updated,
        supplier: supplier.map(str::to_string),
    })
}

fn parse_staff_row(columns: &Columns, record: &StringRecord, validate: bool) -> AppResult<StaffMember> {
    let id = required(columns, record, "id")?;
    let name = required(columns, record, "name")?;
    let email = required(columns, record, "email")?;
    let department = Department::parse_label(required(columns, record, "department")?)?;
    let position = required(columns, record, "position")?;

    let raw_date = required(columns, record, "hire_date")?;
    let hire_date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d")
        .map_err(|_| AppError::validation("hire_date", format!("Hire date must be YYYY-MM-DD, got '{}'", raw_date)))?;

    let status = columns
        .optional(record, "status")
        .map(EmploymentStatus::parse_label)
        .transpose()?
        .unwrap_or(EmploymentStatus::Active);
    let performance = columns
        .optional(record, "performance")
        .map(Performance::parse_label)
        .transpose()?
        .unwrap_or(Performance::Good);
    let phone = columns.get(record, "phone");

    if validate {
        if employee_sequence(id).is_none() {
            return Err(AppError::validation("id", format!("Employee ID must look like EMP-001, got '{}'", id)));
        }
        rule("name", validate_no_control_chars(name))?;
        rule("email", validate_email(email))?;
        rule("position", validate_no_control_chars(position))?;
        if !phone.is_empty() {
            rule("phone", validate_phone(phone))?;
        }
    }

    Ok(StaffMember {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_lowercase(),
        phone: phone.to_string(),
        department,
        position: position.to_string(),
        status,
        hire_date,
        performance,
    })
}

/// Merge parsed rows into `existing`. A row whose key is already present
/// (in the collection or earlier in the file) is a duplicate: skipped, or
/// replacing the earlier record when duplicates are not skipped.
fn merge_rows<T, P, K>(
    existing: &[T],
    data: &str,
    specs: &[ColumnSpec],
    options: ImportOptions,
    mut parse: P,
    same: K,
) -> AppResult<(Vec<T>, ImportResults)>
where
    T: Clone,
    P: FnMut(&Columns, &StringRecord) -> AppResult<T>,
    K: Fn(&T, &T) -> bool,
{
    let mut rdr = reader(data);
    let columns = Columns::resolve(rdr.headers()?, specs)?;
    let mut records = existing.to_vec();
    let mut results = ImportResults::default();

    for (i, row) in rdr.records().enumerate() {
        let line = i + 2;
        let record = match row {
            Ok(record) if record.iter().all(str::is_empty) => continue,
            Ok(record) => record,
            Err(err) => {
                results.total += 1;
                results.reject(line, err.into());
                continue;
            }
        };
        results.total += 1;

        let parsed = match parse(&columns, &record) {
            Ok(parsed) => parsed,
            Err(err) => {
                results.reject(line, err);
                continue;
            }
        };

        match records.iter().position(|r| same(r, &parsed)) {
            Some(_) if options.skip_duplicates => {
                results.duplicates += 1;
            }
            Some(pos) => {
                records[pos] = parsed;
                results.successful += 1;
            }
            None => {
                records.push(parsed);
                results.successful += 1;
            }
        }
    }

    Ok((records, results))
}

/// Import inventory rows. Returns the service over the new snapshot.
pub fn import_inventory(
    inventory: &InventoryService,
    data: &str,
    options: ImportOptions,
    now: DateTime<Utc>,
) -> AppResult<(InventoryService, ImportResults)> {
    let (items, results) = merge_rows(
        inventory.items().as_slice(),
        data,
        INVENTORY_COLUMNS,
        options,
        |columns, record| parse_inventory_row(columns, record, options.validate_data, now),
        |a: &InventoryItem, b: &InventoryItem| a.sku.eq_ignore_ascii_case(&b.sku),
    )?;
    tracing::info!(
        total = results.total,
        successful = results.successful,
        errors = results.errors,
        duplicates = results.duplicates,
        "Inventory import finished"
    );
    Ok((inventory.with_items(Collection::new(items)), results))
}

/// Import staff rows. Matching id or email counts as a duplicate.
pub fn import_staff(staff: &StaffService, data: &str, options: ImportOptions) -> AppResult<(StaffService, ImportResults)> {
    let (members, results) = merge_rows(
        staff.staff().as_slice(),
        data,
        STAFF_COLUMNS,
        options,
        |columns, record| parse_staff_row(columns, record, options.validate_data),
        |a: &StaffMember, b: &StaffMember| a.id.eq_ignore_ascii_case(&b.id) || a.email.eq_ignore_ascii_case(&b.email),
    )?;
    tracing::info!(
        total = results.total,
        successful = results.successful,
        errors = results.errors,
        duplicates = results.duplicates,
        "Staff import finished"
    );
    Ok((StaffService::new(Collection::new(members)), results))
}

/// An import run tracked through the workflow contract
#[derive(Debug, Clone, Serialize)]
pub struct ImportJob {
    pub id: Uuid,
    pub entity: ImportEntity,
    pub options: ImportOptions,
    pub operation: Operation<ImportResults>,
}

impl ImportJob {
    pub fn new(entity: ImportEntity, options: ImportOptions) -> Self {
        Self {
            id: Uuid::new_v4(),
            entity,
            options,
            operation: Operation::pending(),
        }
    }

    fn expect_entity(&self, entity: ImportEntity) -> AppResult<()> {
        if self.entity == entity {
            Ok(())
        } else {
            Err(AppError::validation(
                "entity",
                format!("Job {} imports {}, not {}", self.id, self.entity.as_str(), entity.as_str()),
            ))
        }
    }

    fn settle<S>(&mut self, outcome: AppResult<(S, ImportResults)>) -> AppResult<S> {
        match outcome {
            Ok((service, results)) => {
                self.operation.succeed(results)?;
                Ok(service)
            }
            Err(err) => {
                self.operation.fail(err.to_string())?;
                Err(err)
            }
        }
    }

    pub fn run_inventory(
        &mut self,
        inventory: &InventoryService,
        data: &str,
        now: DateTime<Utc>,
    ) -> AppResult<InventoryService> {
        self.expect_entity(ImportEntity::Inventory)?;
        tracing::debug!(job = %self.id, "Inventory import started");
        let outcome = import_inventory(inventory, data, self.options, now);
        self.settle(outcome)
    }

    pub fn run_staff(&mut self, staff: &StaffService, data: &str) -> AppResult<StaffService> {
        self.expect_entity(ImportEntity::Staff)?;
        tracing::debug!(job = %self.id, "Staff import started");
        let outcome = import_staff(staff, data, self.options);
        self.settle(outcome)
    }

    pub fn results(&self) -> Option<&ImportResults> {
        self.operation.output()
    }
}
