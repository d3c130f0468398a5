//! Filter and search engine shared by every list view
//!
//! A [`FilterState`] holds an optional free-text search plus a map of
//! filter key to constraint. Every active constraint is ANDed with the
//! search; empty constraints are ignored. Filtering never reorders or
//! mutates the input.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Customer, InventoryItem, Order, Shipment, StaffMember};
use crate::types::{slugify, DateRange, Labeled};

/// Option value meaning "no constraint" on select inputs
pub const ALL_OPTION: &str = "all";

/// A field value exposed to the filter engine
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(Decimal),
    Date(NaiveDate),
}

impl FieldValue {
    fn as_search_text(&self) -> String {
        match self {
            FieldValue::Text(text) => text.to_lowercase(),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Date(d) => d.to_string(),
        }
    }

    fn equals_option(&self, option: &str) -> bool {
        match self {
            FieldValue::Text(text) => slugify(text) == slugify(option),
            FieldValue::Number(n) => option.trim().parse::<Decimal>().map_or(false, |o| o == *n),
            FieldValue::Date(d) => option.trim().parse::<NaiveDate>().map_or(false, |o| o == *d),
        }
    }

    fn at_least(&self, bound: &RangeBound) -> bool {
        match (self, bound) {
            (FieldValue::Number(n), RangeBound::Number(b)) => n >= b,
            (FieldValue::Date(d), RangeBound::Date(b)) => d >= b,
            _ => false,
        }
    }

    fn at_most(&self, bound: &RangeBound) -> bool {
        match (self, bound) {
            (FieldValue::Number(n), RangeBound::Number(b)) => n <= b,
            (FieldValue::Date(d), RangeBound::Date(b)) => d <= b,
            _ => false,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        FieldValue::Number(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Number(Decimal::from(value))
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

/// One end of a range filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RangeBound {
    Date(NaiveDate),
    Number(Decimal),
}

impl From<Decimal> for RangeBound {
    fn from(value: Decimal) -> Self {
        RangeBound::Number(value)
    }
}

impl From<u32> for RangeBound {
    fn from(value: u32) -> Self {
        RangeBound::Number(Decimal::from(value))
    }
}

impl From<NaiveDate> for RangeBound {
    fn from(value: NaiveDate) -> Self {
        RangeBound::Date(value)
    }
}

/// A single filter constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// Select input: equality against one option
    Scalar(String),
    /// Checkbox group: membership in the selected options
    Set(BTreeSet<String>),
    /// Inclusive range; an absent bound is open on that side
    Range {
        #[serde(default)]
        from: Option<RangeBound>,
        #[serde(default)]
        to: Option<RangeBound>,
    },
}

impl FilterValue {
    /// True when the constraint admits every record
    pub fn is_noop(&self) -> bool {
        match self {
            FilterValue::Scalar(option) => {
                let option = option.trim();
                option.is_empty() || option.eq_ignore_ascii_case(ALL_OPTION)
            }
            FilterValue::Set(options) => options.is_empty(),
            FilterValue::Range { from, to } => from.is_none() && to.is_none(),
        }
    }

    fn admits(&self, field: Option<&FieldValue>) -> bool {
        if self.is_noop() {
            return true;
        }
        let Some(field) = field else {
            return false;
        };
        match self {
            FilterValue::Scalar(option) => field.equals_option(option),
            FilterValue::Set(options) => options.iter().any(|option| field.equals_option(option)),
            FilterValue::Range { from, to } => {
                from.as_ref().map_or(true, |b| field.at_least(b)) && to.as_ref().map_or(true, |b| field.at_most(b))
            }
        }
    }
}

/// Search text and filter constraints for one list view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub filters: BTreeMap<String, FilterValue>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }

    /// Equality against a single option
    pub fn with_eq(mut self, key: &str, option: impl Into<String>) -> Self {
        self.set(key, FilterValue::Scalar(option.into()));
        self
    }

    /// Membership in a set of options
    pub fn with_any_of<I, S>(mut self, key: &str, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set(key, FilterValue::Set(options.into_iter().map(Into::into).collect()));
        self
    }

    pub fn with_range(mut self, key: &str, from: Option<RangeBound>, to: Option<RangeBound>) -> Self {
        self.set(key, FilterValue::Range { from, to });
        self
    }

    pub fn with_date_range(self, key: &str, range: DateRange) -> Self {
        self.with_range(key, Some(range.start.into()), Some(range.end.into()))
    }

    pub fn set(&mut self, key: &str, value: FilterValue) {
        self.filters.insert(normalize_key(key), value);
    }

    pub fn clear(&mut self, key: &str) {
        self.filters.remove(&normalize_key(key));
    }

    /// Drop the search and every constraint
    pub fn reset(&mut self) {
        self.search = None;
        self.filters.clear();
    }

    /// Search text, if it constrains anything
    pub fn search_text(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    /// Keys whose constraints currently exclude records
    pub fn active_keys(&self) -> Vec<&str> {
        self.filters
            .iter()
            .filter(|(_, value)| !value.is_noop())
            .map(|(key, _)| key.as_str())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.search_text().is_none() && self.active_keys().is_empty()
    }

    /// Combine two states; `other` wins on shared keys and on search
    pub fn merged(&self, other: &FilterState) -> FilterState {
        let mut filters = self.filters.clone();
        filters.extend(other.filters.iter().map(|(k, v)| (k.clone(), v.clone())));
        FilterState {
            search: other.search.clone().or_else(|| self.search.clone()),
            filters,
        }
    }
}

/// Canonical filter key: snake_case, so `minStock` and `min-stock` both become `min_stock`.
///
/// Acronyms stay one word: `SKU` is `sku`, `orderID` is `order_id`.
pub fn normalize_key(key: &str) -> String {
    let chars: Vec<char> = key.trim().chars().collect();
    let mut normalized = String::with_capacity(chars.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let starts_word = match prev {
                Some(p) if p.is_ascii_lowercase() || p.is_ascii_digit() => true,
                // last capital of an acronym that runs into a word: `SKUCode`
                Some(p) if p.is_ascii_uppercase() => next.is_some_and(|n| n.is_ascii_lowercase()),
                _ => false,
            };
            if starts_word && !normalized.ends_with('_') {
                normalized.push('_');
            }
            normalized.push(c.to_ascii_lowercase());
        } else if c == '-' || c.is_whitespace() {
            normalized.push('_');
        } else {
            normalized.push(c);
        }
    }
    normalized
}

/// A record the filter engine can inspect
pub trait Filterable {
    /// Field keys matched by free-text search
    const SEARCH_FIELDS: &'static [&'static str];

    /// Value of a field by snake_case key; `None` when absent or unknown
    fn field(&self, key: &str) -> Option<FieldValue>;
}

/// Whether one record satisfies every constraint in `query`
pub fn matches<T: Filterable>(item: &T, query: &FilterState) -> bool {
    if let Some(needle) = query.search_text() {
        let needle = needle.to_lowercase();
        let found = T::SEARCH_FIELDS
            .iter()
            .filter_map(|key| item.field(key))
            .any(|value| value.as_search_text().contains(&needle));
        if !found {
            return false;
        }
    }

    query
        .filters
        .iter()
        .all(|(key, constraint)| constraint.admits(item.field(&normalize_key(key)).as_ref()))
}

/// Records satisfying `query`, in their original order
pub fn filter_refs<'a, T: Filterable>(items: &'a [T], query: &FilterState) -> Vec<&'a T> {
    items.iter().filter(|item| matches(*item, query)).collect()
}

/// Owned copy of the records satisfying `query`, in their original order
pub fn apply_filters<T: Filterable + Clone>(items: &[T], query: &FilterState) -> Vec<T> {
    items.iter().filter(|item| matches(*item, query)).cloned().collect()
}

fn text(value: &str) -> Option<FieldValue> {
    Some(FieldValue::Text(value.to_string()))
}

fn label<L: Labeled>(value: L) -> Option<FieldValue> {
    Some(FieldValue::Text(value.label().to_string()))
}

impl Filterable for InventoryItem {
    const SEARCH_FIELDS: &'static [&'static str] = &["sku", "name"];

    fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "sku" | "id" => text(&self.sku),
            "name" => text(&self.name),
            "category" => text(&self.category),
            "stock" => Some(self.stock.into()),
            "min_stock" => Some(self.min_stock.into()),
            "status" | "stock_status" => label(self.status()),
            "location" => text(&self.location.code()),
            "aisle" => Some(FieldValue::Text(self.location.primary_aisle().to_string())),
            "unit_value" | "value" => Some(self.unit_value.into()),
            "total_value" => Some(self.total_value().into()),
            "last_updated" => Some(self.last_updated.date_naive().into()),
            "supplier" => self.supplier.as_deref().and_then(text),
            _ => None,
        }
    }
}

impl Filterable for Order {
    const SEARCH_FIELDS: &'static [&'static str] = &["id", "customer", "customer_email"];

    fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "id" | "order_id" => text(&self.id),
            "customer" => text(&self.customer),
            "customer_email" => text(&self.customer_email),
            "items" => Some(self.items.into()),
            "total" | "order_value" | "value" => Some(self.total.into()),
            "status" => label(self.status),
            "priority" => label(self.priority),
            "date" | "order_date" => Some(self.date.into()),
            "due_date" => Some(self.due_date.into()),
            "assigned_to" => text(&self.assigned_to),
            _ => None,
        }
    }
}

impl Filterable for Shipment {
    const SEARCH_FIELDS: &'static [&'static str] = &["id", "order_id", "customer", "tracking_number"];

    fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "id" | "shipment_id" => text(&self.id),
            "order_id" => text(&self.order_id),
            "customer" => text(&self.customer),
            "destination" | "region" => self.region().and_then(label),
            "city" => text(&self.destination),
            "carrier" => label(self.carrier),
            "tracking_number" => text(&self.tracking_number),
            "status" => label(self.status),
            "items" => Some(self.items.into()),
            "weight" | "weight_lbs" => Some(self.weight_lbs.into()),
            "shipped_date" => self.shipped_date.map(Into::into),
            "estimated_delivery" => Some(self.estimated_delivery.into()),
            "actual_delivery" => self.actual_delivery.map(Into::into),
            "service_type" => self.service_type.as_deref().and_then(text),
            _ => None,
        }
    }
}

impl Filterable for Customer {
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "email"];

    fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "id" | "customer_id" => text(&self.id),
            "name" => text(&self.name),
            "email" => text(&self.email),
            "phone" => text(&self.phone),
            _ => None,
        }
    }
}

impl Filterable for StaffMember {
    const SEARCH_FIELDS: &'static [&'static str] = &["id", "name", "email"];

    fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "id" | "employee_id" => text(&self.id),
            "name" => text(&self.name),
            "email" => text(&self.email),
            "phone" => text(&self.phone),
            "department" => label(self.department),
            "position" => text(&self.position),
            "status" => label(self.status),
            "hire_date" => Some(self.hire_date.into()),
            "performance" => label(self.performance),
            _ => None,
        }
    }
}
