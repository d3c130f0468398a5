//! Order service: tab views, summaries, the order -> shipment join and
//! the new order form

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::seed::{seed_orders, seed_shipments};
use shared::{
    apply_filters, Customer, FilterState, InventoryItem, Labeled, Order, OrderStatus, OrderSummary, Priority,
    Shipment,
};

use crate::error::{AppError, AppResult};
use crate::store::Collection;

/// Tabs across the top of the orders view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderTab {
    All,
    Pending,
    Processing,
    Ready,
    Shipped,
}

impl OrderTab {
    pub const ALL_TABS: [OrderTab; 5] = [
        OrderTab::All,
        OrderTab::Pending,
        OrderTab::Processing,
        OrderTab::Ready,
        OrderTab::Shipped,
    ];

    /// Status shown on this tab; `None` for the all-orders tab
    pub fn status(&self) -> Option<OrderStatus> {
        match self {
            OrderTab::All => None,
            OrderTab::Pending => Some(OrderStatus::Pending),
            OrderTab::Processing => Some(OrderStatus::Processing),
            OrderTab::Ready => Some(OrderStatus::ReadyToShip),
            OrderTab::Shipped => Some(OrderStatus::Shipped),
        }
    }

    pub fn parse(raw: &str) -> AppResult<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "all" | "" => Ok(OrderTab::All),
            "pending" => Ok(OrderTab::Pending),
            "processing" => Ok(OrderTab::Processing),
            "ready" | "ready-to-ship" | "ready_to_ship" => Ok(OrderTab::Ready),
            "shipped" => Ok(OrderTab::Shipped),
            other => Err(AppError::validation("tab", format!("Unknown order tab: {}", other))),
        }
    }
}

/// Tab label with its badge count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabCount {
    pub tab: OrderTab,
    pub count: usize,
}

/// Order service over immutable order and shipment snapshots
#[derive(Debug, Clone)]
pub struct OrderService {
    orders: Collection<Order>,
    shipments: Collection<Shipment>,
}

impl OrderService {
    /// Create a new OrderService instance
    pub fn new(orders: Collection<Order>, shipments: Collection<Shipment>) -> Self {
        Self { orders, shipments }
    }

    pub fn seeded() -> Self {
        Self::new(Collection::new(seed_orders()), Collection::new(seed_shipments()))
    }

    pub fn orders(&self) -> &Collection<Order> {
        &self.orders
    }

    pub fn list(&self, filter: &FilterState) -> Vec<Order> {
        let orders = apply_filters(self.orders.as_slice(), filter);
        tracing::debug!(matched = orders.len(), total = self.orders.len(), "Listed orders");
        orders
    }

    /// Orders on one tab, narrowed by the search and filters
    pub fn tab(&self, tab: OrderTab, filter: &FilterState) -> Vec<Order> {
        let scoped = match tab.status() {
            Some(status) => filter.merged(&FilterState::new().with_eq("status", status.label())),
            None => filter.clone(),
        };
        self.list(&scoped)
    }

    /// Badge counts; always over the full order list
    pub fn tab_counts(&self) -> Vec<TabCount> {
        OrderTab::ALL_TABS
            .iter()
            .map(|&tab| TabCount {
                tab,
                count: match tab.status() {
                    Some(status) => self.orders.iter().filter(|o| o.status == status).count(),
                    None => self.orders.len(),
                },
            })
            .collect()
    }

    pub fn summary(&self, filter: &FilterState) -> OrderSummary {
        OrderSummary::from_orders(&self.list(filter))
    }

    pub fn get(&self, id: &str) -> AppResult<&Order> {
        let id = id.trim();
        self.orders
            .find(|o| o.id.eq_ignore_ascii_case(id))
            .ok_or_else(|| AppError::NotFound(format!("Order {}", id)))
    }

    /// Shipment created for an order, if any
    pub fn shipment_for(&self, order_id: &str) -> AppResult<Option<&Shipment>> {
        let order = self.get(order_id)?;
        Ok(self.shipments.find(|s| s.order_id == order.id))
    }

    /// Open orders past their due date
    pub fn overdue(&self, today: NaiveDate) -> Vec<&Order> {
        self.orders.iter().filter(|o| o.is_overdue(today)).collect()
    }

    /// Move an order along its fulfillment path
    pub fn update_status(&self, id: &str, next: OrderStatus) -> AppResult<Self> {
        let order = self.get(id)?;
        if !can_transition(order.status, next) {
            tracing::warn!(order = %order.id, from = %order.status, to = %next, "Rejected order status change");
            return Err(AppError::InvalidStateTransition(format!(
                "Order {} cannot move from {} to {}",
                order.id, order.status, next
            )));
        }

        let target = order.id.clone();
        let orders = self
            .orders
            .with_updated(|o| o.id == target, |o| Order { status: next, ..o.clone() })
            .ok_or_else(|| AppError::NotFound(format!("Order {}", target)))?;

        tracing::info!(order = %target, status = %next, "Order status updated");
        Ok(Self {
            orders,
            shipments: self.shipments.clone(),
        })
    }

    /// Next id in the `ORD-<n>` sequence
    pub fn next_order_id(&self) -> String {
        let last = self
            .orders
            .iter()
            .filter_map(|o| o.id.strip_prefix("ORD-")?.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        format!("ORD-{}", last + 1)
    }

    /// Submit a draft as a new pending order
    pub fn place_order(&self, draft: &OrderDraft, today: NaiveDate) -> AppResult<(Self, Order)> {
        let customer = draft
            .customer()
            .ok_or_else(|| AppError::validation("customer", "Select a customer"))?;
        if draft.lines().is_empty() {
            return Err(AppError::validation("items", "Add at least one item"));
        }
        let due_date = draft
            .due_date
            .ok_or_else(|| AppError::validation("due_date", "Due date is required"))?;
        if due_date < today {
            return Err(AppError::validation("due_date", "Due date cannot be in the past"));
        }

        let order = Order {
            id: self.next_order_id(),
            customer: customer.name.clone(),
            customer_email: customer.email.clone(),
            items: draft.units(),
            total: draft.total(),
            status: OrderStatus::Pending,
            priority: draft.priority,
            date: today,
            due_date,
            assigned_to: UNASSIGNED.to_string(),
        };

        tracing::info!(order = %order.id, customer = %order.customer, total = %order.total, "Order placed");
        let service = Self {
            orders: self.orders.with_pushed(order.clone()),
            shipments: self.shipments.clone(),
        };
        Ok((service, order))
    }
}

/// Assignee of a freshly placed order
pub const UNASSIGNED: &str = "Unassigned";

/// One product line on the new order form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLine {
    pub sku: String,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    /// Stock on hand when the line was added; caps the quantity
    pub available: u32,
}

impl OrderLine {
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// State of the new order form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDraft {
    customer: Option<Customer>,
    lines: Vec<OrderLine>,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
}

impl Default for OrderDraft {
    fn default() -> Self {
        Self {
            customer: None,
            lines: Vec::new(),
            priority: Priority::Medium,
            due_date: None,
        }
    }
}

impl OrderDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Customers whose name or email contains the query
    pub fn search_customers(customers: &[Customer], query: &str) -> Vec<Customer> {
        apply_filters(customers, &FilterState::new().with_search(query))
    }

    /// Items whose name or SKU contains the query
    pub fn search_items(items: &[InventoryItem], query: &str) -> Vec<InventoryItem> {
        apply_filters(items, &FilterState::new().with_search(query))
    }

    pub fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    pub fn select_customer(&mut self, customer: Customer) {
        self.customer = Some(customer);
    }

    pub fn clear_customer(&mut self) {
        self.customer = None;
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Add one unit of an item; adding an item already on the order bumps its quantity
    pub fn add_item(&mut self, item: &InventoryItem) -> AppResult<()> {
        match self.lines.iter().position(|l| l.sku == item.sku) {
            Some(index) => {
                let quantity = self.lines[index].quantity.saturating_add(1);
                self.set_quantity(&item.sku, i64::from(quantity))
            }
            None => {
                if item.stock == 0 {
                    return Err(AppError::InsufficientStock(format!("{} is out of stock", item.name)));
                }
                self.lines.push(OrderLine {
                    sku: item.sku.clone(),
                    name: item.name.clone(),
                    unit_price: item.unit_value,
                    quantity: 1,
                    available: item.stock,
                });
                Ok(())
            }
        }
    }

    /// Change a line's quantity; zero or less removes the line
    pub fn set_quantity(&mut self, sku: &str, quantity: i64) -> AppResult<()> {
        let index = self
            .lines
            .iter()
            .position(|l| l.sku == sku)
            .ok_or_else(|| AppError::NotFound(format!("Order line {}", sku)))?;
        if quantity <= 0 {
            self.lines.remove(index);
            return Ok(());
        }

        let line = &mut self.lines[index];
        match u32::try_from(quantity) {
            Ok(quantity) if quantity <= line.available => {
                line.quantity = quantity;
                Ok(())
            }
            _ => Err(AppError::InsufficientStock(format!(
                "Only {} units of {} available",
                line.available, line.name
            ))),
        }
    }

    pub fn remove_item(&mut self, sku: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.sku != sku);
        self.lines.len() != before
    }

    /// Sum of price x quantity
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(OrderLine::subtotal).sum()
    }

    pub fn units(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// The submit button needs a customer and at least one line
    pub fn can_submit(&self) -> bool {
        self.customer.is_some() && !self.lines.is_empty()
    }
}

/// Allowed order status changes
pub fn can_transition(from: OrderStatus, to: OrderStatus) -> bool {
    use OrderStatus::*;
    matches!(
        (from, to),
        (Pending, Processing)
            | (Pending, Cancelled)
            | (Processing, ReadyToShip)
            | (Processing, Cancelled)
            | (ReadyToShip, Shipped)
            | (Shipped, Delivered)
    )
}
