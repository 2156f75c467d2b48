//! Receipt form state.
//!
//! An [`OrderDraft`] is owned by the screen that edits a receipt. It keeps the
//! line amounts derived as the user types and turns into an [`Order`] on save.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use receiptdesk_catalog::CatalogItem;
use receiptdesk_core::{DomainError, DomainResult, OrderId};
use receiptdesk_parties::{Customer, CustomerRef};

use crate::order::{LineItem, Order, sum_amounts};

/// Partial update of a line; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinePatch {
    pub quantity: Option<Decimal>,
    pub unit: Option<String>,
    pub description: Option<String>,
    pub unit_price: Option<Decimal>,
}

/// Editable receipt (new or existing).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    id: Option<OrderId>,
    receipt_number: String,
    customer: Option<CustomerRef>,
    address: String,
    date: NaiveDate,
    delivered_by: String,
    lines: Vec<LineItem>,
}

impl OrderDraft {
    /// Fresh form dated `today` with a single blank row.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            id: None,
            receipt_number: String::new(),
            customer: None,
            address: String::new(),
            date: today,
            delivered_by: String::new(),
            lines: vec![LineItem::blank()],
        }
    }

    /// Form pre-filled from an existing order; saving keeps the order id.
    pub fn from_order(order: &Order) -> Self {
        let lines = if order.items().is_empty() {
            vec![LineItem::blank()]
        } else {
            order.items().to_vec()
        };

        Self {
            id: Some(order.id_typed()),
            receipt_number: order.receipt_number().to_string(),
            customer: order.customer().cloned(),
            address: order.address().to_string(),
            date: order.date(),
            delivered_by: order.delivered_by().to_string(),
            lines,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    pub fn receipt_number(&self) -> &str {
        &self.receipt_number
    }

    pub fn customer(&self) -> Option<&CustomerRef> {
        self.customer.as_ref()
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn delivered_by(&self) -> &str {
        &self.delivered_by
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn set_receipt_number(&mut self, value: impl Into<String>) {
        self.receipt_number = value.into();
    }

    pub fn set_address(&mut self, value: impl Into<String>) {
        self.address = value.into();
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    pub fn set_delivered_by(&mut self, value: impl Into<String>) {
        self.delivered_by = value.into();
    }

    /// Pick a customer. The delivery address is replaced by the customer's
    /// address (cleared when the customer has none).
    pub fn select_customer(&mut self, customer: &Customer) {
        self.customer = Some(customer.to_ref());
        self.address = customer.address().unwrap_or_default().to_string();
    }

    /// Merge a patch into a row. A patch whose amount is out of range leaves
    /// the row untouched.
    pub fn update_line(&mut self, idx: usize, patch: LinePatch) -> DomainResult<()> {
        let line = self.line_mut(idx)?;
        let mut updated = line.clone();
        if let Some(unit) = patch.unit {
            updated.set_unit(unit);
        }
        if let Some(description) = patch.description {
            updated.set_description(description);
        }
        if let Some(quantity) = patch.quantity {
            updated.set_quantity(quantity)?;
        }
        if let Some(unit_price) = patch.unit_price {
            updated.set_unit_price(unit_price)?;
        }
        *line = updated;
        Ok(())
    }

    /// Fill a row from a catalog pick: name, unit and default price.
    pub fn apply_catalog_item(&mut self, idx: usize, item: &CatalogItem) -> DomainResult<()> {
        self.update_line(
            idx,
            LinePatch {
                description: Some(item.name().to_string()),
                unit: Some(item.unit().to_string()),
                unit_price: Some(item.unit_price()),
                quantity: None,
            },
        )
    }

    /// Free-typed description (no catalog match).
    pub fn set_typed_description(&mut self, idx: usize, text: impl Into<String>) -> DomainResult<()> {
        self.line_mut(idx)?.set_description(text);
        Ok(())
    }

    pub fn add_row(&mut self) {
        self.lines.push(LineItem::blank());
    }

    /// Remove a row. The form never goes below one row: removing the last one
    /// leaves a blank row in its place.
    pub fn remove_line(&mut self, idx: usize) -> DomainResult<()> {
        if idx >= self.lines.len() {
            return Err(line_out_of_range(idx, self.lines.len()));
        }
        self.lines.remove(idx);
        if self.lines.is_empty() {
            self.lines.push(LineItem::blank());
        }
        Ok(())
    }

    pub fn total(&self) -> DomainResult<Decimal> {
        sum_amounts(&self.lines)
    }

    /// Validate and produce the order to persist. New drafts take `new_id`;
    /// edits keep their original id.
    pub fn submit(&self, new_id: OrderId) -> DomainResult<Order> {
        Order::new(
            self.id.unwrap_or(new_id),
            self.receipt_number.clone(),
            self.customer.clone(),
            self.address.clone(),
            self.date,
            self.delivered_by.clone(),
            self.lines.clone(),
        )
    }

    fn line_mut(&mut self, idx: usize) -> DomainResult<&mut LineItem> {
        let len = self.lines.len();
        self.lines
            .get_mut(idx)
            .ok_or_else(|| line_out_of_range(idx, len))
    }
}

fn line_out_of_range(idx: usize, len: usize) -> DomainError {
    DomainError::validation(format!("line {idx} out of range (lines: {len})"))
}
