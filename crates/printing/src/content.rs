//! Text content of a receipt page.
//!
//! Both the measurement surface and the HTML renderer work from the same
//! [`ReceiptContent`], so what is measured is exactly what gets printed.

use receiptdesk_core::{format_money, format_quantity};

use crate::config::StoreHeader;
use crate::page::Page;

pub const COLUMN_HEADERS: [&str; 5] = ["#", "Description", "Qty", "Price", "Amount"];

pub const RECEIPT_TITLE: &str = "Delivery Receipt";
pub const CONTINUATION_MARK: &str = "(cont.)";
pub const PHONE_MARK: &str = "📞";
pub const SIGNATURE_NOTE: &str = "Received the above merchandise in good order,";
pub const SIGNATURE_LINE: &str = "Customer / Authorized Representative";

/// One table row, already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowContent {
    pub number: String,
    pub description: String,
    pub quantity: String,
    pub price: String,
    pub amount: String,
}

impl RowContent {
    pub fn cells(&self) -> [&str; 5] {
        [
            self.number.as_str(),
            self.description.as_str(),
            self.quantity.as_str(),
            self.price.as_str(),
            self.amount.as_str(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptContent {
    pub store_name: String,
    pub store_phone: String,
    pub store_address: String,
    /// `Delivery Receipt`, with `(cont.)` on continuation pages.
    pub title: String,
    pub customer_name: String,
    pub address: String,
    pub reference: String,
    pub date: String,
    pub rows: Vec<RowContent>,
    /// Formatted order total; present on the order's last page only.
    pub total: Option<String>,
}

impl ReceiptContent {
    pub fn build(page: &Page<'_>, store: &StoreHeader, currency: &str) -> Self {
        let order = page.order();
        let title = if page.is_continuation() {
            format!("{RECEIPT_TITLE} {CONTINUATION_MARK}")
        } else {
            RECEIPT_TITLE.to_string()
        };

        let rows = page
            .numbered_items()
            .map(|(number, item)| RowContent {
                number: number.to_string(),
                description: item.description().to_string(),
                quantity: format!("{} {}", format_quantity(item.quantity()), item.unit())
                    .trim_end()
                    .to_string(),
                price: format_money(item.unit_price(), currency),
                amount: format_money(item.amount(), currency),
            })
            .collect();

        Self {
            store_name: store.name.clone(),
            store_phone: store.phone.clone(),
            store_address: store.address.clone(),
            title,
            customer_name: order.customer_name().to_string(),
            address: order.address().to_string(),
            reference: order.receipt_number().to_string(),
            date: order.date().format("%Y-%m-%d").to_string(),
            rows,
            total: page
                .is_last_page()
                .then(|| format_money(order.total(), currency)),
        }
    }

    pub fn phone_line(&self) -> String {
        format!("{PHONE_MARK} {}", self.store_phone)
    }

    pub fn customer_line(&self) -> String {
        format!("Customer: {}", self.customer_name)
    }

    pub fn reference_line(&self) -> String {
        format!("Ref: {}", self.reference)
    }

    pub fn date_line(&self) -> String {
        format!("Date: {}", self.date)
    }

    pub fn total_line(&self) -> Option<String> {
        self.total.as_ref().map(|t| format!("TOTAL: {t}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use receiptdesk_core::{CustomerId, OrderId};
    use receiptdesk_parties::CustomerRef;
    use receiptdesk_sales::{LineItem, Order};
    use rust_decimal::Decimal;

    fn order() -> Order {
        Order::new(
            OrderId::new(),
            "DR-0042",
            Some(CustomerRef {
                id: CustomerId::new(),
                name: "Aling Nena".into(),
            }),
            "Magay",
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            "Jun",
            vec![
                LineItem::new(Decimal::new(3, 0), "sack", "Rice", Decimal::new(1250, 2)).unwrap(),
                LineItem::new(Decimal::new(15, 1), "", "Sugar", Decimal::new(10, 0)).unwrap(),
            ],
        )
        .unwrap()
    }

    #[test]
    fn first_page_content() {
        let order = order();
        let page = Page::new(&order, 0..1, 0, false, false);
        let content = ReceiptContent::build(&page, &StoreHeader::default(), "₱");

        assert_eq!(content.title, "Delivery Receipt");
        assert_eq!(content.customer_line(), "Customer: Aling Nena");
        assert_eq!(content.reference_line(), "Ref: DR-0042");
        assert_eq!(content.date_line(), "Date: 2025-03-14");
        assert_eq!(content.rows.len(), 1);
        assert_eq!(
            content.rows[0].cells(),
            ["1", "Rice", "3 sack", "₱12.50", "₱37.50"]
        );
        assert!(content.total.is_none());
    }

    #[test]
    fn continuation_page_content() {
        let order = order();
        let page = Page::new(&order, 1..2, 1, true, true);
        let content = ReceiptContent::build(&page, &StoreHeader::default(), "₱");

        assert_eq!(content.title, "Delivery Receipt (cont.)");
        assert_eq!(content.rows[0].number, "2");
        assert_eq!(content.rows[0].quantity, "1.5");
        assert_eq!(content.total_line().as_deref(), Some("TOTAL: ₱52.50"));
    }
}
