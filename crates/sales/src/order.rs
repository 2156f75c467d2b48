use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use receiptdesk_core::{DomainError, DomainResult, Entity, OrderId, round_money};
use receiptdesk_parties::CustomerRef;

/// One row of a delivery receipt.
///
/// `amount` is always `round(quantity * unit_price, 2)`. It is recomputed on
/// every quantity/price change and on deserialisation; there is no way to set
/// it directly. A product that does not fit a `Decimal` is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LineItemRecord")]
pub struct LineItem {
    quantity: Decimal,
    unit: String,
    description: String,
    unit_price: Decimal,
    amount: Decimal,
}

impl LineItem {
    pub fn new(
        quantity: Decimal,
        unit: impl Into<String>,
        description: impl Into<String>,
        unit_price: Decimal,
    ) -> DomainResult<Self> {
        Ok(Self {
            quantity,
            unit: unit.into(),
            description: description.into(),
            unit_price,
            amount: line_amount(quantity, unit_price)?,
        })
    }

    /// The empty row a fresh receipt form starts with (qty 1, nothing else).
    pub fn blank() -> Self {
        Self {
            quantity: Decimal::ONE,
            unit: String::new(),
            description: String::new(),
            unit_price: Decimal::ZERO,
            amount: Decimal::ZERO,
        }
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Change the quantity. On overflow the line is left unchanged.
    pub fn set_quantity(&mut self, quantity: Decimal) -> DomainResult<()> {
        self.amount = line_amount(quantity, self.unit_price)?;
        self.quantity = quantity;
        Ok(())
    }

    /// Change the unit price. On overflow the line is left unchanged.
    pub fn set_unit_price(&mut self, unit_price: Decimal) -> DomainResult<()> {
        self.amount = line_amount(self.quantity, unit_price)?;
        self.unit_price = unit_price;
        Ok(())
    }

    pub fn set_unit(&mut self, unit: impl Into<String>) {
        self.unit = unit.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }
}

const AMOUNT_OUT_OF_RANGE: &str = "amount out of range";

fn line_amount(quantity: Decimal, unit_price: Decimal) -> DomainResult<Decimal> {
    quantity
        .checked_mul(unit_price)
        .map(round_money)
        .ok_or_else(|| DomainError::validation(AMOUNT_OUT_OF_RANGE))
}

/// Stored shape of a line item. Any stored `amount` is ignored.
#[derive(Deserialize)]
struct LineItemRecord {
    #[serde(default)]
    quantity: Decimal,
    #[serde(default)]
    unit: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    unit_price: Decimal,
}

impl TryFrom<LineItemRecord> for LineItem {
    type Error = DomainError;

    fn try_from(r: LineItemRecord) -> DomainResult<Self> {
        LineItem::new(r.quantity, r.unit, r.description, r.unit_price)
    }
}

/// A delivery order (one printed receipt).
///
/// `total` is the sum of the line amounts, recomputed whenever the lines are
/// replaced and on deserialisation. Stored orders go through the same checks
/// as new ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "OrderRecord")]
pub struct Order {
    id: OrderId,
    receipt_number: String,
    customer: Option<CustomerRef>,
    address: String,
    date: NaiveDate,
    delivered_by: String,
    items: Vec<LineItem>,
    total: Decimal,
}

impl Order {
    /// Build an order. The receipt number must not be blank.
    pub fn new(
        id: OrderId,
        receipt_number: impl Into<String>,
        customer: Option<CustomerRef>,
        address: impl Into<String>,
        date: NaiveDate,
        delivered_by: impl Into<String>,
        items: Vec<LineItem>,
    ) -> DomainResult<Self> {
        let receipt_number = receipt_number.into().trim().to_string();
        if receipt_number.is_empty() {
            return Err(DomainError::validation("enter receipt number"));
        }

        let total = sum_amounts(&items)?;
        Ok(Self {
            id,
            receipt_number,
            customer,
            address: address.into(),
            date,
            delivered_by: delivered_by.into(),
            items,
            total,
        })
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn receipt_number(&self) -> &str {
        &self.receipt_number
    }

    pub fn customer(&self) -> Option<&CustomerRef> {
        self.customer.as_ref()
    }

    /// Customer display name, empty when the order has no customer.
    pub fn customer_name(&self) -> &str {
        self.customer.as_ref().map(|c| c.name.as_str()).unwrap_or("")
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

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Swap in new lines. On overflow of the total the order is left unchanged.
    pub fn replace_items(&mut self, items: Vec<LineItem>) -> DomainResult<()> {
        self.total = sum_amounts(&items)?;
        self.items = items;
        Ok(())
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

pub(crate) fn sum_amounts(items: &[LineItem]) -> DomainResult<Decimal> {
    items
        .iter()
        .try_fold(Decimal::ZERO, |acc, line| acc.checked_add(line.amount()))
        .ok_or_else(|| DomainError::validation(AMOUNT_OUT_OF_RANGE))
}

#[derive(Deserialize)]
struct OrderRecord {
    id: OrderId,
    receipt_number: String,
    #[serde(default)]
    customer: Option<CustomerRef>,
    #[serde(default)]
    address: Option<String>,
    date: NaiveDate,
    #[serde(default)]
    delivered_by: Option<String>,
    #[serde(default)]
    items: Vec<LineItem>,
}

impl TryFrom<OrderRecord> for Order {
    type Error = DomainError;

    fn try_from(r: OrderRecord) -> DomainResult<Self> {
        Order::new(
            r.id,
            r.receipt_number,
            r.customer,
            r.address.unwrap_or_default(),
            r.date,
            r.delivered_by.unwrap_or_default(),
            r.items,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use receiptdesk_core::CustomerId;

    fn dec(num: i64, scale: u32) -> Decimal {
        Decimal::new(num, scale)
    }

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    fn test_customer() -> CustomerRef {
        CustomerRef {
            id: CustomerId::new(),
            name: "Aling Nena".to_string(),
        }
    }

    #[test]
    fn amount_is_quantity_times_price() {
        let line = LineItem::new(dec(3, 0), "sack", "Rice", dec(1250, 2)).unwrap();
        assert_eq!(line.amount(), dec(3750, 2));
    }

    #[test]
    fn zero_quantity_has_zero_amount() {
        let line = LineItem::new(Decimal::ZERO, "kg", "Sugar", dec(625, 1)).unwrap();
        assert_eq!(line.amount(), Decimal::ZERO);
    }

    #[test]
    fn amount_is_rounded_to_two_places() {
        let line = LineItem::new(dec(333, 3), "kg", "Garlic", dec(1999, 2)).unwrap();
        // 0.333 * 19.99 = 6.65667
        assert_eq!(line.amount(), dec(666, 2));
    }

    #[test]
    fn setters_recompute_amount() {
        let mut line = LineItem::new(dec(3, 0), "sack", "Rice", dec(1250, 2)).unwrap();
        line.set_quantity(dec(4, 0)).unwrap();
        assert_eq!(line.amount(), dec(50, 0));
        line.set_unit_price(dec(10, 0)).unwrap();
        assert_eq!(line.amount(), dec(40, 0));
        line.set_description("Rice (premium)");
        assert_eq!(line.amount(), dec(40, 0));
    }

    #[test]
    fn order_total_is_sum_of_amounts() {
        let items = vec![
            LineItem::new(dec(3, 0), "sack", "Rice", dec(1250, 2)).unwrap(),
            LineItem::new(dec(1, 0), "pc", "Bag", dec(10, 0)).unwrap(),
        ];
        let order = Order::new(
            OrderId::new(),
            "DR-0001",
            Some(test_customer()),
            "Magay",
            test_date(),
            "Jun",
            items,
        )
        .unwrap();
        assert_eq!(order.total(), dec(4750, 2));
        assert_eq!(order.customer_name(), "Aling Nena");
    }

    #[test]
    fn blank_receipt_number_is_rejected() {
        let err = Order::new(OrderId::new(), "  ", None, "", test_date(), "", vec![]).unwrap_err();
        match err {
            DomainError::Validation(msg) if msg.contains("receipt number") => {}
            other => panic!("Expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn replace_items_recomputes_total() {
        let mut order =
            Order::new(OrderId::new(), "DR-2", None, "", test_date(), "", vec![]).unwrap();
        assert_eq!(order.total(), Decimal::ZERO);
        order
            .replace_items(vec![LineItem::new(dec(2, 0), "", "Egg tray", dec(230, 0)).unwrap()])
            .unwrap();
        assert_eq!(order.total(), dec(460, 0));
    }

    #[test]
    fn deserialization_recomputes_amounts_and_total() {
        let id = OrderId::new();
        let json = format!(
            r#"{{
                "id": "{id}",
                "receipt_number": "DR-7",
                "customer": {{ "id": "{}", "name": "Mang Tomas", "address": "ignored" }},
                "address": null,
                "date": "2025-03-14",
                "items": [
                    {{ "quantity": 3, "unit": "sack", "description": "Rice", "unit_price": 12.5, "amount": 999 }},
                    {{ "quantity": 1, "unit": "", "description": "Bag", "unit_price": "10.00" }}
                ],
                "total": 1
            }}"#,
            CustomerId::new()
        );
        let order: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(order.items()[0].amount(), dec(3750, 2));
        assert_eq!(order.total(), dec(4750, 2));
        assert_eq!(order.address(), "");
        assert_eq!(order.delivered_by(), "");
        assert_eq!(order.customer_name(), "Mang Tomas");
    }

    #[test]
    fn overflowing_line_amount_is_rejected() {
        let err = LineItem::new(Decimal::MAX, "", "x", dec(2, 0)).unwrap_err();
        assert_eq!(err, DomainError::validation("amount out of range"));

        let mut line = LineItem::new(dec(3, 0), "sack", "Rice", dec(1250, 2)).unwrap();
        assert!(line.set_quantity(Decimal::MAX).is_err());
        assert_eq!(line.quantity(), dec(3, 0));
        assert_eq!(line.amount(), dec(3750, 2));
    }

    #[test]
    fn overflowing_total_is_rejected() {
        let huge = LineItem::new(Decimal::MAX, "", "x", Decimal::ONE).unwrap();
        let err = Order::new(
            OrderId::new(),
            "DR-9",
            None,
            "",
            test_date(),
            "",
            vec![huge.clone(), huge.clone()],
        )
        .unwrap_err();
        assert_eq!(err, DomainError::validation("amount out of range"));

        let mut order =
            Order::new(OrderId::new(), "DR-9", None, "", test_date(), "", vec![huge.clone()]).unwrap();
        assert!(order.replace_items(vec![huge.clone(), huge]).is_err());
        assert_eq!(order.items().len(), 1);
    }

    #[test]
    fn out_of_range_stored_line_fails_to_load() {
        let result = serde_json::from_str::<LineItem>(
            r#"{"quantity":"79228162514264337593543950335","unit":"","description":"x","unit_price":"2"}"#,
        );
        let err = result.unwrap_err();
        assert!(err.to_string().contains("amount out of range"), "{err}");
    }

    #[test]
    fn stored_order_without_receipt_number_fails_to_load() {
        let json = format!(
            r#"{{ "id": "{}", "receipt_number": "   ", "date": "2025-03-14" }}"#,
            OrderId::new()
        );
        let err = serde_json::from_str::<Order>(&json).unwrap_err();
        assert!(err.to_string().contains("enter receipt number"), "{err}");
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: amount always equals quantity * price rounded to cents.
        #[test]
        fn amount_matches_rounded_product(
            qty_milli in 0i64..1_000_000i64,
            price_cents in 0i64..10_000_000i64,
        ) {
            let qty = Decimal::new(qty_milli, 3);
            let price = Decimal::new(price_cents, 2);
            let line = LineItem::new(qty, "u", "d", price).unwrap();
            prop_assert_eq!(line.amount(), round_money(qty * price));
        }

        /// Property: order total equals the sum of its line amounts.
        #[test]
        fn total_matches_sum_of_lines(
            lines in prop::collection::vec((0i64..10_000i64, 0i64..100_000i64), 0..20)
        ) {
            let items: Vec<LineItem> = lines
                .iter()
                .map(|(q, p)| LineItem::new(Decimal::new(*q, 1), "", "x", Decimal::new(*p, 2)).unwrap())
                .collect();
            let expected: Decimal = items.iter().map(|l| l.amount()).sum();
            let order = Order::new(OrderId::new(), "R", None, "", test_date(), "", items).unwrap();
            prop_assert_eq!(order.total(), expected);
        }
    }
}
