use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use receiptdesk_core::{DomainError, DomainResult, Entity, ItemId, Named};

/// A sellable catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    id: ItemId,
    name: String,
    #[serde(default)]
    unit: String,
    /// Default unit price, in currency units (not cents).
    #[serde(default)]
    unit_price: Decimal,
}

impl CatalogItem {
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        unit: impl Into<String>,
        unit_price: Decimal,
    ) -> DomainResult<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("item name must not be empty"));
        }
        if unit_price.is_sign_negative() && !unit_price.is_zero() {
            return Err(DomainError::validation("unit_price must not be negative"));
        }

        Ok(Self {
            id,
            name,
            unit: unit.into().trim().to_string(),
            unit_price,
        })
    }

    pub fn id_typed(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn reprice(&mut self, unit_price: Decimal) -> DomainResult<()> {
        if unit_price.is_sign_negative() && !unit_price.is_zero() {
            return Err(DomainError::validation("unit_price must not be negative"));
        }
        self.unit_price = unit_price;
        Ok(())
    }
}

impl Entity for CatalogItem {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Named for CatalogItem {
    fn display_name(&self) -> &str {
        &self.name
    }
}
