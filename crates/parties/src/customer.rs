use serde::{Deserialize, Serialize};

use receiptdesk_core::{CustomerId, DomainError, DomainResult, Entity, Named};

/// A customer that receives deliveries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    id: CustomerId,
    name: String,
    #[serde(default)]
    address: Option<String>,
}

impl Customer {
    /// Register a customer. The name must not be blank; a blank address is
    /// stored as no address.
    pub fn new(id: CustomerId, name: impl Into<String>, address: Option<String>) -> DomainResult<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("customer name must not be empty"));
        }

        Ok(Self {
            id,
            name,
            address: normalize_address(address),
        })
    }

    pub fn id_typed(&self) -> CustomerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn rename(&mut self, name: impl Into<String>) -> DomainResult<()> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("customer name must not be empty"));
        }
        self.name = name;
        Ok(())
    }

    pub fn set_address(&mut self, address: Option<String>) {
        self.address = normalize_address(address);
    }

    /// Snapshot used by orders (id + display name at the time of the order).
    pub fn to_ref(&self) -> CustomerRef {
        CustomerRef {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Named for Customer {
    fn display_name(&self) -> &str {
        &self.name
    }
}

/// Customer reference embedded in an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRef {
    pub id: CustomerId,
    pub name: String,
}

fn normalize_address(address: Option<String>) -> Option<String> {
    address
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use receiptdesk_core::{DEFAULT_LOOKUP_LIMIT, search_by_name};

    #[test]
    fn rejects_blank_name() {
        let err = Customer::new(CustomerId::new(), "  ", None).unwrap_err();
        match err {
            DomainError::Validation(msg) if msg.contains("name") => {}
            other => panic!("Expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn blank_address_is_stored_as_none() {
        let c = Customer::new(CustomerId::new(), "Aling Nena", Some("   ".into())).unwrap();
        assert_eq!(c.address(), None);
    }

    #[test]
    fn to_ref_snapshots_id_and_name() {
        let c = Customer::new(CustomerId::new(), "Aling Nena", Some("Magay".into())).unwrap();
        let r = c.to_ref();
        assert_eq!(r.id, c.id_typed());
        assert_eq!(r.name, "Aling Nena");
    }

    #[test]
    fn customers_are_searchable_by_name() {
        let customers = vec![
            Customer::new(CustomerId::new(), "Aling Nena", None).unwrap(),
            Customer::new(CustomerId::new(), "Mang Tomas", None).unwrap(),
        ];
        let hits = search_by_name(&customers, "nena", DEFAULT_LOOKUP_LIMIT);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name(), "Aling Nena");
    }

    #[test]
    fn deserializes_without_address() {
        let id = CustomerId::new();
        let json = format!(r#"{{"id":"{id}","name":"Mang Tomas"}}"#);
        let c: Customer = serde_json::from_str(&json).unwrap();
        assert_eq!(c.address(), None);
        assert_eq!(c.id_typed(), id);
    }
}
