//! Print configuration.
//!
//! Defaults reproduce the store's printed receipts. Deployments override the
//! store header, currency and resolution through `RECEIPTDESK_*` environment
//! variables.

use serde::{Deserialize, Serialize};

use crate::geometry::SheetTemplate;

pub const ENV_STORE_NAME: &str = "RECEIPTDESK_STORE_NAME";
pub const ENV_STORE_PHONE: &str = "RECEIPTDESK_STORE_PHONE";
pub const ENV_STORE_ADDRESS: &str = "RECEIPTDESK_STORE_ADDRESS";
pub const ENV_CURRENCY: &str = "RECEIPTDESK_CURRENCY";
pub const ENV_DPI: &str = "RECEIPTDESK_DPI";

/// Fixed text printed at the top of every receipt page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreHeader {
    pub name: String,
    pub phone: String,
    pub address: String,
}

impl Default for StoreHeader {
    fn default() -> Self {
        Self {
            name: "ORINE STORE".to_string(),
            phone: "09665345671".to_string(),
            address: "JS ALANO STREET, MAGAY PUBLIC MARKET, ZAMBOANGA CITY".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintConfig {
    pub store: StoreHeader,
    /// Prefix for every monetary value.
    pub currency_symbol: String,
    pub sheet: SheetTemplate,
    /// Open the host print dialog as soon as the document loads.
    pub auto_print: bool,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            store: StoreHeader::default(),
            currency_symbol: "₱".to_string(),
            sheet: SheetTemplate::a4(),
            auto_print: true,
        }
    }
}

impl PrintConfig {
    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Overlay values from a key lookup. Blank values are ignored; an
    /// unparsable resolution is logged and ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(v) = get(ENV_STORE_NAME) {
            self.store.name = v;
        }
        if let Some(v) = get(ENV_STORE_PHONE) {
            self.store.phone = v;
        }
        if let Some(v) = get(ENV_STORE_ADDRESS) {
            self.store.address = v;
        }
        if let Some(v) = get(ENV_CURRENCY) {
            self.currency_symbol = v;
        }
        if let Some(v) = get(ENV_DPI) {
            match v.parse::<f32>() {
                Ok(dpi) if dpi.is_finite() && dpi > 0.0 => self.sheet.dpi = dpi,
                _ => tracing::warn!(key = ENV_DPI, value = %v, "ignoring invalid dpi"),
            }
        }

        self
    }
}
