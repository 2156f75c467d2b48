//! Delivery orders domain module.
//!
//! This crate contains the business rules for delivery receipts: line items and
//! their derived amounts, orders and their totals, and the view-state behind the
//! receipt form and the receipt list. Everything is deterministic domain logic
//! (no IO, no storage).

pub mod draft;
pub mod listing;
pub mod order;

pub use draft::{LinePatch, OrderDraft};
pub use listing::{DEFAULT_PAGE_SIZE, OrderBrowser, RowRange};
pub use order::{LineItem, Order};
