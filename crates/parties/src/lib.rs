//! Parties domain module (customers).
//!
//! This crate contains business rules for the customers receipts are delivered
//! to, implemented purely as deterministic domain logic (no IO, no storage).

pub mod customer;

pub use customer::{Customer, CustomerRef};
