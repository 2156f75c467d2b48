//! `receiptdesk-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, the domain error model, money arithmetic and name lookup.

pub mod entity;
pub mod error;
pub mod id;
pub mod lookup;
pub mod money;

pub use entity::{Entity, find_by_id};
pub use error::{DomainError, DomainResult};
pub use id::{CustomerId, ItemId, OrderId};
pub use lookup::{DEFAULT_LOOKUP_LIMIT, Named, search_by_name};
pub use money::{format_money, format_quantity, round_money};
