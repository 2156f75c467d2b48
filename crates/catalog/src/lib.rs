//! Catalog domain module.
//!
//! Items the store sells, with the unit and default price copied onto receipt
//! lines when picked.

pub mod item;

pub use item::CatalogItem;
