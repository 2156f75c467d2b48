//! Records with a stable identity.

use crate::error::{DomainError, DomainResult};

/// A record that keeps its identity while its fields are edited.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}

/// Look a record up by id among already loaded records.
pub fn find_by_id<'a, E: Entity>(records: &'a [E], id: &E::Id) -> DomainResult<&'a E> {
    records
        .iter()
        .find(|r| r.id() == id)
        .ok_or_else(DomainError::not_found)
}
