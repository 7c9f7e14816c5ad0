//! Registry operations orchestrating validation, rating and the store.

use crate::domain::{Ship, ShipPayload};
use crate::error::{Result, StarportError};
use crate::query::{ShipFilter, ShipQuery};
use crate::store::ShipStore;
use crate::validate::{apply_update, assemble_new_ship};

/// The ship registry, generic over a store capability.
#[derive(Debug, Clone)]
pub struct Registry<S: ShipStore> {
    store: S,
}

impl<S: ShipStore> Registry<S> {
    /// Wrap a store capability.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Page of ships matching the query.
    pub fn list(&self, query: &ShipQuery) -> Result<Vec<Ship>> {
        Ok(query.select(self.store.find_all()?))
    }

    /// Filtered record count, ignoring sort and pagination.
    pub fn count(&self, filter: &ShipFilter) -> Result<usize> {
        Ok(filter.count(&self.store.find_all()?))
    }

    /// Validate and persist a new ship; the store assigns the id.
    pub fn create(&self, payload: ShipPayload) -> Result<Ship> {
        self.store.insert(assemble_new_ship(payload)?)
    }

    /// Fetch a ship by id.
    pub fn get(&self, id: i64) -> Result<Ship> {
        self.store
            .find_by_id(id)?
            .ok_or(StarportError::NotFound(id))
    }

    /// Apply a partial update and persist the record with its recomputed
    /// rating.
    ///
    /// Existence is checked before the payload is validated, so an unknown id
    /// reports NotFound even when the body is invalid.
    pub fn update(&self, id: i64, payload: &ShipPayload) -> Result<Ship> {
        let mut ship = self.get(id)?;
        apply_update(&mut ship, payload)?;
        self.store.update(&ship)?;
        Ok(ship)
    }

    /// Delete a ship by id.
    pub fn delete(&self, id: i64) -> Result<()> {
        if self.store.delete_by_id(id)? {
            Ok(())
        } else {
            Err(StarportError::NotFound(id))
        }
    }
}
