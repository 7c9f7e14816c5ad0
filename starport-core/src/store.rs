//! Store capability and the in-memory implementation.

use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::{NewShip, Ship};
use crate::error::{Result, StarportError};

/// Persistence capability required by the registry.
#[cfg_attr(test, mockall::automock)]
pub trait ShipStore: Send + Sync {
    /// All records, in insertion order.
    fn find_all(&self) -> Result<Vec<Ship>>;
    /// Look up a single record.
    fn find_by_id(&self, id: i64) -> Result<Option<Ship>>;
    /// Persist a new record, assigning the next identifier.
    fn insert(&self, ship: NewShip) -> Result<Ship>;
    /// Replace the stored record with the same id, keeping its position.
    fn update(&self, ship: &Ship) -> Result<()>;
    /// Remove a record; false when the id was absent.
    fn delete_by_id(&self, id: i64) -> Result<bool>;
}

/// In-memory ship store with insertion-order iteration.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    inner: Arc<RwLock<StoreState>>,
}

#[derive(Debug, Default)]
struct StoreState {
    next_id: i64,
    ships: Vec<Ship>,
}

impl MemoryStore {
    /// Create an empty store; the first inserted ship gets id 1.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ShipStore for MemoryStore {
    fn find_all(&self) -> Result<Vec<Ship>> {
        let state = self.inner.read().map_err(poisoned)?;
        Ok(state.ships.clone())
    }

    fn find_by_id(&self, id: i64) -> Result<Option<Ship>> {
        let state = self.inner.read().map_err(poisoned)?;
        Ok(state.ships.iter().find(|ship| ship.id == id).cloned())
    }

    fn insert(&self, ship: NewShip) -> Result<Ship> {
        let mut state = self.inner.write().map_err(poisoned)?;
        state.next_id += 1;
        let ship = ship.with_id(state.next_id);
        state.ships.push(ship.clone());
        Ok(ship)
    }

    fn update(&self, ship: &Ship) -> Result<()> {
        let mut state = self.inner.write().map_err(poisoned)?;
        match state.ships.iter_mut().find(|stored| stored.id == ship.id) {
            Some(stored) => {
                *stored = ship.clone();
                Ok(())
            }
            None => Err(StarportError::NotFound(ship.id)),
        }
    }

    fn delete_by_id(&self, id: i64) -> Result<bool> {
        let mut state = self.inner.write().map_err(poisoned)?;
        let before = state.ships.len();
        state.ships.retain(|ship| ship.id != id);
        Ok(state.ships.len() < before)
    }
}

fn poisoned<T>(_: PoisonError<T>) -> StarportError {
    StarportError::Store("ship store lock poisoned".to_string())
}
