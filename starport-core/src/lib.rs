#![deny(missing_docs)]
//! Starport core library.
//!
//! Domain types, validation, rating derivation and the query pipeline behind
//! the starport ship-registry service.

pub mod domain;
pub mod error;
pub mod query;
pub mod rating;
pub mod registry;
pub mod store;
pub mod validate;

pub use domain::{NewShip, Ship, ShipOrder, ShipPayload, ShipType};
pub use error::{Result, StarportError};
pub use query::{DEFAULT_PAGE_SIZE, ShipFilter, ShipQuery, paginate, sort_ships};
pub use rating::{CURRENT_YEAR, compute_rating, prod_year, round2};
pub use registry::Registry;
pub use store::{MemoryStore, ShipStore};
pub use validate::{
    apply_update, assemble_new_ship, parse_ship_id, validate_for_create, validate_for_update,
};
