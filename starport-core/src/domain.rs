//! Domain entities for the starport registry.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::StarportError;

/// Classification of a registered ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum ShipType {
    /// Passenger and cargo haulage.
    Transport,
    /// Armed fleet vessel.
    Military,
    /// Licensed trade vessel.
    Merchant,
}

impl ShipType {
    /// Wire name of the variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transport => "TRANSPORT",
            Self::Military => "MILITARY",
            Self::Merchant => "MERCHANT",
        }
    }
}

/// Sort orders accepted by the listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipOrder {
    /// Ascending by identifier.
    Id,
    /// Ascending by speed.
    Speed,
    /// Ascending by production date.
    Date,
    /// Ascending by rating.
    Rating,
}

impl FromStr for ShipOrder {
    type Err = StarportError;

    /// Case-sensitive parse; any value outside the four names is rejected.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ID" => Ok(Self::Id),
            "SPEED" => Ok(Self::Speed),
            "DATE" => Ok(Self::Date),
            "RATING" => Ok(Self::Rating),
            other => Err(StarportError::Validation(format!("unknown order: {other}"))),
        }
    }
}

/// A registered ship record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Ship {
    /// Store-assigned identifier.
    pub id: i64,
    /// Ship name, 1-50 characters.
    pub name: String,
    /// Home planet, 1-50 characters.
    pub planet: String,
    /// Ship classification.
    pub ship_type: ShipType,
    /// Production date as epoch milliseconds, UTC.
    pub prod_date: i64,
    /// Cruise speed, 0.01-0.99.
    pub speed: f64,
    /// Crew size, 1-9999.
    pub crew_size: i32,
    /// Whether the ship is second-hand.
    pub used: bool,
    /// Derived quality rating, two decimal places.
    pub rating: f64,
}

/// A validated ship awaiting an identifier from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewShip {
    /// Ship name.
    pub name: String,
    /// Home planet.
    pub planet: String,
    /// Ship classification.
    pub ship_type: ShipType,
    /// Production date as epoch milliseconds, UTC.
    pub prod_date: i64,
    /// Cruise speed.
    pub speed: f64,
    /// Crew size.
    pub crew_size: i32,
    /// Whether the ship is second-hand.
    pub used: bool,
    /// Derived quality rating.
    pub rating: f64,
}

impl NewShip {
    /// Attach the store-assigned identifier.
    pub fn with_id(self, id: i64) -> Ship {
        Ship {
            id,
            name: self.name,
            planet: self.planet,
            ship_type: self.ship_type,
            prod_date: self.prod_date,
            speed: self.speed,
            crew_size: self.crew_size,
            used: self.used,
            rating: self.rating,
        }
    }
}

/// Client-supplied ship fields for create and partial-update requests.
///
/// Absent fields deserialize to `None`. `id` and `rating` are server-managed
/// and not part of the payload, so client-sent values for them are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShipPayload {
    /// Ship name.
    pub name: Option<String>,
    /// Home planet.
    pub planet: Option<String>,
    /// Ship classification.
    pub ship_type: Option<ShipType>,
    /// Production date as epoch milliseconds, UTC.
    pub prod_date: Option<i64>,
    /// Cruise speed.
    pub speed: Option<f64>,
    /// Crew size.
    pub crew_size: Option<i32>,
    /// Whether the ship is second-hand.
    pub used: Option<bool>,
}

impl ShipPayload {
    /// Copy every supplied field onto the record; absent fields are left as-is.
    pub fn apply_to(&self, ship: &mut Ship) {
        if let Some(name) = &self.name {
            ship.name = name.clone();
        }
        if let Some(planet) = &self.planet {
            ship.planet = planet.clone();
        }
        if let Some(ship_type) = self.ship_type {
            ship.ship_type = ship_type;
        }
        if let Some(prod_date) = self.prod_date {
            ship.prod_date = prod_date;
        }
        if let Some(speed) = self.speed {
            ship.speed = speed;
        }
        if let Some(crew_size) = self.crew_size {
            ship.crew_size = crew_size;
        }
        if let Some(used) = self.used {
            ship.used = used;
        }
    }
}
