//! The list/count query pipeline: filter, sort, paginate.

use std::collections::HashMap;
use std::str::FromStr;

use crate::domain::{Ship, ShipOrder};
use crate::error::{Result, StarportError};

/// Page size used when the client supplies none.
pub const DEFAULT_PAGE_SIZE: usize = 3;

/// Conjunctive filter predicates parsed from query parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShipFilter {
    /// Case-sensitive substring match on the name.
    pub name: Option<String>,
    /// Case-sensitive substring match on the planet.
    pub planet: Option<String>,
    /// Exact match on the serialized ship type.
    pub ship_type: Option<String>,
    /// Strictly-after bound on the production date, epoch millis.
    pub after: Option<i64>,
    /// Strictly-before bound on the production date, epoch millis.
    pub before: Option<i64>,
    /// Exact match on the used flag.
    pub is_used: Option<bool>,
    /// Strict lower bound on speed.
    pub min_speed: Option<f64>,
    /// Strict upper bound on speed.
    pub max_speed: Option<f64>,
    /// Strict lower bound on crew size.
    pub min_crew_size: Option<i32>,
    /// Strict upper bound on crew size.
    pub max_crew_size: Option<i32>,
    /// Strict lower bound on rating.
    pub min_rating: Option<f64>,
    /// Strict upper bound on rating.
    pub max_rating: Option<f64>,
}

impl ShipFilter {
    /// Parse filter predicates from raw query parameters.
    ///
    /// Unknown keys are ignored. `isUsed` parses the lenient way: anything
    /// but a case-insensitive "true" is false.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self> {
        let mut filter = Self::default();
        for (key, value) in params {
            match key.as_str() {
                "name" => filter.name = Some(value.clone()),
                "planet" => filter.planet = Some(value.clone()),
                "shipType" => filter.ship_type = Some(value.clone()),
                "after" => filter.after = Some(parse_param(key, value)?),
                "before" => filter.before = Some(parse_param(key, value)?),
                "isUsed" => filter.is_used = Some(value.eq_ignore_ascii_case("true")),
                "minSpeed" => filter.min_speed = Some(parse_param(key, value)?),
                "maxSpeed" => filter.max_speed = Some(parse_param(key, value)?),
                "minCrewSize" => filter.min_crew_size = Some(parse_param(key, value)?),
                "maxCrewSize" => filter.max_crew_size = Some(parse_param(key, value)?),
                "minRating" => filter.min_rating = Some(parse_param(key, value)?),
                "maxRating" => filter.max_rating = Some(parse_param(key, value)?),
                _ => {}
            }
        }
        Ok(filter)
    }

    /// Whether the ship satisfies every supplied predicate.
    pub fn matches(&self, ship: &Ship) -> bool {
        if let Some(name) = &self.name {
            if !ship.name.contains(name.as_str()) {
                return false;
            }
        }
        if let Some(planet) = &self.planet {
            if !ship.planet.contains(planet.as_str()) {
                return false;
            }
        }
        if let Some(ship_type) = &self.ship_type {
            if ship.ship_type.as_str() != ship_type {
                return false;
            }
        }
        if let Some(after) = self.after {
            if ship.prod_date <= after {
                return false;
            }
        }
        if let Some(before) = self.before {
            if ship.prod_date >= before {
                return false;
            }
        }
        if let Some(is_used) = self.is_used {
            if ship.used != is_used {
                return false;
            }
        }
        if let Some(min_speed) = self.min_speed {
            if ship.speed <= min_speed {
                return false;
            }
        }
        if let Some(max_speed) = self.max_speed {
            if ship.speed >= max_speed {
                return false;
            }
        }
        if let Some(min_crew_size) = self.min_crew_size {
            if ship.crew_size <= min_crew_size {
                return false;
            }
        }
        if let Some(max_crew_size) = self.max_crew_size {
            if ship.crew_size >= max_crew_size {
                return false;
            }
        }
        if let Some(min_rating) = self.min_rating {
            if ship.rating <= min_rating {
                return false;
            }
        }
        if let Some(max_rating) = self.max_rating {
            if ship.rating >= max_rating {
                return false;
            }
        }
        true
    }

    /// Size of the filtered set, ignoring sort and pagination.
    pub fn count(&self, ships: &[Ship]) -> usize {
        ships.iter().filter(|ship| self.matches(ship)).count()
    }
}

/// A full listing request: filter, optional order, page window.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipQuery {
    /// Filter predicates.
    pub filter: ShipFilter,
    /// Optional sort order; absent keeps store iteration order.
    pub order: Option<ShipOrder>,
    /// Zero-based page number.
    pub page_number: usize,
    /// Page length.
    pub page_size: usize,
}

impl Default for ShipQuery {
    fn default() -> Self {
        Self {
            filter: ShipFilter::default(),
            order: None,
            page_number: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ShipQuery {
    /// Parse a listing request from raw query parameters.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self> {
        let filter = ShipFilter::from_params(params)?;
        let order = params
            .get("order")
            .map(|value| ShipOrder::from_str(value))
            .transpose()?;
        let page_number = match params.get("pageNumber") {
            Some(value) => parse_param("pageNumber", value)?,
            None => 0,
        };
        let page_size = match params.get("pageSize") {
            Some(value) => parse_param("pageSize", value)?,
            None => DEFAULT_PAGE_SIZE,
        };
        Ok(Self {
            filter,
            order,
            page_number,
            page_size,
        })
    }

    /// Run the filter, sort and paginate stages over the full record set.
    pub fn select(&self, ships: Vec<Ship>) -> Vec<Ship> {
        let mut ships: Vec<Ship> = ships
            .into_iter()
            .filter(|ship| self.filter.matches(ship))
            .collect();
        if let Some(order) = self.order {
            sort_ships(&mut ships, order);
        }
        paginate(ships, self.page_number, self.page_size)
    }
}

/// Stable ascending sort by the ordered field.
pub fn sort_ships(ships: &mut [Ship], order: ShipOrder) {
    match order {
        ShipOrder::Id => ships.sort_by_key(|ship| ship.id),
        ShipOrder::Speed => ships.sort_by(|a, b| a.speed.total_cmp(&b.speed)),
        ShipOrder::Date => ships.sort_by_key(|ship| ship.prod_date),
        ShipOrder::Rating => ships.sort_by(|a, b| a.rating.total_cmp(&b.rating)),
    }
}

/// The `[pageNumber*pageSize, pageNumber*pageSize + pageSize)` window, clamped
/// to the set length; an out-of-range start yields an empty page.
pub fn paginate(ships: Vec<Ship>, page_number: usize, page_size: usize) -> Vec<Ship> {
    let start = page_number.saturating_mul(page_size);
    ships.into_iter().skip(start).take(page_size).collect()
}

fn parse_param<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| StarportError::Validation(format!("invalid {key} value: {value}")))
}
