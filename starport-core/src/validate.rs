//! Field validation for create and update requests.

use crate::domain::{NewShip, Ship, ShipPayload};
use crate::error::{Result, StarportError};
use crate::rating::{compute_rating, prod_year};

const TEXT_MAX_CHARS: usize = 50;
const SPEED_MIN: f64 = 0.01;
const SPEED_MAX: f64 = 0.99;
const CREW_MIN: i32 = 1;
const CREW_MAX: i32 = 9999;
const PROD_YEAR_MIN: i32 = 2800;
const PROD_YEAR_MAX: i32 = 3019;

/// Validate a creation payload and assemble the record, deriving its rating.
///
/// Every field except `used` (which defaults to false) must be present and
/// within range.
pub fn assemble_new_ship(payload: ShipPayload) -> Result<NewShip> {
    let name = payload.name.ok_or_else(|| missing("name"))?;
    check_text("name", &name)?;
    let planet = payload.planet.ok_or_else(|| missing("planet"))?;
    check_text("planet", &planet)?;
    let ship_type = payload.ship_type.ok_or_else(|| missing("shipType"))?;
    let prod_date = payload.prod_date.ok_or_else(|| missing("prodDate"))?;
    check_prod_date(prod_date)?;
    let speed = payload.speed.ok_or_else(|| missing("speed"))?;
    check_speed(speed)?;
    let crew_size = payload.crew_size.ok_or_else(|| missing("crewSize"))?;
    check_crew_size(crew_size)?;
    let used = payload.used.unwrap_or(false);
    let rating = compute_rating(speed, used, prod_date)?;

    Ok(NewShip {
        name,
        planet,
        ship_type,
        prod_date,
        speed,
        crew_size,
        used,
        rating,
    })
}

/// Validate a creation payload: every required field present and within range.
pub fn validate_for_create(payload: &ShipPayload) -> Result<()> {
    assemble_new_ship(payload.clone()).map(|_| ())
}

/// Validate a partial-update payload: only supplied fields are checked.
///
/// `shipType` and `used` carry no range constraints; their wire-type validity
/// is enforced at the deserialization boundary.
pub fn validate_for_update(payload: &ShipPayload) -> Result<()> {
    if let Some(name) = payload.name.as_deref() {
        check_text("name", name)?;
    }
    if let Some(planet) = payload.planet.as_deref() {
        check_text("planet", planet)?;
    }
    if let Some(prod_date) = payload.prod_date {
        check_prod_date(prod_date)?;
    }
    if let Some(speed) = payload.speed {
        check_speed(speed)?;
    }
    if let Some(crew_size) = payload.crew_size {
        check_crew_size(crew_size)?;
    }
    Ok(())
}

/// Validate a partial update, overlay it onto the stored record and recompute
/// the rating from the final field values.
pub fn apply_update(ship: &mut Ship, payload: &ShipPayload) -> Result<()> {
    validate_for_update(payload)?;
    payload.apply_to(ship);
    ship.rating = compute_rating(ship.speed, ship.used, ship.prod_date)?;
    Ok(())
}

/// Parse a path identifier: a decimal digit string that is not all zeros.
pub fn parse_ship_id(raw: &str) -> Result<i64> {
    let all_digits = !raw.is_empty() && raw.bytes().all(|byte| byte.is_ascii_digit());
    if !all_digits || raw.bytes().all(|byte| byte == b'0') {
        return Err(invalid_id(raw));
    }
    raw.parse().map_err(|_| invalid_id(raw))
}

fn invalid_id(raw: &str) -> StarportError {
    StarportError::Validation(format!("invalid ship id: {raw}"))
}

fn missing(field: &str) -> StarportError {
    StarportError::Validation(format!("{field} is required"))
}

fn check_text(field: &str, value: &str) -> Result<()> {
    if value.is_empty() || value.chars().count() > TEXT_MAX_CHARS {
        return Err(StarportError::Validation(format!(
            "{field} must be 1-{TEXT_MAX_CHARS} characters"
        )));
    }
    Ok(())
}

fn check_speed(value: f64) -> Result<()> {
    if !(SPEED_MIN..=SPEED_MAX).contains(&value) {
        return Err(StarportError::Validation(format!(
            "speed must be {SPEED_MIN}-{SPEED_MAX}"
        )));
    }
    Ok(())
}

fn check_crew_size(value: i32) -> Result<()> {
    if !(CREW_MIN..=CREW_MAX).contains(&value) {
        return Err(StarportError::Validation(format!(
            "crewSize must be {CREW_MIN}-{CREW_MAX}"
        )));
    }
    Ok(())
}

fn check_prod_date(value: i64) -> Result<()> {
    if value < 0 {
        return Err(StarportError::Validation(
            "prodDate must not be negative".to_string(),
        ));
    }
    let year = prod_year(value)?;
    if !(PROD_YEAR_MIN..=PROD_YEAR_MAX).contains(&year) {
        return Err(StarportError::Validation(format!(
            "prodDate year must be {PROD_YEAR_MIN}-{PROD_YEAR_MAX}"
        )));
    }
    Ok(())
}
