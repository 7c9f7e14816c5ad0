//! HTTP handlers for the starport server.

use std::collections::HashMap;

use actix_web::{HttpResponse, Responder, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use starport_core::{
    MemoryStore, Registry, Ship, ShipFilter, ShipPayload, ShipQuery, StarportError, parse_ship_id,
};

use crate::openapi::ApiDoc;

#[derive(Clone)]
/// Shared application state for handlers.
pub struct AppState {
    /// Ship registry backed by the in-memory store.
    pub registry: Registry<MemoryStore>,
}

impl AppState {
    /// State over a fresh, empty store.
    pub fn new() -> Self {
        Self {
            registry: Registry::new(MemoryStore::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Error response payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub message: String,
}

fn error_response(err: StarportError) -> HttpResponse {
    let message = err.to_string();
    match err {
        StarportError::Validation(_) => HttpResponse::BadRequest().json(ErrorResponse { message }),
        StarportError::NotFound(_) => HttpResponse::NotFound().json(ErrorResponse { message }),
        StarportError::Store(_) => {
            HttpResponse::InternalServerError().json(ErrorResponse { message })
        }
    }
}

#[utoipa::path(
    get,
    path = "/ships",
    responses(
        (status = 200, description = "Page of matching ships", body = [Ship]),
        (status = 400, description = "Invalid query parameter", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[get("/api/ships")]
/// List ships matching the query, sorted and paginated.
pub async fn list_ships(
    state: web::Data<AppState>,
    params: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let query = match ShipQuery::from_params(&params) {
        Ok(query) => query,
        Err(err) => return error_response(err),
    };
    match state.registry.list(&query) {
        Ok(ships) => HttpResponse::Ok().json(ships),
        Err(err) => error_response(err),
    }
}

#[utoipa::path(
    get,
    path = "/ships/count",
    responses(
        (status = 200, description = "Filtered ship count", body = usize),
        (status = 400, description = "Invalid query parameter", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[get("/api/ships/count")]
/// Count ships matching the filter.
pub async fn count_ships(
    state: web::Data<AppState>,
    params: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let filter = match ShipFilter::from_params(&params) {
        Ok(filter) => filter,
        Err(err) => return error_response(err),
    };
    match state.registry.count(&filter) {
        Ok(count) => HttpResponse::Ok().json(count),
        Err(err) => error_response(err),
    }
}

#[utoipa::path(
    post,
    path = "/ships",
    request_body = ShipPayload,
    responses(
        (status = 200, description = "Created ship", body = Ship),
        (status = 400, description = "Invalid ship fields", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[post("/api/ships")]
/// Register a new ship.
pub async fn create_ship(
    state: web::Data<AppState>,
    payload: web::Json<ShipPayload>,
) -> impl Responder {
    match state.registry.create(payload.into_inner()) {
        Ok(ship) => HttpResponse::Ok().json(ship),
        Err(err) => error_response(err),
    }
}

#[utoipa::path(
    get,
    path = "/ships/{id}",
    params(
        ("id" = String, Path, description = "Ship identifier")
    ),
    responses(
        (status = 200, description = "Ship record", body = Ship),
        (status = 400, description = "Malformed identifier", body = ErrorResponse),
        (status = 404, description = "Ship not found", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[get("/api/ships/{id}")]
/// Fetch a single ship.
pub async fn get_ship(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = match parse_ship_id(&path) {
        Ok(id) => id,
        Err(err) => return error_response(err),
    };
    match state.registry.get(id) {
        Ok(ship) => HttpResponse::Ok().json(ship),
        Err(err) => error_response(err),
    }
}

#[utoipa::path(
    post,
    path = "/ships/{id}",
    params(
        ("id" = String, Path, description = "Ship identifier")
    ),
    request_body = ShipPayload,
    responses(
        (status = 200, description = "Updated ship", body = Ship),
        (status = 400, description = "Malformed identifier or fields", body = ErrorResponse),
        (status = 404, description = "Ship not found", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[post("/api/ships/{id}")]
/// Apply a partial update to a ship and recompute its rating.
pub async fn update_ship(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<ShipPayload>,
) -> impl Responder {
    let id = match parse_ship_id(&path) {
        Ok(id) => id,
        Err(err) => return error_response(err),
    };
    match state.registry.update(id, &payload) {
        Ok(ship) => HttpResponse::Ok().json(ship),
        Err(err) => error_response(err),
    }
}

#[utoipa::path(
    delete,
    path = "/ships/{id}",
    params(
        ("id" = String, Path, description = "Ship identifier")
    ),
    responses(
        (status = 200, description = "Ship deleted"),
        (status = 400, description = "Malformed identifier", body = ErrorResponse),
        (status = 404, description = "Ship not found", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[delete("/api/ships/{id}")]
/// Remove a ship from the registry.
pub async fn delete_ship(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = match parse_ship_id(&path) {
        Ok(id) => id,
        Err(err) => return error_response(err),
    };
    match state.registry.delete(id) {
        Ok(()) => HttpResponse::Ok().finish(),
        Err(err) => error_response(err),
    }
}

#[utoipa::path(
    get,
    path = "/openapi.json",
    responses(
        (status = 200, description = "OpenAPI document", body = serde_json::Value)
    ),
    tag = "system"
)]
#[get("/api/openapi.json")]
/// Serve the OpenAPI document.
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test};
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use starport_core::ShipType;

    fn year_millis(year: i32) -> i64 {
        Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0)
            .single()
            .expect("valid date")
            .timestamp_millis()
    }

    fn test_state() -> web::Data<AppState> {
        web::Data::new(AppState::new())
    }

    fn payload(name: &str, speed: f64, prod_year: i32) -> ShipPayload {
        ShipPayload {
            name: Some(name.to_string()),
            planet: Some("Mars".to_string()),
            ship_type: Some(ShipType::Military),
            prod_date: Some(year_millis(prod_year)),
            speed: Some(speed),
            crew_size: Some(100),
            used: None,
        }
    }

    macro_rules! init_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data($state.clone())
                    .service(list_ships)
                    .service(count_ships)
                    .service(create_ship)
                    .service(get_ship)
                    .service(update_ship)
                    .service(delete_ship)
                    .service(openapi_json),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn create_returns_stored_ship_with_id_and_rating() {
        let state = test_state();
        let app = init_app!(state);

        let req = test::TestRequest::post()
            .uri("/api/ships")
            .set_json(payload("Eagle", 0.5, 3000))
            .to_request();
        let ship: Ship = test::call_and_read_body_json(&app, req).await;

        assert_eq!(ship.id, 1);
        assert_eq!(ship.name, "Eagle");
        assert_eq!(ship.rating, 2.0);
        assert!(!ship.used);
    }

    #[actix_web::test]
    async fn create_rejects_missing_and_out_of_range_fields() {
        let state = test_state();
        let app = init_app!(state);

        let mut missing = payload("Eagle", 0.5, 3000);
        missing.planet = None;
        let req = test::TestRequest::post()
            .uri("/api/ships")
            .set_json(missing)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/api/ships")
            .set_json(payload("Eagle", 1.0, 3000))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn create_rejects_wrong_wire_types_at_the_boundary() {
        let state = test_state();
        let app = init_app!(state);

        let req = test::TestRequest::post()
            .uri("/api/ships")
            .set_json(json!({
                "name": "Eagle",
                "planet": "Mars",
                "shipType": "CRUISER",
                "prodDate": 32503680000000i64,
                "speed": 0.5,
                "crewSize": 100
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn get_distinguishes_bad_ids_from_missing_ships() {
        let state = test_state();
        let app = init_app!(state);

        for uri in ["/api/ships/0", "/api/ships/00", "/api/ships/abc"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
        }

        let req = test::TestRequest::get().uri("/api/ships/7").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn get_returns_created_ship() {
        let state = test_state();
        let created = state
            .registry
            .create(payload("Eagle", 0.5, 3000))
            .expect("create");
        let app = init_app!(state);

        let req = test::TestRequest::get()
            .uri(&format!("/api/ships/{}", created.id))
            .to_request();
        let ship: Ship = test::call_and_read_body_json(&app, req).await;

        assert_eq!(ship, created);
    }

    #[actix_web::test]
    async fn update_applies_partial_body_and_recomputes_rating() {
        let state = test_state();
        let created = state
            .registry
            .create(payload("Eagle", 0.5, 3000))
            .expect("create");
        let app = init_app!(state);

        let req = test::TestRequest::post()
            .uri(&format!("/api/ships/{}", created.id))
            .set_json(json!({"speed": 0.2}))
            .to_request();
        let ship: Ship = test::call_and_read_body_json(&app, req).await;

        assert_eq!(ship.speed, 0.2);
        assert_eq!(ship.rating, 0.8);
        assert_eq!(ship.name, "Eagle");
        assert_eq!(ship.crew_size, 100);
    }

    #[actix_web::test]
    async fn update_of_missing_ship_is_not_found_even_with_bad_body() {
        let state = test_state();
        let app = init_app!(state);

        let req = test::TestRequest::post()
            .uri("/api/ships/9")
            .set_json(json!({"speed": 5.0}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn update_rejects_invalid_fields_on_existing_ship() {
        let state = test_state();
        let created = state
            .registry
            .create(payload("Eagle", 0.5, 3000))
            .expect("create");
        let app = init_app!(state);

        let req = test::TestRequest::post()
            .uri(&format!("/api/ships/{}", created.id))
            .set_json(json!({"name": ""}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn delete_removes_the_ship_once() {
        let state = test_state();
        let created = state
            .registry
            .create(payload("Eagle", 0.5, 3000))
            .expect("create");
        let app = init_app!(state);

        let uri = format!("/api/ships/{}", created.id);
        let req = test::TestRequest::delete().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::delete().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::delete().uri("/api/ships/0").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn list_filters_sorts_and_paginates() {
        let state = test_state();
        for (name, speed) in [("Eagle", 0.5), ("Falcon", 0.9), ("Raven", 0.2), ("Owl", 0.7)] {
            state
                .registry
                .create(payload(name, speed, 3000))
                .expect("create");
        }
        let app = init_app!(state);

        let req = test::TestRequest::get().uri("/api/ships").to_request();
        let page: Vec<Ship> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(page.len(), 3);
        assert_eq!(page[0].name, "Eagle");

        let req = test::TestRequest::get()
            .uri("/api/ships?order=SPEED&pageSize=2&pageNumber=1")
            .to_request();
        let page: Vec<Ship> = test::call_and_read_body_json(&app, req).await;
        let names: Vec<&str> = page.iter().map(|ship| ship.name.as_str()).collect();
        assert_eq!(names, vec!["Owl", "Falcon"]);

        let req = test::TestRequest::get()
            .uri("/api/ships?name=a&minSpeed=0.5&pageSize=10")
            .to_request();
        let page: Vec<Ship> = test::call_and_read_body_json(&app, req).await;
        let names: Vec<&str> = page.iter().map(|ship| ship.name.as_str()).collect();
        assert_eq!(names, vec!["Falcon"]);

        let req = test::TestRequest::get()
            .uri("/api/ships?pageNumber=99")
            .to_request();
        let page: Vec<Ship> = test::call_and_read_body_json(&app, req).await;
        assert!(page.is_empty());
    }

    #[actix_web::test]
    async fn list_rejects_unknown_order_and_bad_paging() {
        let state = test_state();
        let app = init_app!(state);

        for uri in [
            "/api/ships?order=speed",
            "/api/ships?pageNumber=-1",
            "/api/ships?minSpeed=fast",
        ] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
        }
    }

    #[actix_web::test]
    async fn count_returns_filtered_size_ignoring_pagination() {
        let state = test_state();
        for (name, speed) in [("Eagle", 0.5), ("Falcon", 0.9), ("Raven", 0.2), ("Owl", 0.7)] {
            state
                .registry
                .create(payload(name, speed, 3000))
                .expect("create");
        }
        let app = init_app!(state);

        let req = test::TestRequest::get().uri("/api/ships/count").to_request();
        let count: usize = test::call_and_read_body_json(&app, req).await;
        assert_eq!(count, 4);

        let req = test::TestRequest::get()
            .uri("/api/ships/count?minSpeed=0.5&pageSize=1")
            .to_request();
        let count: usize = test::call_and_read_body_json(&app, req).await;
        assert_eq!(count, 2);

        let req = test::TestRequest::get()
            .uri("/api/ships/count?minSpeed=0.5&maxSpeed=0.5")
            .to_request();
        let count: usize = test::call_and_read_body_json(&app, req).await;
        assert_eq!(count, 0);
    }

    #[actix_web::test]
    async fn used_ship_rating_is_halved() {
        let state = test_state();
        let app = init_app!(state);

        let mut body = payload("Eagle", 0.5, 3019);
        body.used = Some(true);
        let req = test::TestRequest::post()
            .uri("/api/ships")
            .set_json(body)
            .to_request();
        let ship: Ship = test::call_and_read_body_json(&app, req).await;

        assert!(ship.used);
        assert_eq!(ship.rating, 20.0);
    }

    #[actix_web::test]
    async fn openapi_json_serves_the_document() {
        let state = test_state();
        let app = init_app!(state);

        let req = test::TestRequest::get().uri("/api/openapi.json").to_request();
        let doc: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert!(doc["paths"]["/ships"].is_object());
    }
}
