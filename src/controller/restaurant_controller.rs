use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde_json::{json, Value};
use tracing::{info, warn};
use crate::controller::AppState;
use crate::helpers::api_error::ApiError;
use crate::models::coordinate::SearchRequest;
use crate::models::restaurant::RestaurantInfo;
use crate::models::restaurant_details::RestaurantDetails;

pub const WELCOME_MESSAGE: &str = "Welcome to FoodGuide API!";

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(welcome_banner))
        .route("/res", post(find_nearby_restaurants))
        .route("/res/", get(retrieve_restaurant_details_without_id))
        .route("/res/:id", get(retrieve_restaurant_details))
        .route_layer(Extension(app_state))
}

pub async fn welcome_banner() -> impl IntoResponse {
    Json(json!({ "message": WELCOME_MESSAGE }))
}

pub async fn find_nearby_restaurants(
    Extension(app_state): Extension<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> impl IntoResponse {
    let nearby_restaurants_res = search_nearby(&app_state, payload).await;

    return match nearby_restaurants_res {
        Ok(restaurants) => {
            (StatusCode::OK, Json(restaurants)).into_response()
        }
        Err(e) => {
            if e.status_code().is_server_error() {
                warn!("Something went wrong retrieving nearby restaurants due to: {}", e.detail());
            }
            e.into_response()
        }
    };
}

async fn search_nearby(
    app_state: &AppState,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Vec<RestaurantInfo>, ApiError> {
    let Json(payload) = payload.map_err(|rejection| {
        ApiError::Validation(format!("Invalid request body: {}", rejection))
    })?;
    let search_request = SearchRequest::from_payload(&payload, app_state.default_radius_meters)?;
    let aggregation_service = app_state.aggregation_service()?;

    info!(
        "Searching restaurants around ({}, {}) within {}m",
        search_request.coordinate.latitude,
        search_request.coordinate.longitude,
        search_request.radius_meters
    );
    Ok(aggregation_service.find_nearby(&search_request).await?)
}

pub async fn retrieve_restaurant_details(
    Extension(app_state): Extension<AppState>,
    Path(place_id): Path<String>,
) -> impl IntoResponse {
    let restaurant_details_res = fetch_details(&app_state, &place_id).await;

    return match restaurant_details_res {
        Ok(details) => {
            (StatusCode::OK, Json(details)).into_response()
        }
        Err(e) => {
            if e.status_code().is_server_error() {
                warn!("Something went wrong retrieving details for place {} due to: {}", place_id, e.detail());
            }
            e.into_response()
        }
    };
}

pub async fn retrieve_restaurant_details_without_id() -> impl IntoResponse {
    ApiError::Validation("Missing place id".to_string())
}

async fn fetch_details(
    app_state: &AppState,
    place_id: &str,
) -> Result<RestaurantDetails, ApiError> {
    let place_id = validate_place_id(place_id)?;
    let aggregation_service = app_state.aggregation_service()?;

    Ok(aggregation_service.get_details(place_id).await?)
}

/// Place ids are opaque, but they are spliced into the provider's URL path.
fn validate_place_id(place_id: &str) -> Result<&str, ApiError> {
    let place_id = place_id.trim();
    if place_id.is_empty() {
        return Err(ApiError::Validation("Missing place id".to_string()));
    }
    if place_id.contains(['/', '?', '#']) {
        return Err(ApiError::Validation(format!("Malformed place id: {}", place_id)));
    }

    Ok(place_id)
}
