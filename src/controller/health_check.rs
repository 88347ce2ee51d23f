use axum::extract::Extension;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use crate::controller::AppState;

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(get_health_check))
        .route_layer(Extension(app_state))
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: &'static str,
    pub provider_configured: bool,
}

/// Always 200 while the process is up; `providerConfigured` tells whether
/// restaurant endpoints can actually reach the provider.
async fn get_health_check(
    Extension(app_state): Extension<AppState>,
) -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok",
        provider_configured: app_state.aggregation_service.is_some(),
    })
}
