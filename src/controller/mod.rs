use std::net::SocketAddr;
use std::sync::Arc;
use anyhow::Context;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};
use crate::config::Config;
use crate::helpers::api_error::ApiError;
use crate::helpers::handler_404::page_not_found_handler;
use crate::repositories::places_repo::GooglePlacesRepo;
use crate::services::aggregation_service::{AggregationService, AggregationSettings};

pub mod health_check;
pub mod restaurant_controller;

#[derive(Clone)]
pub struct AppState {
    /// `None` when no API key is configured
    pub aggregation_service: Option<Arc<AggregationService>>,
    pub default_radius_meters: f64,
}

impl AppState {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let aggregation_service = match config.api_key() {
            Some(api_key) => {
                let places_repo = GooglePlacesRepo::new(config, api_key)?;
                Some(Arc::new(AggregationService::new(
                    Arc::new(places_repo),
                    AggregationSettings::from(config),
                )))
            }
            None => {
                warn!("GOOGLE_API_KEY is not set, restaurant endpoints will report a configuration error");
                None
            }
        };

        Ok(Self {
            aggregation_service,
            default_radius_meters: config.default_radius_meters,
        })
    }

    pub fn aggregation_service(&self) -> Result<&AggregationService, ApiError> {
        self.aggregation_service
            .as_deref()
            .ok_or(ApiError::Configuration)
    }
}

pub async fn serve(
    app_state: AppState,
    config: &Config,
) -> anyhow::Result<()> {
    let application = router_endpoints(app_state)
        .layer(
            ServiceBuilder::new()
                .layer(cors_layer(&config.origin_urls)?)
                .layer(CompressionLayer::new())
        );

    let address = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("API server listening on: {}", address);
    axum::Server::bind(&address)
        .serve(application.into_make_service())
        .await
        .context("Error spinning up the API server")
}

pub fn router_endpoints(app_state: AppState) -> Router {
    health_check::router(app_state.clone())
        .nest("/api", restaurant_controller::router(app_state))
        .fallback(page_not_found_handler)
}

fn cors_layer(origin_urls: &str) -> anyhow::Result<CorsLayer> {
    let allow_origin = if origin_urls.trim() == "*" {
        AllowOrigin::any()
    } else {
        let origins = origin_urls
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .with_context(|| format!("Invalid CORS origin: {}", origin))
            })
            .collect::<anyhow::Result<Vec<HeaderValue>>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_origin(allow_origin)
        .allow_headers([CONTENT_TYPE]))
}
