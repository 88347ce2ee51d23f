use std::time::Duration;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;
use tracing::debug;
use crate::config::Config;
use crate::models::coordinate::SearchRequest;
use crate::models::restaurant::{NearbySearchResponse, PlaceSummary};
use crate::models::restaurant_details::PlaceDetailsResponse;
use crate::models::restaurant_image::RestaurantImage;

pub const API_KEY_HEADER: &str = "X-Goog-Api-Key";
pub const FIELD_MASK_HEADER: &str = "X-Goog-FieldMask";

pub const NEARBY_SEARCH_FIELD_MASK: &str = "places.id,places.displayName,places.formattedAddress,\
places.location,places.websiteUri,places.rating,places.photos";
pub const PLACE_DETAILS_FIELD_MASK: &str = "currentOpeningHours,reviews";
pub const PHOTO_MEDIA_FIELD_MASK: &str = "photoUri";

pub const RESTAURANT_PLACE_TYPE: &str = "restaurant";

const ERROR_BODY_LIMIT: usize = 256;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("request to places provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("places provider responded with {status}: {body}")]
    Status {
        status: StatusCode,
        body: String,
    },

    #[error("places provider returned no photoUri")]
    MissingPhotoUri,
}

/// The three provider calls the aggregation layer depends on.
#[async_trait]
pub trait PlacesProvider: Send + Sync {
    async fn search_nearby(
        &self,
        request: &SearchRequest,
        max_result_count: u32,
    ) -> Result<Vec<PlaceSummary>, ProviderError>;

    async fn place_details(
        &self,
        place_id: &str,
    ) -> Result<PlaceDetailsResponse, ProviderError>;

    /// Resolves a photo reference into a URI the browser can load.
    async fn resolve_photo(
        &self,
        photo_name: &str,
        max_width_px: u32,
    ) -> Result<String, ProviderError>;
}

pub struct GooglePlacesRepo {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GooglePlacesRepo {
    pub fn new(
        config: &Config,
        api_key: &str,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.provider_timeout_secs))
            .build()
            .context("Failed to build the places provider http client")?;

        Ok(Self {
            client,
            base_url: config.places_base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        field_mask: &str,
    ) -> Result<T, ProviderError> {
        let response = request
            .header(API_KEY_HEADER, &self.api_key)
            .header(FIELD_MASK_HEADER, field_mask)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status,
                body: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl PlacesProvider for GooglePlacesRepo {
    async fn search_nearby(
        &self,
        request: &SearchRequest,
        max_result_count: u32,
    ) -> Result<Vec<PlaceSummary>, ProviderError> {
        let body = json!({
            "includedTypes": [RESTAURANT_PLACE_TYPE],
            "maxResultCount": max_result_count,
            "locationRestriction": {
                "circle": {
                    "center": {
                        "latitude": request.coordinate.latitude,
                        "longitude": request.coordinate.longitude,
                    },
                    "radius": request.radius_meters,
                },
            },
        });

        let url = format!("{}/places:searchNearby", self.base_url);
        let response: NearbySearchResponse = self
            .send(self.client.post(url).json(&body), NEARBY_SEARCH_FIELD_MASK)
            .await?;
        debug!("Places provider returned {} nearby places", response.places.len());

        Ok(response.places)
    }

    async fn place_details(
        &self,
        place_id: &str,
    ) -> Result<PlaceDetailsResponse, ProviderError> {
        let url = format!("{}/places/{}", self.base_url, place_id);
        self.send(self.client.get(url), PLACE_DETAILS_FIELD_MASK).await
    }

    async fn resolve_photo(
        &self,
        photo_name: &str,
        max_width_px: u32,
    ) -> Result<String, ProviderError> {
        let url = format!("{}/{}/media", self.base_url, photo_name.trim_start_matches('/'));
        let request = self
            .client
            .get(url)
            .query(&[
                ("maxWidthPx", max_width_px.to_string()),
                ("skipHttpRedirect", "true".to_string()),
            ]);

        let image: RestaurantImage = self.send(request, PHOTO_MEDIA_FIELD_MASK).await?;
        image.into_uri().ok_or(ProviderError::MissingPhotoUri)
    }
}
