use std::sync::Arc;
use std::time::Duration;
use futures::{future, stream, StreamExt};
use tracing::{debug, warn};
use crate::config::Config;
use crate::models::coordinate::SearchRequest;
use crate::models::restaurant::{PlaceSummary, RestaurantInfo};
use crate::models::restaurant_details::RestaurantDetails;
use crate::repositories::places_repo::{PlacesProvider, ProviderError};
use crate::services::details_cache::{DetailsCache, DEFAULT_DETAILS_CACHE_CAPACITY};

/// The provider accepts between 1 and 20 results per nearby search.
pub const PROVIDER_RESULT_LIMIT: u32 = 20;

#[derive(Clone, Debug)]
pub struct AggregationSettings {
    pub max_result_count: u32,
    pub photo_max_width_px: u32,
    pub photo_concurrency: usize,
    pub details_cache_ttl: Option<Duration>,
    pub details_cache_capacity: usize,
}

impl Default for AggregationSettings {
    fn default() -> Self {
        Self {
            max_result_count: 10,
            photo_max_width_px: 400,
            photo_concurrency: 4,
            details_cache_ttl: None,
            details_cache_capacity: DEFAULT_DETAILS_CACHE_CAPACITY,
        }
    }
}

impl From<&Config> for AggregationSettings {
    fn from(config: &Config) -> Self {
        Self {
            max_result_count: config.max_result_count,
            photo_max_width_px: config.photo_max_width_px,
            photo_concurrency: config.photo_concurrency,
            details_cache_ttl: match config.details_cache_ttl_secs {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
            details_cache_capacity: config.details_cache_capacity,
        }
    }
}

pub struct AggregationService {
    places_repo: Arc<dyn PlacesProvider>,
    max_result_count: u32,
    photo_max_width_px: u32,
    photo_concurrency: usize,
    details_cache: Option<DetailsCache>,
}

impl AggregationService {
    pub fn new(
        places_repo: Arc<dyn PlacesProvider>,
        settings: AggregationSettings,
    ) -> Self {
        Self {
            places_repo,
            max_result_count: settings.max_result_count.clamp(1, PROVIDER_RESULT_LIMIT),
            photo_max_width_px: settings.photo_max_width_px,
            photo_concurrency: settings.photo_concurrency.max(1),
            details_cache: settings
                .details_cache_ttl
                .map(|ttl| DetailsCache::new(ttl, settings.details_cache_capacity)),
        }
    }

    /// Searches for restaurants around the request's coordinate and resolves
    /// one image per place. Places whose image cannot be resolved are left
    /// out; the provider's ordering is kept.
    pub async fn find_nearby(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<RestaurantInfo>, ProviderError> {
        let places = self
            .places_repo
            .search_nearby(request, self.max_result_count)
            .await?;

        let restaurants = stream::iter(places.into_iter().take(self.max_result_count as usize))
            .map(|place| self.resolve_restaurant(place))
            .buffered(self.photo_concurrency)
            .filter_map(future::ready)
            .collect::<Vec<_>>()
            .await;

        Ok(restaurants)
    }

    async fn resolve_restaurant(
        &self,
        place: PlaceSummary,
    ) -> Option<RestaurantInfo> {
        let photo_name = match place.primary_photo() {
            Some(photo) => photo.name.clone(),
            None => {
                debug!("Dropping place {} as it has no photo", place.id);
                return None;
            }
        };

        match self.places_repo.resolve_photo(&photo_name, self.photo_max_width_px).await {
            Ok(image_uri) => {
                let place_id = place.id.clone();
                let restaurant = RestaurantInfo::from_summary(place, image_uri);
                if restaurant.is_none() {
                    debug!("Dropping place {} as it is missing an id, location or image", place_id);
                }
                restaurant
            }
            Err(e) => {
                warn!("Failed to resolve photo for place {}, dropping it due to: {}", place.id, e);
                None
            }
        }
    }

    pub async fn get_details(
        &self,
        place_id: &str,
    ) -> Result<RestaurantDetails, ProviderError> {
        if let Some(cache) = &self.details_cache {
            if let Some(details) = cache.get(place_id).await {
                debug!("Serving details for place {} from cache", place_id);
                return Ok(details);
            }
        }

        let details = RestaurantDetails::from(self.places_repo.place_details(place_id).await?);

        if let Some(cache) = &self.details_cache {
            cache.insert(place_id.to_string(), details.clone()).await;
        }
        Ok(details)
    }
}
