use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use async_trait::async_trait;
use reqwest::StatusCode;
use crate::models::coordinate::{Coordinate, SearchRequest};
use crate::models::restaurant::{LocalizedText, Photo, PlaceSummary};
use crate::models::restaurant_details::PlaceDetailsResponse;
use crate::repositories::places_repo::{PlacesProvider, ProviderError};

/// In-process provider for tests. Photo names without a registered URI fail
/// to resolve, every call is counted, and the peak number of photo lookups
/// in flight is recorded.
#[derive(Default)]
pub struct StubPlacesRepo {
    places: Vec<PlaceSummary>,
    photo_uris: HashMap<String, String>,
    details: PlaceDetailsResponse,
    fail_search: bool,
    fail_details: bool,
    photo_delay: Option<Duration>,
    search_calls: AtomicUsize,
    details_calls: AtomicUsize,
    photo_calls: AtomicUsize,
    photos_in_flight: AtomicUsize,
    peak_photos_in_flight: AtomicUsize,
}

impl StubPlacesRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_place(
        mut self,
        place: PlaceSummary,
    ) -> Self {
        self.places.push(place);
        self
    }

    pub fn with_photo(
        mut self,
        photo_name: &str,
        uri: &str,
    ) -> Self {
        self.photo_uris.insert(photo_name.to_string(), uri.to_string());
        self
    }

    pub fn with_details(
        mut self,
        details: PlaceDetailsResponse,
    ) -> Self {
        self.details = details;
        self
    }

    pub fn failing_search(mut self) -> Self {
        self.fail_search = true;
        self
    }

    pub fn failing_details(mut self) -> Self {
        self.fail_details = true;
        self
    }

    pub fn with_photo_delay(
        mut self,
        delay: Duration,
    ) -> Self {
        self.photo_delay = Some(delay);
        self
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn details_calls(&self) -> usize {
        self.details_calls.load(Ordering::SeqCst)
    }

    pub fn photo_calls(&self) -> usize {
        self.photo_calls.load(Ordering::SeqCst)
    }

    pub fn peak_photos_in_flight(&self) -> usize {
        self.peak_photos_in_flight.load(Ordering::SeqCst)
    }
}

/// A restaurant at a fixed Stockholm location with at most one photo.
pub fn stub_place(
    id: &str,
    photo_name: Option<&str>,
) -> PlaceSummary {
    PlaceSummary {
        id: id.to_string(),
        display_name: Some(LocalizedText {
            text: format!("Restaurant {}", id),
        }),
        formatted_address: Some(format!("{} Drottninggatan, Stockholm", id)),
        location: Some(Coordinate { latitude: 59.33, longitude: 18.06 }),
        website_uri: None,
        rating: Some(4.2),
        photos: photo_name
            .map(|name| vec![Photo { name: name.to_string() }])
            .unwrap_or_default(),
    }
}

fn unavailable() -> ProviderError {
    ProviderError::Status {
        status: StatusCode::SERVICE_UNAVAILABLE,
        body: "stubbed outage".to_string(),
    }
}

#[async_trait]
impl PlacesProvider for StubPlacesRepo {
    async fn search_nearby(
        &self,
        _request: &SearchRequest,
        max_result_count: u32,
    ) -> Result<Vec<PlaceSummary>, ProviderError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_search {
            return Err(unavailable());
        }

        Ok(self.places.iter().take(max_result_count as usize).cloned().collect())
    }

    async fn place_details(
        &self,
        _place_id: &str,
    ) -> Result<PlaceDetailsResponse, ProviderError> {
        self.details_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_details {
            return Err(unavailable());
        }

        Ok(self.details.clone())
    }

    async fn resolve_photo(
        &self,
        photo_name: &str,
        _max_width_px: u32,
    ) -> Result<String, ProviderError> {
        self.photo_calls.fetch_add(1, Ordering::SeqCst);
        let in_flight = self.photos_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_photos_in_flight.fetch_max(in_flight, Ordering::SeqCst);
        if let Some(delay) = self.photo_delay {
            tokio::time::sleep(delay).await;
        }
        self.photos_in_flight.fetch_sub(1, Ordering::SeqCst);

        self.photo_uris
            .get(photo_name)
            .cloned()
            .ok_or_else(unavailable)
    }
}
