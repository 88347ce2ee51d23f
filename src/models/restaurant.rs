use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};
use crate::models::coordinate::Coordinate;

/// Envelope of the provider's nearby search. The provider omits `places`
/// entirely when nothing matched.
#[serde_as]
#[derive(Deserialize, Debug, Default)]
pub struct NearbySearchResponse {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub places: Vec<PlaceSummary>,
}

#[serde_as]
#[derive(Clone, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlaceSummary {
    #[serde(default)]
    pub id: String,
    pub display_name: Option<LocalizedText>,
    pub formatted_address: Option<String>,
    pub location: Option<Coordinate>,
    pub website_uri: Option<String>,
    pub rating: Option<f64>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub photos: Vec<Photo>,
}

#[derive(Clone, Deserialize, Debug, Default)]
pub struct LocalizedText {
    #[serde(default)]
    pub text: String,
}

/// `name` is the photo reference, e.g. `places/<id>/photos/<ref>`.
#[derive(Clone, Deserialize, Debug, Default)]
pub struct Photo {
    pub name: String,
}

#[derive(Clone, Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantInfo {
    pub id: String,
    pub name: String,
    pub address: String,
    pub coordinate: Coordinate,
    pub website_uri: String,
    pub rating: f64,
    pub image_uri: String,
}

impl PlaceSummary {
    /// Only the first reference counts; a blank one means the place has no photo.
    pub fn primary_photo(&self) -> Option<&Photo> {
        self.photos
            .first()
            .filter(|photo| !photo.name.trim().is_empty())
    }
}

impl RestaurantInfo {
    /// Returns `None` when the place cannot be shown on a card: no id,
    /// no location or no image.
    pub fn from_summary(
        place: PlaceSummary,
        image_uri: String,
    ) -> Option<Self> {
        if place.id.is_empty() || image_uri.trim().is_empty() {
            return None;
        }
        let coordinate = place.location?;

        Some(Self {
            id: place.id,
            name: place.display_name.map(|name| name.text).unwrap_or_default(),
            address: place.formatted_address.unwrap_or_default(),
            coordinate,
            website_uri: place.website_uri.unwrap_or_default(),
            rating: place.rating.unwrap_or_default(),
            image_uri,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use super::*;

    #[test]
    fn decodes_provider_payload() {
        let payload = json!({
            "places": [{
                "id": "ChIJ1",
                "displayName": {"text": "Pelikan", "languageCode": "sv"},
                "formattedAddress": "Blekingegatan 40, Stockholm",
                "location": {"latitude": 59.31, "longitude": 18.07},
                "rating": 4.4,
                "photos": [{"name": "places/ChIJ1/photos/abc", "widthPx": 4032, "heightPx": 3024}]
            }, {
                "id": "ChIJ2",
                "photos": null
            }]
        });

        let response: NearbySearchResponse = serde_json::from_value(payload).unwrap();
        assert_eq!(response.places.len(), 2);
        assert_eq!(response.places[0].primary_photo().unwrap().name, "places/ChIJ1/photos/abc");
        assert!(response.places[1].photos.is_empty());
        assert!(response.places[1].primary_photo().is_none());
    }

    #[test]
    fn blank_first_photo_is_not_replaced_by_a_later_one() {
        let place = PlaceSummary {
            id: "ChIJ6".to_string(),
            photos: vec![
                Photo { name: " ".to_string() },
                Photo { name: "places/ChIJ6/photos/second".to_string() },
            ],
            ..Default::default()
        };

        assert!(place.primary_photo().is_none());
    }

    #[test]
    fn empty_search_response_has_no_places() {
        let response: NearbySearchResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.places.is_empty());
    }

    #[test]
    fn normalizes_missing_optional_fields() {
        let place = PlaceSummary {
            id: "ChIJ3".to_string(),
            location: Some(Coordinate { latitude: 1.0, longitude: 2.0 }),
            ..Default::default()
        };

        let info = RestaurantInfo::from_summary(place, "https://img/3".to_string()).unwrap();
        assert_eq!(info.name, "");
        assert_eq!(info.address, "");
        assert_eq!(info.website_uri, "");
        assert_eq!(info.rating, 0.0);
        assert_eq!(info.image_uri, "https://img/3");
    }

    #[test]
    fn drops_places_that_cannot_be_shown() {
        let without_location = PlaceSummary {
            id: "ChIJ4".to_string(),
            ..Default::default()
        };
        assert!(RestaurantInfo::from_summary(without_location, "https://img/4".to_string()).is_none());

        let without_image = PlaceSummary {
            id: "ChIJ5".to_string(),
            location: Some(Coordinate { latitude: 1.0, longitude: 2.0 }),
            ..Default::default()
        };
        assert!(RestaurantInfo::from_summary(without_image, String::new()).is_none());
    }

    #[test]
    fn serializes_in_camel_case() {
        let info = RestaurantInfo {
            id: "ChIJ1".to_string(),
            name: "Pelikan".to_string(),
            address: "Blekingegatan 40".to_string(),
            coordinate: Coordinate { latitude: 59.31, longitude: 18.07 },
            website_uri: String::new(),
            rating: 4.4,
            image_uri: "https://img/1".to_string(),
        };

        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(value["websiteUri"], "");
        assert_eq!(value["imageUri"], "https://img/1");
        assert_eq!(value["coordinate"]["latitude"], 59.31);
    }
}
