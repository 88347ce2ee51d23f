use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};
use crate::models::restaurant::LocalizedText;

pub const MAX_REVIEWS: usize = 3;
pub const UNKNOWN_AUTHOR: &str = "Unknown";
pub const MISSING_REVIEW_TEXT: &str = "No text available";
pub const UNKNOWN_REVIEW_TIME: &str = "Unknown time";

#[serde_as]
#[derive(Clone, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDetailsResponse {
    pub current_opening_hours: Option<OpeningHours>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub reviews: Vec<ProviderReview>,
}

#[serde_as]
#[derive(Clone, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct OpeningHours {
    pub open_now: Option<bool>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub weekday_descriptions: Vec<String>,
}

#[derive(Clone, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProviderReview {
    pub relative_publish_time_description: Option<String>,
    pub text: Option<LocalizedText>,
    pub author_attribution: Option<AuthorAttribution>,
}

#[derive(Clone, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct AuthorAttribution {
    pub display_name: Option<String>,
}

#[derive(Clone, Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantDetails {
    pub open_now: bool,
    pub opening_hours: Vec<String>,
    pub reviews: Vec<Review>,
}

#[derive(Clone, Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub author: String,
    pub text: String,
    pub relative_time: String,
}

impl From<PlaceDetailsResponse> for RestaurantDetails {
    fn from(details: PlaceDetailsResponse) -> Self {
        let (open_now, opening_hours) = match details.current_opening_hours {
            Some(hours) => (hours.open_now.unwrap_or(false), hours.weekday_descriptions),
            None => (false, Vec::new()),
        };

        Self {
            open_now,
            opening_hours,
            reviews: details
                .reviews
                .into_iter()
                .take(MAX_REVIEWS)
                .map(Review::from)
                .collect(),
        }
    }
}

impl From<ProviderReview> for Review {
    fn from(review: ProviderReview) -> Self {
        Self {
            author: or_fallback(
                review.author_attribution.and_then(|author| author.display_name),
                UNKNOWN_AUTHOR,
            ),
            text: or_fallback(review.text.map(|text| text.text), MISSING_REVIEW_TEXT),
            relative_time: or_fallback(
                review.relative_publish_time_description,
                UNKNOWN_REVIEW_TIME,
            ),
        }
    }
}

fn or_fallback(
    value: Option<String>,
    fallback: &str,
) -> String {
    value
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
