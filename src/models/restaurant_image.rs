use serde::Deserialize;

/// Body of the media endpoint when called with `skipHttpRedirect=true`.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantImage {
    pub photo_uri: Option<String>,
}

impl RestaurantImage {
    pub fn into_uri(self) -> Option<String> {
        self.photo_uri.filter(|uri| !uri.trim().is_empty())
    }
}
