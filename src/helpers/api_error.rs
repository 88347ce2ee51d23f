use std::error::Error as _;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use crate::repositories::places_repo::ProviderError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("API key not configured")]
    Configuration,

    #[error("{0}")]
    Validation(String),

    #[error("An error occurred while fetching data")]
    ProviderUnavailable(#[from] ProviderError),

    #[error("Oops looks like you landed at the wrong endpoint")]
    NotFound,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Configuration => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::ProviderUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Configuration => "CONFIGURATION_ERROR",
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::ProviderUnavailable(_) => "PROVIDER_UNAVAILABLE",
            ApiError::NotFound => "NOT_FOUND",
        }
    }

    /// Message for the logs, including the underlying cause when there is one.
    pub fn detail(&self) -> String {
        match self.source() {
            Some(source) => format!("{}: {}", self, source),
            None => self.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            Json(json!({
                "error": self.to_string(),
                "code": self.code(),
            })),
        ).into_response()
    }
}
