use axum::response::IntoResponse;
use crate::helpers::api_error::ApiError;

pub async fn page_not_found_handler() -> impl IntoResponse {
    ApiError::NotFound
}
