use jiff::Timestamp;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateUrlRequest {
    pub original_url: String,
}

#[derive(Debug, Serialize)]
pub struct CreateUrlResponse {
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
}

#[derive(Debug, Serialize)]
pub struct GetUrlResponse {
    pub original_url: String,
    pub short_code: String,
    pub created_at: Timestamp,
}

/// One element of the `GET /api/url` array.
#[derive(Debug, Serialize)]
pub struct ListedUrl {
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
