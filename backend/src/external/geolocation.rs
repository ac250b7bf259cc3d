//! IP geolocation client
//!
//! Infers the caller's country from their network address via an
//! ip-api.com style JSON endpoint. No input beyond the request itself.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::external::{LocationResolver, ResolvedLocation};

/// Geolocation API client
#[derive(Clone)]
pub struct GeoClient {
    client: Client,
    base_url: String,
}

/// ip-api.com response shape
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    country: Option<String>,
    #[serde(rename = "countryCode")]
    country_code: Option<String>,
    message: Option<String>,
}

impl GeoClient {
    /// Create a new GeoClient against the given endpoint
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }
}

#[async_trait]
impl LocationResolver for GeoClient {
    async fn resolve(&self) -> AppResult<ResolvedLocation> {
        let url = format!("{}/json", self.base_url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::warn!("Geolocation request failed: {}", e);
            AppError::LocationUnavailable
        })?;

        if !response.status().is_success() {
            tracing::warn!("Geolocation API returned {}", response.status());
            return Err(AppError::LocationUnavailable);
        }

        let data: IpApiResponse = response.json().await.map_err(|e| {
            tracing::warn!("Failed to parse geolocation response: {}", e);
            AppError::LocationUnavailable
        })?;

        if data.status != "success" {
            tracing::warn!(
                "Geolocation lookup failed: {}",
                data.message.unwrap_or_else(|| "no detail".to_string())
            );
            return Err(AppError::LocationUnavailable);
        }

        match (data.country, data.country_code) {
            (Some(country), Some(country_code)) => Ok(ResolvedLocation {
                country,
                country_code,
            }),
            _ => Err(AppError::LocationUnavailable),
        }
    }
}
