use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use super::{Coordinates, ReverseGeocoder, pick_place_name};
use crate::{error::LocateError, http};

const BIGDATACLOUD_BASE: &str = "https://api.bigdatacloud.net";

/// Reverse geocoding via BigDataCloud's free client-side endpoint (no key needed).
#[derive(Debug, Clone)]
pub struct BigDataCloudGeocoder {
    http: Client,
    base_url: String,
}

impl Default for BigDataCloudGeocoder {
    fn default() -> Self {
        Self::with_base_url(BIGDATACLOUD_BASE)
    }
}

impl BigDataCloudGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            http: http::client(http::REQUEST_TIMEOUT),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http = http::client(timeout);
        self
    }
}

#[derive(Debug, Deserialize)]
struct ReverseGeocodeResponse {
    city: Option<String>,
    locality: Option<String>,
}

#[async_trait]
impl ReverseGeocoder for BigDataCloudGeocoder {
    #[instrument(skip(self), level = "debug")]
    async fn place_name(&self, coords: Coordinates) -> Result<String, LocateError> {
        let url = format!("{}/data/reverse-geocode-client", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("latitude", coords.latitude.to_string()),
                ("longitude", coords.longitude.to_string()),
                ("localityLanguage", "en".to_string()),
            ])
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(LocateError::Status(res.status().as_u16()));
        }

        let body: ReverseGeocodeResponse = res.json().await?;
        debug!(?body, "reverse geocode response");

        Ok(pick_place_name(body.city, body.locality))
    }
}
