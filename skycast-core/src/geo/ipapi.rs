use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use super::{Coordinates, Geolocator};
use crate::{error::LocateError, http};

// ip-api's free tier is plain HTTP only.
const IPAPI_BASE: &str = "http://ip-api.com";

/// Approximate device position from the public IP address.
#[derive(Debug, Clone)]
pub struct IpApiGeolocator {
    http: Client,
    base_url: String,
}

impl Default for IpApiGeolocator {
    fn default() -> Self {
        Self::with_base_url(IPAPI_BASE)
    }
}

impl IpApiGeolocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            http: http::client(http::REQUEST_TIMEOUT),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

#[async_trait]
impl Geolocator for IpApiGeolocator {
    #[instrument(skip(self), level = "debug")]
    async fn locate(&self) -> Result<Coordinates, LocateError> {
        let url = format!("{}/json", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[("fields", "status,message,lat,lon")])
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(LocateError::Status(res.status().as_u16()));
        }

        let body: IpApiResponse = res.json().await?;

        match (body.status.as_str(), body.lat, body.lon) {
            ("success", Some(latitude), Some(longitude)) => Ok(Coordinates {
                latitude,
                longitude,
            }),
            _ => Err(LocateError::Denied(
                body.message.unwrap_or_else(|| "no position in response".to_string()),
            )),
        }
    }
}
