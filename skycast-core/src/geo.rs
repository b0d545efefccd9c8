//! "Use my location": coordinates from a [`Geolocator`], then a place name
//! from a [`ReverseGeocoder`].

use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};
use tracing::{debug, info};

use crate::{
    config::{Config, GeolocationMode},
    error::LocateError,
};

pub mod bigdatacloud;
pub mod ipapi;

pub use bigdatacloud::BigDataCloudGeocoder;
pub use ipapi::IpApiGeolocator;

/// Place name used when the reverse geocoder knows neither city nor locality.
pub const UNKNOWN_PLACE: &str = "Your Location";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    async fn locate(&self) -> Result<Coordinates, LocateError>;
}

#[async_trait]
pub trait ReverseGeocoder: Send + Sync + Debug {
    async fn place_name(&self, coords: Coordinates) -> Result<String, LocateError>;
}

/// Always answers with the configured coordinates.
#[derive(Debug, Clone)]
pub struct FixedGeolocator(pub Coordinates);

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn locate(&self) -> Result<Coordinates, LocateError> {
        Ok(self.0)
    }
}

/// Stands in when location lookup is switched off.
#[derive(Debug, Clone, Default)]
pub struct UnsupportedGeolocator;

#[async_trait]
impl Geolocator for UnsupportedGeolocator {
    async fn locate(&self) -> Result<Coordinates, LocateError> {
        Err(LocateError::Unsupported)
    }
}

/// Build the geolocator selected in config.
///
/// `fixed` without both coordinates behaves like `disabled`.
pub fn geolocator_from_config(config: &Config) -> Arc<dyn Geolocator> {
    match config.geolocation.mode {
        GeolocationMode::Ip => Arc::new(IpApiGeolocator::new()),
        GeolocationMode::Fixed => match config.fixed_coordinates() {
            Some((latitude, longitude)) => Arc::new(FixedGeolocator(Coordinates {
                latitude,
                longitude,
            })),
            None => Arc::new(UnsupportedGeolocator),
        },
        GeolocationMode::Disabled => Arc::new(UnsupportedGeolocator),
    }
}

/// Locate the device and turn the position into a city name.
pub async fn current_city(
    locator: &dyn Geolocator,
    geocoder: &dyn ReverseGeocoder,
) -> Result<String, LocateError> {
    let coords = locator.locate().await?;
    debug!(lat = coords.latitude, lon = coords.longitude, "located device");

    let city = geocoder.place_name(coords).await?;
    info!(%city, "resolved current location");
    Ok(city)
}

/// First non-blank candidate, or [`UNKNOWN_PLACE`].
pub(crate) fn pick_place_name(city: Option<String>, locality: Option<String>) -> String {
    city.into_iter()
        .chain(locality)
        .map(|s| s.trim().to_string())
        .find(|s| !s.is_empty())
        .unwrap_or_else(|| UNKNOWN_PLACE.to_string())
}
