use crate::{Config, error::FetchError, model::WeatherSnapshot};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod weatherapi;

pub use weatherapi::WeatherApiProvider;

/// Number of forecast days requested per fetch.
pub const FORECAST_DAYS: u8 = 3;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions plus [`FORECAST_DAYS`] forecast days for `city`.
    async fn forecast(&self, city: &str) -> Result<WeatherSnapshot, FetchError>;
}

/// Construct the weather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let api_key = config.api_key()?;
    Ok(Arc::new(WeatherApiProvider::new(api_key.to_owned())))
}

/// Shorten a response body for error messages and logs.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
