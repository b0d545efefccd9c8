use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::{
    error::FetchError,
    http,
    model::{Condition, CurrentConditions, ForecastDay, HourForecast, Location, WeatherSnapshot},
};

use super::{FORECAST_DAYS, WeatherProvider, truncate_body};

const WEATHERAPI_BASE: &str = "https://api.weatherapi.com";
const HOUR_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    http: Client,
    base_url: String,
}

impl WeatherApiProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, WEATHERAPI_BASE)
    }

    /// Point the provider at another host (used against mock servers).
    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            api_key,
            http: http::client(http::REQUEST_TIMEOUT),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http = http::client(timeout);
        self
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    #[instrument(skip(self), level = "debug")]
    async fn forecast(&self, city: &str) -> Result<WeatherSnapshot, FetchError> {
        let url = format!("{}/v1/forecast.json", self.base_url);
        let days = FORECAST_DAYS.to_string();

        debug!(%url, city, "requesting forecast");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", city),
                ("days", days.as_str()),
                ("aqi", "no"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<WaErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| truncate_body(&body));
            warn!(status = status.as_u16(), %message, "forecast request rejected");
            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let snapshot = parse_forecast(&body)?;
        info!(
            location = %snapshot.location.name,
            days = snapshot.days.len(),
            "forecast loaded"
        );
        Ok(snapshot)
    }
}

/// Convert a `forecast.json` body into a snapshot.
pub fn parse_forecast(body: &str) -> Result<WeatherSnapshot, FetchError> {
    let parsed: WaForecastResponse = serde_json::from_str(body)?;

    let days = parsed
        .forecast
        .forecastday
        .into_iter()
        .map(ForecastDay::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    let visibility_km = days
        .first()
        .map(|d| d.avg_visibility_km)
        .unwrap_or(parsed.current.vis_km);

    let location = Location {
        name: parsed.location.name,
        locality: locality(&parsed.location.region, &parsed.location.country),
        local_time: parsed.location.localtime,
    };

    let current = CurrentConditions {
        temperature_c: parsed.current.temp_c,
        feels_like_c: parsed.current.feelslike_c,
        condition: parsed.current.condition.into(),
        wind_kph: parsed.current.wind_kph,
        humidity_pct: parsed.current.humidity,
        visibility_km,
        pressure_mb: parsed.current.pressure_mb,
    };

    Ok(WeatherSnapshot {
        location,
        current,
        days,
    })
}

fn locality(region: &str, country: &str) -> String {
    [region, country]
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
}

fn parse_hour(time: &str) -> Result<NaiveDateTime, FetchError> {
    NaiveDateTime::parse_from_str(time, HOUR_FORMAT)
        .map_err(|e| FetchError::Malformed(format!("hour time {time:?}: {e}")))
}

#[derive(Debug, Deserialize)]
struct WaErrorResponse {
    error: WaErrorBody,
}

#[derive(Debug, Deserialize)]
struct WaErrorBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    #[serde(default)]
    region: String,
    #[serde(default)]
    country: String,
    #[serde(default)]
    localtime: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
    #[serde(default)]
    icon: String,
}

impl From<WaCondition> for Condition {
    fn from(c: WaCondition) -> Self {
        Condition {
            text: c.text,
            icon: c.icon,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    feelslike_c: f64,
    humidity: u8,
    wind_kph: f64,
    pressure_mb: f64,
    #[serde(default)]
    vis_km: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaForecastHour {
    time: String,
    temp_c: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaDay {
    maxtemp_c: f64,
    mintemp_c: f64,
    #[serde(default)]
    avgvis_km: f64,
    #[serde(default)]
    daily_chance_of_rain: u8,
    #[serde(default)]
    uv: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaAstro {
    sunrise: String,
    sunset: String,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    date: NaiveDate,
    day: WaDay,
    astro: WaAstro,
    #[serde(default)]
    hour: Vec<WaForecastHour>,
}

impl TryFrom<WaForecastDay> for ForecastDay {
    type Error = FetchError;

    fn try_from(d: WaForecastDay) -> Result<Self, Self::Error> {
        let hours = d
            .hour
            .into_iter()
            .map(|h| {
                Ok(HourForecast {
                    time: parse_hour(&h.time)?,
                    temperature_c: h.temp_c,
                    condition: h.condition.into(),
                })
            })
            .collect::<Result<Vec<_>, FetchError>>()?;

        Ok(ForecastDay {
            date: d.date,
            min_temp_c: d.day.mintemp_c,
            max_temp_c: d.day.maxtemp_c,
            chance_of_rain_pct: d.day.daily_chance_of_rain,
            condition: d.day.condition.into(),
            avg_visibility_km: d.day.avgvis_km,
            uv_index: d.day.uv,
            sunrise: d.astro.sunrise,
            sunset: d.astro.sunset,
            hours,
        })
    }
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaForecastResponse {
    location: WaLocation,
    current: WaCurrent,
    forecast: WaForecast,
}
