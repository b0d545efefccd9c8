use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Width of the min/max temperature span that fills the forecast bar.
pub const TEMP_SPAN_FULL_C: f64 = 20.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    /// Region and country, e.g. "Gujarat, India".
    pub locality: String,
    /// Local time at the location as reported by the provider.
    pub local_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub text: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub condition: Condition,
    pub wind_kph: f64,
    pub humidity_pct: u8,
    pub visibility_km: f64,
    pub pressure_mb: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourForecast {
    pub time: NaiveDateTime,
    pub temperature_c: f64,
    pub condition: Condition,
}

impl HourForecast {
    /// Hour label in 12-hour form, e.g. "3 PM".
    pub fn label(&self) -> String {
        self.time.format("%-I %p").to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub min_temp_c: f64,
    pub max_temp_c: f64,
    pub chance_of_rain_pct: u8,
    pub condition: Condition,
    pub avg_visibility_km: f64,
    pub uv_index: f64,
    pub sunrise: String,
    pub sunset: String,
    pub hours: Vec<HourForecast>,
}

impl ForecastDay {
    /// Short weekday name, e.g. "Mon".
    pub fn weekday_label(&self) -> String {
        self.date.format("%a").to_string()
    }

    /// Fraction of the forecast bar covered by the day's temperature span.
    pub fn temp_span_ratio(&self) -> f64 {
        ((self.max_temp_c - self.min_temp_c) / TEMP_SPAN_FULL_C).clamp(0.0, 1.0)
    }
}

/// One complete provider answer. Replaced wholesale on every successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location: Location,
    pub current: CurrentConditions,
    pub days: Vec<ForecastDay>,
}

impl WeatherSnapshot {
    pub fn today(&self) -> Option<&ForecastDay> {
        self.days.first()
    }

    pub fn condition_text(&self) -> &str {
        &self.current.condition.text
    }
}
