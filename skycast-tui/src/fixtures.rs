//! Snapshot builders shared by the binary's tests.

use chrono::{NaiveDate, NaiveDateTime};
use skycast_core::{
    Condition, CurrentConditions, ForecastDay, HourForecast, Location, WeatherSnapshot,
};

pub fn condition(text: &str) -> Condition {
    Condition {
        text: text.to_string(),
        icon: String::new(),
    }
}

pub fn day(date: &str, min: f64, max: f64) -> ForecastDay {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
    let hours = [9, 15]
        .into_iter()
        .map(|h| HourForecast {
            time: NaiveDateTime::new(date, chrono::NaiveTime::from_hms_opt(h, 0, 0).unwrap()),
            temperature_c: min + f64::from(h) / 3.0,
            condition: condition("Partly cloudy"),
        })
        .collect();

    ForecastDay {
        date,
        min_temp_c: min,
        max_temp_c: max,
        chance_of_rain_pct: 40,
        condition: condition("Patchy rain possible"),
        avg_visibility_km: 9.0,
        uv_index: 7.0,
        sunrise: "05:58 AM".into(),
        sunset: "07:20 PM".into(),
        hours,
    }
}

pub fn snapshot(city: &str, condition_text: &str) -> WeatherSnapshot {
    WeatherSnapshot {
        location: Location {
            name: city.to_string(),
            locality: "Gujarat, India".into(),
            local_time: "2025-06-01 14:05".into(),
        },
        current: CurrentConditions {
            temperature_c: 31.0,
            feels_like_c: 35.2,
            condition: condition(condition_text),
            wind_kph: 14.4,
            humidity_pct: 62,
            visibility_km: 9.0,
            pressure_mb: 1004.0,
        },
        days: vec![
            day("2025-06-01", 27.0, 35.0),
            day("2025-06-02", 26.0, 46.0),
            day("2025-06-03", 28.0, 28.0),
        ],
    }
}
