//! Core library for the `skycast` weather viewer.
//!
//! This crate defines:
//! - Configuration & API key handling
//! - The weatherapi.com provider and the location lookup services
//! - Shared domain models (location, conditions, forecast days)
//! - The view state machine (store, reducer, effects) and condition themes
//!
//! It has no terminal dependencies; `skycast-tui` renders and drives it.

pub mod config;
pub mod error;
pub mod geo;
pub mod http;
pub mod model;
pub mod provider;
pub mod theme;
pub mod view;

pub use config::{Config, GeolocationConfig, GeolocationMode};
pub use error::{FetchError, LocateError};
pub use model::{Condition, CurrentConditions, ForecastDay, HourForecast, Location, WeatherSnapshot};
pub use provider::{WeatherProvider, provider_from_config};
pub use theme::{Theme, weather_gradient};
