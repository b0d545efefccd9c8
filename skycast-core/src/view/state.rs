//! View state - single source of truth for the weather screen.
//!
//! Components read `&ViewState`; only the reducer mutates it.

use chrono::{DateTime, TimeZone};

use crate::model::WeatherSnapshot;
use crate::theme::{Theme, weather_gradient};

/// Identifies one weather fetch. Results carrying an older id are dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Today,
    Week,
}

impl Tab {
    pub fn label(&self) -> &'static str {
        match self {
            Tab::Today => "Today",
            // Provider returns three days; the label is kept as-is.
            Tab::Week => "7-Day Forecast",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            Tab::Today => Tab::Week,
            Tab::Week => Tab::Today,
        }
    }

    pub const ALL: [Tab; 2] = [Tab::Today, Tab::Week];
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
    /// City chosen on startup or by search.
    pub city: String,

    /// City used when location lookup fails.
    pub fallback_city: String,

    /// Last successful snapshot (None = nothing loaded yet).
    pub weather: Option<WeatherSnapshot>,

    pub is_loading: bool,

    /// Banner text for the last failed fetch.
    pub error: Option<String>,

    /// Set when a fetch failed after `weather` was loaded.
    pub stale: bool,

    pub tab: Tab,

    /// Search box contents.
    pub search_text: String,
    pub search_focused: bool,

    /// Location lookup in progress.
    pub locating: bool,

    /// Clock strings refreshed by the one-second tick.
    pub clock: String,
    pub date: String,

    /// Spinner frame counter.
    pub tick_count: u32,

    /// Fetch whose result will be accepted.
    pub in_flight: Option<RequestId>,

    next_request: u64,
}

impl ViewState {
    pub fn new(city: impl Into<String>, fallback_city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            fallback_city: fallback_city.into(),
            weather: None,
            is_loading: true,
            error: None,
            stale: false,
            tab: Tab::default(),
            search_text: String::new(),
            search_focused: false,
            locating: false,
            clock: String::new(),
            date: String::new(),
            tick_count: 0,
            in_flight: None,
            next_request: 0,
        }
    }

    /// Allocate the id for a new fetch and mark it as the accepted one.
    pub(crate) fn begin_request(&mut self) -> RequestId {
        self.next_request += 1;
        let id = RequestId(self.next_request);
        self.in_flight = Some(id);
        id
    }

    /// The loading placeholder replaces the card while loading or before any data.
    pub fn shows_placeholder(&self) -> bool {
        self.is_loading || self.weather.is_none()
    }

    pub fn theme(&self) -> Theme {
        self.weather
            .as_ref()
            .map(|w| weather_gradient(w.condition_text()))
            .unwrap_or(Theme::Default)
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_CITY, crate::config::DEFAULT_CITY)
    }
}

/// Clock line, e.g. "2:05:09 PM".
pub fn clock_text<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("%-I:%M:%S %p").to_string().to_uppercase()
}

/// Date line, e.g. "1/6/2025".
pub fn date_text<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("%-d/%-m/%Y").to_string()
}
