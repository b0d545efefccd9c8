//! Actions for the weather view
//!
//! Naming follows intent/result pairs: `WeatherFetch` asks for data,
//! `WeatherDidLoad` / `WeatherDidError` report the outcome.

use crate::model::WeatherSnapshot;

use super::state::{RequestId, Tab};

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    // ===== Weather =====
    /// Intent: fetch weather for a city (triggers async task)
    WeatherFetch(String),

    /// Result: fetch finished with data
    WeatherDidLoad {
        request: RequestId,
        snapshot: Box<WeatherSnapshot>,
    },

    /// Result: fetch failed; `message` is banner text
    WeatherDidError { request: RequestId, message: String },

    // ===== Search =====
    SearchFocus(bool),
    SearchTextChange(String),
    /// Submit the search box contents
    SearchSubmit(String),

    // ===== Location =====
    /// "Use my location"
    LocateRequest,
    LocateDidResolve(String),
    LocateDidFail(String),

    // ===== UI =====
    TabSelect(Tab),
    TabToggle,
    ErrorDismiss,

    /// One-second clock update
    ClockTick { clock: String, date: String },

    Quit,
}

impl Action {
    /// Concise form for logs; snapshots are reduced to their headline.
    pub fn summary(&self) -> String {
        match self {
            Action::WeatherDidLoad { request, snapshot } => format!(
                "WeatherDidLoad {{ request: {}, location: {:?}, temp: {:.1}°C }}",
                request.0, snapshot.location.name, snapshot.current.temperature_c
            ),
            Action::ClockTick { .. } => "ClockTick".to_string(),
            _ => format!("{self:?}"),
        }
    }
}
