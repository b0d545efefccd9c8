//! Effects - side effects declared by the reducer
//!
//! The reducer stays pure; the runtime turns effects into async tasks whose
//! results come back as actions.

use super::state::RequestId;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch the forecast for `city`; the result must carry `request`.
    FetchWeather { request: RequestId, city: String },

    /// Locate the device and reverse-geocode it to a city name.
    Locate,

    /// Drop a location lookup that a newer fetch made irrelevant.
    CancelLocate,
}
